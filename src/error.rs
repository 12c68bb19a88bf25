// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid record id {id:?} (expected prefix {prefix:?})")]
    InvalidId { id: String, prefix: String },

    #[error("Column {column:?} not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("File not found: {}\n{hint}", path.display())]
    MissingInput { path: PathBuf, hint: String },

    #[error("Path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Id counter for prefix {prefix:?} exhausted (next would follow {last})")]
    IdOverflow { prefix: String, last: u64 },

    #[error("Invalid table spec {0:?} (expected name=path)")]
    TableSpec(String),
}
