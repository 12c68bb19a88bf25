// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::error::{Error, Result};

/// What to put in the `department` column when no department matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmatchedDepartment {
    /// Leave it blank.
    #[default]
    Empty,
    /// Keep the last title-ish field as raw text for manual review.
    KeepRaw,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacultyOptions {
    /// Page to fetch. The fragment selects the college section.
    pub url: String,
    /// Parse a saved copy of the page instead of fetching `url`.
    pub input: Option<PathBuf>,
    pub departments: PathBuf,
    pub out: PathBuf,
    pub unmatched: UnmatchedDepartment,
}

impl Default for FacultyOptions {
    fn default() -> Self {
        Self {
            url: s!(FACULTY_URL),
            input: None,
            departments: PathBuf::from(DEPARTMENTS_FILE),
            out: PathBuf::from(FACULTY_OUT_FILE),
            unmatched: UnmatchedDepartment::default(),
        }
    }
}

impl FacultyOptions {
    /// Fragment of the target URL, if any (`...#collegeofsciencetext` → `collegeofsciencetext`).
    pub fn anchor(&self) -> Option<&str> {
        self.url
            .split_once('#')
            .map(|(_, a)| a)
            .filter(|a| !a.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantsOptions {
    /// Saved copy of the grants page.
    pub input: PathBuf,
    pub out: PathBuf,
}

impl GrantsOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), out: PathBuf::from(GRANTS_OUT_FILE) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSource {
    pub table: String,
    pub csv: PathBuf,
}

impl TableSource {
    /// Parse `name=path`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (table, path) = spec
            .split_once('=')
            .ok_or_else(|| Error::TableSpec(s!(spec)))?;
        let table = table.trim();
        let path = path.trim();
        if table.is_empty() || path.is_empty() {
            return Err(Error::TableSpec(s!(spec)));
        }
        Ok(Self { table: s!(table), csv: PathBuf::from(path) })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOptions {
    pub database: PathBuf,
    pub tables: Vec<TableSource>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DATABASE_FILE),
            tables: DEFAULT_IMPORT_TABLES
                .iter()
                .map(|(t, p)| TableSource { table: s!(*t), csv: PathBuf::from(*p) })
                .collect(),
        }
    }
}
