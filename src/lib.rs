// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod specs;

pub mod departments;
pub mod file;
pub mod ids;
pub mod progress;
pub mod runner;
pub mod store;

pub use error::{Error, Result};
