// src/ids.rs
// Sequential record ids: a letter prefix and a zero-padded counter (F00001, G00042).

use std::path::Path;

use tracing::warn;

use crate::config::consts::ID_WIDTH;
use crate::error::{Error, Result};

pub fn format_id(prefix: &str, number: u64) -> String {
    format!("{prefix}{number:0width$}", width = ID_WIDTH)
}

pub fn parse_id(prefix: &str, id: &str) -> Result<u64> {
    let invalid = || Error::InvalidId { id: s!(id), prefix: s!(prefix) };
    let digits = id.trim().strip_prefix(prefix).ok_or_else(invalid)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse().map_err(|_| invalid())
}

/// Next free number for `column` in an existing CSV export.
/// A missing or empty file starts at 1. So does an unreadable one, with a warning,
/// so that a damaged export never blocks a run.
pub fn next_id(path: &Path, column: &str, prefix: &str) -> u64 {
    if !path.exists() {
        return 1;
    }
    match max_id(path, column, prefix) {
        Ok(Some(max)) => max.checked_add(1).unwrap_or_else(|| {
            warn!("Highest id in {} is {}; restarting at 1", path.display(), format_id(prefix, max));
            1
        }),
        Ok(None) => 1,
        Err(e) => {
            warn!("Could not read existing CSV {}: {e}", path.display());
            1
        }
    }
}

fn max_id(path: &Path, column: &str, prefix: &str) -> Result<Option<u64>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let col = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::MissingColumn { column: s!(column), path: path.to_path_buf() })?;

    let mut max = None;
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(col).unwrap_or("");
        let n = parse_id(prefix, id)?;
        max = Some(max.map_or(n, |m: u64| m.max(n)));
    }
    Ok(max)
}
