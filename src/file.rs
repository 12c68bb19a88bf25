// src/file.rs
// CSV exports. The dialect matches the files the department already keeps:
// comma separated, minimal quoting, CRLF line ends.

use std::fs::{self, File, OpenOptions};
use std::ops::Range;
use std::path::Path;

use serde::Serialize;

use crate::config::consts::{FACULTY_ID_PREFIX, GRANT_ID_PREFIX};
use crate::error::{Error, Result};
use crate::ids::format_id;
use crate::specs::faculty::FacultyRecord;
use crate::specs::grants::GrantRecord;

#[derive(Serialize)]
struct FacultyRow<'a> {
    faculty_id: String,
    full_name: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    title: &'a str,
    department: &'a str,
    department_id: &'a str,
    college: &'a str,
    academic_history: &'a str,
}

impl<'a> FacultyRow<'a> {
    fn new(faculty_id: String, r: &'a FacultyRecord) -> Self {
        Self {
            faculty_id,
            full_name: &r.full_name,
            first_name: &r.first_name,
            last_name: &r.last_name,
            title: &r.title,
            department: &r.department,
            department_id: &r.department_id,
            college: &r.college,
            academic_history: &r.academic_history,
        }
    }
}

#[derive(Serialize)]
struct GrantRow<'a> {
    grant_id: String,
    funding: Option<u64>,
    sponsor: &'a str,
    awardee: &'a str,
    title: &'a str,
    date: String,
    is_anticipated: &'static str,
    department_id: &'static str,
    capabilities_id: &'static str,
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

fn writer(file: File, headers: bool) -> csv::Writer<File> {
    csv::WriterBuilder::new()
        .has_headers(headers)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file)
}

/// Append faculty rows to `path`, numbering from `start_id`. A new file gets a
/// header; an existing one is appended to as-is. Returns the ids written
/// (empty for an empty batch).
pub fn append_faculty(
    path: &Path,
    records: &[FacultyRecord],
    start_id: u64,
) -> Result<Range<u64>> {
    let end = start_id
        .checked_add(records.len() as u64)
        .ok_or_else(|| Error::IdOverflow { prefix: s!(FACULTY_ID_PREFIX), last: start_id })?;
    ensure_parent(path)?;
    let exists = path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut w = writer(file, !exists);

    for (n, rec) in (start_id..end).zip(records) {
        w.serialize(FacultyRow::new(format_id(FACULTY_ID_PREFIX, n), rec))?;
    }
    w.flush()?;

    Ok(start_id..end)
}

/// Overwrite `path` with one row per awardee. Ids `G00001…` run over rows.
/// Returns the number of rows written.
pub fn write_grants(path: &Path, grants: &[GrantRecord]) -> Result<usize> {
    ensure_parent(path)?;
    let mut w = writer(File::create(path)?, true);

    let mut n = 0u64;
    for g in grants {
        let date = g.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        let awardees: Vec<&str> = if g.awardees.is_empty() {
            vec![""]
        } else {
            g.awardees.iter().map(String::as_str).collect()
        };

        for awardee in awardees {
            n += 1;
            w.serialize(GrantRow {
                grant_id: format_id(GRANT_ID_PREFIX, n),
                funding: g.funding,
                sponsor: &g.sponsor,
                awardee,
                title: &g.title,
                date: date.clone(),
                is_anticipated: if g.is_anticipated { "True" } else { "False" },
                department_id: "",
                capabilities_id: "",
            })?;
        }
    }
    w.flush()?;
    Ok(n as usize)
}
