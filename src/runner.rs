// src/runner.rs
// Top-level batch jobs. Each reads its inputs, runs one spec, writes one output
// and returns a summary; frontends only format the summary.

use std::fs;
use std::ops::Range;
use std::path::PathBuf;

use tracing::info;

use crate::config::consts::{FACULTY_ID_COLUMN, FACULTY_ID_PREFIX};
use crate::config::options::{FacultyOptions, GrantsOptions, ImportOptions};
use crate::core::net;
use crate::departments::Departments;
use crate::error::Result;
use crate::ids::{format_id, next_id};
use crate::progress::{NullProgress, Progress, or_null};
use crate::specs::{faculty, grants};
use crate::{file, store};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacultySummary {
    pub scraped: usize,
    /// Entries tagged with a department id.
    pub matched: usize,
    /// Numbers assigned in this run; empty when nothing was written.
    pub ids: Range<u64>,
    pub out: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantsSummary {
    pub grants: usize,
    /// CSV rows, one per awardee.
    pub rows: usize,
    pub out: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// `(table, rows)` in import order.
    pub tables: Vec<(String, usize)>,
}

/// Scrape the faculty directory and append new rows to the faculty export.
pub fn run_faculty(
    opts: &FacultyOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<FacultySummary> {
    let mut null = NullProgress;
    let progress = or_null(progress, &mut null);

    progress.log(&format!("Loading departments from: {}", opts.departments.display()));
    let departments = Departments::load(&opts.departments);
    progress.log(&format!("Loaded {} departments for matching", departments.len()));

    let start_id = next_id(&opts.out, FACULTY_ID_COLUMN, FACULTY_ID_PREFIX);
    progress.log(&format!("Starting faculty ID: {}", format_id(FACULTY_ID_PREFIX, start_id)));

    let html = match &opts.input {
        Some(path) => {
            progress.log(&format!("Reading faculty data from file: {}", path.display()));
            fs::read_to_string(path)?
        }
        None => {
            progress.log(&format!("Fetching faculty data from: {}", opts.url));
            net::http_get(&opts.url)?
        }
    };

    let records = faculty::scrape_document(&html, opts.anchor(), &departments, opts.unmatched, progress);
    progress.log(&format!("Successfully parsed {} faculty entries", records.len()));

    let mut summary = FacultySummary {
        scraped: records.len(),
        matched: 0,
        ids: start_id..start_id,
        out: opts.out.clone(),
    };
    if records.is_empty() {
        progress.log("No faculty data scraped. Exiting.");
        return Ok(summary);
    }

    summary.matched = records.iter().filter(|r| !r.department_id.is_empty()).count();
    progress.log(&format!(
        "Department matching: {}/{} faculty matched to departments",
        summary.matched, summary.scraped
    ));

    summary.ids = file::append_faculty(&opts.out, &records, start_id)?;
    info!("Saved {} faculty entries to {}", records.len(), opts.out.display());
    progress.log(&format!(
        "Faculty IDs: {} to {}",
        format_id(FACULTY_ID_PREFIX, summary.ids.start),
        format_id(FACULTY_ID_PREFIX, summary.ids.end - 1)
    ));
    Ok(summary)
}

/// Parse a saved grants page and rewrite the grants export.
pub fn run_grants(
    opts: &GrantsOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<GrantsSummary> {
    let mut null = NullProgress;
    let progress = or_null(progress, &mut null);

    progress.log(&format!("Reading grants data from file: {}", opts.input.display()));
    let html = grants::read_grants_file(&opts.input)?;
    progress.log(&format!("  File size: {} characters", html.chars().count()));

    let parsed = grants::parse_html(&html, progress);
    progress.log(&format!("Successfully parsed {} grant entries", parsed.len()));

    let mut summary = GrantsSummary { grants: parsed.len(), rows: 0, out: opts.out.clone() };
    if parsed.is_empty() {
        progress.log("No grants data scraped. Exiting.");
        return Ok(summary);
    }

    summary.rows = file::write_grants(&opts.out, &parsed)?;
    info!("Saved {} grant records to {}", summary.rows, opts.out.display());
    progress.log(&format!(
        "  (From {} unique grants with multiple awardees expanded)",
        summary.grants
    ));
    Ok(summary)
}

/// Load each configured CSV into its table, replacing what was there.
pub fn run_import(
    opts: &ImportOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<ImportSummary> {
    let mut null = NullProgress;
    let progress = or_null(progress, &mut null);

    let mut conn = store::open_database(&opts.database)?;
    progress.begin(opts.tables.len());

    let mut summary = ImportSummary::default();
    for src in &opts.tables {
        progress.log(&format!("Importing {} into table {}", src.csv.display(), src.table));
        let rows = store::import_csv(&mut conn, &src.table, &src.csv)?;
        progress.item_done();
        summary.tables.push((src.table.clone(), rows));
    }

    progress.finish();
    Ok(summary)
}
