// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::consts::*;
use crate::config::options::{
    FacultyOptions, GrantsOptions, ImportOptions, TableSource, UnmatchedDepartment,
};
use crate::error::Error;
use crate::progress::Progress;
use crate::runner;

#[derive(Debug, Parser)]
#[command(name = "cec_scrape", version, about = "Scrape CEC faculty and grants pages into CSV, then load CSV into SQLite")]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scrape the faculty directory and append to the faculty CSV.
    Faculty(FacultyArgs),
    /// Parse a saved grants page into the grants CSV.
    Grants(GrantsArgs),
    /// Load CSV files into SQLite tables, replacing them.
    Import(ImportArgs),
}

#[derive(Debug, Args)]
struct FacultyArgs {
    /// Directory page; the #fragment picks the college section.
    #[arg(long, default_value = FACULTY_URL)]
    url: String,
    /// Parse a saved HTML file instead of fetching the URL.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
    #[arg(long, default_value = DEPARTMENTS_FILE, value_name = "CSV")]
    departments: PathBuf,
    #[arg(short, long, default_value = FACULTY_OUT_FILE, value_name = "CSV")]
    out: PathBuf,
    /// Keep unmatched department text instead of leaving it blank.
    #[arg(long)]
    keep_unmatched: bool,
}

#[derive(Debug, Args)]
struct GrantsArgs {
    /// Grants page saved from a browser (Save Page As, HTML only).
    #[arg(value_name = "FILE")]
    input: PathBuf,
    #[arg(short, long, default_value = GRANTS_OUT_FILE, value_name = "CSV")]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct ImportArgs {
    #[arg(long, default_value = DATABASE_FILE, value_name = "PATH")]
    db: PathBuf,
    /// `name=path` pair; repeat for several tables. Replaces the default set.
    #[arg(long = "table", value_name = "NAME=CSV", value_parser = parse_table)]
    tables: Vec<TableSource>,
}

fn parse_table(s: &str) -> Result<TableSource, Error> {
    TableSource::parse(s)
}

impl From<FacultyArgs> for FacultyOptions {
    fn from(a: FacultyArgs) -> Self {
        Self {
            url: a.url,
            input: a.input,
            departments: a.departments,
            out: a.out,
            unmatched: if a.keep_unmatched { UnmatchedDepartment::KeepRaw } else { UnmatchedDepartment::Empty },
        }
    }
}

impl From<ImportArgs> for ImportOptions {
    fn from(a: ImportArgs) -> Self {
        let mut opts = ImportOptions { database: a.db, ..Default::default() };
        if !a.tables.is_empty() {
            opts.tables = a.tables;
        }
        opts
    }
}

/// Prints status lines to stdout; tracing output stays on stderr.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        // Called once per section; keep a running total.
        self.total += total;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self) {
        self.done += 1;
    }

    fn item_failed(&mut self, _preview: &str) {
        // Already logged as a warning with the preview.
        self.failed += 1;
    }

    fn finish(&mut self) {
        if self.failed > 0 {
            println!(
                "{} parsed, {} could not be parsed ({} candidates)",
                self.done, self.failed, self.total
            );
        }
    }
}

fn banner(title: &str) {
    let rule = "=".repeat(70);
    println!("{rule}\n{title}\n{rule}");
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);

    let mut progress = ConsoleProgress::default();
    match cli.command {
        Command::Faculty(args) => {
            banner("CEC Faculty Scraper");
            let opts = FacultyOptions::from(args);
            let summary = runner::run_faculty(&opts, Some(&mut progress))?;
            if !summary.ids.is_empty() {
                println!("\nAppended {} faculty entries to {}", summary.ids.end - summary.ids.start, summary.out.display());
            }
        }
        Command::Grants(args) => {
            banner("CEC Grants Scraper");
            let opts = GrantsOptions { input: args.input, out: args.out };
            let summary = runner::run_grants(&opts, Some(&mut progress))?;
            if summary.rows > 0 {
                println!("\nWrote {} rows to {}", summary.rows, summary.out.display());
            }
        }
        Command::Import(args) => {
            banner("CSV to SQLite Import");
            let opts = ImportOptions::from(args);
            let summary = runner::run_import(&opts, Some(&mut progress))?;
            for (table, rows) in &summary.tables {
                println!("  {table}: {rows} rows");
            }
            println!("Database: {}", opts.database.display());
        }
    }
    Ok(())
}
