// src/store.rs
// Relational store: CSV exports loaded into SQLite tables, one table per file,
// replaced wholesale on every import.

use std::path::Path;

use rusqlite::{Connection, params_from_iter, types::Value};
use tracing::{debug, info};

use crate::error::Result;

/// Column affinity inferred from a CSV column's non-empty cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// `True`/`False` in any case; stored as 0/1.
    Boolean,
    Integer,
    Real,
    Text,
}

impl ColumnKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Boolean | ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text => "TEXT",
        }
    }

    /// Narrowest kind that holds every value. Integer columns with gaps widen
    /// to Real; an all-empty column is Real (all NULL).
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let (mut any_empty, mut seen) = (false, false);
        let (mut all_bool, mut all_int, mut all_num) = (true, true, true);

        for v in values {
            let v = v.trim();
            if v.is_empty() {
                any_empty = true;
                continue;
            }
            seen = true;
            all_bool &= parse_bool(v).is_some();
            all_int &= v.parse::<i64>().is_ok();
            all_num &= v.parse::<f64>().is_ok();
        }

        if !seen {
            ColumnKind::Real
        } else if all_bool {
            ColumnKind::Boolean
        } else if all_int && !any_empty {
            ColumnKind::Integer
        } else if all_num {
            ColumnKind::Real
        } else {
            ColumnKind::Text
        }
    }

    fn to_value(self, raw: &str) -> Value {
        let v = raw.trim();
        if v.is_empty() {
            return Value::Null;
        }
        match self {
            ColumnKind::Boolean => parse_bool(v).map_or(Value::Null, |b| Value::Integer(b as i64)),
            ColumnKind::Integer => v.parse().map_or(Value::Null, Value::Integer),
            ColumnKind::Real => v.parse().map_or(Value::Null, Value::Real),
            ColumnKind::Text => Value::Text(s!(raw)),
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    if v.eq_ignore_ascii_case("true") {
        Some(true)
    } else if v.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn quote_ident(name: &str) -> String {
    join!("\"", &name.replace('"', "\"\""), "\"")
}

pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    Ok(conn)
}

/// Replace `table` with the contents of `csv_path`. Returns the row count.
pub fn import_csv(conn: &mut Connection, table: &str, csv_path: &Path) -> Result<usize> {
    let mut rdr = csv::Reader::from_path(csv_path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let rows = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|c| ColumnKind::infer(rows.iter().map(|r| r.get(c).unwrap_or(""))))
        .collect();
    debug!(table, ?kinds, "inferred column types");

    let columns = headers
        .iter()
        .zip(&kinds)
        .map(|(h, k)| format!("{} {}", quote_ident(h), k.sql_type()))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; headers.len()].join(", ");
    let table_q = quote_ident(table);

    let tx = conn.transaction()?;
    tx.execute(&format!("DROP TABLE IF EXISTS {table_q}"), [])?;
    tx.execute(&format!("CREATE TABLE {table_q} ({columns})"), [])?;
    {
        let mut insert = tx.prepare(&format!("INSERT INTO {table_q} VALUES ({placeholders})"))?;
        for row in &rows {
            let values = kinds
                .iter()
                .enumerate()
                .map(|(c, k)| k.to_value(row.get(c).unwrap_or("")));
            insert.execute(params_from_iter(values))?;
        }
    }
    tx.commit()?;

    info!("Imported {} rows into {table} from {}", rows.len(), csv_path.display());
    Ok(rows.len())
}
