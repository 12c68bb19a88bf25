// src/departments.rs
// Department catalogue (`department_id,department_name`) and the loose
// name matching used to tag faculty entries.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{error, warn};

use crate::error::Result;

#[derive(Debug, Deserialize)]
struct DepartmentRow {
    #[serde(default)]
    department_id: String,
    #[serde(default)]
    department_name: String,
}

/// Department name → id, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Departments {
    by_name: IndexMap<String, String>,
}

impl Departments {
    /// Load the catalogue. A missing file only disables matching.
    pub fn load(path: &Path) -> Self {
        let mut deps = Self::default();
        if !path.exists() {
            warn!("{} not found. Department matching will be skipped.", path.display());
            return deps;
        }
        if let Err(e) = deps.read_into(path) {
            error!("Error loading departments: {e}");
        }
        deps
    }

    fn read_into(&mut self, path: &Path) -> Result<()> {
        let mut rdr = csv::Reader::from_path(path)?;
        for row in rdr.deserialize::<DepartmentRow>() {
            let row = row?;
            self.insert(&row.department_name, &row.department_id);
        }
        Ok(())
    }

    /// Add one department; blank names or ids are ignored.
    pub fn insert(&mut self, name: &str, id: &str) {
        let (name, id) = (name.trim(), id.trim());
        if !name.is_empty() && !id.is_empty() {
            self.by_name.insert(s!(name), s!(id));
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Case-insensitive match of free text against department names.
    /// Exact equality wins; otherwise the first name that contains the text
    /// or is contained in it.
    pub fn fuzzy_match(&self, text: &str) -> Option<&str> {
        if text.is_empty() || self.by_name.is_empty() {
            return None;
        }
        let needle = text.trim().to_lowercase();

        let exact = self
            .by_name
            .iter()
            .find(|(name, _)| name.to_lowercase() == needle);
        if let Some((_, id)) = exact {
            return Some(id.as_str());
        }

        self.by_name
            .iter()
            .find(|(name, _)| {
                let name = name.to_lowercase();
                name.contains(&needle) || needle.contains(&name)
            })
            .map(|(_, id)| id.as_str())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Departments {
    /// Build from `(name, id)` pairs.
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut deps = Self::default();
        for (name, id) in iter {
            deps.insert(name, id);
        }
        deps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> Departments {
        [
            ("Computer Science", "D001"),
            ("Electrical and Computer Engineering", "D002"),
            ("Bioengineering", "D003"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(sample().fuzzy_match("computer science"), Some("D001"));
    }

    #[test]
    fn exact_beats_earlier_partial() {
        let deps: Departments = [("Engineering", "D1"), ("Bioengineering", "D2")].into_iter().collect();
        assert_eq!(deps.fuzzy_match("bioengineering"), Some("D2"));
    }

    #[test]
    fn partial_match_either_direction() {
        let deps = sample();
        assert_eq!(deps.fuzzy_match("Department of Computer Science"), Some("D001"));
        assert_eq!(deps.fuzzy_match("Electrical"), Some("D002"));
        assert_eq!(deps.fuzzy_match("Professor"), None);
        assert_eq!(deps.fuzzy_match(""), None);
        assert_eq!(Departments::default().fuzzy_match("Computer Science"), None);
    }

    #[test]
    fn blank_rows_are_skipped_and_duplicates_keep_position() {
        let deps: Departments = [("A", "1"), (" ", "2"), ("B", ""), ("A", "3")].into_iter().collect();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps.fuzzy_match("a"), Some("3"));
    }

    #[test]
    fn load_reads_csv_and_tolerates_missing_file() {
        let dir = std::env::temp_dir().join("cec_departments");
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join("departments.csv");
        fs::write(&p, "department_id,department_name\nD001, Computer Science \nD002,\n").unwrap();
        let deps = Departments::load(&p);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps.fuzzy_match("Computer Science"), Some("D001"));

        assert!(Departments::load(&dir.join("nope.csv")).is_empty());
    }

    #[test]
    fn load_keeps_rows_before_a_bad_record() {
        let dir = std::env::temp_dir().join("cec_departments");
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join("ragged.csv");
        fs::write(&p, "department_id,department_name\nD001,Computer Science\nBROKEN\nD002,Bioengineering\n").unwrap();
        let deps = Departments::load(&p);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps.fuzzy_match("Computer Science"), Some("D001"));
        assert_eq!(deps.fuzzy_match("Bioengineering"), None);
    }
}
