// src/specs/faculty.rs
//! Scraping *spec* for the faculty directory.
//!
//! The catalog lists one faculty member per `<p>`, as a line of prose:
//!
//! ```text
//! Doe, Jane, Associate Professor, Computer Science, College of Engineering and Computing. PhD, MIT, 2004.
//! ```
//!
//! Field order is loose (title and department are often fused, the college
//! may be missing), so the parser works sentence by sentence and falls back
//! to weaker rules when the stronger ones find nothing.
//!
//! Responsibilities:
//! - Locate the college's section of the page (anchor container → `WordSection` divs → whole page).
//! - Turn each paragraph into a [`FacultyRecord`], matching departments against the catalogue.
//!
//! Non-Responsibilities:
//! - **No ids, no CSV.** Numbering and persistence live in `file` / `runner`.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use crate::config::consts::{CONTAINER_SUFFIX, PREVIEW_CHARS, WORD_SECTION_PREFIX};
use crate::config::options::UnmatchedDepartment;
use crate::core::html::{find_all, find_by_id, has_class_prefix, inline_text};
use crate::core::sanitize::preview;
use crate::departments::Departments;
use crate::progress::Progress;

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("static regex"));

const COLLEGE_MARKER: &str = "College of";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacultyRecord {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub department: String,
    pub department_id: String,
    pub college: String,
    pub academic_history: String,
}

/* ---------- entry parsing ---------- */

/// Split prose into sentences at `. X` (X an ASCII capital, which starts the
/// next sentence) and at a final `.`. Pieces are trimmed; empties dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0usize;
    let mut from = 0usize;

    while let Some(off) = text[from..].find('.') {
        let dot = from + off;
        let rest = &text[dot + 1..];
        let after_ws = rest.trim_start();
        let ws_len = rest.len() - after_ws.len();

        if ws_len > 0 && after_ws.starts_with(|c: char| c.is_ascii_uppercase()) {
            pieces.push(&text[start..dot]);
            start = dot + 1 + ws_len;
        } else if after_ws.is_empty() {
            pieces.push(&text[start..dot]);
            start = dot + 1;
        }
        from = dot + 1;
    }
    pieces.push(&text[start..]);

    pieces.into_iter().map(str::trim).filter(|s| !s.is_empty()).collect()
}

fn comma_count(s: &str) -> usize {
    s.matches(',').count()
}

/// Pick the sentence carrying `Last, First, ...`.
/// Candidates are non-history sentences with two or more commas, or the first
/// sentence when there are none. A `College of` sentence wins; otherwise the
/// one with the most commas.
fn main_sentence<'a>(sentences: &[&'a str], history: &mut Vec<&'a str>) -> Option<&'a str> {
    let mut candidates = Vec::new();
    for &s in sentences {
        if YEAR.is_match(s) {
            history.push(s);
        } else if comma_count(s) >= 2 {
            candidates.push(s);
        }
    }
    if candidates.is_empty() {
        candidates.extend(sentences.first().copied());
    }

    if let Some(&c) = candidates.iter().find(|c| c.contains(COLLEGE_MARKER)) {
        return Some(c);
    }
    // max_by_key keeps the last maximum; iterate in reverse to keep the first.
    candidates.into_iter().rev().max_by_key(|c| comma_count(c))
}

/// Parse one directory entry. `None` if no `Last, First, ...` line is found.
pub fn parse_faculty_entry(
    text: &str,
    departments: &Departments,
    unmatched: UnmatchedDepartment,
) -> Option<FacultyRecord> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return None;
    }

    let mut history = Vec::new();
    let main = main_sentence(&sentences, &mut history)?;

    let fields: Vec<&str> = main.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }
    let last_name = fields[0];
    let first_name = fields[1];

    let college_idx = (2..fields.len()).find(|&i| fields[i].contains(COLLEGE_MARKER));
    let college = college_idx.map(|i| fields[i]).unwrap_or("");
    let middle = &fields[2..college_idx.unwrap_or(fields.len())];

    // Title fields run up to the first one that names a department.
    let mut title_parts: Vec<&str> = Vec::new();
    let mut department = "";
    let mut department_id = None;
    for &field in middle {
        if let Some(id) = departments.fuzzy_match(field) {
            department_id = Some(id);
            department = field;
            break;
        }
        title_parts.push(field);
    }

    if department_id.is_none() && !middle.is_empty() {
        match unmatched {
            UnmatchedDepartment::Empty => department = "",
            UnmatchedDepartment::KeepRaw => {
                if let [head @ .., tail] = middle
                    && !head.is_empty()
                {
                    title_parts = head.to_vec();
                    department = *tail;
                } else {
                    title_parts = middle.to_vec();
                    department = "";
                }
            }
        }
    }

    let title = if !title_parts.is_empty() {
        title_parts.join(", ")
    } else {
        s!(middle.first().copied().unwrap_or(""))
    };

    Some(FacultyRecord {
        full_name: join!(last_name, ", ", first_name),
        first_name: s!(first_name),
        last_name: s!(last_name),
        title,
        department: s!(department),
        department_id: s!(department_id.unwrap_or("")),
        college: s!(college),
        academic_history: history.join(". "),
    })
}

/* ---------- page scraping ---------- */

fn word_sections<'a>(root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    find_all(root, "div")
        .filter(|d| has_class_prefix(*d, WORD_SECTION_PREFIX))
        .collect()
}

/// Blocks of the page to read paragraphs from.
///
/// With an anchor: the `<anchor>container` element (or the anchor element
/// itself), narrowed to its `WordSection` divs when it has any. Without one,
/// or when neither id exists: every `WordSection` div on the page, and as a
/// last resort the whole document.
pub fn locate_sections<'a>(
    doc: &'a Html,
    anchor: Option<&str>,
    progress: &mut dyn Progress,
) -> Vec<ElementRef<'a>> {
    let mut target = None;

    if let Some(anchor) = anchor {
        let container_id = join!(anchor, CONTAINER_SUFFIX);
        progress.log(&format!("Looking for container with ID: {container_id}"));

        if let Some(c) = find_by_id(doc, &container_id) {
            progress.log(&format!("Found college container: {container_id}"));
            target = Some(c);
        } else if let Some(c) = find_by_id(doc, anchor) {
            progress.log(&format!("Found college section: {anchor}"));
            target = Some(c);
        } else {
            warn!("Could not find container '{container_id}' or anchor '{anchor}'");
        }
    }

    if let Some(container) = target {
        let sections = word_sections(container);
        if sections.is_empty() {
            progress.log("  No WordSection divs, scraping container directly");
            return vec![container];
        }
        progress.log(&format!("  Found {} WordSection divs inside container", sections.len()));
        return sections;
    }

    warn!("Falling back to scraping ALL WordSection divs on page; this may include faculty from other colleges");
    let sections = word_sections(doc.root_element());
    if sections.is_empty() {
        progress.log("  No WordSection divs found, scraping entire page");
        return vec![doc.root_element()];
    }
    progress.log(&format!("  Found {} WordSection divs total", sections.len()));
    sections
}

/// Parse every faculty paragraph of `html`. Paragraphs that do not parse are
/// reported to `progress` and skipped.
pub fn scrape_document(
    html: &str,
    anchor: Option<&str>,
    departments: &Departments,
    unmatched: UnmatchedDepartment,
    progress: &mut dyn Progress,
) -> Vec<FacultyRecord> {
    let doc = Html::parse_document(html);
    let sections = locate_sections(&doc, anchor, progress);

    let mut out = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        let paragraphs: Vec<ElementRef<'_>> = find_all(*section, "p").collect();
        progress.log(&format!("  Section {}: found {} paragraphs", i + 1, paragraphs.len()));
        progress.begin(paragraphs.len());

        for p in paragraphs {
            let text = inline_text(p);
            if text.is_empty() {
                continue;
            }
            match parse_faculty_entry(&text, departments, unmatched) {
                Some(rec) => {
                    debug!(name = %rec.full_name, "parsed faculty entry");
                    out.push(rec);
                    progress.item_done();
                }
                None => {
                    let head = preview(&text, PREVIEW_CHARS);
                    warn!("Could not parse: {head}...");
                    progress.item_failed(head);
                }
            }
        }
    }

    progress.finish();
    out
}
