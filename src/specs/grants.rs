// src/specs/grants.rs
//! Scraping *spec* for the grants listing.
//!
//! The page is a run of `<p>` blocks separated by `<hr>`. Two layouts occur:
//!
//! ```text
//! (2023-)   <strong>Kai Zeng receives funding from NSF for Secure Radios.</strong>
//!           Anticipated funding: $100,000
//!           January 12, 2026
//!
//! (-2023)   Bo Han, Parth Pathak, and Lap Fai Yu received funding from ONR for "Edge AI." Grant total: $1.5M.
//!           March 3, 2023
//! ```
//!
//! Paragraphs are grouped into entries (a bold "receive" line opens one) and
//! each entry is parsed on its own.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;
use tracing::{debug, warn};

use crate::config::consts::GRANTS_PAGE_URL;
use crate::core::html::{contains_tag, find_all, has_class, text_lines};
use crate::error::{Error, Result};
use crate::progress::Progress;

static RECEIVES_FUNDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)receive[sd]?\s+funding\s+from").expect("static regex")
});

static DETAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(.+?)\s+receive[sd]?\s+funding\s+from\s+(.+?)(?:\s+for\s+(.+?))?(?:\s*(?:Anticipated funding|Grant total|Award amount|Award))?\.?\s*$",
    )
    .expect("static regex")
});

static TITLE_AMOUNT_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)[."']?\s*(?:Anticipated funding|Grant total|Award amount|Award)[:\s]+\$.*$"#)
        .expect("static regex")
});

static INLINE_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Grant total|Anticipated funding|Award amount)[:\s]+\$\s*([\d,]+)").expect("static regex")
});

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s*([\d,]+(?:\.\d+)?)\s*([MmKk])?").expect("static regex")
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("static regex"));

/// Full month name, day, comma, whitespace, four-digit year.
static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}$",
    )
    .expect("static regex")
});

/// Paragraph classes used by the page's editors for grant text.
const CONTENT_CLASSES: &[&str] = &["MsoNormal", "p1", "p2"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrantRecord {
    pub awardees: Vec<String>,
    pub sponsor: String,
    pub title: String,
    pub funding: Option<u64>,
    pub is_anticipated: bool,
    pub date: Option<NaiveDate>,
}

/* ---------- field parsers ---------- */

/// `"January 12, 2026"` → 2026-01-12. Abbreviated months, short years and
/// `"March 3,2023"` are rejected; chrono alone would accept them.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !DATE_SHAPE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%B %d, %Y").ok()
}

/// Amount and anticipated flag from text like `"Anticipated funding: $1,500"`
/// or `"Grant total: $1.5M"`.
pub fn parse_funding_amount(text: &str) -> (Option<u64>, bool) {
    let is_anticipated = text.to_lowercase().contains("anticipated");

    let Some(caps) = AMOUNT.captures(text) else {
        return (None, is_anticipated);
    };
    let digits = caps[1].replace(',', "");
    let Ok(mut amount) = digits.parse::<f64>() else {
        warn!("Could not parse amount '{digits}'");
        return (None, is_anticipated);
    };

    match caps.get(2).map(|m| m.as_str()) {
        Some("M" | "m") => amount *= 1_000_000.0,
        Some("K" | "k") => amount *= 1_000.0,
        _ => {}
    }
    // Truncate like an integer cast; amounts are never negative.
    (Some(amount as u64), is_anticipated)
}

/// `"Bo Han, Parth Pathak, and Lap Fai Yu"` → three names.
pub fn parse_awardees(text: &str) -> Vec<String> {
    text.replace(" and ", ", ")
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty() && !n.eq_ignore_ascii_case("and"))
        .map(str::to_string)
        .collect()
}

fn clean_title(raw: &str) -> String {
    let t = TITLE_AMOUNT_TAIL.replace_all(raw, "");
    let t = t.trim().trim_matches('"').trim_matches('\'').trim_end_matches('.');
    s!(t.trim())
}

/// Line carrying "X receive(s/d) funding from Y [for Z]". Lines that also
/// name a title (`for`) are preferred.
fn detail_line<'a>(lines: &[&'a str]) -> Option<&'a str> {
    lines
        .iter()
        .find(|l| RECEIVES_FUNDING.is_match(l) && l.to_lowercase().contains(" for "))
        .or_else(|| lines.iter().find(|l| RECEIVES_FUNDING.is_match(l)))
        .copied()
}

fn find_funding(detail: &str, lines: &[&str]) -> (Option<u64>, bool) {
    if let Some(m) = INLINE_AMOUNT.find(detail) {
        return parse_funding_amount(m.as_str());
    }

    let mut found = (None, false);
    for line in lines {
        let lower = line.to_lowercase();
        let mentions = lower.contains("funding") || lower.contains("award") || lower.contains("grant");
        if line.contains('$') && mentions {
            found = parse_funding_amount(line);
            if found.0.is_some_and(|n| n != 0) {
                break;
            }
        }
    }
    found
}

/// Last line that reads as a date, skipping amount lines.
fn find_date(lines: &[&str]) -> Option<NaiveDate> {
    lines
        .iter()
        .rev()
        .filter(|l| !l.contains('$') && !l.to_lowercase().contains("funding"))
        .find_map(|l| {
            let d = parse_date(l.trim_end_matches('.'));
            if d.is_none() {
                debug!("not a date: {l:?}");
            }
            d
        })
}

/// Parse one grant entry (its paragraph lines joined by `\n`).
pub fn parse_grant_entry(entry: &str) -> Option<GrantRecord> {
    let lines: Vec<&str> = entry.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if lines.len() < 2 {
        return None;
    }

    let detail = detail_line(&lines)?;
    let caps = DETAIL.captures(detail)?;

    let awardees = parse_awardees(&caps[1]);
    let sponsor = s!(caps[2].trim());
    let title = caps.get(3).map(|m| clean_title(m.as_str())).unwrap_or_default();

    let (funding, is_anticipated) = find_funding(detail, &lines);
    let date = find_date(&lines);

    Some(GrantRecord { awardees, sponsor, title, funding, is_anticipated, date })
}

/* ---------- page scraping ---------- */

/// Read a saved copy of the grants page.
pub fn read_grants_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::MissingInput {
            path: path.to_path_buf(),
            hint: save_page_hint(path),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

pub fn save_page_hint(path: &Path) -> String {
    format!(
        "How to get the HTML file:\n  \
         1. Open your web browser\n  \
         2. Visit: {GRANTS_PAGE_URL}\n  \
         3. Right-click -> 'Save Page As...' or press Ctrl+S\n  \
         4. Save as: {}\n  \
         5. Run: cec_scrape grants {}",
        path.display(),
        path.display()
    )
}

struct Paragraph {
    text: String,
    has_strong: bool,
}

fn content_paragraphs(doc: &Html) -> (usize, Vec<Paragraph>) {
    let all: Vec<_> = find_all(doc.root_element(), "p").collect();
    let kept = all
        .iter()
        .filter(|p| {
            CONTENT_CLASSES.iter().any(|c| has_class(**p, c))
                || contains_tag(**p, "span")
                || contains_tag(**p, "strong")
        })
        .map(|p| Paragraph { text: text_lines(*p).join("\n"), has_strong: contains_tag(*p, "strong") })
        .collect();
    (all.len(), kept)
}

fn line_count(paragraphs: &[String]) -> usize {
    paragraphs.iter().map(|p| p.lines().count()).sum()
}

/// Worth a parse attempt: two or more lines, and either an amount plus a year
/// or four paragraphs collected.
fn looks_complete(paragraphs: &[String]) -> bool {
    if line_count(paragraphs) < 2 {
        return false;
    }
    let has_funding = paragraphs.iter().any(|p| p.contains('$'));
    let has_date = paragraphs.iter().any(|p| YEAR.is_match(p));
    (has_funding && has_date) || paragraphs.len() >= 4
}

/// Group the page's paragraphs into entries and parse each one.
///
/// The completeness check also runs on the header paragraph itself, and the
/// final flush counts lines rather than paragraphs. A header holding a whole
/// entry on `<br>` lines is therefore emitted alone, including at the end of
/// the page. Earlier exports of this listing merged such a header into the
/// next entry, or dropped it when it came last.
pub fn parse_html(html: &str, progress: &mut dyn Progress) -> Vec<GrantRecord> {
    let doc = Html::parse_document(html);
    let (total, paragraphs) = content_paragraphs(&doc);
    progress.log(&format!("  Found {total} paragraph elements total"));
    progress.log(&format!("  Filtered to {} relevant paragraphs", paragraphs.len()));
    progress.begin(paragraphs.len());

    let mut grants = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for p in paragraphs {
        if p.text.is_empty() {
            continue;
        }

        let is_header = p.has_strong && p.text.to_lowercase().contains("receive");
        if is_header {
            if !current.is_empty() {
                match parse_grant_entry(&current.join("\n")) {
                    Some(g) => {
                        progress.item_done();
                        grants.push(g);
                    }
                    None => debug!("dropped entry: {:?}", current.first()),
                }
            }
            current = vec![p.text];
        } else if current.is_empty() {
            // Text before the first header is page chrome.
            continue;
        } else {
            current.push(p.text);
        }

        if looks_complete(&current) {
            // Entries without a date stay open: the date line may follow.
            if let Some(g) = parse_grant_entry(&current.join("\n")).filter(|g| g.date.is_some()) {
                progress.item_done();
                grants.push(g);
                current.clear();
            }
        }
    }

    if line_count(&current) >= 2
        && let Some(g) = parse_grant_entry(&current.join("\n"))
    {
        progress.item_done();
        grants.push(g);
    }

    progress.finish();
    grants
}
