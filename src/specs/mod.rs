// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific extraction rules. Each spec knows *where the records live in
//! the HTML* and *how to turn one block of prose into one record*.
//!
//! ## What lives here
//! - **Pure parsing** of already-fetched HTML (`scraper` DOM + `regex` heuristics).
//! - **Entry parsers** that take one paragraph/entry and return a typed record or `None`.
//! - **Section location** and paragraph grouping for each page layout.
//!
//! ## What does **not** live here
//! - **Networking and file reads** beyond the small `read_*` helpers: see `core::net`, `runner`.
//! - **Ids and CSV output**: see `ids` and `file`.
//!
//! ## Conventions
//! - Parsers never fail hard on odd input: they return `None` and the caller
//!   reports the paragraph through `Progress::item_failed`.
//! - Specs are testable **offline** against small HTML fixtures.
pub mod faculty;
pub mod grants;
