// src/config/consts.rs

// Net config
pub const FACULTY_URL: &str =
    "https://catalog.gmu.edu/about-mason/faculty/#collegeofengineeringandcomputingtext";
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("cec_scrape/", env!("CARGO_PKG_VERSION"));

// Container ids on the catalog page are the anchor plus this suffix
pub const CONTAINER_SUFFIX: &str = "container";
pub const WORD_SECTION_PREFIX: &str = "WordSection";

// Inputs
pub const DEPARTMENTS_FILE: &str = "data/departments.csv";
pub const GRANTS_PAGE_URL: &str = "https://cec.gmu.edu/research/grants";

// Outputs
pub const FACULTY_OUT_FILE: &str = "data/faculty.csv";
pub const GRANTS_OUT_FILE: &str = "data/csv/grants_cec.csv";

// Record ids
pub const FACULTY_ID_PREFIX: &str = "F";
pub const FACULTY_ID_COLUMN: &str = "faculty_id";
pub const GRANT_ID_PREFIX: &str = "G";
pub const ID_WIDTH: usize = 5;

// Import
pub const DATABASE_FILE: &str = "cec.db";
pub const DEFAULT_IMPORT_TABLES: &[(&str, &str)] = &[
    ("departments", "data/departments.csv"),
    ("grants", "data/grants_clean.csv"),
];

// Reporting
pub const PREVIEW_CHARS: usize = 60;
