// benches/entry_parsing.rs
use std::hint::black_box;

use cec_scrape::config::options::UnmatchedDepartment;
use cec_scrape::departments::Departments;
use cec_scrape::specs::{faculty, grants};
use criterion::{Criterion, criterion_group, criterion_main};

const FACULTY_ENTRY: &str = "Doe, Jane, Associate Professor, Computer Science, College of Engineering and Computing. \
    BS, University of Virginia, 1998. PhD, Stanford University, 2004.";

const GRANT_ENTRY: &str = "Bo Han, Parth Pathak, and Lap Fai Yu received funding from the Office of Naval Research \
    for \"Edge AI.\" Grant total: $1,200,000.\nMarch 3, 2023";

fn bench_entries(c: &mut Criterion) {
    let departments: Departments = [
        ("Computer Science", "CS"),
        ("Electrical and Computer Engineering", "ECE"),
        ("Bioengineering", "BIOE"),
    ]
    .into_iter()
    .collect();

    c.bench_function("parse_faculty_entry", |b| {
        b.iter(|| {
            faculty::parse_faculty_entry(black_box(FACULTY_ENTRY), &departments, UnmatchedDepartment::Empty)
        })
    });

    c.bench_function("parse_grant_entry", |b| {
        b.iter(|| grants::parse_grant_entry(black_box(GRANT_ENTRY)))
    });
}

criterion_group!(benches, bench_entries);
criterion_main!(benches);
