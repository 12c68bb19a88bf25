// tests/faculty_pipeline.rs
use std::fs;
use std::path::{Path, PathBuf};

use cec_scrape::config::options::{FacultyOptions, UnmatchedDepartment};
use cec_scrape::runner::run_faculty;

const PAGE: &str = r#"
<html><body>
  <div id="collegeofengineeringandcomputingtextcontainer">
    <div class="WordSection1">
      <p>Faculty</p>
      <p>Doe, Jane, Associate Professor, Computer Science, College of Engineering and Computing. PhD, Stanford University, 2004.</p>
      <p>   </p>
      <p>Smith, John, Professor, Bioengineering, College of Engineering and Computing.</p>
    </div>
  </div>
  <div class="WordSection7">
    <p>Outsider, Otto, Professor, Physics, College of Science.</p>
  </div>
</body></html>
"#;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("cec_faculty_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn options(dir: &Path, page: &str) -> FacultyOptions {
    let input = dir.join("page.html");
    fs::write(&input, page).unwrap();
    let departments = dir.join("departments.csv");
    fs::write(
        &departments,
        "department_id,department_name\nCS,Computer Science\nECE,Electrical and Computer Engineering\n",
    )
    .unwrap();
    FacultyOptions {
        input: Some(input),
        departments,
        out: dir.join("out").join("faculty.csv"),
        ..Default::default()
    }
}

#[test]
fn appends_with_continuing_ids() {
    let dir = tmp_dir("append");
    let opts = options(&dir, PAGE);

    let first = run_faculty(&opts, None).unwrap();
    assert_eq!(first.scraped, 2);
    assert_eq!(first.matched, 1);
    assert_eq!(first.ids, 1..3);

    let second = run_faculty(&opts, None).unwrap();
    assert_eq!(second.ids, 3..5);

    let text = fs::read_to_string(&opts.out).unwrap();
    let lines: Vec<&str> = text.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 5, "{text}");
    assert_eq!(
        lines[0],
        "faculty_id,full_name,first_name,last_name,title,department,department_id,college,academic_history"
    );
    assert_eq!(text.matches("faculty_id").count(), 1);
    assert_eq!(
        lines[1],
        "F00001,\"Doe, Jane\",Jane,Doe,Associate Professor,Computer Science,CS,College of Engineering and Computing,\"PhD, Stanford University, 2004\""
    );
    // unmatched department is left blank by default
    assert_eq!(
        lines[2],
        "F00002,\"Smith, John\",John,Smith,\"Professor, Bioengineering\",,,College of Engineering and Computing,"
    );
    assert!(lines[3].starts_with("F00003,\"Doe, Jane\""));
    assert!(lines[4].starts_with("F00004,\"Smith, John\""));
    assert!(!text.contains("Outsider"));
}

#[test]
fn keep_raw_policy_fills_department() {
    let dir = tmp_dir("keep_raw");
    let opts = FacultyOptions { unmatched: UnmatchedDepartment::KeepRaw, ..options(&dir, PAGE) };

    run_faculty(&opts, None).unwrap();
    let text = fs::read_to_string(&opts.out).unwrap();
    assert!(text.contains("F00002,\"Smith, John\",John,Smith,Professor,Bioengineering,,"), "{text}");
}

#[test]
fn empty_scrape_writes_nothing() {
    let dir = tmp_dir("empty");
    let opts = options(&dir, "<html><body><p>Nothing here</p></body></html>");

    let summary = run_faculty(&opts, None).unwrap();
    assert_eq!(summary.scraped, 0);
    assert!(summary.ids.is_empty());
    assert!(!opts.out.exists());
}

#[test]
fn missing_input_is_an_error() {
    let dir = tmp_dir("missing");
    let mut opts = options(&dir, PAGE);
    opts.input = Some(dir.join("nope.html"));
    assert!(run_faculty(&opts, None).is_err());
}
