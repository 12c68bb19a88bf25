// tests/grants_pipeline.rs
use std::fs;
use std::path::PathBuf;

use cec_scrape::Error;
use cec_scrape::config::options::GrantsOptions;
use cec_scrape::progress::Progress;
use cec_scrape::runner::run_grants;

const PAGE: &str = r#"
<html><body>
  <p class="nav"><span>Research</span></p>
  <p class="MsoNormal"><strong>Kai Zeng receives funding from NSF for Secure Radios.</strong></p>
  <p class="MsoNormal">Anticipated funding: $100,000</p>
  <p class="MsoNormal">January 12, 2026</p>
  <p><strong>Brian L. Mark and Kai Zeng received funding from DARPA</strong><br>Award amount: $50,000<br>February 2, 2025</p>
  <p><span><strong>Jane Doe received funding from NIH for Imaging. Grant total: $75,000.</strong></span></p>
  <p><span>March 3, 2023</span></p>
</body></html>
"#;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("cec_grants_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[derive(Default)]
struct Counting {
    lines: Vec<String>,
    done: usize,
    finished: bool,
}

impl Progress for Counting {
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }
    fn item_done(&mut self) {
        self.done += 1;
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn one_row_per_awardee() {
    let dir = tmp_dir("rows");
    let input = dir.join("grants_page.html");
    fs::write(&input, PAGE).unwrap();
    let opts = GrantsOptions { input, out: dir.join("csv").join("grants_cec.csv") };

    let mut progress = Counting::default();
    let summary = run_grants(&opts, Some(&mut progress)).unwrap();
    assert_eq!(summary.grants, 3);
    assert_eq!(summary.rows, 4);
    assert_eq!(progress.done, 3);
    assert!(progress.finished);
    assert!(progress.lines.iter().any(|l| l.contains("Successfully parsed 3 grant entries")));

    let text = fs::read_to_string(&opts.out).unwrap();
    let lines: Vec<&str> = text.split_terminator("\r\n").collect();
    assert_eq!(
        lines,
        [
            "grant_id,funding,sponsor,awardee,title,date,is_anticipated,department_id,capabilities_id",
            "G00001,100000,NSF,Kai Zeng,Secure Radios,2026-01-12,True,,",
            "G00002,50000,DARPA,Brian L. Mark,,2025-02-02,False,,",
            "G00003,50000,DARPA,Kai Zeng,,2025-02-02,False,,",
            "G00004,75000,NIH,Jane Doe,Imaging,2023-03-03,False,,",
        ]
    );
}

#[test]
fn rerun_overwrites() {
    let dir = tmp_dir("overwrite");
    let input = dir.join("grants_page.html");
    fs::write(&input, PAGE).unwrap();
    let opts = GrantsOptions { input, out: dir.join("grants_cec.csv") };

    run_grants(&opts, None).unwrap();
    run_grants(&opts, None).unwrap();
    let text = fs::read_to_string(&opts.out).unwrap();
    assert_eq!(text.split_terminator("\r\n").count(), 5);
    assert!(!text.contains("G00005"));
}

#[test]
fn missing_page_explains_how_to_save_it() {
    let dir = tmp_dir("missing");
    let opts = GrantsOptions::new(dir.join("grants_page.html"));
    match run_grants(&opts, None) {
        Err(Error::MissingInput { path, hint }) => {
            assert!(path.ends_with("grants_page.html"));
            assert!(hint.contains("Save Page As"));
        }
        other => panic!("expected MissingInput, got {other:?}"),
    }
}

#[test]
fn page_without_grants_writes_nothing() {
    let dir = tmp_dir("empty");
    let input = dir.join("grants_page.html");
    fs::write(&input, "<p class=\"MsoNormal\">No news this month</p>").unwrap();
    let opts = GrantsOptions { input, out: dir.join("grants_cec.csv") };

    let summary = run_grants(&opts, None).unwrap();
    assert_eq!(summary.grants, 0);
    assert!(!opts.out.exists());
}
