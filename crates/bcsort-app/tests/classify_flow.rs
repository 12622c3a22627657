//! End-to-end classification runs against files in a temp directory
//!
//! Keys come from a scripted source and pages are recorded instead of
//! opened, so the whole flow runs without a terminal or browser.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bcsort_app::app::{run_classification, run_demo, ClassificationSummary, Interaction};
use bcsort_app::browser::Browser;
use bcsort_app::config::Config;
use bcsort_app::keys::{KeyPress, KeySource};
use bcsort_types::{BcCode, Error, Result};
use tempfile::tempdir;

const HEADER: &str = "Plate,DVLA_VEHICLE_BODY,MVRIS_GROSS_WEIGHT";

struct Scripted(VecDeque<KeyPress>);

impl KeySource for Scripted {
    fn read_key(&mut self) -> io::Result<KeyPress> {
        Ok(self.0.pop_front().unwrap_or(KeyPress::Exit))
    }
}

#[derive(Default)]
struct Recording(Vec<String>);

impl Browser for Recording {
    fn show(&mut self, url: &str) -> Result<()> {
        self.0.push(url.to_string());
        Ok(())
    }
}

struct Run {
    summary: Result<ClassificationSummary>,
    pages: Vec<String>,
    output: String,
}

fn classify(input: &Path, config: &Config, keys: &str) -> Run {
    let mut keys = Scripted(keys.chars().map(KeyPress::Char).collect());
    let mut browser = Recording::default();
    let mut out = Vec::new();
    let summary = {
        let mut io = Interaction::new(&mut keys, &mut browser, &mut out);
        run_classification(input, config, &mut io)
    };
    Run {
        summary,
        pages: browser.0,
        output: String::from_utf8(out).unwrap(),
    }
}

fn write_input(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::new();
    for line in rows {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

fn plate_rows(plates: &[&str]) -> Vec<String> {
    let mut rows = vec![HEADER.to_string()];
    rows.extend(plates.iter().map(|p| format!("{},S/D BUS/COACH,12000", p)));
    rows
}

fn as_strs(rows: &[String]) -> Vec<&str> {
    rows.iter().map(String::as_str).collect()
}

#[test]
fn test_each_distinct_plate_prompted_once() {
    let dir = tempdir().unwrap();
    let rows = plate_rows(&["A", "B", "A", "C"]);
    let input = write_input(dir.path(), "buses.csv", &as_strs(&rows));

    let run = classify(&input, &Config::default(), "bcm");
    let summary = run.summary.unwrap();

    assert_eq!(run.pages.len(), 3);
    assert_eq!(run.output.matches("occurrences): ").count(), 3);
    assert!(run.output.contains("4 records"));
    assert!(run.output.contains("4 records remaining. 3 unique registration numbers."));
    assert_eq!(summary.queued_plates, 3);
    assert_eq!(summary.judged, 3);

    let written = fs::read_to_string(&summary.output_path).unwrap();
    assert_eq!(
        written,
        "Plate,DVLA_VEHICLE_BODY,MVRIS_GROSS_WEIGHT,BusCoach\n\
         A,S/D BUS/COACH,12000,B\n\
         B,S/D BUS/COACH,12000,C\n\
         A,S/D BUS/COACH,12000,B\n\
         C,S/D BUS/COACH,12000,M\n"
    );
}

#[test]
fn test_cancel_leaves_remaining_plates_unjudged() {
    let dir = tempdir().unwrap();
    let rows = plate_rows(&["A", "B", "A", "C"]);
    let input = write_input(dir.path(), "buses.csv", &as_strs(&rows));

    let run = classify(&input, &Config::default(), "bx");
    let summary = run.summary.unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.judged, 1);
    assert_eq!(summary.output_path, dir.path().join("buses_BC.csv"));

    let written = fs::read_to_string(&summary.output_path).unwrap();
    let codes: Vec<&str> = written
        .lines()
        .skip(1)
        .map(|line| line.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(codes, vec!["B", "-", "B", "-"]);
}

#[test]
fn test_settled_and_minibus_rows_skip_the_operator() {
    let dir = tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "mixed.csv",
        &[
            "Plate,DVLA_VEHICLE_BODY,MVRIS_GROSS_WEIGHT,BusCoach",
            "K1,S/D BUS/COACH,12000,C",
            "K1,S/D BUS/COACH,12000,-",
            "M1,MINIBUS,3500,",
            "M2,MINIBUS,\"4,200\",",
            "T1,TIPPER,18000,O",
            "T2,TIPPER,18000,",
        ],
    );

    let run = classify(&input, &Config::default(), "o");
    let summary = run.summary.unwrap();

    assert_eq!(run.pages.len(), 1);
    assert!(run.pages[0].ends_with("M2"));
    assert_eq!(summary.rejected_records, 2);
    assert_eq!(summary.known_records, 2);
    assert_eq!(summary.minibus_records, 1);
    assert!(run.output.contains("2 records rejected with body types: TIPPER"));
    assert!(run.output.contains("2 already categorised."));
    assert!(run.output.contains("1 automatically categorised as minibuses."));

    let written = fs::read_to_string(&summary.output_path).unwrap();
    let codes: Vec<&str> = written
        .lines()
        .skip(1)
        .map(|line| line.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(codes, vec!["C", "C", "M", "O", "O", "-"]);
}

#[test]
fn test_store_gains_city_of_new_decision() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("store.csv");
    fs::write(&store_path, "Plate,BusCoach,City\nX,B,Leeds\n").unwrap();
    let rows = plate_rows(&["X"]);
    let input = write_input(dir.path(), "York.csv", &as_strs(&rows));

    let config = Config {
        trust_previous: false,
        store_path: Some(store_path.clone()),
        ..Config::default()
    };
    let run = classify(&input, &config, "c");
    let summary = run.summary.unwrap();

    assert_eq!(summary.stored, Some(1));
    assert_eq!(
        fs::read_to_string(&store_path).unwrap(),
        "Plate,BusCoach,City\nX,C,\"Leeds,York\"\n"
    );
}

#[test]
fn test_stored_plate_is_trusted() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("store.csv");
    fs::write(&store_path, "Plate,BusCoach,City\nX,B,Leeds\n").unwrap();
    let rows = plate_rows(&["X", "Y"]);
    let input = write_input(dir.path(), "York.csv", &as_strs(&rows));

    let config = Config {
        store_path: Some(store_path),
        ..Config::default()
    };
    let run = classify(&input, &config, "c");
    let summary = run.summary.unwrap();

    assert_eq!(run.pages.len(), 1);
    assert!(run.pages[0].ends_with("Y"));
    assert_eq!(summary.known_records, 1);
}

#[test]
fn test_store_entries_without_a_decision_are_asked_again() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("store.csv");
    fs::write(&store_path, "Plate,BusCoach,City\nX,-,Leeds\nY,U,Leeds\n").unwrap();
    let rows = plate_rows(&["X", "Y"]);
    let input = write_input(dir.path(), "York.csv", &as_strs(&rows));

    let config = Config {
        store_path: Some(store_path),
        ..Config::default()
    };
    let run = classify(&input, &config, "bb");
    let summary = run.summary.unwrap();

    assert_eq!(run.pages.len(), 2);
    assert_eq!(summary.known_records, 0);
    let written = fs::read_to_string(&summary.output_path).unwrap();
    let codes: Vec<&str> = written
        .lines()
        .skip(1)
        .map(|line| line.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(codes, vec!["B", "B"]);
}

#[test]
fn test_lower_case_minibus_is_decided_automatically() {
    let dir = tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "small.csv",
        &[HEADER, "M1,minibus,3000", "M2,Minibus,2500"],
    );

    let run = classify(&input, &Config::default(), "");
    let summary = run.summary.unwrap();

    assert!(run.pages.is_empty());
    assert_eq!(summary.rejected_records, 0);
    assert_eq!(summary.minibus_records, 2);
}

#[test]
fn test_repeated_runs_never_overwrite_output() {
    let dir = tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "done.csv",
        &[
            "Plate,DVLA_VEHICLE_BODY,MVRIS_GROSS_WEIGHT,BusCoach",
            "A,S/D BUS/COACH,12000,B",
        ],
    );

    let first = classify(&input, &Config::default(), "").summary.unwrap();
    let second = classify(&input, &Config::default(), "").summary.unwrap();

    assert_eq!(first.output_path, dir.path().join("done_BC.csv"));
    assert_eq!(second.output_path, dir.path().join("done_BC1.csv"));
    assert_eq!(first.queued_plates, 0);
}

#[test]
fn test_missing_weight_column_is_fatal_with_auto_minibus() {
    let dir = tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "light.csv",
        &["Plate,DVLA_VEHICLE_BODY,MVRIS_GROSS_WEIGHTS", "A,MINIBUS,3000"],
    );

    let run = classify(&input, &Config::default(), "");
    match run.summary {
        Err(Error::MissingColumn {
            column,
            suggestions,
        }) => {
            assert_eq!(column, "MVRIS_GROSS_WEIGHT");
            assert_eq!(suggestions, vec!["MVRIS_GROSS_WEIGHTS".to_string()]);
        }
        other => panic!("expected a missing column error, got {:?}", other),
    }
    assert!(!dir.path().join("light_BC.csv").exists());

    let config = Config {
        auto_minibus: false,
        ..Config::default()
    };
    assert!(classify(&input, &config, "m").summary.is_ok());
}

#[test]
fn test_demo_reports_every_plate_in_order() {
    let mut keys = Scripted("bc".chars().map(KeyPress::Char).collect());
    let mut browser = Recording::default();
    let mut out = Vec::new();
    let result = {
        let mut io = Interaction::new(&mut keys, &mut browser, &mut out);
        run_demo(&Config::default(), &mut io).unwrap()
    };

    assert_eq!(result.len(), 12);
    assert_eq!(result[0], ("SK07CAA".to_string(), BcCode::Bus));
    assert_eq!(result[1], ("SK07CAE".to_string(), BcCode::Coach));
    assert_eq!(result[2].1, BcCode::Unjudged);
    assert_eq!(browser.0.len(), 3);
}
