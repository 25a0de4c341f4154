//! End-to-end tests for the batch correlation pass

use rtls_correlate::infra::Config;
use rtls_correlate::services::Correlator;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn config_for(dir: &Path, serial: &Path, results: &Path) -> Config {
    Config::default()
        .with_serial_path(serial.to_str().unwrap())
        .with_results_path(results.to_str().unwrap())
        .with_output_path(dir.join("out.csv").to_str().unwrap())
}

#[test]
fn test_golden_row() {
    let dir = tempdir().unwrap();
    let results = write_file(dir.path(), "results.txt", &[r#"{"seconds":10,"x":3.6,"y":12.0}"#]);
    let serial = write_file(
        dir.path(),
        "serial.txt",
        &[
            r#"{"status":"boot"}"#,
            r#"{"data":"AAAA80008000FFFF"}"#,
            r#"{"fr_no":10}"#,
            r#"{"angleOfArrival":1,"pdoa":0.5}"#,
        ],
    );

    let config = config_for(dir.path(), &serial, &results);
    let report = Correlator::new(config).run().unwrap();
    assert_eq!(report.rows_emitted, 1);
    assert_eq!(report.matches_found, 1);
    assert_eq!(report.fixes_loaded, 1);

    let content = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "x,y,ang_contr,pdoa,imu_x_g,imu_y_g,imu_z_g");
    assert_eq!(lines[1], "3.6,12.0,0.0,0.5,-2.0,-2.0,-0.0001");
}

#[test]
fn test_idempotent_runs_produce_identical_output() {
    let dir = tempdir().unwrap();
    let results = write_file(
        dir.path(),
        "results.txt",
        &[r#"{"seconds":1,"x":1.25,"y":7.5}"#, r#"{"seconds":2,"x":-4.0,"y":3.0}"#],
    );
    let serial = write_file(
        dir.path(),
        "serial.txt",
        &[
            r#"{"data":"AAAA123456789ABC"}"#,
            r#"{"fr_no":1}"#,
            r#"{"angleOfArrival":1,"pdoa":-0.25}"#,
            r#"{"fr_no":2}"#,
            r#"{"data":"AAAAFFFF00007FFF"}"#,
        ],
    );

    let config = config_for(dir.path(), &serial, &results);
    Correlator::new(config.clone()).run().unwrap();
    let first = fs::read(dir.path().join("out.csv")).unwrap();

    Correlator::new(config).run().unwrap();
    let second = fs::read(dir.path().join("out.csv")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_duplicate_seconds_last_fix_wins() {
    let dir = tempdir().unwrap();
    let results = write_file(
        dir.path(),
        "results.txt",
        &[r#"{"seconds":10,"x":1.0,"y":1.0}"#, r#"{"seconds":10,"x":3.6,"y":12.0}"#],
    );
    let serial = write_file(dir.path(), "serial.txt", &[r#"{"fr_no":10}"#]);

    let config = config_for(dir.path(), &serial, &results);
    Correlator::new(config).run().unwrap();

    let content = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    // overwrite, not merge: only the later fix survives
    assert!(lines[1].starts_with("3.6,12.0,"));
}

#[test]
fn test_empty_secondary_streams_default_to_zero() {
    let dir = tempdir().unwrap();
    let results = write_file(dir.path(), "results.txt", &[r#"{"seconds":5,"x":3.6,"y":12.0}"#]);
    let serial = write_file(dir.path(), "serial.txt", &[r#"{"fr_no":5}"#]);

    let config = config_for(dir.path(), &serial, &results);
    let report = Correlator::new(config).run().unwrap();
    assert_eq!(report.imu_records, 0);
    assert_eq!(report.aoa_records, 0);

    let content = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(content.lines().nth(1).unwrap(), "3.6,12.0,0.0,0.0,0.0,0.0,0.0");
}

#[test]
fn test_unmatched_frames_emit_nothing() {
    let dir = tempdir().unwrap();
    let results = write_file(dir.path(), "results.txt", &[r#"{"seconds":1,"x":0.0,"y":1.0}"#]);
    let serial = write_file(dir.path(), "serial.txt", &[r#"{"fr_no":2}"#, r#"{"fr_no":3}"#]);

    let config = config_for(dir.path(), &serial, &results);
    let report = Correlator::new(config).run().unwrap();
    assert_eq!(report.rows_emitted, 0);

    let content = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(content.lines().count(), 1); // header only
}

#[test]
fn test_malformed_lines_are_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    let results = write_file(
        dir.path(),
        "results.txt",
        &["<<corrupt>>", r#"{"seconds":4,"x":2.0,"y":2.0}"#],
    );
    let serial = write_file(
        dir.path(),
        "serial.txt",
        &["corrupt serial line", r#"{"data":"zz"}"#, r#"{"fr_no":4}"#],
    );

    let config = config_for(dir.path(), &serial, &results);
    let report = Correlator::new(config).run().unwrap();
    // the short IMU payload still indexes, decoding to zeros
    assert_eq!(report.imu_records, 1);
    assert_eq!(report.rows_emitted, 1);
}

#[test]
fn test_missing_input_is_fatal_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let serial = write_file(dir.path(), "serial.txt", &[r#"{"fr_no":1}"#]);

    let config = Config::default()
        .with_serial_path(serial.to_str().unwrap())
        .with_results_path(dir.path().join("missing.txt").to_str().unwrap())
        .with_output_path(dir.path().join("out.csv").to_str().unwrap());

    let err = Correlator::new(config).run().unwrap_err();
    assert!(err.to_string().contains("positioning log"));
    // fatal before the sink is ever opened
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_missing_serial_is_fatal() {
    let dir = tempdir().unwrap();
    let results = write_file(dir.path(), "results.txt", &[r#"{"seconds":1,"x":0.0,"y":0.0}"#]);

    let config = Config::default()
        .with_serial_path(dir.path().join("missing.txt").to_str().unwrap())
        .with_results_path(results.to_str().unwrap())
        .with_output_path(dir.path().join("out.csv").to_str().unwrap());

    assert!(Correlator::new(config).run().is_err());
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_rows_follow_serial_log_order() {
    let dir = tempdir().unwrap();
    let results = write_file(
        dir.path(),
        "results.txt",
        &[r#"{"seconds":1,"x":15.6,"y":0.0}"#, r#"{"seconds":2,"x":-8.4,"y":0.0}"#],
    );
    // frame 2 appears before frame 1 in the serial log
    let serial =
        write_file(dir.path(), "serial.txt", &[r#"{"fr_no":2}"#, r#"{"fr_no":1}"#]);

    let config = config_for(dir.path(), &serial, &results);
    Correlator::new(config).run().unwrap();

    let content = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    // -90° bearing (fix 2) first, +90° (fix 1) second
    assert!(lines[1].contains(",-90.0,"));
    assert!(lines[2].contains(",90.0,"));
}
