//! Integration tests for configuration loading

use rtls_correlate::domain::geometry::Origin;
use rtls_correlate::infra::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[input]
serial = "captures/serial_lab.txt"
results = "captures/results_lab.txt"

[output]
csv = "out/lab.csv"

[geometry]
origin_x = 1.5
origin_y = -0.5
grid_step_deg = 10.0
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.serial_path(), "captures/serial_lab.txt");
    assert_eq!(config.results_path(), "captures/results_lab.txt");
    assert_eq!(config.output_path(), "out/lab.csv");
    assert_eq!(config.origin(), Origin { x: 1.5, y: -0.5 });
    assert_eq!(config.angle_grid_step(), 10.0);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[output]\ncsv = \"custom.csv\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(config.output_path(), "custom.csv");
    assert_eq!(config.serial_path(), "serial_test_8.txt");
    assert_eq!(config.origin(), Origin { x: 3.6, y: 0.0 });
}

#[test]
fn test_load_from_path_fallback() {
    let config = Config::load_from_path("/nonexistent/config.toml");
    assert_eq!(config.serial_path(), "serial_test_8.txt");
    assert_eq!(config.results_path(), "results_rtls.txt");
    assert_eq!(config.output_path(), "filtered_data.csv");
}
