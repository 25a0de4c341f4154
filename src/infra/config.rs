//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml

use crate::domain::geometry::Origin;
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Serial device log (JSONL: IMU, AoA and frame-marker lines)
    #[serde(default = "default_serial_path")]
    pub serial: String,
    /// Positioning-system log (JSONL: per-second x/y fixes)
    #[serde(default = "default_results_path")]
    pub results: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { serial: default_serial_path(), results: default_results_path() }
    }
}

fn default_serial_path() -> String {
    "serial_test_8.txt".to_string()
}

fn default_results_path() -> String {
    "results_rtls.txt".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the correlated CSV
    #[serde(default = "default_output_csv")]
    pub csv: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { csv: default_output_csv() }
    }
}

fn default_output_csv() -> String {
    "filtered_data.csv".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeometryConfig {
    /// Antenna origin X in meters
    #[serde(default = "default_origin_x")]
    pub origin_x: f64,
    /// Antenna origin Y in meters
    #[serde(default = "default_origin_y")]
    pub origin_y: f64,
    /// Radar display grid step in degrees
    #[serde(default = "default_grid_step_deg")]
    pub grid_step_deg: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            origin_x: default_origin_x(),
            origin_y: default_origin_y(),
            grid_step_deg: default_grid_step_deg(),
        }
    }
}

fn default_origin_x() -> f64 {
    3.6
}

fn default_origin_y() -> f64 {
    0.0
}

fn default_grid_step_deg() -> f64 {
    5.0
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    serial_path: String,
    results_path: String,
    output_path: String,
    origin: Origin,
    angle_grid_step: f64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_path: default_serial_path(),
            results_path: default_results_path(),
            output_path: default_output_csv(),
            origin: Origin::default(),
            angle_grid_step: default_grid_step_deg(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine config file path from a CLI override or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        // Check CONFIG_FILE environment variable
        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        // Default to dev.toml
        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            serial_path: toml_config.input.serial,
            results_path: toml_config.input.results,
            output_path: toml_config.output.csv,
            origin: Origin { x: toml_config.geometry.origin_x, y: toml_config.geometry.origin_y },
            angle_grid_step: toml_config.geometry.grid_step_deg,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn serial_path(&self) -> &str {
        &self.serial_path
    }

    pub fn results_path(&self) -> &str {
        &self.results_path
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn angle_grid_step(&self) -> f64 {
        self.angle_grid_step
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method to override the serial log path
    pub fn with_serial_path(mut self, path: &str) -> Self {
        self.serial_path = path.to_string();
        self
    }

    /// Builder method to override the results log path
    pub fn with_results_path(mut self, path: &str) -> Self {
        self.results_path = path.to_string();
        self
    }

    /// Builder method to override the output CSV path
    pub fn with_output_path(mut self, path: &str) -> Self {
        self.output_path = path.to_string();
        self
    }
}
