//! rtls-correlate - offline correlator for UWB RTLS capture logs
//!
//! Aligns a serial device log (IMU + AoA frames) with a positioning
//! log (x/y fixes) and writes one CSV of derived features per matched
//! frame, for downstream plotting.
//!
//! Module structure:
//! - `domain/` - Log record types and feature math (decode, geometry)
//! - `io/` - JSONL loaders and the CSV sink
//! - `services/` - Stream indexing and the correlation driver
//! - `infra/` - Infrastructure (Config)

use clap::Parser;
use rtls_correlate::infra::Config;
use rtls_correlate::services::Correlator;
use tracing::{error, info};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Offline correlator for UWB RTLS capture logs
#[derive(Parser, Debug)]
#[command(name = "rtls-correlate", version, about)]
struct Args {
    /// Path to TOML configuration file
    ///
    /// Falls back to the CONFIG_FILE environment variable, then
    /// config/dev.toml.
    #[arg(short, long)]
    config: Option<String>,

    /// Serial device log (overrides config)
    #[arg(long)]
    serial: Option<String>,

    /// Positioning-system log (overrides config)
    #[arg(long)]
    results: Option<String>,

    /// Output CSV path (overrides config)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "rtls_correlate_starting");

    let args = Args::parse();

    let config_path = Config::resolve_config_path(args.config.as_deref());
    let mut config = Config::load_from_path(&config_path);
    if let Some(serial) = &args.serial {
        config = config.with_serial_path(serial);
    }
    if let Some(results) = &args.results {
        config = config.with_results_path(results);
    }
    if let Some(output) = &args.output {
        config = config.with_output_path(output);
    }

    info!(
        config_file = %config.config_file(),
        serial = %config.serial_path(),
        results = %config.results_path(),
        output = %config.output_path(),
        origin_x = config.origin().x,
        origin_y = config.origin().y,
        grid_step = config.angle_grid_step(),
        "config_loaded"
    );

    let report = match Correlator::new(config).run() {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "correlation_failed");
            return Err(e);
        }
    };

    info!(
        rows = report.rows_emitted,
        matches = report.matches_found,
        fixes = report.fixes_loaded,
        imu = report.imu_records,
        aoa = report.aoa_records,
        "rtls_correlate_done"
    );

    Ok(())
}
