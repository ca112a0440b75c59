//! ECG waveform export - synthetic Lead II traces as a FHIR bundle
//!
//! Usage: `ecg-waveform [CONFIG.json]`. Without a config the demo cohort is
//! exported. The bundle goes to stdout, logs go to stderr.

mod export;

use anyhow::{Context, Result};
use ecg_fhir::ExportConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExportConfig::from_file(&path)
            .with_context(|| format!("Failed to load export configuration from {}", path))?,
        None => {
            info!("No configuration given, exporting the demo cohort");
            ExportConfig::demo_cohort()
        }
    };
    config.validate().context("Invalid export configuration")?;

    info!(
        name = %config.name,
        patients = config.patients.len(),
        duration_seconds = config.duration_seconds,
        sampling_rate_hz = config.sampling_rate_hz,
        "Starting ECG export"
    );

    let report = export::export_cohort(&config).await?;
    println!("{}", report.bundle.to_json().context("Failed to serialize bundle")?);

    info!(
        exported = report.bundle.total,
        failed = report.failures.len(),
        seed = report.base_seed,
        "ECG export finished"
    );
    Ok(())
}
