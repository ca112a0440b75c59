//! Export service: cohort generation -> observations -> bundle

use ecg_core::{EcgError, EcgResult};
use ecg_fhir::{Bundle, ExportConfig, ObservationBuilder, PatientRef};
use ecg_simulation::generate_cohort;
use tracing::warn;

/// Outcome of one export run
#[derive(Debug)]
pub struct ExportReport {
    /// Observations for every patient whose trace was generated
    pub bundle: Bundle,
    /// Patients that were skipped, with the reason
    pub failures: Vec<(String, EcgError)>,
    /// Seed the cohort was generated from
    pub base_seed: u64,
}

/// Generate and package traces for every patient in `config`.
///
/// Per-patient failures are logged and reported, not propagated.
pub async fn export_cohort(config: &ExportConfig) -> EcgResult<ExportReport> {
    config.validate()?;

    let base_seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    });

    let results = generate_cohort(config.requests(), base_seed).await;

    let mut observations = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for (patient, result) in config.patients.iter().zip(results) {
        let observation = result.and_then(|waveform| {
            ObservationBuilder::new(PatientRef::new(&patient.id, &patient.name), &waveform)
                .decimation_factor(config.decimation_factor)
                .build()
        });

        match observation {
            Ok(observation) => observations.push(observation),
            Err(e) => {
                warn!(patient = %patient.id, error = %e, "Skipping patient");
                failures.push((patient.id.clone(), e));
            }
        }
    }

    Ok(ExportReport {
        bundle: Bundle::collection(observations),
        failures,
        base_seed,
    })
}
