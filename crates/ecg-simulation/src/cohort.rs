//! Concurrent trace generation for a batch of patients
//!
//! Each request runs on the blocking pool with its own random source, so
//! nothing is shared between generations.

use crate::ecg_simulator::{EcgConfig, EcgSimulator};
use ecg_core::{EcgError, EcgResult, Waveform};
use tracing::{debug, info};

/// Seed used for the request at `index` when it does not carry its own
pub fn cohort_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Generate one trace per request, in parallel.
///
/// Results come back in request order. A failing request yields an `Err`
/// in its slot and does not affect the others.
pub async fn generate_cohort(requests: Vec<EcgConfig>, base_seed: u64) -> Vec<EcgResult<Waveform>> {
    info!(count = requests.len(), base_seed, "Generating ECG cohort");

    let handles: Vec<_> = requests
        .into_iter()
        .enumerate()
        .map(|(index, mut config)| {
            let seed = config.seed.unwrap_or_else(|| cohort_seed(base_seed, index));
            config.seed = Some(seed);
            debug!(index, seed, condition = %config.condition, "Spawning generation task");

            tokio::task::spawn_blocking(move || -> EcgResult<Waveform> {
                EcgSimulator::new(config)?.generate()
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await.unwrap_or_else(|e| {
            Err(EcgError::SimulationError {
                message: format!("Generation task failed: {}", e),
            })
        });
        results.push(result);
    }

    results
}
