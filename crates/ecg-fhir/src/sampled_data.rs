//! FHIR `valueSampledData` encoding
//!
//! Traces are decimated (plain sample dropping, no anti-alias filter) before
//! being written as space-separated 3-decimal values. The fidelity loss is
//! accepted to keep the resource small.

use ecg_core::{invalid_parameter, EcgError, EcgResult, Waveform};
use serde::{Deserialize, Serialize};

/// Keep every 10th sample: 500 Hz in, 50 Hz out
pub const DEFAULT_DECIMATION_FACTOR: usize = 10;

/// Keep every `factor`-th sample, starting with the first.
///
/// Returns exactly `samples.len() / factor` values.
pub fn decimate(samples: &[f64], factor: usize) -> EcgResult<Vec<f64>> {
    if factor == 0 {
        return Err(invalid_parameter!("decimation_factor", "must be positive, got 0"));
    }

    Ok(samples
        .iter()
        .step_by(factor)
        .take(samples.len() / factor)
        .copied()
        .collect())
}

/// Render samples as fixed-point, 3 decimals, single-space separated
pub fn format_sampled_data(samples: &[f64]) -> String {
    samples
        .iter()
        .map(|v| format!("{:.3}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode a `valueSampledData.data` string
pub fn parse_sampled_data(data: &str) -> EcgResult<Vec<f64>> {
    data.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| EcgError::MalformedSampledData {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Milliseconds between transported samples
pub fn sample_period_ms(sampling_rate_hz: u32, factor: usize) -> f64 {
    1000.0 / (sampling_rate_hz as f64 / factor as f64)
}

/// Sample times in seconds for `len` samples spaced `period_ms` apart
pub fn time_axis(len: usize, period_ms: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 * period_ms / 1000.0).collect()
}

/// FHIR `Quantity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
    pub system: String,
    pub code: String,
}

impl Quantity {
    pub fn millivolts(value: f64) -> Self {
        Self {
            value,
            unit: "mV".to_string(),
            system: "http://unitsofmeasure.org".to_string(),
            code: "mV".to_string(),
        }
    }
}

/// FHIR `SampledData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledData {
    /// Zero value of the data
    pub origin: Quantity,
    /// Milliseconds between samples
    pub period: f64,
    /// Interleaved channels; always 1 for a single lead
    pub dimensions: u32,
    /// Space-separated samples
    pub data: String,
}

impl SampledData {
    /// Decimate and encode a trace
    pub fn from_waveform(waveform: &Waveform, factor: usize) -> EcgResult<Self> {
        let decimated = decimate(waveform.samples(), factor)?;

        Ok(Self {
            origin: Quantity::millivolts(0.0),
            period: sample_period_ms(waveform.sampling_rate_hz, factor),
            dimensions: 1,
            data: format_sampled_data(&decimated),
        })
    }

    /// Decoded sample values
    pub fn samples(&self) -> EcgResult<Vec<f64>> {
        parse_sampled_data(&self.data)
    }

    /// Number of encoded samples
    pub fn sample_count(&self) -> usize {
        self.data.split_whitespace().count()
    }

    /// Sample times in seconds
    pub fn time_axis(&self) -> Vec<f64> {
        time_axis(self.sample_count(), self.period)
    }
}
