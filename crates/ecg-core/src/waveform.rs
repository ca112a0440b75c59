//! Waveform: container for a single-lead synthetic ECG trace

use crate::condition::CardiacCondition;
use crate::error::{EcgError, EcgResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single-lead ECG trace in millivolts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waveform {
    /// Unique identifier for this trace
    pub id: Uuid,
    /// Amplitude samples (mV)
    pub samples: Vec<f64>,
    /// Sampling rate in Hz
    pub sampling_rate_hz: u32,
    /// Trace duration in seconds
    pub duration_seconds: f64,
    /// Condition the trace was shaped after
    pub condition: CardiacCondition,
    /// Creation timestamp (ms since epoch)
    pub created_at: u64,
}

/// Number of samples a trace of `duration_seconds` at `sampling_rate_hz` holds
pub fn expected_samples(duration_seconds: f64, sampling_rate_hz: u32) -> usize {
    (duration_seconds * sampling_rate_hz as f64).round() as usize
}

impl Waveform {
    /// Wrap generated samples, checking the length against the timing
    pub fn new(
        samples: Vec<f64>,
        condition: CardiacCondition,
        duration_seconds: f64,
        sampling_rate_hz: u32,
    ) -> EcgResult<Self> {
        let expected = expected_samples(duration_seconds, sampling_rate_hz);
        if samples.len() != expected {
            return Err(EcgError::InvalidSignalData {
                reason: format!(
                    "Data length {} doesn't match expected {} samples",
                    samples.len(),
                    expected
                ),
            });
        }

        Ok(Waveform {
            id: Uuid::new_v4(),
            samples,
            sampling_rate_hz,
            duration_seconds,
            condition,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Sample times in seconds, for plotting
    pub fn time_vector(&self) -> Vec<f64> {
        let dt = 1.0 / self.sampling_rate_hz as f64;
        (0..self.samples.len()).map(|i| i as f64 * dt).collect()
    }

    pub fn stats(&self) -> WaveformStats {
        WaveformStats::calculate(&self.samples)
    }
}

/// Basic amplitude statistics for a trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformStats {
    pub mean: f64,
    pub rms: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub peak_to_peak: f64,
}

impl WaveformStats {
    pub fn calculate(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self {
                mean: 0.0,
                rms: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                peak_to_peak: 0.0,
            };
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let rms = (data.iter().map(|x| x * x).sum::<f64>() / n).sqrt();
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let min = data.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = data.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        Self {
            mean,
            rms,
            std_dev: variance.sqrt(),
            min,
            max,
            peak_to_peak: max - min,
        }
    }
}
