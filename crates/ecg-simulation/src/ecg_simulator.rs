//! Synthetic single-lead ECG generator
//!
//! Produces a piecewise-sinusoidal P-QRS-T trace for a named condition with
//! additive Gaussian noise. Output is for demonstration and visualization,
//! not for diagnostic use.

use crate::cardiac_phase::CardiacPhase;
use ecg_core::{invalid_parameter, CardiacCondition, EcgError, EcgResult, Waveform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_DURATION_SECONDS: f64 = 10.0;
pub const DEFAULT_SAMPLING_RATE_HZ: u32 = 500;

/// Largest trace generated in one call (~800 MB of `f64` samples)
pub const MAX_SAMPLES: usize = 100_000_000;

/// Noise configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Replaces the profile's noise standard deviation when set.
    /// `Some(0.0)` yields the bare morphology.
    pub stddev_override: Option<f64>,
    /// Std-dev of the multiplicative irregularity applied to atrial fibrillation
    pub afib_jitter: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            stddev_override: None,
            afib_jitter: 0.1,
        }
    }
}

/// Configuration for ECG simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcgConfig {
    /// Condition the trace should resemble
    pub condition: CardiacCondition,
    /// Trace length in seconds
    pub duration_seconds: f64,
    /// Sampling rate in Hz
    pub sampling_rate_hz: u32,
    /// Noise configuration
    pub noise: NoiseConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for EcgConfig {
    fn default() -> Self {
        Self {
            condition: CardiacCondition::Normal,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            noise: NoiseConfig::default(),
            seed: None,
        }
    }
}

impl EcgConfig {
    pub fn new(condition: CardiacCondition) -> Self {
        Self {
            condition,
            ..Default::default()
        }
    }

    /// Check timing and noise parameters, returning the sample count
    pub fn validate(&self) -> EcgResult<usize> {
        let samples = validate_timing(self.duration_seconds, self.sampling_rate_hz)?;

        if let Some(stddev) = self.noise.stddev_override {
            if !stddev.is_finite() || stddev < 0.0 {
                return Err(invalid_parameter!(
                    "noise.stddev_override",
                    "must be a non-negative number, got {}",
                    stddev
                ));
            }
        }
        if !self.noise.afib_jitter.is_finite() || self.noise.afib_jitter < 0.0 {
            return Err(invalid_parameter!(
                "noise.afib_jitter",
                "must be a non-negative number, got {}",
                self.noise.afib_jitter
            ));
        }

        Ok(samples)
    }
}

/// Validate duration and rate, returning the number of samples they yield
pub fn validate_timing(duration_seconds: f64, sampling_rate_hz: u32) -> EcgResult<usize> {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(invalid_parameter!(
            "duration_seconds",
            "must be a positive number, got {}",
            duration_seconds
        ));
    }
    if sampling_rate_hz == 0 {
        return Err(invalid_parameter!("sampling_rate_hz", "must be positive, got 0"));
    }

    // Checked before the usize cast, which saturates
    let requested = (duration_seconds * sampling_rate_hz as f64).round();
    if requested > MAX_SAMPLES as f64 {
        return Err(invalid_parameter!(
            "duration_seconds",
            "{}s at {}Hz exceeds the {} sample limit",
            duration_seconds,
            sampling_rate_hz,
            MAX_SAMPLES
        ));
    }

    let samples = ecg_core::expected_samples(duration_seconds, sampling_rate_hz);
    if samples == 0 {
        return Err(invalid_parameter!(
            "duration_seconds",
            "{}s at {}Hz yields no samples",
            duration_seconds,
            sampling_rate_hz
        ));
    }
    Ok(samples)
}

/// Generate a raw trace with the condition's own noise level.
///
/// The caller owns the random source; seeding it makes the output
/// reproducible.
pub fn generate_waveform<R: Rng + ?Sized>(
    condition: &CardiacCondition,
    duration_seconds: f64,
    sampling_rate_hz: u32,
    rng: &mut R,
) -> EcgResult<Vec<f64>> {
    let config = EcgConfig {
        condition: condition.clone(),
        duration_seconds,
        sampling_rate_hz,
        ..Default::default()
    };
    synthesize(&config, rng)
}

/// Generate a raw trace for a full configuration. `config.seed` is ignored;
/// randomness comes from `rng`.
pub fn synthesize<R: Rng + ?Sized>(config: &EcgConfig, rng: &mut R) -> EcgResult<Vec<f64>> {
    let num_samples = config.validate()?;
    let profile = config.condition.profile();
    let amplitude = profile.amplitude;
    let beat_duration = profile.beat_duration();
    let rate = config.sampling_rate_hz as f64;

    let noise_stddev = config.noise.stddev_override.unwrap_or(profile.noise_stddev) * amplitude;
    let noise = Normal::new(0.0, noise_stddev).map_err(|e| EcgError::SimulationError {
        message: format!("Failed to create normal distribution: {}", e),
    })?;

    let mut samples: Vec<f64> = (0..num_samples)
        .map(|i| {
            let phase = (i as f64 / rate) % beat_duration;
            CardiacPhase::amplitude_at(phase, amplitude) + noise.sample(rng)
        })
        .collect();

    // AFib: second, independent multiplicative pass
    if config.condition.is_irregular() {
        let jitter = config.noise.afib_jitter;
        for sample in samples.iter_mut() {
            let z: f64 = StandardNormal.sample(rng);
            *sample *= 1.0 + jitter * z;
        }
    }

    debug!(
        condition = %config.condition,
        samples = num_samples,
        heart_rate_bpm = profile.heart_rate_bpm,
        noise_stddev,
        "generated ECG trace"
    );

    Ok(samples)
}

/// ECG simulator owning its own seeded random source
pub struct EcgSimulator {
    config: EcgConfig,
    rng: StdRng,
}

impl EcgSimulator {
    /// Create new ECG simulator with configuration
    pub fn new(config: EcgConfig) -> EcgResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(EcgSimulator { config, rng })
    }

    /// Generate a trace for the configured condition
    pub fn generate(&mut self) -> EcgResult<Waveform> {
        let samples = synthesize(&self.config, &mut self.rng)?;
        Waveform::new(
            samples,
            self.config.condition.clone(),
            self.config.duration_seconds,
            self.config.sampling_rate_hz,
        )
    }

    /// Restart the random source from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.config.seed = Some(seed);
    }

    /// Get current configuration
    pub fn config(&self) -> &EcgConfig {
        &self.config
    }

    /// Update configuration. The random source is reseeded only when the new
    /// configuration carries a seed.
    pub fn update_config(&mut self, config: EcgConfig) -> EcgResult<()> {
        config.validate()?;

        if let Some(seed) = config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.config = config;
        Ok(())
    }
}
