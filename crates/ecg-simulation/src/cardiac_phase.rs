//! P-QRS-T morphology as a piecewise function of time within a beat
//!
//! Phase boundaries are absolute seconds and do not scale with heart rate.
//! Above roughly 125 bpm the beat is shorter than the 0.48 s the phases
//! span, so the T wave is cut off when the next beat starts.

use std::f64::consts::PI;

/// Segment of the cardiac cycle a point in the beat falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardiacPhase {
    /// Atrial depolarization, [0, 0.10)
    PWave,
    /// [0.10, 0.16)
    PrSegment,
    /// Q deflection, [0.16, 0.18)
    QWave,
    /// R peak, [0.18, 0.22)
    RWave,
    /// S deflection, [0.22, 0.24)
    SWave,
    /// [0.24, 0.32)
    StSegment,
    /// Ventricular repolarization, [0.32, 0.48)
    TWave,
    /// Everything after the T wave until the next beat
    Baseline,
}

const P_END: f64 = 0.10;
const PR_END: f64 = 0.16;
const Q_END: f64 = 0.18;
const R_END: f64 = 0.22;
const S_END: f64 = 0.24;
const ST_END: f64 = 0.32;
const T_END: f64 = 0.48;

impl CardiacPhase {
    /// Classify a time within the beat, in seconds
    pub fn at(phase: f64) -> Self {
        if (0.0..P_END).contains(&phase) {
            CardiacPhase::PWave
        } else if (P_END..PR_END).contains(&phase) {
            CardiacPhase::PrSegment
        } else if (PR_END..Q_END).contains(&phase) {
            CardiacPhase::QWave
        } else if (Q_END..R_END).contains(&phase) {
            CardiacPhase::RWave
        } else if (R_END..S_END).contains(&phase) {
            CardiacPhase::SWave
        } else if (S_END..ST_END).contains(&phase) {
            CardiacPhase::StSegment
        } else if (ST_END..T_END).contains(&phase) {
            CardiacPhase::TWave
        } else {
            CardiacPhase::Baseline
        }
    }

    /// Noise-free amplitude at `phase` seconds into the beat
    pub fn amplitude_at(phase: f64, amplitude: f64) -> f64 {
        match Self::at(phase) {
            CardiacPhase::PWave => amplitude * 0.2 * (PI * phase / 0.10).sin(),
            CardiacPhase::QWave => -amplitude * 0.3,
            CardiacPhase::RWave => amplitude * 1.5 * (PI * (phase - Q_END) / 0.04).sin(),
            CardiacPhase::SWave => -amplitude * 0.2,
            CardiacPhase::TWave => amplitude * 0.3 * (PI * (phase - ST_END) / 0.16).sin(),
            CardiacPhase::PrSegment | CardiacPhase::StSegment | CardiacPhase::Baseline => 0.0,
        }
    }

    /// Human-readable phase name
    pub fn description(&self) -> &'static str {
        match self {
            CardiacPhase::PWave => "P wave",
            CardiacPhase::PrSegment => "PR segment",
            CardiacPhase::QWave => "Q wave",
            CardiacPhase::RWave => "R wave",
            CardiacPhase::SWave => "S wave",
            CardiacPhase::StSegment => "ST segment",
            CardiacPhase::TWave => "T wave",
            CardiacPhase::Baseline => "Baseline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_partition() {
        assert_eq!(CardiacPhase::at(0.0), CardiacPhase::PWave);
        assert_eq!(CardiacPhase::at(0.10), CardiacPhase::PrSegment);
        assert_eq!(CardiacPhase::at(0.17), CardiacPhase::QWave);
        assert_eq!(CardiacPhase::at(0.19), CardiacPhase::RWave);
        assert_eq!(CardiacPhase::at(0.23), CardiacPhase::SWave);
        assert_eq!(CardiacPhase::at(0.28), CardiacPhase::StSegment);
        assert_eq!(CardiacPhase::at(0.40), CardiacPhase::TWave);
        assert_eq!(CardiacPhase::at(0.48), CardiacPhase::Baseline);
        assert_eq!(CardiacPhase::at(0.75), CardiacPhase::Baseline);
    }

    #[test]
    fn test_r_peak_dominates() {
        let r_peak = CardiacPhase::amplitude_at(0.20, 1.0);
        assert!((r_peak - 1.5).abs() < 1e-9);

        let p_peak = CardiacPhase::amplitude_at(0.05, 1.0);
        let t_peak = CardiacPhase::amplitude_at(0.40, 1.0);
        assert!(r_peak > p_peak && r_peak > t_peak);
    }

    #[test]
    fn test_flat_segments_are_zero() {
        assert_eq!(CardiacPhase::amplitude_at(0.12, 1.3), 0.0);
        assert_eq!(CardiacPhase::amplitude_at(0.28, 1.3), 0.0);
        assert_eq!(CardiacPhase::amplitude_at(0.60, 1.3), 0.0);
    }

    #[test]
    fn test_deflections_scale_with_amplitude() {
        assert!((CardiacPhase::amplitude_at(0.17, 2.0) + 0.6).abs() < 1e-12);
        assert!((CardiacPhase::amplitude_at(0.23, 2.0) + 0.4).abs() < 1e-12);
    }
}
