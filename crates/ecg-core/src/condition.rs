//! Cardiac condition labels and their waveform profiles

use serde::{Deserialize, Serialize};

/// Clinical condition a synthetic trace should resemble
///
/// Labels are case-sensitive. Anything outside the known set is kept as
/// `Other` and rendered with the default profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardiacCondition {
    /// Normal sinus rhythm
    Normal,
    /// Atrial fibrillation: fast, irregular, no discrete P wave
    AtrialFibrillation,
    /// Myocardial infarction
    MyocardialInfarction,
    /// Ventricular tachycardia
    VentricularTachycardia,
    /// Unrecognized label
    Other(String),
}

/// Waveform parameters resolved from a condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionProfile {
    /// Beats per minute
    pub heart_rate_bpm: f64,
    /// Scale applied to every phase amplitude (mV)
    pub amplitude: f64,
    /// Gaussian noise standard deviation, relative to `amplitude`
    pub noise_stddev: f64,
}

impl ConditionProfile {
    /// Profile used for unrecognized labels
    pub const DEFAULT: ConditionProfile = ConditionProfile {
        heart_rate_bpm: 75.0,
        amplitude: 1.0,
        noise_stddev: 0.05,
    };

    /// Length of one beat in seconds
    pub fn beat_duration(&self) -> f64 {
        60.0 / self.heart_rate_bpm
    }
}

impl Default for ConditionProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CardiacCondition {
    /// Resolve a wire label. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label {
            "normal" => CardiacCondition::Normal,
            "afib" => CardiacCondition::AtrialFibrillation,
            "mi" => CardiacCondition::MyocardialInfarction,
            "vtach" => CardiacCondition::VentricularTachycardia,
            other => CardiacCondition::Other(other.to_string()),
        }
    }

    /// Wire label, as accepted by [`CardiacCondition::from_label`]
    pub fn label(&self) -> &str {
        match self {
            CardiacCondition::Normal => "normal",
            CardiacCondition::AtrialFibrillation => "afib",
            CardiacCondition::MyocardialInfarction => "mi",
            CardiacCondition::VentricularTachycardia => "vtach",
            CardiacCondition::Other(label) => label.as_str(),
        }
    }

    /// Heart rate, amplitude and noise for this condition
    pub fn profile(&self) -> ConditionProfile {
        match self {
            CardiacCondition::Normal => ConditionProfile {
                heart_rate_bpm: 72.0,
                amplitude: 1.0,
                noise_stddev: 0.05,
            },
            CardiacCondition::AtrialFibrillation => ConditionProfile {
                heart_rate_bpm: 110.0,
                amplitude: 0.8,
                noise_stddev: 0.15,
            },
            CardiacCondition::MyocardialInfarction => ConditionProfile {
                heart_rate_bpm: 95.0,
                amplitude: 1.2,
                noise_stddev: 0.08,
            },
            CardiacCondition::VentricularTachycardia => ConditionProfile {
                heart_rate_bpm: 145.0,
                amplitude: 1.5,
                noise_stddev: 0.10,
            },
            CardiacCondition::Other(_) => ConditionProfile::DEFAULT,
        }
    }

    /// Whether the trace gets the extra multiplicative irregularity pass
    pub fn is_irregular(&self) -> bool {
        matches!(self, CardiacCondition::AtrialFibrillation)
    }

    /// Human-readable condition name
    pub fn display_name(&self) -> &str {
        match self {
            CardiacCondition::Normal => "Normal sinus rhythm",
            CardiacCondition::AtrialFibrillation => "Atrial fibrillation",
            CardiacCondition::MyocardialInfarction => "Myocardial infarction",
            CardiacCondition::VentricularTachycardia => "Ventricular tachycardia",
            CardiacCondition::Other(_) => "Unclassified rhythm",
        }
    }

    /// The named conditions with dedicated profiles
    pub fn presets() -> Vec<CardiacCondition> {
        vec![
            CardiacCondition::Normal,
            CardiacCondition::AtrialFibrillation,
            CardiacCondition::MyocardialInfarction,
            CardiacCondition::VentricularTachycardia,
        ]
    }
}

impl Default for CardiacCondition {
    fn default() -> Self {
        CardiacCondition::Normal
    }
}

impl From<&str> for CardiacCondition {
    fn from(label: &str) -> Self {
        CardiacCondition::from_label(label)
    }
}

impl From<String> for CardiacCondition {
    fn from(label: String) -> Self {
        CardiacCondition::from_label(&label)
    }
}

impl From<CardiacCondition> for String {
    fn from(condition: CardiacCondition) -> Self {
        match condition {
            CardiacCondition::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for CardiacCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
