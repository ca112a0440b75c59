//! Export configuration: which patients get a trace, and how it is sampled

use crate::sampled_data::DEFAULT_DECIMATION_FACTOR;
use ecg_core::{CardiacCondition, EcgError, EcgResult};
use ecg_simulation::{validate_timing, EcgConfig, DEFAULT_DURATION_SECONDS, DEFAULT_SAMPLING_RATE_HZ};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One patient of the export cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientEntry {
    /// FHIR `Patient` id the observation will reference
    pub id: String,
    /// Display name
    pub name: String,
    /// Condition label; unrecognized labels use the default profile
    pub condition: CardiacCondition,
}

impl PatientEntry {
    pub fn new(id: &str, name: &str, condition: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            condition: CardiacCondition::from_label(condition),
        }
    }
}

/// Configuration for a cohort export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Configuration name
    pub name: String,
    /// Trace length in seconds
    #[serde(default = "default_duration")]
    pub duration_seconds: f64,
    /// Generation sampling rate in Hz
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate_hz: u32,
    /// Keep every n-th sample for transport
    #[serde(default = "default_decimation")]
    pub decimation_factor: usize,
    /// Base seed; patient `i` uses `seed + i`. Fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Patients to export
    pub patients: Vec<PatientEntry>,
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SECONDS
}

fn default_sampling_rate() -> u32 {
    DEFAULT_SAMPLING_RATE_HZ
}

fn default_decimation() -> usize {
    DEFAULT_DECIMATION_FACTOR
}

impl ExportConfig {
    /// Five demonstration cardiac patients, one trace each
    pub fn demo_cohort() -> Self {
        ExportConfig {
            name: "Cardiac demo cohort".to_string(),
            duration_seconds: DEFAULT_DURATION_SECONDS,
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            decimation_factor: DEFAULT_DECIMATION_FACTOR,
            seed: None,
            patients: vec![
                PatientEntry::new("6df562fc-25a7-4e72-8753-9583e3259572", "Sarah Johnson", "afib"),
                PatientEntry::new("02ddeba7-45bc-4a90-962f-6044be99005a", "Robert Williams", "mi"),
                PatientEntry::new("c629b0db-4204-4cad-a9bd-7d13efdf6594", "Maria Garcia", "normal"),
                PatientEntry::new("1923687c-0068-47bd-96a9-8ef34801dc9c", "David Chen", "vtach"),
                PatientEntry::new("b9b10962-05fe-4912-944e-21a6ff2ae2b2", "Jennifer Brown", "normal"),
            ],
        }
    }

    /// Validate entire configuration
    pub fn validate(&self) -> EcgResult<()> {
        validate_timing(self.duration_seconds, self.sampling_rate_hz).map_err(|e| {
            EcgError::ConfigurationError {
                message: format!("Timing invalid: {}", e),
            }
        })?;

        if self.decimation_factor == 0 {
            return Err(EcgError::ConfigurationError {
                message: "Decimation factor must be greater than 0".to_string(),
            });
        }

        if self.patients.is_empty() {
            return Err(EcgError::ConfigurationError {
                message: "No patients configured".to_string(),
            });
        }

        for (index, patient) in self.patients.iter().enumerate() {
            if patient.id.trim().is_empty() {
                return Err(EcgError::ConfigurationError {
                    message: format!("Patient {} has no id", index),
                });
            }
        }

        Ok(())
    }

    /// One generation request per patient, in patient order
    pub fn requests(&self) -> Vec<EcgConfig> {
        self.patients
            .iter()
            .map(|patient| EcgConfig {
                condition: patient.condition.clone(),
                duration_seconds: self.duration_seconds,
                sampling_rate_hz: self.sampling_rate_hz,
                ..Default::default()
            })
            .collect()
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> EcgResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EcgError::ConfigurationError {
            message: format!("Failed to serialize configuration: {}", e),
        })
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> EcgResult<Self> {
        serde_json::from_str(json).map_err(|e| EcgError::ConfigurationError {
            message: format!("Failed to deserialize configuration: {}", e),
        })
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> EcgResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| EcgError::ConfigurationError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json(&json)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::demo_cohort()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_cohort() {
        let config = ExportConfig::demo_cohort();
        assert_eq!(config.patients.len(), 5);
        assert_eq!(config.patients[0].condition, CardiacCondition::AtrialFibrillation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ExportConfig::demo_cohort();

        config.duration_seconds = 0.0;
        assert!(matches!(config.validate(), Err(EcgError::ConfigurationError { .. })));

        config.duration_seconds = 10.0;
        config.decimation_factor = 0;
        assert!(config.validate().is_err());

        config.decimation_factor = 10;
        config.patients[2].id = "  ".to_string();
        assert!(config.validate().is_err());

        config.patients.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_requests_follow_patients() {
        let mut config = ExportConfig::demo_cohort();
        config.duration_seconds = 2.0;

        let requests = config.requests();
        assert_eq!(requests.len(), 5);
        assert_eq!(requests[3].condition, CardiacCondition::VentricularTachycardia);
        assert!(requests.iter().all(|r| r.duration_seconds == 2.0 && r.seed.is_none()));
    }

    #[test]
    fn test_json_round_trip() {
        let config = ExportConfig::demo_cohort();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"vtach\""));

        let parsed = ExportConfig::from_json(&json).unwrap();
        assert_eq!(parsed.name, config.name);
        assert_eq!(parsed.patients, config.patients);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "name": "minimal",
            "patients": [{ "id": "p1", "name": "Pat", "condition": "sinus_brady" }]
        }"#;
        let config = ExportConfig::from_json(json).unwrap();

        assert_eq!(config.duration_seconds, 10.0);
        assert_eq!(config.sampling_rate_hz, 500);
        assert_eq!(config.decimation_factor, 10);
        assert_eq!(config.seed, None);
        assert_eq!(config.patients[0].condition.label(), "sinus_brady");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_patients_field_rejected() {
        let result = ExportConfig::from_json(r#"{ "name": "broken" }"#);
        assert!(matches!(result, Err(EcgError::ConfigurationError { .. })));
    }

    #[test]
    fn test_from_missing_file() {
        let result = ExportConfig::from_file("/nonexistent/ecg-export.json");
        assert!(matches!(result, Err(EcgError::ConfigurationError { .. })));
    }
}
