//! FHIR R4 `Observation` carrying an ECG Lead II trace

use crate::sampled_data::{SampledData, DEFAULT_DECIMATION_FACTOR};
use chrono::{DateTime, Utc};
use ecg_core::{EcgResult, Waveform};
use serde::{Deserialize, Serialize};
use tracing::info;

const FHIR_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const OBSERVATION_CATEGORY_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/observation-category";
const LOINC_SYSTEM: &str = "http://loinc.org";
const ECG_LEAD_II_CODE: &str = "131328";
const ECG_LEAD_II_DISPLAY: &str = "MDC_ECG_ELEC_POTL_II";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
}

/// Patient the recording is attributed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRef {
    pub id: String,
    pub name: String,
}

impl PatientRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    fn to_reference(&self) -> Reference {
        Reference {
            reference: format!("Patient/{}", self.id),
            display: Some(self.name.clone()),
        }
    }
}

/// `Observation` resource holding a decimated Lead II trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcgObservation {
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: String,
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    pub effective_date_time: String,
    pub issued: String,
    pub value_sampled_data: SampledData,
    #[serde(default)]
    pub note: Vec<Annotation>,
}

impl EcgObservation {
    /// Decode the transported samples
    pub fn waveform_samples(&self) -> EcgResult<Vec<f64>> {
        self.value_sampled_data.samples()
    }

    /// Patient display name, if present
    pub fn subject_display(&self) -> Option<&str> {
        self.subject.display.as_deref()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds an [`EcgObservation`] from a generated trace
#[derive(Debug)]
pub struct ObservationBuilder<'a> {
    patient: PatientRef,
    waveform: &'a Waveform,
    decimation_factor: usize,
    timestamp: Option<DateTime<Utc>>,
}

impl<'a> ObservationBuilder<'a> {
    pub fn new(patient: PatientRef, waveform: &'a Waveform) -> Self {
        Self {
            patient,
            waveform,
            decimation_factor: DEFAULT_DECIMATION_FACTOR,
            timestamp: None,
        }
    }

    pub fn decimation_factor(mut self, factor: usize) -> Self {
        self.decimation_factor = factor;
        self
    }

    /// Fix `effectiveDateTime`/`issued` instead of using the current time
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> EcgResult<EcgObservation> {
        let sampled = SampledData::from_waveform(self.waveform, self.decimation_factor)?;
        let effective_rate = self.waveform.sampling_rate_hz as f64 / self.decimation_factor as f64;
        let when = self
            .timestamp
            .unwrap_or_else(Utc::now)
            .format(FHIR_TIMESTAMP_FORMAT)
            .to_string();

        let note = format!(
            "{}-second ECG Lead II recording. Sampling rate: {} Hz. Total samples: {}",
            self.waveform.duration_seconds,
            effective_rate,
            sampled.sample_count()
        );

        info!(
            patient = %self.patient.id,
            condition = %self.waveform.condition,
            samples = sampled.sample_count(),
            "Built ECG observation"
        );

        Ok(EcgObservation {
            resource_type: "Observation".to_string(),
            id: None,
            status: "final".to_string(),
            category: vec![CodeableConcept {
                coding: vec![Coding {
                    system: OBSERVATION_CATEGORY_SYSTEM.to_string(),
                    code: "procedure".to_string(),
                    display: "Procedure".to_string(),
                }],
                text: None,
            }],
            code: CodeableConcept {
                coding: vec![Coding {
                    system: LOINC_SYSTEM.to_string(),
                    code: ECG_LEAD_II_CODE.to_string(),
                    display: ECG_LEAD_II_DISPLAY.to_string(),
                }],
                text: Some("ECG Lead II Waveform".to_string()),
            },
            subject: self.patient.to_reference(),
            effective_date_time: when.clone(),
            issued: when,
            value_sampled_data: sampled,
            note: vec![Annotation { text: note }],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub resource: EcgObservation,
}

/// `collection` Bundle of ECG observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub resource_type: String,
    #[serde(rename = "type")]
    pub bundle_type: String,
    pub total: usize,
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    pub fn collection(observations: Vec<EcgObservation>) -> Self {
        Self {
            resource_type: "Bundle".to_string(),
            bundle_type: "collection".to_string(),
            total: observations.len(),
            entry: observations
                .into_iter()
                .map(|resource| BundleEntry { resource })
                .collect(),
        }
    }

    pub fn observations(&self) -> impl Iterator<Item = &EcgObservation> {
        self.entry.iter().map(|e| &e.resource)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ecg_core::CardiacCondition;
    use ecg_simulation::generate_waveform;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vtach_waveform() -> Waveform {
        let condition = CardiacCondition::VentricularTachycardia;
        let samples = generate_waveform(&condition, 10.0, 500, &mut StdRng::seed_from_u64(4)).unwrap();
        Waveform::new(samples, condition, 10.0, 500).unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_observation_shape() {
        let waveform = vtach_waveform();
        let observation = ObservationBuilder::new(PatientRef::new("abc-123", "David Chen"), &waveform)
            .timestamp(fixed_time())
            .build()
            .unwrap();

        let json = serde_json::to_value(&observation).unwrap();
        assert_eq!(json["resourceType"], "Observation");
        assert_eq!(json["status"], "final");
        assert_eq!(json["category"][0]["coding"][0]["code"], "procedure");
        assert_eq!(json["code"]["coding"][0]["code"], "131328");
        assert_eq!(json["code"]["text"], "ECG Lead II Waveform");
        assert_eq!(json["subject"]["reference"], "Patient/abc-123");
        assert_eq!(json["subject"]["display"], "David Chen");
        assert_eq!(json["effectiveDateTime"], "2024-03-05T14:30:00Z");
        assert_eq!(json["issued"], "2024-03-05T14:30:00Z");
        assert_eq!(json["valueSampledData"]["period"], 20.0);
        assert_eq!(json["valueSampledData"]["dimensions"], 1);
        assert_eq!(json["valueSampledData"]["origin"]["code"], "mV");
        assert!(json.get("id").is_none());
        assert_eq!(
            json["note"][0]["text"],
            "10-second ECG Lead II recording. Sampling rate: 50 Hz. Total samples: 500"
        );
    }

    #[test]
    fn test_samples_survive_transport() {
        let waveform = vtach_waveform();
        let observation = ObservationBuilder::new(PatientRef::new("p1", "Test"), &waveform)
            .timestamp(fixed_time())
            .build()
            .unwrap();

        let decoded = observation.waveform_samples().unwrap();
        assert_eq!(decoded.len(), 500);
        for (i, value) in decoded.iter().enumerate() {
            assert!((value - waveform.samples[i * 10]).abs() <= 0.0005 + 1e-9);
        }

        let json = observation.to_json().unwrap();
        let parsed: EcgObservation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, observation);
        assert_eq!(parsed.subject_display(), Some("Test"));
    }

    #[test]
    fn test_custom_decimation() {
        let waveform = vtach_waveform();
        let observation = ObservationBuilder::new(PatientRef::new("p1", "Test"), &waveform)
            .decimation_factor(5)
            .build()
            .unwrap();

        assert_eq!(observation.value_sampled_data.period, 10.0);
        assert_eq!(observation.value_sampled_data.sample_count(), 1000);
    }

    #[test]
    fn test_bundle() {
        let waveform = vtach_waveform();
        let observations: Vec<_> = ["a", "b"]
            .iter()
            .map(|id| {
                ObservationBuilder::new(PatientRef::new(*id, "Name"), &waveform)
                    .timestamp(fixed_time())
                    .build()
                    .unwrap()
            })
            .collect();

        let bundle = Bundle::collection(observations);
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["resourceType"], "Bundle");
        assert_eq!(json["type"], "collection");
        assert_eq!(json["total"], 2);
        assert_eq!(json["entry"][1]["resource"]["subject"]["reference"], "Patient/b");
        assert_eq!(bundle.observations().count(), 2);
    }
}
