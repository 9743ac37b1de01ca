use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Cannot read patient record: {0}")]
    Io(#[from] std::io::Error),

    #[error("Patient record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One patient's clinical record as loaded from its JSON document.
///
/// Every field tolerates absence: a sparse or partial record deserializes
/// to `None`/empty rather than failing. Downstream stages substitute
/// sentinels at the point of use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_demographics: Demographics,
    /// Some source documents carry admission/discharge dates at the top
    /// level instead of (or as well as) inside demographics.
    #[serde(default)]
    pub admit_date: Option<String>,
    #[serde(default)]
    pub discharge_date: Option<String>,
    #[serde(default)]
    pub diagnoses: Vec<DiagnosisEntry>,
    #[serde(default)]
    pub med_orders: Vec<MedOrder>,
    #[serde(default)]
    pub notes: Vec<NoteEntry>,
    #[serde(default)]
    pub ward_round_notes: Vec<NoteEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default, alias = "admit_date")]
    pub admission_date: Option<String>,
    #[serde(default)]
    pub discharge_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosisEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icd_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedOrder {
    #[serde(default)]
    pub medication: String,
    #[serde(default)]
    pub dose: String,
    #[serde(default)]
    pub frequency: Option<String>,
}

/// A dated clinical note. Shared by `notes` and `ward_round_notes`;
/// ward-round entries in source documents use `note` for the body text,
/// hence the alias.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, alias = "note")]
    pub content: Option<String>,
}

impl PatientRecord {
    pub fn from_json_str(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, RecordError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Admission date with demographics taking precedence over the
    /// top-level field.
    pub fn admission_date(&self) -> Option<&str> {
        self.patient_demographics
            .admission_date
            .as_deref()
            .or(self.admit_date.as_deref())
    }

    /// Discharge date with demographics taking precedence over the
    /// top-level field.
    pub fn discharge_date(&self) -> Option<&str> {
        self.patient_demographics
            .discharge_date
            .as_deref()
            .or(self.discharge_date.as_deref())
    }
}
