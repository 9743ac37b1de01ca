use serde::{Deserialize, Serialize};

use super::vocabulary::Placeholder;
use crate::models::{DiagnosisEntry, MedOrder, PatientRecord};

/// De-identified mirror of a [`PatientRecord`].
///
/// Identifying slots hold placeholder tokens instead of real values;
/// clinical content (diagnoses, medication orders, note bodies and note
/// dates) is carried over unchanged. The source record is never mutated —
/// redaction builds an independent value, so the identifiable original and
/// the de-identified copy can coexist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedRecord {
    pub patient_id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    /// Present only when the source record carried a date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    pub admission_date: String,
    pub discharge_date: String,
    pub diagnoses: Vec<DiagnosisEntry>,
    pub med_orders: Vec<MedOrder>,
    pub notes: Vec<RedactedNote>,
    pub ward_round_notes: Vec<RedactedNote>,
}

/// A clinical note with its author replaced by the doctor token.
/// Dates and body text are clinical content and stay as written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedNote {
    pub date: Option<String>,
    pub time: Option<String>,
    pub author: String,
    pub content: Option<String>,
}

fn redact_notes(notes: &[crate::models::NoteEntry]) -> Vec<RedactedNote> {
    notes
        .iter()
        .map(|note| RedactedNote {
            date: note.date.clone(),
            time: note.time.clone(),
            author: Placeholder::Doctor.token().to_string(),
            content: note.content.clone(),
        })
        .collect()
}

/// Build the de-identified form of a patient record.
///
/// Name, age, gender, patient id, admission and discharge dates, date of
/// birth, and every note author are replaced by their tokens; absent
/// identifying fields still yield a token (the token marks the slot, not
/// the value). Never fails.
pub fn redact(record: &PatientRecord) -> RedactedRecord {
    RedactedRecord {
        patient_id: Placeholder::PatientId.token().to_string(),
        name: Placeholder::Name.token().to_string(),
        age: Placeholder::Age.token().to_string(),
        gender: Placeholder::Gender.token().to_string(),
        date_of_birth: record
            .patient_demographics
            .date_of_birth
            .as_ref()
            .map(|_| Placeholder::DateOfBirth.token().to_string()),
        admission_date: Placeholder::AdmitDate.token().to_string(),
        discharge_date: Placeholder::DischargeDate.token().to_string(),
        diagnoses: record.diagnoses.clone(),
        med_orders: record.med_orders.clone(),
        notes: redact_notes(&record.notes),
        ward_round_notes: redact_notes(&record.ward_round_notes),
    }
}
