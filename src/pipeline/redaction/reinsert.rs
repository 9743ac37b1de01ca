use super::vocabulary::{match_placeholder, Placeholder};
use crate::models::PatientRecord;

/// Substituted for identifying values the record does not carry.
/// Reinsertion is a reporting step, not a validation step — a sparse
/// record still yields a readable letter.
pub const MISSING_VALUE: &str = "unknown";

/// Fallback when no note in the record names its author.
pub const DOCTOR_FALLBACK: &str = "Discharging Doctor";

/// Real values resolved from a patient record, one per placeholder slot.
#[derive(Debug, Clone)]
pub struct Replacements {
    name: String,
    age: String,
    gender: String,
    patient_id: String,
    admission_date: String,
    discharge_date: String,
    date_of_birth: String,
    doctor: String,
}

impl Replacements {
    pub fn from_record(record: &PatientRecord) -> Self {
        let demographics = &record.patient_demographics;
        Self {
            name: or_missing(demographics.name.as_deref()),
            age: demographics
                .age
                .map(|age| age.to_string())
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
            gender: or_missing(demographics.gender.as_deref()),
            patient_id: or_missing(record.patient_id.as_deref()),
            admission_date: or_missing(record.admission_date()),
            discharge_date: or_missing(record.discharge_date()),
            date_of_birth: or_missing(demographics.date_of_birth.as_deref()),
            doctor: resolve_doctor_name(record),
        }
    }

    fn value(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Name => &self.name,
            Placeholder::Age => &self.age,
            Placeholder::Gender => &self.gender,
            Placeholder::PatientId => &self.patient_id,
            Placeholder::AdmitDate => &self.admission_date,
            Placeholder::DischargeDate => &self.discharge_date,
            Placeholder::Doctor => &self.doctor,
            Placeholder::DateOfBirth => &self.date_of_birth,
        }
    }
}

fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => MISSING_VALUE.to_string(),
    }
}

/// The discharging doctor is the most recently *entered* author: notes and
/// ward-round notes are walked in reverse insertion order (ward rounds
/// first, since they are appended after admission notes) and the first
/// non-empty author wins. Entry order, not note date — a back-dated late
/// entry still reflects who last touched the record.
pub fn resolve_doctor_name(record: &PatientRecord) -> String {
    record
        .notes
        .iter()
        .chain(record.ward_round_notes.iter())
        .rev()
        .find_map(|note| {
            note.author
                .as_deref()
                .map(str::trim)
                .filter(|author| !author.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DOCTOR_FALLBACK.to_string())
}

/// Replace every placeholder occurrence in `text`, exact or mangled, with
/// the real value resolved from `record`.
///
/// Single pass, left to right: replacement output is never re-scanned, so a
/// substituted value can never be mistaken for (or glued into) another
/// token. Unrecognized text copies through untouched.
pub fn insert_pii(text: &str, record: &PatientRecord) -> String {
    let replacements = Replacements::from_record(record);
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if let Some((placeholder, consumed)) = match_placeholder(rest) {
            out.push_str(replacements.value(placeholder));
            i += consumed;
        } else {
            match rest.chars().next() {
                Some(c) => {
                    out.push(c);
                    i += c.len_utf8();
                }
                None => break,
            }
        }
    }
    out
}
