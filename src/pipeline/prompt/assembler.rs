use super::exemplars::few_shot_letters;
use crate::models::{DiagnosisEntry, MedOrder};
use crate::pipeline::redaction::{RedactedNote, RedactedRecord};

/// Instruction used when the reviewer supplies none.
pub const DEFAULT_INSTRUCTION: &str = "Write a clear and complete discharge summary in \
     paragraph form for the patient described in this data. Do not use bullet points.";

/// Always appended last. Mitigation only — the normalizer still repairs
/// whatever the model mangles anyway.
const SPACING_DIRECTIVE: &str = "\n\nIMPORTANT: Ensure proper spacing between words and \
     after punctuation. Use clear paragraph breaks. DO NOT add any spaces or characters \
     within placeholders like REDACTED_NAME - keep them exactly as written.";

#[derive(Debug, Clone)]
pub struct PromptOptions {
    /// Prepend the few-shot letter bank.
    pub few_shot: bool,
    /// Combined instruction block (default plus any reviewer additions),
    /// appended under `# Additional Instruction:`.
    pub instruction: Option<String>,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            few_shot: true,
            instruction: None,
        }
    }
}

fn format_diagnoses(diagnoses: &[DiagnosisEntry]) -> String {
    diagnoses
        .iter()
        .map(|d| match &d.icd_code {
            Some(code) => format!("{} ({})", d.description, code),
            None => d.description.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_medications(orders: &[MedOrder]) -> String {
    orders
        .iter()
        .map(|m| {
            format!(
                "- {} {} ({})",
                m.medication,
                m.dose,
                m.frequency.as_deref().unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_notes(notes: &[RedactedNote], ward_rounds: &[RedactedNote]) -> String {
    notes
        .iter()
        .chain(ward_rounds.iter())
        .map(|n| {
            format!(
                "{} - {}",
                n.date.as_deref().unwrap_or_default(),
                n.content.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn placeholder_list(record: &RedactedRecord) -> String {
    let mut list = String::from(
        "REDACTED_NAME, REDACTED_AGE, REDACTED_GENDER, REDACTED_ID, \
         REDACTED_ADMIT_DATE, REDACTED_DISCHARGE_DATE, REDACTED_DOCTOR",
    );
    if record.date_of_birth.is_some() {
        list.push_str(", REDACTED_DOB");
    }
    list
}

/// Assemble the generation prompt from a de-identified record.
///
/// Layout: optional few-shot letters, the case header and clinical data,
/// the required-sections contract, the placeholder directive, optional
/// reviewer instruction, and the spacing directive last.
pub fn build_generation_prompt(record: &RedactedRecord, options: &PromptOptions) -> String {
    let body = format!(
        "Date: {discharge}\n\
         Patient: {name}\n\
         Age: {age}\n\
         Gender: {gender}\n\
         Admission Date: {admit}\n\
         Diagnosis: {diagnoses}\n\n\
         Clinical Notes:\n\
         {notes}\n\n\
         Medications:\n\
         {medications}\n\n\
         Please generate a discharge summary that includes all of the following sections:\n\n\
         - **Patient Information**: Name, age, gender, dates of admission and discharge.\n\
         - **Diagnosis**: All recorded diagnoses (include ICD/DRG codes if available).\n\
         - **Summary of Care**: Presenting symptoms, vitals, imaging findings, lab trends, \
         treatments provided (medications, interventions).\n\
         - **Disposition**: Discharge status and instructions.\n\
         - **Follow-up Plan**: Appointments or further evaluations.\n\
         - **Contact**: Sign off with the treating physician's name.\n\n\
         Use the following placeholders exactly as shown, with no quotes, brackets, or formatting:\n\
         {placeholders}\n\n\
         The tone should be professional and understandable to patients, families, and \
         clinicians. Organize sections clearly and use bullet points where appropriate.\n\n\
         Sign off with:\n\
         Sincerely,\n\
         {doctor}",
        discharge = record.discharge_date,
        name = record.name,
        age = record.age,
        gender = record.gender,
        admit = record.admission_date,
        diagnoses = format_diagnoses(&record.diagnoses),
        notes = format_notes(&record.notes, &record.ward_round_notes),
        medications = format_medications(&record.med_orders),
        placeholders = placeholder_list(record),
        doctor = crate::pipeline::redaction::Placeholder::Doctor.token(),
    );

    let mut prompt = if options.few_shot {
        format!("{}\n\n---\n\n{}", few_shot_letters(), body)
    } else {
        body
    };

    if let Some(instruction) = options
        .instruction
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
    {
        prompt.push_str("\n\n# Additional Instruction:\n");
        prompt.push_str(instruction);
    }

    prompt.push_str(SPACING_DIRECTIVE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Demographics, NoteEntry, PatientRecord};
    use crate::pipeline::redaction::redact;

    fn sample_redacted() -> RedactedRecord {
        let record = PatientRecord {
            patient_id: Some("MRN-2391".to_string()),
            patient_demographics: Demographics {
                name: Some("Margaret Doyle".to_string()),
                age: Some(74),
                gender: Some("Female".to_string()),
                admission_date: Some("2024-03-02".to_string()),
                discharge_date: Some("2024-03-09".to_string()),
                ..Default::default()
            },
            diagnoses: vec![
                DiagnosisEntry {
                    description: "Community-acquired pneumonia".to_string(),
                    icd_code: Some("J18.9".to_string()),
                },
                DiagnosisEntry {
                    description: "Type 2 diabetes mellitus".to_string(),
                    icd_code: None,
                },
            ],
            med_orders: vec![
                MedOrder {
                    medication: "Amoxicillin".to_string(),
                    dose: "500mg".to_string(),
                    frequency: Some("TDS".to_string()),
                },
                MedOrder {
                    medication: "Paracetamol".to_string(),
                    dose: "1g".to_string(),
                    frequency: None,
                },
            ],
            notes: vec![NoteEntry {
                date: Some("2024-03-02".to_string()),
                author: Some("Dr. Shah".to_string()),
                content: Some("Admitted with productive cough.".to_string()),
                ..Default::default()
            }],
            ward_round_notes: vec![NoteEntry {
                date: Some("2024-03-08".to_string()),
                author: Some("Dr. Shah".to_string()),
                content: Some("Afebrile, mobilising well.".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        redact(&record)
    }

    // ========================================================================
    // Body structure
    // ========================================================================

    #[test]
    fn header_carries_placeholder_tokens() {
        let prompt = build_generation_prompt(&sample_redacted(), &PromptOptions::default());
        assert!(prompt.contains("Date: REDACTED_DISCHARGE_DATE"));
        assert!(prompt.contains("Patient: REDACTED_NAME"));
        assert!(prompt.contains("Age: REDACTED_AGE"));
        assert!(prompt.contains("Gender: REDACTED_GENDER"));
        assert!(prompt.contains("Admission Date: REDACTED_ADMIT_DATE"));
    }

    #[test]
    fn diagnoses_joined_with_codes() {
        let prompt = build_generation_prompt(&sample_redacted(), &PromptOptions::default());
        assert!(prompt.contains(
            "Diagnosis: Community-acquired pneumonia (J18.9), Type 2 diabetes mellitus"
        ));
    }

    #[test]
    fn medication_lines_with_frequency_fallback() {
        let prompt = build_generation_prompt(&sample_redacted(), &PromptOptions::default());
        assert!(prompt.contains("- Amoxicillin 500mg (TDS)"));
        assert!(prompt.contains("- Paracetamol 1g (N/A)"));
    }

    #[test]
    fn notes_listed_before_ward_rounds() {
        let prompt = build_generation_prompt(&sample_redacted(), &PromptOptions::default());
        let admission = prompt
            .find("2024-03-02 - Admitted with productive cough.")
            .unwrap();
        let ward_round = prompt.find("2024-03-08 - Afebrile, mobilising well.").unwrap();
        assert!(admission < ward_round);
    }

    #[test]
    fn required_sections_enumerated() {
        let prompt = build_generation_prompt(&sample_redacted(), &PromptOptions::default());
        for section in [
            "**Patient Information**",
            "**Diagnosis**",
            "**Summary of Care**",
            "**Disposition**",
            "**Follow-up Plan**",
            "**Contact**",
        ] {
            assert!(prompt.contains(section), "missing section {section}");
        }
    }

    // ========================================================================
    // Few-shot bank
    // ========================================================================

    #[test]
    fn few_shot_bank_prepended_by_default() {
        let prompt = build_generation_prompt(&sample_redacted(), &PromptOptions::default());
        assert!(prompt.starts_with("Discharge Letter"));
        assert!(prompt.contains("\n\n---\n\nDate: REDACTED_DISCHARGE_DATE"));
    }

    #[test]
    fn few_shot_bank_can_be_disabled() {
        let options = PromptOptions {
            few_shot: false,
            instruction: None,
        };
        let prompt = build_generation_prompt(&sample_redacted(), &options);
        assert!(prompt.starts_with("Date: REDACTED_DISCHARGE_DATE"));
        assert!(!prompt.contains("Dear REDACTED_NAME"));
    }

    // ========================================================================
    // Instruction block and directives
    // ========================================================================

    #[test]
    fn reviewer_instruction_appended_under_heading() {
        let options = PromptOptions {
            few_shot: false,
            instruction: Some("Emphasize follow-up plans.".to_string()),
        };
        let prompt = build_generation_prompt(&sample_redacted(), &options);
        assert!(prompt.contains("# Additional Instruction:\nEmphasize follow-up plans."));
    }

    #[test]
    fn blank_instruction_is_ignored() {
        let options = PromptOptions {
            few_shot: false,
            instruction: Some("   ".to_string()),
        };
        let prompt = build_generation_prompt(&sample_redacted(), &options);
        assert!(!prompt.contains("# Additional Instruction:"));
    }

    #[test]
    fn spacing_directive_comes_last() {
        let options = PromptOptions {
            few_shot: true,
            instruction: Some("Short paragraphs.".to_string()),
        };
        let prompt = build_generation_prompt(&sample_redacted(), &options);
        assert!(prompt.ends_with("keep them exactly as written."));
        let directive = prompt.find("IMPORTANT: Ensure proper spacing").unwrap();
        let instruction = prompt.find("# Additional Instruction:").unwrap();
        assert!(instruction < directive);
    }

    #[test]
    fn placeholder_directive_lists_core_tokens() {
        let prompt = build_generation_prompt(&sample_redacted(), &PromptOptions::default());
        assert!(prompt.contains("Use the following placeholders exactly as shown"));
        assert!(prompt.contains("REDACTED_ID"));
        // Sample record has no date of birth, so the optional token is absent
        // from the directive.
        assert!(!prompt.contains("REDACTED_DOB"));
    }

    #[test]
    fn dob_token_listed_when_record_has_one() {
        let record = PatientRecord {
            patient_demographics: Demographics {
                date_of_birth: Some("1950-01-12".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let prompt = build_generation_prompt(&redact(&record), &PromptOptions::default());
        assert!(prompt.contains("REDACTED_DOB"));
    }

    #[test]
    fn sign_off_uses_doctor_token() {
        let prompt = build_generation_prompt(&sample_redacted(), &PromptOptions::default());
        assert!(prompt.contains("Sign off with:\nSincerely,\nREDACTED_DOCTOR"));
    }
}
