use serde::{Deserialize, Serialize};

/// Category assigned to a salient phrase in a generated summary.
///
/// The wire form (classifier JSON) is snake_case; unknown categories are
/// rejected at deserialization and the offending item dropped by the
/// extractor's lenient parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightCategory {
    Diagnosis,
    Duration,
    Medication,
    InvestigationResult,
    LabResult,
    ClinicalTrend,
    RecoveryStatus,
    DischargeCriteria,
    FollowupAction,
    FollowupTiming,
    RedFlagInstruction,
    PatientInfo,
}

impl HighlightCategory {
    pub const ALL: [HighlightCategory; 12] = [
        HighlightCategory::Diagnosis,
        HighlightCategory::Duration,
        HighlightCategory::Medication,
        HighlightCategory::InvestigationResult,
        HighlightCategory::LabResult,
        HighlightCategory::ClinicalTrend,
        HighlightCategory::RecoveryStatus,
        HighlightCategory::DischargeCriteria,
        HighlightCategory::FollowupAction,
        HighlightCategory::FollowupTiming,
        HighlightCategory::RedFlagInstruction,
        HighlightCategory::PatientInfo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HighlightCategory::Diagnosis => "diagnosis",
            HighlightCategory::Duration => "duration",
            HighlightCategory::Medication => "medication",
            HighlightCategory::InvestigationResult => "investigation_result",
            HighlightCategory::LabResult => "lab_result",
            HighlightCategory::ClinicalTrend => "clinical_trend",
            HighlightCategory::RecoveryStatus => "recovery_status",
            HighlightCategory::DischargeCriteria => "discharge_criteria",
            HighlightCategory::FollowupAction => "followup_action",
            HighlightCategory::FollowupTiming => "followup_timing",
            HighlightCategory::RedFlagInstruction => "red_flag_instruction",
            HighlightCategory::PatientInfo => "patient_info",
        }
    }
}

/// One classified phrase lifted verbatim from a generated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub category: HighlightCategory,
}
