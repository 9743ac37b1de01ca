use serde::{Deserialize, Serialize};

/// Verdict from the discharge-readiness adjudicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyVerdict {
    Yes,
    No,
    Uncertain,
}

impl SafetyVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            SafetyVerdict::Yes => "Yes",
            SafetyVerdict::No => "No",
            SafetyVerdict::Uncertain => "Uncertain",
        }
    }
}

/// What the gate requires of the caller before generation may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateAction {
    /// Verdict Yes — generation proceeds without ceremony.
    Proceed,
    /// Verdict No or Uncertain — an explicit reviewer override is required.
    RequireOverride,
    /// No parseable verdict. Manual review; an override does not apply —
    /// an unreadable adjudication is never silently treated as safe.
    ManualReview,
}

/// Full outcome of one adjudication call: the parsed verdict (`None` when
/// the response never produced a readable `Answer:` line) plus the raw
/// response text, kept verbatim for display and the cycle log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjudicationReport {
    pub verdict: Option<SafetyVerdict>,
    pub response: String,
}

impl AdjudicationReport {
    pub fn gate_action(&self) -> GateAction {
        match self.verdict {
            Some(SafetyVerdict::Yes) => GateAction::Proceed,
            Some(SafetyVerdict::No) | Some(SafetyVerdict::Uncertain) => GateAction::RequireOverride,
            None => GateAction::ManualReview,
        }
    }
}
