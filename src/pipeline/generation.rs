use std::fmt;

use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::highlights::extract_highlights;
use super::normalize::normalize_output;
use super::prompt::{build_generation_prompt, PromptOptions, DEFAULT_INSTRUCTION};
use super::redaction::{insert_pii, redact};
use super::safety::{
    adjudicate, prescreen_notes, AdjudicationReport, GateAction, PrescreenReport,
    DEFAULT_PRESCREEN_WINDOW,
};
use crate::config::{DEFAULT_GENERATION_MODEL, GENERATION_TEMPERATURE};
use crate::llm::{ChatModel, LlmError};
use crate::models::{Highlight, PatientRecord};

/// Pipeline stage that issued a failed external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CycleStage {
    PreAdjudication,
    Generation,
    HighlightExtraction,
    PostAdjudication,
}

impl CycleStage {
    pub fn as_str(self) -> &'static str {
        match self {
            CycleStage::PreAdjudication => "pre-adjudication",
            CycleStage::Generation => "generation",
            CycleStage::HighlightExtraction => "highlight extraction",
            CycleStage::PostAdjudication => "post-adjudication",
        }
    }
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("{stage} call failed: {source}")]
    Service {
        stage: CycleStage,
        #[source]
        source: LlmError,
    },

    #[error("failed to serialize redacted record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a cycle stopped before producing a summary.
#[derive(Debug, Clone, Serialize)]
pub enum BlockReason {
    /// Red-flag phrases in the recent notes. Not overridable; the pipeline
    /// halts before any external call is made.
    PrescreenUnsafe(PrescreenReport),
    /// The adjudicator answered No or Uncertain and no reviewer override
    /// was supplied.
    AdjudicationDenied(AdjudicationReport),
    /// The adjudicator's response carried no readable verdict. An override
    /// does not apply; an unreadable adjudication is never treated as safe.
    VerdictIndeterminate(AdjudicationReport),
}

/// Everything one completed cycle produced, in the shape the append-only
/// cycle log expects.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedCycle {
    pub cycle_id: Uuid,
    pub timestamp: String,
    pub model: String,
    pub instruction: String,
    pub prompt: String,
    pub redacted_summary: String,
    pub identified_summary: String,
    pub highlights: Vec<Highlight>,
    pub prescreen: PrescreenReport,
    pub pre_adjudication: AdjudicationReport,
    pub overridden: bool,
    pub post_adjudication: AdjudicationReport,
}

#[derive(Debug, Clone, Serialize)]
pub enum CycleOutcome {
    Blocked(BlockReason),
    Completed(CompletedCycle),
}

impl CycleOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, CycleOutcome::Blocked(_))
    }
}

/// Caller-tunable knobs for one generation cycle.
#[derive(Debug, Clone)]
pub struct CycleOptions {
    pub model: String,
    pub temperature: f32,
    pub few_shot: bool,
    /// Appended to the default instruction when non-blank.
    pub user_instruction: Option<String>,
    /// Reviewer override for a No/Uncertain pre-adjudication verdict.
    pub override_block: bool,
    pub prescreen_window: usize,
}

impl Default for CycleOptions {
    fn default() -> Self {
        CycleOptions {
            model: DEFAULT_GENERATION_MODEL.to_string(),
            temperature: GENERATION_TEMPERATURE,
            few_shot: true,
            user_instruction: None,
            override_block: false,
            prescreen_window: DEFAULT_PRESCREEN_WINDOW,
        }
    }
}

/// Run one full generation cycle for `record`.
///
/// Order: keyword pre-screen, safety pre-adjudication, generation,
/// spacing normalization, PII reinsertion, highlight extraction, safety
/// post-adjudication. The pre-screen and pre-adjudication can stop the
/// cycle; the post-adjudication is informational and is recorded whatever
/// it says. A failed external call aborts the cycle with the stage that
/// issued it; nothing partial is returned.
pub fn run_cycle<M: ChatModel>(
    client: &M,
    record: &PatientRecord,
    options: &CycleOptions,
) -> Result<CycleOutcome, CycleError> {
    let cycle_id = Uuid::new_v4();
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let prescreen = prescreen_notes(record, options.prescreen_window);
    if !prescreen.safe {
        tracing::warn!(
            cycle_id = %cycle_id,
            flags = prescreen.flags.len(),
            "Pre-screen found red flags; generation halted"
        );
        return Ok(CycleOutcome::Blocked(BlockReason::PrescreenUnsafe(
            prescreen,
        )));
    }

    let redacted = redact(record);
    let subject = serde_json::to_string_pretty(&redacted)?;

    let pre_adjudication =
        adjudicate(client, &options.model, &subject).map_err(|source| CycleError::Service {
            stage: CycleStage::PreAdjudication,
            source,
        })?;

    let overridden = match pre_adjudication.gate_action() {
        GateAction::Proceed => false,
        GateAction::RequireOverride if options.override_block => {
            tracing::warn!(cycle_id = %cycle_id, "Reviewer override applied to adjudication denial");
            true
        }
        GateAction::RequireOverride => {
            return Ok(CycleOutcome::Blocked(BlockReason::AdjudicationDenied(
                pre_adjudication,
            )));
        }
        GateAction::ManualReview => {
            return Ok(CycleOutcome::Blocked(BlockReason::VerdictIndeterminate(
                pre_adjudication,
            )));
        }
    };

    // The default instruction always stands; reviewer text extends it.
    let instruction = match options
        .user_instruction
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(extra) => format!("{DEFAULT_INSTRUCTION}\n\n{extra}"),
        None => DEFAULT_INSTRUCTION.to_string(),
    };

    let prompt = build_generation_prompt(
        &redacted,
        &PromptOptions {
            few_shot: options.few_shot,
            instruction: Some(instruction.clone()),
        },
    );

    let raw = client
        .complete(&options.model, &prompt, options.temperature)
        .map_err(|source| CycleError::Service {
            stage: CycleStage::Generation,
            source,
        })?;

    let redacted_summary = normalize_output(&raw);
    let identified_summary = insert_pii(&redacted_summary, record);

    let highlights = extract_highlights(client, &options.model, &redacted_summary).map_err(
        |source| CycleError::Service {
            stage: CycleStage::HighlightExtraction,
            source,
        },
    )?;

    let post_adjudication = adjudicate(client, &options.model, &redacted_summary).map_err(
        |source| CycleError::Service {
            stage: CycleStage::PostAdjudication,
            source,
        },
    )?;

    tracing::info!(
        cycle_id = %cycle_id,
        model = %options.model,
        highlights = highlights.len(),
        post_verdict = post_adjudication
            .verdict
            .map(|v| v.as_str())
            .unwrap_or("indeterminate"),
        "Generation cycle completed"
    );

    Ok(CycleOutcome::Completed(CompletedCycle {
        cycle_id,
        timestamp,
        model: options.model.clone(),
        instruction,
        prompt,
        redacted_summary,
        identified_summary,
        highlights,
        prescreen,
        pre_adjudication,
        overridden,
        post_adjudication,
    }))
}
