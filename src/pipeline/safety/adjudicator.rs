use std::sync::LazyLock;

use regex::Regex;

use super::exemplars::adjudication_exemplars;
use super::types::{AdjudicationReport, SafetyVerdict};
use crate::config::ANALYSIS_TEMPERATURE;
use crate::llm::{ChatModel, LlmError};

/// Response contract: one line, anywhere in the response but expected
/// first, of the form `Answer: Yes|No|Uncertain`. Case does not matter;
/// the word boundary keeps "Answer: notable" from reading as No.
static VERDICT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^answer:\s*(yes|no|uncertain)\b").unwrap());

/// Build the adjudication prompt: contract, worked exemplars, then the
/// case material under review (a serialized redacted record pre-generation,
/// a de-identified summary post-generation).
pub fn build_adjudication_prompt(subject: &str) -> String {
    format!(
        "You are reviewing whether a patient is medically safe for hospital discharge.\n\
         Judge only from the documented clinical course below. Begin your response with\n\
         exactly one line in the form `Answer: Yes`, `Answer: No`, or `Answer: Uncertain`,\n\
         then explain your reasoning. Two worked examples follow.\n\n\
         {exemplars}\n\n\
         ---\n\n\
         Case:\n\
         {subject}\n",
        exemplars = adjudication_exemplars(),
        subject = subject,
    )
}

/// Extract the verdict from an adjudication response. `None` means the
/// response never produced a readable `Answer:` line and the caller must
/// treat the adjudication as indeterminate.
pub fn parse_verdict(response: &str) -> Option<SafetyVerdict> {
    let captures = VERDICT_LINE.captures(response)?;
    match captures.get(1)?.as_str().to_lowercase().as_str() {
        "yes" => Some(SafetyVerdict::Yes),
        "no" => Some(SafetyVerdict::No),
        "uncertain" => Some(SafetyVerdict::Uncertain),
        _ => None,
    }
}

/// Run one adjudication call and parse its verdict.
pub fn adjudicate<M: ChatModel>(
    client: &M,
    model: &str,
    subject: &str,
) -> Result<AdjudicationReport, LlmError> {
    let prompt = build_adjudication_prompt(subject);
    let response = client.complete(model, &prompt, ANALYSIS_TEMPERATURE)?;
    let verdict = parse_verdict(&response);

    match verdict {
        Some(v) => tracing::info!(verdict = %v.as_str(), "Discharge adjudication verdict"),
        None => tracing::warn!("Adjudication response has no readable verdict line"),
    }

    Ok(AdjudicationReport { verdict, response })
}
