use serde_json::Value;

use crate::config::ANALYSIS_TEMPERATURE;
use crate::llm::{ChatModel, LlmError};
use crate::models::{Highlight, HighlightCategory};

/// Build the classification prompt for one generated summary.
///
/// The contract is strict: verbatim phrases, categories drawn from the
/// fixed taxonomy, JSON array only. The lenient parser below absorbs the
/// ways small models bend it.
pub fn build_classification_prompt(summary: &str) -> String {
    let taxonomy = HighlightCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are reviewing a hospital discharge summary. Identify the phrases a clinician would need at a glance.

Rules:
- Copy each phrase verbatim from the summary. Do not paraphrase.
- Assign each phrase exactly one category from this list: {taxonomy}.
- Keep phrases short: a drug with its dose, a diagnosis, a follow-up action.
- Do not include placeholder tokens such as REDACTED_NAME as highlights.

Respond with a JSON array only, no prose before or after:
[{{"text": "<verbatim phrase>", "category": "<category>"}}]

Summary:
{summary}"#
    )
}

/// Extract highlights from a generated summary via the classifier model.
///
/// Classification runs at analysis temperature. A response the parser
/// cannot salvage yields an empty list, never an error; highlights are
/// advisory and must not block a completed summary.
pub fn extract_highlights<M: ChatModel>(
    client: &M,
    model: &str,
    summary: &str,
) -> Result<Vec<Highlight>, LlmError> {
    let prompt = build_classification_prompt(summary);
    let response = client.complete(model, &prompt, ANALYSIS_TEMPERATURE)?;
    let highlights = parse_highlights(&response);
    tracing::info!(count = highlights.len(), "Extracted summary highlights");
    Ok(highlights)
}

/// Parse the classifier's response into highlights, leniently.
///
/// Accepts a fenced ```json block or a bare array embedded in prose.
/// Items that fail to deserialize (unknown category, missing field) are
/// skipped individually; an unparseable response yields an empty list.
pub fn parse_highlights(response: &str) -> Vec<Highlight> {
    let Some(payload) = json_payload(response) else {
        tracing::warn!("Highlight response contained no JSON array");
        return Vec::new();
    };

    let items: Vec<Value> = match serde_json::from_str(payload) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse highlight JSON");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Highlight>(v).ok())
        .filter(|h| !h.text.trim().is_empty())
        .collect()
}

/// Locate the JSON array within a model response: a fenced ```json block
/// if present, otherwise the outermost bracketed slice.
fn json_payload(response: &str) -> Option<&str> {
    if let Some(fence) = response.find("```json") {
        let content = &response[fence + 7..];
        if let Some(end) = content.find("```") {
            return Some(content[..end].trim());
        }
    }

    let start = response.find('[')?;
    let end = response.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockChatModel;

    // ============================================================
    // PROMPT CONTRACT
    // ============================================================

    #[test]
    fn test_prompt_lists_every_category() {
        let prompt = build_classification_prompt("Patient recovered.");
        for category in HighlightCategory::ALL {
            assert!(
                prompt.contains(category.as_str()),
                "taxonomy missing {:?}",
                category
            );
        }
    }

    #[test]
    fn test_prompt_embeds_summary_and_demands_json() {
        let prompt = build_classification_prompt("Treated with IV ceftriaxone.");
        assert!(prompt.contains("Treated with IV ceftriaxone."));
        assert!(prompt.contains("JSON array only"));
        assert!(prompt.contains("verbatim"));
    }

    // ============================================================
    // LENIENT PARSING
    // ============================================================

    #[test]
    fn test_parses_fenced_json_block() {
        let response = "Here are the highlights:\n```json\n[{\"text\": \"pneumonia\", \"category\": \"diagnosis\"}]\n```\nDone.";
        let highlights = parse_highlights(response);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].text, "pneumonia");
        assert_eq!(highlights[0].category, HighlightCategory::Diagnosis);
    }

    #[test]
    fn test_parses_bare_array_with_surrounding_prose() {
        let response = r#"Sure! [{"text": "amoxicillin 500mg", "category": "medication"}] Let me know."#;
        let highlights = parse_highlights(response);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].category, HighlightCategory::Medication);
    }

    #[test]
    fn test_unknown_category_item_skipped_others_kept() {
        let response = r#"[
            {"text": "pneumonia", "category": "diagnosis"},
            {"text": "guarded", "category": "prognosis"},
            {"text": "GP review in 7 days", "category": "followup_action"}
        ]"#;
        let highlights = parse_highlights(response);
        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].category, HighlightCategory::Diagnosis);
        assert_eq!(highlights[1].category, HighlightCategory::FollowupAction);
    }

    #[test]
    fn test_item_missing_field_is_skipped() {
        let response = r#"[{"text": "orphaned"}, {"text": "afebrile", "category": "recovery_status"}]"#;
        let highlights = parse_highlights(response);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].text, "afebrile");
    }

    #[test]
    fn test_empty_text_item_is_dropped() {
        let response = r#"[{"text": "  ", "category": "diagnosis"}]"#;
        assert!(parse_highlights(response).is_empty());
    }

    #[test]
    fn test_unparseable_response_yields_empty() {
        assert!(parse_highlights("I could not find any highlights.").is_empty());
        assert!(parse_highlights("```json\nnot json\n```").is_empty());
        assert!(parse_highlights("] backwards [").is_empty());
    }

    #[test]
    fn test_non_array_json_yields_empty() {
        // An object response has no bracketed slice to salvage.
        assert!(parse_highlights(r#"{"text": "pneumonia", "category": "diagnosis"}"#).is_empty());
    }

    // ============================================================
    // EXTRACTION CALL
    // ============================================================

    #[test]
    fn test_extraction_runs_at_analysis_temperature() {
        let mock =
            MockChatModel::replying(r#"[{"text": "pneumonia", "category": "diagnosis"}]"#);
        let highlights = extract_highlights(&mock, "gpt-4", "Diagnosis: pneumonia").unwrap();
        assert_eq!(highlights.len(), 1);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, ANALYSIS_TEMPERATURE);
        assert!(calls[0].prompt.contains("Diagnosis: pneumonia"));
    }

    #[test]
    fn test_garbled_response_is_not_an_error() {
        let mock = MockChatModel::replying("no structured output here");
        let highlights = extract_highlights(&mock, "gpt-4", "summary").unwrap();
        assert!(highlights.is_empty());
    }
}
