use super::normalize::SECTION_HEADERS;
use crate::models::Highlight;

/// Wrap section headers and highlighted phrases in `**` emphasis markers
/// for display.
///
/// Matching is case-insensitive and preserves the original casing of the
/// text. A match directly touching an asterisk on either side is left
/// alone, which keeps repeated annotation from double-wrapping and stops
/// a phrase nested inside an already-emphasised span from being wrapped
/// again. Overlapping highlight phrases are wrapped independently, not
/// merged.
pub fn annotate(text: &str, highlights: &[Highlight]) -> String {
    let mut out = text.to_string();
    for header in SECTION_HEADERS {
        out = wrap_occurrences(&out, header);
    }
    for highlight in highlights {
        let phrase = highlight.text.trim();
        if phrase.is_empty() {
            continue;
        }
        out = wrap_occurrences(&out, phrase);
    }
    out
}

/// Wrap every unguarded occurrence of `phrase` in `text`, left to right.
fn wrap_occurrences(text: &str, phrase: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if let Some(len) = match_phrase_at(rest, phrase) {
            let touches_emphasis =
                out.ends_with('*') || text[i + len..].starts_with('*');
            if touches_emphasis {
                out.push_str(&rest[..len]);
            } else {
                out.push_str("**");
                out.push_str(&rest[..len]);
                out.push_str("**");
            }
            i += len;
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

/// Length in bytes of `phrase` matched at the start of `text`, comparing
/// characters ASCII-case-insensitively.
fn match_phrase_at(text: &str, phrase: &str) -> Option<usize> {
    let mut chars = text.chars();
    let mut end = 0;
    for expected in phrase.chars() {
        match chars.next() {
            Some(c) if c.eq_ignore_ascii_case(&expected) => end += c.len_utf8(),
            _ => return None,
        }
    }
    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HighlightCategory;

    fn highlight(text: &str, category: HighlightCategory) -> Highlight {
        Highlight {
            text: text.to_string(),
            category,
        }
    }

    // ============================================================
    // HEADER EMPHASIS
    // ============================================================

    #[test]
    fn test_section_headers_are_wrapped() {
        let text = "Diagnosis: pneumonia\n\nFollow-up Plan: GP review";
        let annotated = annotate(text, &[]);
        assert!(annotated.contains("**Diagnosis:** pneumonia"));
        assert!(annotated.contains("**Follow-up Plan:** GP review"));
    }

    #[test]
    fn test_text_without_headers_or_highlights_unchanged() {
        let text = "The patient improved steadily on oral antibiotics.";
        assert_eq!(annotate(text, &[]), text);
    }

    // ============================================================
    // HIGHLIGHT EMPHASIS
    // ============================================================

    #[test]
    fn test_highlight_phrase_is_wrapped() {
        let highlights = vec![highlight("community-acquired pneumonia", HighlightCategory::Diagnosis)];
        let annotated = annotate("Admitted with community-acquired pneumonia.", &highlights);
        assert_eq!(
            annotated,
            "Admitted with **community-acquired pneumonia**."
        );
    }

    #[test]
    fn test_every_occurrence_is_wrapped() {
        let highlights = vec![highlight("amoxicillin", HighlightCategory::Medication)];
        let annotated = annotate(
            "Started amoxicillin. Continue amoxicillin for 5 days.",
            &highlights,
        );
        assert_eq!(
            annotated,
            "Started **amoxicillin**. Continue **amoxicillin** for 5 days."
        );
    }

    #[test]
    fn test_match_is_case_insensitive_and_preserves_casing() {
        let highlights = vec![highlight("Pneumonia", HighlightCategory::Diagnosis)];
        let annotated = annotate("resolving pneumonia", &highlights);
        assert_eq!(annotated, "resolving **pneumonia**");
    }

    #[test]
    fn test_whitespace_only_highlight_is_ignored() {
        let highlights = vec![highlight("   ", HighlightCategory::Diagnosis)];
        let text = "No change.";
        assert_eq!(annotate(text, &highlights), text);
    }

    #[test]
    fn test_missing_phrase_leaves_text_unchanged() {
        let highlights = vec![highlight("sepsis", HighlightCategory::Diagnosis)];
        let text = "Admitted with pneumonia.";
        assert_eq!(annotate(text, &highlights), text);
    }

    // ============================================================
    // DOUBLE-WRAP GUARD
    // ============================================================

    #[test]
    fn test_annotation_is_idempotent() {
        let highlights = vec![
            highlight("pneumonia", HighlightCategory::Diagnosis),
            highlight("GP review in 7 days", HighlightCategory::FollowupAction),
        ];
        let text = "Diagnosis: pneumonia\n\nFollow-up Plan: GP review in 7 days";
        let once = annotate(text, &highlights);
        let twice = annotate(&once, &highlights);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pre_emphasised_phrase_not_rewrapped() {
        let highlights = vec![highlight("pneumonia", HighlightCategory::Diagnosis)];
        let text = "already bold: **pneumonia** here";
        assert_eq!(annotate(text, &highlights), text);
    }

    #[test]
    fn test_phrase_nested_in_wrapped_span_is_skipped() {
        let highlights = vec![
            highlight("IV antibiotics", HighlightCategory::Medication),
            highlight("antibiotics", HighlightCategory::Medication),
        ];
        let annotated = annotate("Treated with IV antibiotics.", &highlights);
        assert_eq!(annotated, "Treated with **IV antibiotics**.");
    }

    #[test]
    fn test_duplicate_highlights_wrap_once() {
        let highlights = vec![
            highlight("afebrile", HighlightCategory::RecoveryStatus),
            highlight("afebrile", HighlightCategory::RecoveryStatus),
        ];
        let annotated = annotate("Patient afebrile for 48 hours.", &highlights);
        assert_eq!(annotated, "Patient **afebrile** for 48 hours.");
    }
}
