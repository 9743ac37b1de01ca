use std::collections::HashSet;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::models::{Highlight, HighlightCategory};

/// Categories a complete discharge summary is expected to surface.
/// Coverage is the fraction of these present in the extracted highlights.
pub const EXPECTED_COVERAGE_CATEGORIES: [HighlightCategory; 5] = [
    HighlightCategory::Diagnosis,
    HighlightCategory::Medication,
    HighlightCategory::FollowupAction,
    HighlightCategory::DischargeCriteria,
    HighlightCategory::RecoveryStatus,
];

/// Flesch reading ease: `206.835 - 1.015 * (words/sentences) - 84.6 *
/// (syllables/words)`. Higher is easier; plain clinical prose tends to
/// land between 40 and 70. Empty text scores 0.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let word_count = words.len() as f64;
    let sentence_count = count_sentences(text) as f64;
    let syllable_count: usize = words.iter().map(|w| count_syllables(w)).sum();

    206.835 - 1.015 * (word_count / sentence_count) - 84.6 * (syllable_count as f64 / word_count)
}

/// Sentence terminators, with runs like "..." collapsed to one. Text
/// without a terminator counts as a single sentence.
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut prev_terminator = false;
    for c in text.chars() {
        let terminator = matches!(c, '.' | '!' | '?');
        if terminator && !prev_terminator {
            count += 1;
        }
        prev_terminator = terminator;
    }
    count.max(1)
}

/// Vowel-group syllable heuristic with a silent-e discount. Every word
/// counts at least one syllable.
fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut prev_vowel = false;
    for c in letters.chars() {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    if letters.ends_with('e') && !letters.ends_with("le") && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}

/// Fraction of the expected categories present in the extracted
/// highlights. Duplicates and categories outside the expected set do not
/// move the score.
pub fn highlight_coverage(highlights: &[Highlight]) -> f64 {
    let actual: HashSet<HighlightCategory> = highlights.iter().map(|h| h.category).collect();
    let matched = EXPECTED_COVERAGE_CATEGORIES
        .iter()
        .filter(|c| actual.contains(c))
        .count();
    matched as f64 / EXPECTED_COVERAGE_CATEGORIES.len() as f64
}

/// Reviewer checklist for one displayed summary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReviewChecklist {
    pub clarity: bool,
    pub specificity: bool,
    pub correctness: bool,
    pub sections_present: bool,
    pub no_pii: bool,
}

/// One submitted evaluation: the reviewer's checklist plus computed
/// metrics, stamped and tied back to the source record file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub view: String,
    pub clarity: bool,
    pub specificity: bool,
    pub correctness: bool,
    pub sections_present: bool,
    pub no_pii: bool,
    pub highlight_coverage: f64,
    pub readability_score: f64,
    /// Post-generation adjudication response, carried verbatim.
    pub safety_validation: String,
    pub timestamp: String,
    pub source_file: Option<String>,
}

impl Evaluation {
    /// Assemble an evaluation for `summary` as displayed in `view`
    /// ("De-Identified" or "Identified"), computing both metrics.
    /// `safety_validation` is the post-generation adjudication response.
    pub fn new(
        view: &str,
        checklist: ReviewChecklist,
        summary: &str,
        highlights: &[Highlight],
        safety_validation: &str,
        source_file: Option<String>,
    ) -> Self {
        Evaluation {
            view: view.to_string(),
            clarity: checklist.clarity,
            specificity: checklist.specificity,
            correctness: checklist.correctness,
            sections_present: checklist.sections_present,
            no_pii: checklist.no_pii,
            highlight_coverage: highlight_coverage(highlights),
            readability_score: flesch_reading_ease(summary),
            safety_validation: safety_validation.to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source_file,
        }
    }
}
