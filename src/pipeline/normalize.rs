use std::sync::LazyLock;

use regex::Regex;

use super::redaction::{starts_with_placeholder, Placeholder};

/// Section headers the generation prompt mandates, in document order.
///
/// Shared by the run-on repair below and by the display annotator.
pub const SECTION_HEADERS: [&str; 6] = [
    "Patient Information:",
    "Diagnosis:",
    "Summary of Care:",
    "Disposition:",
    "Follow-up Plan:",
    "Contact:",
];

/// A section header glued directly onto a preceding letter, e.g.
/// "stableDiagnosis:". Digits are left alone; only letter run-ons are a
/// known model failure.
static HEADER_RUN_ON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([a-zA-Z])(Patient Information:|Diagnosis:|Summary of Care:|Disposition:|Follow-up Plan:|Contact:)",
    )
    .expect("Failed to compile header run-on regex")
});

/// Repair the spacing defects small models habitually produce around
/// placeholder tokens, sentence punctuation, and section headers.
///
/// The three repairs run in a fixed order: placeholder boundaries first,
/// then punctuation, then header run-ons. Punctuation spacing must not
/// fire at the start of a placeholder, and the header repair must only
/// see text whose punctuation is already settled.
pub fn normalize_output(text: &str) -> String {
    let spaced = space_placeholder_boundaries(text);
    let punctuated = space_after_punctuation(&spaced);
    HEADER_RUN_ON
        .replace_all(&punctuated, "$1\n\n$2")
        .into_owned()
}

/// Returns the exact placeholder token starting at `text`, if any.
///
/// Exact spellings only. Mangled tokens are the reinsertion scanner's
/// problem; inserting spaces around a half-recognised token would only
/// mangle it further.
fn exact_token_at(text: &str) -> Option<&'static str> {
    Placeholder::ALL
        .iter()
        .map(|p| p.token())
        .find(|token| text.starts_with(token))
}

/// Insert a single space wherever an alphanumeric character directly
/// touches an exact placeholder token on either side.
fn space_placeholder_boundaries(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if let Some(token) = exact_token_at(rest) {
            if out
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric())
            {
                out.push(' ');
            }
            out.push_str(token);
            i += token.len();
            if text[i..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric())
            {
                out.push(' ');
            }
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

/// Insert a single space after sentence punctuation that runs straight
/// into an alphanumeric character, unless a placeholder token starts at
/// that character. Punctuation glued to a placeholder stays glued; the
/// token itself must not be disturbed.
fn space_after_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for (i, c) in text.char_indices() {
        out.push(c);
        if matches!(c, '.' | ',' | ':' | ';' | '!' | '?') {
            let rest = &text[i + c.len_utf8()..];
            if rest
                .chars()
                .next()
                .is_some_and(|n| n.is_ascii_alphanumeric())
                && !starts_with_placeholder(rest)
            {
                out.push(' ');
            }
        }
    }
    out
}
