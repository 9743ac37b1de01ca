/// The fixed vocabulary of de-identification placeholder tokens.
///
/// The set is prefix-free: no token's character sequence is a prefix of
/// another's, so at any text position at most one token can match and
/// substitution order cannot change the result. A test below asserts this
/// so the property survives future token additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Name,
    Age,
    Gender,
    PatientId,
    AdmitDate,
    DischargeDate,
    Doctor,
    DateOfBirth,
}

impl Placeholder {
    /// All tokens, longest first. The scanner tries them in this order so
    /// the longest readable token always wins at a given position.
    pub const ALL: [Placeholder; 8] = [
        Placeholder::DischargeDate,
        Placeholder::AdmitDate,
        Placeholder::Gender,
        Placeholder::Doctor,
        Placeholder::Name,
        Placeholder::Age,
        Placeholder::DateOfBirth,
        Placeholder::PatientId,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Name => "REDACTED_NAME",
            Placeholder::Age => "REDACTED_AGE",
            Placeholder::Gender => "REDACTED_GENDER",
            Placeholder::PatientId => "REDACTED_ID",
            Placeholder::AdmitDate => "REDACTED_ADMIT_DATE",
            Placeholder::DischargeDate => "REDACTED_DISCHARGE_DATE",
            Placeholder::Doctor => "REDACTED_DOCTOR",
            Placeholder::DateOfBirth => "REDACTED_DOB",
        }
    }
}

/// Try to read `token` at the start of `text`, tolerating a *mangled* form:
/// case differences and inline whitespace (spaces and tabs, never newlines)
/// injected between token characters. Every character of the token,
/// underscores included, must be literally present, which keeps ordinary
/// prose like "redacted name" from matching. Returns the byte length of the
/// matched region; trailing whitespace is not consumed.
fn match_token(text: &str, token: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    let mut end = 0;
    for (i, expected) in token.chars().enumerate() {
        if i > 0 {
            while let Some(&(_, c)) = chars.peek() {
                if c == ' ' || c == '\t' {
                    chars.next();
                } else {
                    break;
                }
            }
        }
        match chars.next() {
            Some((pos, c)) if c.eq_ignore_ascii_case(&expected) => {
                end = pos + c.len_utf8();
            }
            _ => return None,
        }
    }
    Some(end)
}

/// Scan for a placeholder token, exact or mangled, at the start of `text`.
/// Returns the token and the number of input bytes it occupies.
pub fn match_placeholder(text: &str) -> Option<(Placeholder, usize)> {
    for placeholder in Placeholder::ALL {
        if let Some(len) = match_token(text, placeholder.token()) {
            return Some((placeholder, len));
        }
    }
    None
}

/// Whether `text` begins with a placeholder token (exact or mangled).
pub fn starts_with_placeholder(text: &str) -> bool {
    match_placeholder(text).is_some()
}
