use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::models::{NoteEntry, PatientRecord};

/// Red-flag phrases. A case-insensitive substring hit in a recent note
/// marks the patient as not safe for discharge.
pub const RED_FLAG_PHRASES: [&str; 8] = [
    "not safe for discharge",
    "condition remains critical",
    "requires close monitoring",
    "unfit for discharge",
    "not medically stable",
    "critical",
    "unstable",
    "requires monitoring",
];

/// How many of the most recent note entries the pre-screen inspects.
/// Bounding the window keeps a stale early red flag from permanently
/// blocking discharge once later notes document improvement.
pub const DEFAULT_PRESCREEN_WINDOW: usize = 5;

/// One red-flag phrase found during the pre-screen, with the date of the
/// note that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedFlagHit {
    pub phrase: &'static str,
    pub note_date: Option<String>,
}

/// Outcome of the keyword pre-screen.
#[derive(Debug, Clone, Serialize)]
pub struct PrescreenReport {
    pub safe: bool,
    pub flags: Vec<RedFlagHit>,
    pub notes_scanned: usize,
}

fn parse_note_date(note: &NoteEntry) -> Option<NaiveDate> {
    note.date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
}

fn parse_note_time(note: &NoteEntry) -> Option<NaiveTime> {
    note.time.as_deref().and_then(|t| {
        let t = t.trim();
        NaiveTime::parse_from_str(t, "%H:%M:%S")
            .ok()
            .or_else(|| NaiveTime::parse_from_str(t, "%H:%M").ok())
    })
}

/// Merge both note collections and return the `window` most recent entries,
/// sorted by parsed date then time, newest first. Notes accrue in
/// chronological order, so date and time ties break by append position,
/// last-appended first. Entries whose date does not parse sort oldest, so
/// they fall out of the window before dated ones.
fn most_recent_entries(record: &PatientRecord, window: usize) -> Vec<&NoteEntry> {
    let mut entries: Vec<(usize, &NoteEntry)> = record
        .notes
        .iter()
        .chain(record.ward_round_notes.iter())
        .enumerate()
        .collect();
    entries.sort_by(|(ai, a), (bi, b)| {
        (parse_note_date(b), parse_note_time(b), *bi)
            .cmp(&(parse_note_date(a), parse_note_time(a), *ai))
    });
    entries.truncate(window);
    entries.into_iter().map(|(_, note)| note).collect()
}

/// Scan the `window` most recent notes for red-flag phrases.
pub fn prescreen_notes(record: &PatientRecord, window: usize) -> PrescreenReport {
    let entries = most_recent_entries(record, window);
    let notes_scanned = entries.len();

    let mut flags = Vec::new();
    for note in entries {
        let Some(content) = note.content.as_deref() else {
            continue;
        };
        let lowered = content.to_lowercase();
        let matched: Vec<&'static str> = RED_FLAG_PHRASES
            .iter()
            .copied()
            .filter(|phrase| lowered.contains(phrase))
            .collect();
        // Keep the most specific phrase: "condition remains critical"
        // subsumes its "critical" sub-hit.
        for phrase in &matched {
            let subsumed = matched
                .iter()
                .any(|other| other != phrase && other.contains(phrase));
            if !subsumed {
                flags.push(RedFlagHit {
                    phrase,
                    note_date: note.date.clone(),
                });
            }
        }
    }

    PrescreenReport {
        safe: flags.is_empty(),
        flags,
        notes_scanned,
    }
}

/// Pre-screen with the default recency window.
pub fn prescreen(record: &PatientRecord) -> PrescreenReport {
    prescreen_notes(record, DEFAULT_PRESCREEN_WINDOW)
}

/// Boolean convenience over [`prescreen`].
pub fn is_safe_for_discharge(record: &PatientRecord) -> bool {
    prescreen(record).safe
}
