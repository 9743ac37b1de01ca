pub mod highlight;
pub mod record;

pub use highlight::{Highlight, HighlightCategory};
pub use record::{
    Demographics, DiagnosisEntry, MedOrder, NoteEntry, PatientRecord, RecordError,
};
