pub mod redact;
pub mod reinsert;
pub mod vocabulary;

pub use redact::*;
pub use reinsert::*;
pub use vocabulary::*;
