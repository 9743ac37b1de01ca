pub mod redaction;
pub mod safety;
pub mod prompt;
pub mod normalize;
pub mod highlights;
pub mod annotate;
pub mod generation;
pub mod metrics;
