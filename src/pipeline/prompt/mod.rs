pub mod assembler;
pub mod exemplars;

pub use assembler::*;
pub use exemplars::*;
