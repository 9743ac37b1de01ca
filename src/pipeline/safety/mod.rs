pub mod adjudicator;
pub mod exemplars;
pub mod keywords;
pub mod types;

pub use adjudicator::*;
pub use keywords::*;
pub use types::*;
