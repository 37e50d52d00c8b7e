//! Pipeline module - loading the survey and deriving dashboard statistics

pub mod aggregate;
pub mod correlation;
pub mod dashboard;
pub mod loader;
pub mod privacy;
pub mod stats;

pub use aggregate::*;
pub use correlation::*;
pub use dashboard::*;
pub use loader::*;
pub use privacy::*;
pub use stats::*;
