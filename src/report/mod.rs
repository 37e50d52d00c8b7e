//! Report module - rendering and exporting dashboard passes

pub mod charts;
pub mod export;
pub mod summary;

pub use charts::*;
pub use export::*;
pub use summary::*;
