//! rewardlens: Survey Dashboard Library
//!
//! Loads a pre-processed self-reward survey CSV and computes the
//! descriptive statistics behind the dashboard: summary metrics,
//! histograms, boxplots, categorical top counts and correlations.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::DashboardError;
