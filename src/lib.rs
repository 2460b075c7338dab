//! benford - Benford's Law audit toolkit
//!
//! Checks whether the leading digits of a numeric column follow Benford's
//! Law, using a chi-squared goodness-of-fit test, and sorts the outcome into
//! an audit severity tier with recommended next steps.
//!
//! - [`analysis`]: the statistical core (pure, no I/O)
//! - [`source`]: delimited-file loading and numeric column selection
//! - [`reporters`]: text, JSON and Markdown rendering
//! - [`config`]: project-level `benford.toml`

pub mod analysis;
pub mod config;
pub mod models;
pub mod reporters;
pub mod source;

pub use analysis::{analyze, Analysis, AnalysisError, SeverityTier};
