//! Soil nutrient analysis and fertilizer recommendation.
//!
//! An [`Engine`] holds a validated reference catalog (crop N/P/K targets and
//! fertilizer compositions). It classifies an observed sample against a
//! crop's targets and computes the fertilizer mass needed to close each
//! deficiency. Results are structured data only; formatting belongs to the
//! caller.

pub mod analysis;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod parsing;
pub mod trace;

pub use engine::Engine;
pub use rust_decimal::Decimal;

use analysis::outcome::SampleAnalysis;
use error::MyllaError;
use std::path::Path;

/// Options for batch analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Accept negative observed levels instead of rejecting them with
    /// `InvalidObservation`. They are then classified as deficient.
    pub allow_negative: bool,
}

/// Load a JSON sample batch and analyze every sample.
pub fn analyze_sample_file(
    path: &Path,
    engine: &Engine,
    options: &AnalyzeOptions,
) -> Result<Vec<SampleAnalysis>, MyllaError> {
    let samples = parsing::load_samples(path)?;
    if !options.allow_negative {
        parsing::validate_samples(&samples)?;
    }
    tracing::debug!(samples = samples.len(), path = %path.display(), "analyzing batch");
    engine.analyze_samples(&samples)
}
