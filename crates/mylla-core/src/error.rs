use crate::model::Nutrient;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MyllaError {
    #[error("unknown crop '{crop}'")]
    UnknownCrop { crop: String },

    #[error("unknown soil type '{soil}'")]
    UnknownSoil { soil: String },

    #[error("invalid {nutrient} level {value}: {reason}")]
    InvalidObservation {
        nutrient: Nutrient,
        value: Decimal,
        reason: String,
    },

    #[error("failed to parse input: {0}")]
    ParseError(String),

    #[error("failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid catalog: {0}")]
    CatalogInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
