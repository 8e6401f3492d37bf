pub mod normalize;
pub mod values;

use crate::error::MyllaError;
use crate::model::SampleInput;
use std::path::Path;

/// Load a batch of samples from a JSON file.
///
/// The file holds an array of `{ "sample_id", "crop", "levels" }` objects,
/// with levels given as quoted decimal strings.
pub fn load_samples(path: &Path) -> Result<Vec<SampleInput>, MyllaError> {
    let content = std::fs::read_to_string(path)?;
    parse_samples_str(&content)
}

/// Parse a batch of samples from a JSON string.
pub fn parse_samples_str(json: &str) -> Result<Vec<SampleInput>, MyllaError> {
    let samples: Vec<SampleInput> = serde_json::from_str(json)?;

    if samples.is_empty() {
        return Err(MyllaError::ParseError("sample file contains no samples".into()));
    }

    for (idx, sample) in samples.iter().enumerate() {
        if sample.crop.trim().is_empty() {
            return Err(MyllaError::ParseError(format!(
                "sample #{} has an empty crop",
                idx + 1
            )));
        }
    }

    Ok(samples)
}

/// Reject any sample with a negative observed level.
pub fn validate_samples(samples: &[SampleInput]) -> Result<(), MyllaError> {
    samples
        .iter()
        .try_for_each(|sample| sample.levels.validate_observed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_samples() {
        let json = r#"[
            { "sample_id": "plot-1", "crop": "wheat",
              "levels": { "nitrogen": "30", "phosphorus": "10", "potassium": "40" } },
            { "crop": "Rice",
              "levels": { "nitrogen": "45", "phosphorus": "20", "potassium": "12.5" } }
        ]"#;
        let samples = parse_samples_str(json).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].sample_id.as_deref(), Some("plot-1"));
        assert_eq!(samples[0].levels.phosphorus, dec!(10));
        assert!(samples[1].sample_id.is_none());
        assert_eq!(samples[1].levels.potassium, dec!(12.5));
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert!(parse_samples_str("[]").is_err());
    }

    #[test]
    fn test_blank_crop_rejected() {
        let json = r#"[
            { "crop": "  ", "levels": { "nitrogen": "1", "phosphorus": "1", "potassium": "1" } }
        ]"#;
        assert!(parse_samples_str(json).is_err());
    }

    #[test]
    fn test_validate_samples_flags_negative() {
        let json = r#"[
            { "crop": "wheat", "levels": { "nitrogen": "-1", "phosphorus": "1", "potassium": "1" } }
        ]"#;
        let samples = parse_samples_str(json).unwrap();
        assert!(matches!(
            validate_samples(&samples),
            Err(MyllaError::InvalidObservation { .. })
        ));
    }
}
