use crate::error::MyllaError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a nutrient level or content percentage.
///
/// Accepts a decimal comma ("12,5") as well as a decimal point, and
/// surrounding whitespace.
pub fn parse_level(s: &str) -> Result<Decimal, MyllaError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MyllaError::ParseError("empty number".into()));
    }
    let normalized = s.replace(',', ".");
    Decimal::from_str(&normalized)
        .map_err(|e| MyllaError::ParseError(format!("invalid number '{}': {}", s, e)))
}

/// Convert f64 to Decimal without picking up binary floating-point noise
/// (0.2_f64 must become exactly 0.2).
pub fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    format!("{f}")
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}
