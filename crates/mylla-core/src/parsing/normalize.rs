/// Normalize a crop identifier or display name to a canonical key.
///
/// Steps:
/// 1. Trim and lowercase
/// 2. Replace spaces, hyphens, slashes and dots with underscores
/// 3. Collapse repeated underscores and strip them at the ends
///
/// "Sugar cane", "sugar-cane" and "SUGAR_CANE" all become "sugar_cane".
pub fn normalize_crop_id(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();

    let mut result = String::with_capacity(lower.len());
    let mut prev_underscore = true; // skip leading separators
    for c in lower.chars() {
        if c.is_alphanumeric() {
            result.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            result.push('_');
            prev_underscore = true;
        }
    }

    if result.ends_with('_') {
        result.pop();
    }
    result
}

/// Normalize a soil type name for comparison.
///
/// The trailing word "soil" is optional, so "black", "Black Soil" and
/// "black_soil" all match the same soil.
pub fn normalize_soil_name(raw: &str) -> String {
    let key = normalize_crop_id(raw);
    match key.strip_suffix("_soil") {
        Some(stripped) => stripped.to_string(),
        None => key,
    }
}
