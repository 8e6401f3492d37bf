use crate::analysis::outcome::{Classification, NutrientStatus};
use crate::model::NutrientLevels;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Classify each observed level against its target.
///
/// Values are compared exactly; any rounding is left to the presentation
/// layer. Negative observations are not rejected here and simply come out
/// as deficient.
pub fn classify_levels(target: &NutrientLevels, observed: &NutrientLevels) -> Classification {
    Classification {
        nitrogen: classify_nutrient(target.nitrogen, observed.nitrogen),
        phosphorus: classify_nutrient(target.phosphorus, observed.phosphorus),
        potassium: classify_nutrient(target.potassium, observed.potassium),
    }
}

/// Classify a single observed level.
///
/// The difference saturates at the `Decimal` range, so an observation
/// further than `Decimal::MAX` from its target reports `Decimal::MAX`.
pub fn classify_nutrient(target: Decimal, observed: Decimal) -> NutrientStatus {
    let diff = observed.saturating_sub(target);
    match diff.cmp(&Decimal::ZERO) {
        Ordering::Greater => NutrientStatus::Excess(diff),
        Ordering::Less => NutrientStatus::Deficient(-diff),
        Ordering::Equal => NutrientStatus::Balanced,
    }
}
