use crate::analysis::deficiency::{deficiency, deficient_nutrients};
use crate::analysis::outcome::{DeficiencyVector, Recommendation, Recommendations};
use crate::catalog::schema::FertilizerSpec;
use crate::model::{FertilizerClass, NutrientLevels};
use rust_decimal::Decimal;

/// Recommend fertilizer dosages that close every deficiency.
pub fn recommend_levels(
    target: &NutrientLevels,
    observed: &NutrientLevels,
    fertilizers: &[FertilizerSpec],
) -> Recommendations {
    recommend_for_deficiency(&deficiency(target, observed), fertilizers)
}

/// Recommend dosages for an already computed deficiency vector.
pub fn recommend_for_deficiency(
    deficiency: &DeficiencyVector,
    fertilizers: &[FertilizerSpec],
) -> Recommendations {
    Recommendations {
        inorganic: dosages_for_class(deficiency, fertilizers, FertilizerClass::Inorganic),
        organic: dosages_for_class(deficiency, fertilizers, FertilizerClass::Organic),
    }
}

/// Mass of fertilizer needed to deliver `shortfall` units of a nutrient
/// when the fertilizer is `content_percent` percent that nutrient.
///
/// Returns `None` when there is nothing to deliver or the fertilizer does
/// not contain the nutrient. Multiplies first for precision, divides first
/// when the product would overflow, and saturates at `Decimal::MAX` only
/// when the mass itself is out of range.
pub fn dosage(shortfall: Decimal, content_percent: Decimal) -> Option<Decimal> {
    if shortfall <= Decimal::ZERO || content_percent <= Decimal::ZERO {
        return None;
    }
    let mass = shortfall
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(content_percent))
        .or_else(|| {
            shortfall
                .checked_div(content_percent)
                .and_then(|per_unit| per_unit.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(Decimal::MAX);
    Some(mass)
}

fn dosages_for_class(
    deficiency: &DeficiencyVector,
    fertilizers: &[FertilizerSpec],
    class: FertilizerClass,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for nutrient in deficient_nutrients(deficiency) {
        let shortfall = deficiency.get(nutrient);
        for spec in fertilizers.iter().filter(|f| f.class == class) {
            match dosage(shortfall, spec.content_percent(nutrient)) {
                Some(dosage_kg) => recommendations.push(Recommendation {
                    fertilizer: spec.name.clone(),
                    nutrient,
                    dosage_kg,
                }),
                None => tracing::trace!(
                    fertilizer = %spec.name,
                    %nutrient,
                    "skipping fertilizer without content"
                ),
            }
        }
    }

    recommendations
}
