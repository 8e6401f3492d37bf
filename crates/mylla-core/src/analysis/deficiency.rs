use crate::analysis::outcome::DeficiencyVector;
use crate::model::{Nutrient, NutrientLevels};
use rust_decimal::Decimal;

/// Shortfall of each observed level below its target, clamped at zero.
pub fn deficiency(target: &NutrientLevels, observed: &NutrientLevels) -> DeficiencyVector {
    NutrientLevels::new(
        shortfall(target.nitrogen, observed.nitrogen),
        shortfall(target.phosphorus, observed.phosphorus),
        shortfall(target.potassium, observed.potassium),
    )
}

/// `max(0, target - observed)` for a single nutrient.
pub fn shortfall(target: Decimal, observed: Decimal) -> Decimal {
    target.saturating_sub(observed).max(Decimal::ZERO)
}

/// Nutrients with a non-zero shortfall, in N, P, K order.
pub fn deficient_nutrients(deficiency: &DeficiencyVector) -> Vec<Nutrient> {
    deficiency
        .iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(nutrient, _)| nutrient)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deficiency_clamps_excess() {
        let target = NutrientLevels::new(dec!(50), dec!(30), dec!(40));
        let observed = NutrientLevels::new(dec!(30), dec!(10), dec!(55));
        let d = deficiency(&target, &observed);
        assert_eq!(d, NutrientLevels::new(dec!(20), dec!(20), dec!(0)));
    }

    #[test]
    fn test_negative_observed_increases_shortfall() {
        assert_eq!(shortfall(dec!(10), dec!(-5)), dec!(15));
    }

    #[test]
    fn test_deficient_nutrients_order() {
        let d = NutrientLevels::new(dec!(0), dec!(3), dec!(1));
        assert_eq!(
            deficient_nutrients(&d),
            vec![Nutrient::Phosphorus, Nutrient::Potassium]
        );
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        assert_eq!(shortfall(Decimal::MAX, Decimal::MIN), Decimal::MAX);
        assert_eq!(shortfall(Decimal::MIN, Decimal::MAX), Decimal::ZERO);
    }
}
