use crate::error::MyllaError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three macronutrients the engine reasons about, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    /// All nutrients in the fixed N, P, K order.
    pub const ALL: [Nutrient; 3] = [Nutrient::Nitrogen, Nutrient::Phosphorus, Nutrient::Potassium];

    pub fn symbol(self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "N",
            Nutrient::Phosphorus => "P",
            Nutrient::Potassium => "K",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nutrient::Nitrogen => f.pad("Nitrogen"),
            Nutrient::Phosphorus => f.pad("Phosphorus"),
            Nutrient::Potassium => f.pad("Potassium"),
        }
    }
}

/// One value per nutrient. Used for crop targets, observed samples,
/// deficiencies and fertilizer content percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientLevels {
    pub nitrogen: Decimal,
    pub phosphorus: Decimal,
    pub potassium: Decimal,
}

impl NutrientLevels {
    pub fn new(nitrogen: Decimal, phosphorus: Decimal, potassium: Decimal) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> Decimal {
        match nutrient {
            Nutrient::Nitrogen => self.nitrogen,
            Nutrient::Phosphorus => self.phosphorus,
            Nutrient::Potassium => self.potassium,
        }
    }

    /// Iterate `(nutrient, value)` pairs in N, P, K order.
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, Decimal)> {
        let levels = *self;
        Nutrient::ALL.into_iter().map(move |n| (n, levels.get(n)))
    }

    /// Reject negative levels in a caller-supplied observation.
    ///
    /// The engine itself accepts any value; this check belongs to the input
    /// boundary (CLI arguments, batch files).
    pub fn validate_observed(&self) -> Result<(), MyllaError> {
        for (nutrient, value) in self.iter() {
            if value < Decimal::ZERO {
                return Err(MyllaError::InvalidObservation {
                    nutrient,
                    value,
                    reason: "observed levels must not be negative".into(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FertilizerClass {
    Inorganic,
    Organic,
}

impl fmt::Display for FertilizerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FertilizerClass::Inorganic => f.pad("inorganic"),
            FertilizerClass::Organic => f.pad("organic"),
        }
    }
}

impl FertilizerClass {
    pub fn from_str_loose(s: &str) -> Option<FertilizerClass> {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("inorg") || lower == "chemical" || lower == "synthetic" {
            Some(FertilizerClass::Inorganic)
        } else if lower.starts_with("org") || lower == "manure" {
            Some(FertilizerClass::Organic)
        } else {
            None
        }
    }
}

/// One sample in a batch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleInput {
    #[serde(default)]
    pub sample_id: Option<String>,
    /// Crop identifier or display name.
    pub crop: String,
    pub levels: NutrientLevels,
}
