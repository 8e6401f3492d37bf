use crate::model::{Nutrient, NutrientLevels};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an observed level compares to the crop target.
///
/// The amount is always strictly positive: `|observed - target|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum NutrientStatus {
    Excess(Decimal),
    Deficient(Decimal),
    Balanced,
}

impl NutrientStatus {
    /// Language-neutral status code for presentation layers.
    pub fn code(&self) -> &'static str {
        match self {
            NutrientStatus::Excess(_) => "excess",
            NutrientStatus::Deficient(_) => "deficient",
            NutrientStatus::Balanced => "balanced",
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            NutrientStatus::Excess(a) | NutrientStatus::Deficient(a) => Some(*a),
            NutrientStatus::Balanced => None,
        }
    }

    /// `observed - target`: positive for excess, negative for deficiency.
    pub fn signed_amount(&self) -> Decimal {
        match self {
            NutrientStatus::Excess(a) => *a,
            NutrientStatus::Deficient(a) => -*a,
            NutrientStatus::Balanced => Decimal::ZERO,
        }
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self, NutrientStatus::Balanced)
    }
}

/// Per-nutrient classification of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub nitrogen: NutrientStatus,
    pub phosphorus: NutrientStatus,
    pub potassium: NutrientStatus,
}

impl Classification {
    pub fn get(&self, nutrient: Nutrient) -> NutrientStatus {
        match nutrient {
            Nutrient::Nitrogen => self.nitrogen,
            Nutrient::Phosphorus => self.phosphorus,
            Nutrient::Potassium => self.potassium,
        }
    }

    /// Iterate `(nutrient, status)` pairs in N, P, K order.
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, NutrientStatus)> {
        let classification = *self;
        Nutrient::ALL
            .into_iter()
            .map(move |n| (n, classification.get(n)))
    }

    pub fn all_balanced(&self) -> bool {
        self.iter().all(|(_, status)| status.is_balanced())
    }
}

/// Shortfall per nutrient, `max(0, target - observed)`.
pub type DeficiencyVector = NutrientLevels;

/// A dosage of one fertilizer to supply one nutrient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub fertilizer: String,
    pub nutrient: Nutrient,
    /// Fertilizer mass in kg, unrounded.
    pub dosage_kg: Decimal,
}

/// Recommendations split by fertilizer class.
///
/// Each list is ordered by nutrient (N, P, K) and then by fertilizer
/// catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub inorganic: Vec<Recommendation>,
    pub organic: Vec<Recommendation>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.inorganic.is_empty() && self.organic.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inorganic.len() + self.organic.len()
    }
}

/// Classification and recommendations for one sample against one crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Canonical crop id from the catalog.
    pub crop_id: String,
    pub crop_name: String,
    pub target: NutrientLevels,
    pub observed: NutrientLevels,
    pub classification: Classification,
    pub deficiency: DeficiencyVector,
    pub recommendations: Recommendations,
}

/// Analysis of one sample in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleAnalysis {
    /// Sample identifier from the input, or its 1-based position.
    pub sample_id: String,
    pub analysis: Analysis,
}
