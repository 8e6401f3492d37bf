use crate::model::{FertilizerClass, Nutrient, NutrientLevels};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A reference catalog: crop nutrient targets, the soils they grow in,
/// and the fertilizers available to close a deficiency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub soils: Vec<SoilDef>,
    pub crops: Vec<CropTarget>,
    /// Catalog order is the order recommendations are emitted in.
    pub fertilizers: Vec<FertilizerSpec>,
}

/// A soil type and the crop ids valid for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilDef {
    pub name: String,
    pub crops: Vec<String>,
}

/// Target N/P/K levels for one crop, in kg per acre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropTarget {
    pub id: String,
    pub name: String,
    pub target: NutrientLevels,
    #[serde(default)]
    pub note: Option<String>,
}

/// A fertilizer and its nutrient content, as percent of mass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizerSpec {
    pub name: String,
    pub class: FertilizerClass,
    pub content: NutrientLevels,
}

impl FertilizerSpec {
    pub fn content_percent(&self, nutrient: Nutrient) -> Decimal {
        self.content.get(nutrient)
    }

    /// Whether this fertilizer supplies any of the given nutrient.
    pub fn supplies(&self, nutrient: Nutrient) -> bool {
        self.content_percent(nutrient) > Decimal::ZERO
    }
}
