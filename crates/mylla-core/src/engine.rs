use crate::analysis::outcome::{Analysis, Classification, Recommendations, SampleAnalysis};
use crate::analysis::{classify_levels, deficiency, recommend_levels};
use crate::catalog::schema::{CatalogDef, CropTarget, FertilizerSpec};
use crate::catalog::{builtin, validate_catalog};
use crate::error::MyllaError;
use crate::model::{NutrientLevels, SampleInput};
use crate::parsing::normalize::{normalize_crop_id, normalize_soil_name};
use std::collections::HashMap;

/// Classification and recommendation engine over one immutable catalog.
///
/// The catalog is validated and indexed once at construction. Every query
/// borrows it read-only, so an `Engine` can be shared across threads
/// (e.g. behind an `Arc`) without locking. To change the catalog, build a
/// new engine.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: CatalogDef,
    /// Normalized crop id or display name -> index into `catalog.crops`.
    crop_index: HashMap<String, usize>,
}

impl Engine {
    pub fn new(catalog: CatalogDef) -> Result<Self, MyllaError> {
        validate_catalog(&catalog)?;

        let mut crop_index = HashMap::new();
        for (idx, crop) in catalog.crops.iter().enumerate() {
            crop_index.insert(normalize_crop_id(&crop.id), idx);
        }
        // Display names are aliases and never shadow an id.
        for (idx, crop) in catalog.crops.iter().enumerate() {
            crop_index.entry(normalize_crop_id(&crop.name)).or_insert(idx);
        }

        tracing::debug!(
            catalog = %catalog.name,
            crops = catalog.crops.len(),
            fertilizers = catalog.fertilizers.len(),
            "engine initialized"
        );

        Ok(Self {
            catalog,
            crop_index,
        })
    }

    /// Engine over the built-in standard catalog.
    pub fn builtin() -> Result<Self, MyllaError> {
        Self::new(builtin::load_preset(builtin::DEFAULT_PRESET)?)
    }

    pub fn catalog(&self) -> &CatalogDef {
        &self.catalog
    }

    pub fn fertilizers(&self) -> &[FertilizerSpec] {
        &self.catalog.fertilizers
    }

    /// Resolve a crop identifier or display name to its target.
    pub fn crop(&self, crop_id: &str) -> Result<&CropTarget, MyllaError> {
        let key = normalize_crop_id(crop_id);
        match self.crop_index.get(&key) {
            Some(&idx) => Ok(&self.catalog.crops[idx]),
            None => {
                tracing::debug!(crop = crop_id, "crop not in catalog");
                Err(MyllaError::UnknownCrop {
                    crop: crop_id.to_string(),
                })
            }
        }
    }

    /// Compare an observed sample with the crop's targets.
    pub fn classify(
        &self,
        crop_id: &str,
        observed: &NutrientLevels,
    ) -> Result<Classification, MyllaError> {
        let crop = self.crop(crop_id)?;
        Ok(classify_levels(&crop.target, observed))
    }

    /// Fertilizer dosages needed to close the sample's deficiencies.
    ///
    /// An unknown crop is an error, never an empty recommendation.
    pub fn recommend(
        &self,
        crop_id: &str,
        observed: &NutrientLevels,
    ) -> Result<Recommendations, MyllaError> {
        let crop = self.crop(crop_id)?;
        Ok(recommend_levels(
            &crop.target,
            observed,
            &self.catalog.fertilizers,
        ))
    }

    /// Classify and recommend in one pass.
    pub fn analyze(&self, crop_id: &str, observed: &NutrientLevels) -> Result<Analysis, MyllaError> {
        let crop = self.crop(crop_id)?;
        let classification = classify_levels(&crop.target, observed);
        let deficiency = deficiency(&crop.target, observed);
        let recommendations = recommend_levels(&crop.target, observed, &self.catalog.fertilizers);

        tracing::debug!(
            crop = %crop.id,
            nitrogen = classification.nitrogen.code(),
            phosphorus = classification.phosphorus.code(),
            potassium = classification.potassium.code(),
            recommendations = recommendations.len(),
            "sample analyzed"
        );

        Ok(Analysis {
            crop_id: crop.id.clone(),
            crop_name: crop.name.clone(),
            target: crop.target,
            observed: *observed,
            classification,
            deficiency,
            recommendations,
        })
    }

    /// Analyze a batch of samples independently.
    ///
    /// Fails on the first sample that cannot be analyzed; no partial batch
    /// is returned.
    pub fn analyze_samples(
        &self,
        samples: &[SampleInput],
    ) -> Result<Vec<SampleAnalysis>, MyllaError> {
        samples
            .iter()
            .enumerate()
            .map(|(idx, sample)| {
                let sample_id = sample
                    .sample_id
                    .clone()
                    .unwrap_or_else(|| (idx + 1).to_string());
                let analysis = self.analyze(&sample.crop, &sample.levels)?;
                Ok(SampleAnalysis {
                    sample_id,
                    analysis,
                })
            })
            .collect()
    }

    /// Crops the catalog lists as valid for a soil type.
    pub fn crops_for_soil(&self, soil: &str) -> Result<Vec<&CropTarget>, MyllaError> {
        let key = normalize_soil_name(soil);
        let soil_def = self
            .catalog
            .soils
            .iter()
            .find(|s| normalize_soil_name(&s.name) == key)
            .ok_or_else(|| MyllaError::UnknownSoil {
                soil: soil.to_string(),
            })?;

        let mut crops: Vec<&CropTarget> = Vec::new();
        for crop_id in &soil_def.crops {
            let crop = self.crop(crop_id)?;
            if !crops.iter().any(|c| c.id == crop.id) {
                crops.push(crop);
            }
        }
        Ok(crops)
    }
}
