pub mod builtin;
pub mod schema;
pub mod xlsx;

use crate::error::MyllaError;
use crate::model::{FertilizerClass, Nutrient};
use crate::parsing::normalize::{normalize_crop_id, normalize_soil_name};
use rust_decimal::Decimal;
use schema::CatalogDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a catalog from a JSON or XLSX file, chosen by extension.
pub fn load_catalog(path: &Path) -> Result<CatalogDef, MyllaError> {
    let is_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    if is_xlsx {
        let bytes = std::fs::read(path).map_err(|e| MyllaError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "spreadsheet".into());
        let catalog = xlsx::parse_catalog_xlsx(&bytes, &name).map_err(|e| {
            MyllaError::CatalogLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        validate_catalog(&catalog)?;
        return Ok(catalog);
    }

    let content = std::fs::read_to_string(path).map_err(|e| MyllaError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, path)
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog(json: &str, source: &Path) -> Result<CatalogDef, MyllaError> {
    let catalog: CatalogDef = serde_json::from_str(json).map_err(|e| MyllaError::CatalogLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<CatalogDef, MyllaError> {
    let catalog: CatalogDef = serde_json::from_str(json).map_err(MyllaError::Json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &CatalogDef) -> Result<(), MyllaError> {
    if catalog.crops.is_empty() {
        return Err(MyllaError::CatalogInvalid("crops must not be empty".into()));
    }

    if catalog.fertilizers.is_empty() {
        return Err(MyllaError::CatalogInvalid(
            "fertilizers must not be empty".into(),
        ));
    }

    let mut crop_keys = HashSet::new();
    for crop in &catalog.crops {
        let key = normalize_crop_id(&crop.id);
        if key.is_empty() {
            return Err(MyllaError::CatalogInvalid(
                "crop id must not be empty".into(),
            ));
        }
        if !crop_keys.insert(key) {
            return Err(MyllaError::CatalogInvalid(format!(
                "duplicate crop id '{}'",
                crop.id
            )));
        }
        for (nutrient, value) in crop.target.iter() {
            if value < Decimal::ZERO {
                return Err(MyllaError::CatalogInvalid(format!(
                    "crop '{}' has negative {} target {}",
                    crop.id,
                    nutrient.to_string().to_lowercase(),
                    value
                )));
            }
        }
    }

    let mut fertilizer_names = HashSet::new();
    for spec in &catalog.fertilizers {
        if spec.name.trim().is_empty() {
            return Err(MyllaError::CatalogInvalid(
                "fertilizer name must not be empty".into(),
            ));
        }
        if !fertilizer_names.insert(spec.name.trim().to_lowercase()) {
            return Err(MyllaError::CatalogInvalid(format!(
                "duplicate fertilizer '{}'",
                spec.name
            )));
        }
        for (nutrient, value) in spec.content.iter() {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(MyllaError::CatalogInvalid(format!(
                    "fertilizer '{}' has {} content {}% (expected 0-100)",
                    spec.name,
                    nutrient.to_string().to_lowercase(),
                    value
                )));
            }
        }
    }

    let mut soil_keys = HashSet::new();
    for soil in &catalog.soils {
        if soil.name.trim().is_empty() {
            return Err(MyllaError::CatalogInvalid(
                "soil name must not be empty".into(),
            ));
        }
        if !soil_keys.insert(normalize_soil_name(&soil.name)) {
            return Err(MyllaError::CatalogInvalid(format!(
                "duplicate soil '{}'",
                soil.name
            )));
        }
        for crop_id in &soil.crops {
            if !crop_keys.contains(&normalize_crop_id(crop_id)) {
                return Err(MyllaError::CatalogInvalid(format!(
                    "soil '{}' references unknown crop '{}'",
                    soil.name, crop_id
                )));
            }
        }
    }

    Ok(())
}

/// Non-fatal issues in a valid catalog.
pub fn catalog_warnings(catalog: &CatalogDef) -> Vec<String> {
    let mut warnings = Vec::new();

    for spec in &catalog.fertilizers {
        if Nutrient::ALL.iter().all(|n| !spec.supplies(*n)) {
            warnings.push(format!(
                "fertilizer '{}' has no nutrient content and will never be recommended",
                spec.name
            ));
        }
        let total: Decimal = spec.content.iter().map(|(_, v)| v).sum();
        if total > Decimal::ONE_HUNDRED {
            warnings.push(format!(
                "fertilizer '{}' content adds up to {}%",
                spec.name, total
            ));
        }
    }

    for class in [FertilizerClass::Inorganic, FertilizerClass::Organic] {
        for nutrient in Nutrient::ALL {
            let covered = catalog
                .fertilizers
                .iter()
                .any(|f| f.class == class && f.supplies(nutrient));
            if !covered {
                warnings.push(format!(
                    "no {} fertilizer supplies {}",
                    class,
                    nutrient.to_string().to_lowercase()
                ));
            }
        }
    }

    warnings
}
