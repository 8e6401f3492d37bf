use crate::catalog::schema::CatalogDef;
use crate::catalog::validate_catalog;
use crate::error::MyllaError;

const STANDARD_JSON: &str = include_str!("../../../../catalogs/standard.json");

/// Available predefined catalogs.
pub const PRESETS: &[&str] = &["standard"];

/// Name of the catalog used when the caller does not pick one.
pub const DEFAULT_PRESET: &str = "standard";

/// Load a predefined catalog by name.
pub fn load_preset(name: &str) -> Result<CatalogDef, MyllaError> {
    match name {
        "standard" => {
            let catalog: CatalogDef = serde_json::from_str(STANDARD_JSON)?;
            validate_catalog(&catalog)?;
            Ok(catalog)
        }
        _ => Err(MyllaError::CatalogInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog_warnings;
    use crate::model::FertilizerClass;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_standard_preset() {
        let catalog = load_preset("standard").unwrap();
        assert_eq!(catalog.soils.len(), 7);
        assert_eq!(catalog.crops.len(), 15);
    }

    #[test]
    fn test_standard_fertilizer_mix() {
        let catalog = load_preset("standard").unwrap();
        let inorganic: Vec<&str> = catalog
            .fertilizers
            .iter()
            .filter(|f| f.class == FertilizerClass::Inorganic)
            .map(|f| f.name.as_str())
            .collect();
        let organic = catalog
            .fertilizers
            .iter()
            .filter(|f| f.class == FertilizerClass::Organic)
            .count();
        assert_eq!(inorganic, vec!["Urea", "DAP", "MOP"]);
        assert_eq!(organic, 2);
    }

    #[test]
    fn test_standard_wheat_target() {
        let catalog = load_preset("standard").unwrap();
        let wheat = catalog.crops.iter().find(|c| c.id == "wheat").unwrap();
        assert_eq!(wheat.target.nitrogen, dec!(50));
        assert_eq!(wheat.target.phosphorus, dec!(30));
        assert_eq!(wheat.target.potassium, dec!(40));
    }

    #[test]
    fn test_standard_has_no_warnings() {
        let catalog = load_preset("standard").unwrap();
        assert!(catalog_warnings(&catalog).is_empty());
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
