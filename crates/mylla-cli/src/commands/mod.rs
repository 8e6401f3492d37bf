pub mod analyze;
pub mod batch;
pub mod catalog;

use mylla_core::catalog::{builtin, load_catalog};
use mylla_core::error::MyllaError;
use mylla_core::model::NutrientLevels;
use mylla_core::parsing::values::parse_level;
use mylla_core::Engine;
use std::path::PathBuf;

use crate::{CatalogArgs, SampleArgs};

const CATALOG_ENV: &str = "MYLLA_CATALOG";

/// Build an engine from `--catalog`, then `$MYLLA_CATALOG`, then the
/// built-in catalog.
pub fn load_engine(args: &CatalogArgs) -> Result<Engine, MyllaError> {
    let path = args
        .catalog
        .clone()
        .or_else(|| std::env::var_os(CATALOG_ENV).map(PathBuf::from));

    let catalog = match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading catalog");
            load_catalog(&path)?
        }
        None => {
            tracing::info!(preset = builtin::DEFAULT_PRESET, "using built-in catalog");
            builtin::load_preset(builtin::DEFAULT_PRESET)?
        }
    };

    Engine::new(catalog)
}

/// Parse and check the observed levels given on the command line.
pub fn observed_levels(args: &SampleArgs) -> Result<NutrientLevels, MyllaError> {
    let levels = NutrientLevels::new(
        parse_level(&args.nitrogen)?,
        parse_level(&args.phosphorus)?,
        parse_level(&args.potassium)?,
    );
    if !args.allow_negative {
        levels.validate_observed()?;
    }
    Ok(levels)
}
