use mylla_core::catalog::{catalog_warnings, load_catalog};
use mylla_core::error::MyllaError;
use std::path::Path;

use crate::commands::load_engine;
use crate::CatalogArgs;

pub fn list(args: &CatalogArgs) -> Result<(), MyllaError> {
    let engine = load_engine(args)?;
    let catalog = engine.catalog();

    println!("{} (version {})\n", catalog.name, catalog.version);
    if let Some(ref desc) = catalog.description {
        println!("{}\n", desc);
    }

    let max_name_len = catalog
        .crops
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(10)
        .max("Crop".len());

    println!("Crop targets (kg/acre):\n");
    println!(
        "  {:<width$}  {:>10}  {:>10}  {:>10}",
        "Crop",
        "N",
        "P",
        "K",
        width = max_name_len
    );
    println!("  {}", "-".repeat(max_name_len + 36));
    for crop in &catalog.crops {
        println!(
            "  {:<width$}  {:>10}  {:>10}  {:>10}",
            crop.name,
            crop.target.nitrogen,
            crop.target.phosphorus,
            crop.target.potassium,
            width = max_name_len
        );
    }

    println!("\nFertilizers (% nutrient content):\n");
    for spec in &catalog.fertilizers {
        println!(
            "  {:<18} {:<10}  N {:>5}  P {:>5}  K {:>5}",
            spec.name,
            spec.class,
            spec.content.nitrogen,
            spec.content.phosphorus,
            spec.content.potassium
        );
    }
    println!();

    Ok(())
}

pub fn soils(args: &CatalogArgs) -> Result<(), MyllaError> {
    let engine = load_engine(args)?;
    let catalog = engine.catalog();

    if catalog.soils.is_empty() {
        println!("Catalog '{}' lists no soil types.", catalog.name);
        return Ok(());
    }

    println!("Soil types:\n");
    for soil in &catalog.soils {
        println!("  {:<16} {} crop(s)", soil.name, soil.crops.len());
    }
    Ok(())
}

pub fn crops(soil: &str, args: &CatalogArgs) -> Result<(), MyllaError> {
    let engine = load_engine(args)?;
    let crops = engine.crops_for_soil(soil)?;

    println!("Crops for {}:\n", soil);
    for crop in crops {
        print!(
            "  {:<14} N {:>6}  P {:>6}  K {:>6}",
            crop.name, crop.target.nitrogen, crop.target.phosphorus, crop.target.potassium
        );
        match crop.note {
            Some(ref note) => println!("  ({})", note),
            None => println!(),
        }
    }
    Ok(())
}

pub fn schema() -> Result<(), MyllaError> {
    print!(
        r#"JSON Catalog Schema
===================

A catalog holds the crop nutrient targets and the fertilizers that
`mylla analyze` compares samples against and recommends from.

Top-level fields:
  name          (string, required)  Human-readable catalog name
  description   (string, optional)  What this catalog is for
  version       (string, required)  Version identifier (e.g., "2024.1")
  soils         (array, optional)   Soil types and the crops valid for them
  crops         (array, required)   Crop nutrient targets (see below)
  fertilizers   (array, required)   Fertilizer compositions (see below).
                                    Recommendations follow this order.

Each entry in "soils":
  name          (string, required)  Soil name (e.g., "Black Soil")
  crops         (array, required)   Crop ids from the "crops" list

Each entry in "crops":
  id            (string, required)  Unique crop id. Matching ignores case,
                                    spaces and hyphens.
  name          (string, required)  Display name, also accepted on lookup
  target        (object, required)  {{ "nitrogen", "phosphorus", "potassium" }}
                                    in kg per acre, each >= 0
  note          (string, optional)  Agronomic remark

Each entry in "fertilizers":
  name          (string, required)  Unique fertilizer name
  class         (string, required)  "inorganic" or "organic"
  content       (object, required)  {{ "nitrogen", "phosphorus", "potassium" }}
                                    as percent of mass, each 0-100

Example:
{{
  "name": "Farm catalog",
  "version": "1.0",
  "soils": [ {{ "name": "Loamy Soil", "crops": ["wheat"] }} ],
  "crops": [
    {{
      "id": "wheat",
      "name": "Wheat",
      "target": {{ "nitrogen": "50", "phosphorus": "30", "potassium": "40" }}
    }}
  ],
  "fertilizers": [
    {{
      "name": "Urea",
      "class": "inorganic",
      "content": {{ "nitrogen": "46", "phosphorus": "0", "potassium": "0" }}
    }}
  ]
}}

Note: numbers must be quoted strings, not bare numbers, to preserve
exact decimal precision (e.g., "0.5" not 0.5).

Spreadsheet catalogs (.xlsx) use two sheets with a header row:
  Crops:        id | name | nitrogen | phosphorus | potassium | soils
  Fertilizers:  name | class | nitrogen | phosphorus | potassium
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), MyllaError> {
    let catalog = load_catalog(file)?;

    println!("Catalog '{}' (v{}) is valid.", catalog.name, catalog.version);
    println!("  Crops: {}", catalog.crops.len());
    println!("  Fertilizers: {}", catalog.fertilizers.len());
    println!("  Soils: {}", catalog.soils.len());

    let warnings = catalog_warnings(&catalog);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
