//! Integration tests for the public engine API.
//!
//! Uses both the built-in catalog and small synthetic catalogs built in
//! code, so expected numbers do not depend on the shipped reference data.

use mylla_core::analysis::outcome::NutrientStatus;
use mylla_core::catalog::parse_catalog_str;
use mylla_core::error::MyllaError;
use mylla_core::model::{Nutrient, NutrientLevels};
use mylla_core::{analyze_sample_file, AnalyzeOptions, Decimal, Engine};
use rust_decimal_macros::dec;
use std::sync::Arc;

const FIELD_CATALOG: &str = r#"{
    "name": "Field trial",
    "version": "1",
    "soils": [ { "name": "Loamy Soil", "crops": ["trial_crop", "bean"] } ],
    "crops": [
        { "id": "trial_crop", "name": "Trial crop",
          "target": { "nitrogen": "50", "phosphorus": "30", "potassium": "40" } },
        { "id": "bean", "name": "Bean",
          "target": { "nitrogen": "0", "phosphorus": "12.5", "potassium": "20" } }
    ],
    "fertilizers": [
        { "name": "Urea", "class": "inorganic",
          "content": { "nitrogen": "46", "phosphorus": "0", "potassium": "0" } },
        { "name": "DAP", "class": "inorganic",
          "content": { "nitrogen": "18", "phosphorus": "46", "potassium": "0" } },
        { "name": "MOP", "class": "inorganic",
          "content": { "nitrogen": "0", "phosphorus": "0", "potassium": "60" } },
        { "name": "Bone meal", "class": "organic",
          "content": { "nitrogen": "4", "phosphorus": "20", "potassium": "0" } },
        { "name": "Wood ash", "class": "organic",
          "content": { "nitrogen": "0", "phosphorus": "1", "potassium": "5" } }
    ]
}"#;

fn field_engine() -> Engine {
    Engine::new(parse_catalog_str(FIELD_CATALOG).unwrap()).unwrap()
}

fn levels(n: Decimal, p: Decimal, k: Decimal) -> NutrientLevels {
    NutrientLevels::new(n, p, k)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn classify_excess_deficient_balanced() {
    let engine = field_engine();
    let result = engine
        .classify("trial_crop", &levels(dec!(60), dec!(20), dec!(40)))
        .unwrap();

    assert_eq!(result.nitrogen, NutrientStatus::Excess(dec!(10)));
    assert_eq!(result.phosphorus, NutrientStatus::Deficient(dec!(10)));
    assert_eq!(result.potassium, NutrientStatus::Balanced);
}

#[test]
fn classify_at_target_is_balanced_for_every_builtin_crop() {
    let engine = Engine::builtin().unwrap();
    for crop in &engine.catalog().crops {
        let result = engine.classify(&crop.id, &crop.target).unwrap();
        assert!(result.all_balanced(), "crop {} not balanced", crop.id);
    }
}

#[test]
fn classify_accepts_display_name() {
    let engine = Engine::builtin().unwrap();
    let by_id = engine
        .classify("sugarcane", &levels(dec!(1), dec!(2), dec!(3)))
        .unwrap();
    let by_name = engine
        .classify("Sugarcane", &levels(dec!(1), dec!(2), dec!(3)))
        .unwrap();
    assert_eq!(by_id, by_name);
}

#[test]
fn classify_negative_observation_is_deficient() {
    let engine = field_engine();
    let result = engine
        .classify("trial_crop", &levels(dec!(-10), dec!(30), dec!(40)))
        .unwrap();
    assert_eq!(result.nitrogen, NutrientStatus::Deficient(dec!(60)));
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[test]
fn recommend_inorganic_dosages() {
    let engine = field_engine();
    let recs = engine
        .recommend("trial_crop", &levels(dec!(30), dec!(10), dec!(40)))
        .unwrap();

    let inorganic: Vec<(&str, Nutrient, Decimal)> = recs
        .inorganic
        .iter()
        .map(|r| (r.fertilizer.as_str(), r.nutrient, r.dosage_kg.round_dp(2)))
        .collect();
    assert_eq!(
        inorganic,
        vec![
            ("Urea", Nutrient::Nitrogen, dec!(43.48)),
            ("DAP", Nutrient::Nitrogen, dec!(111.11)),
            ("DAP", Nutrient::Phosphorus, dec!(43.48)),
        ]
    );
    assert!(recs.inorganic.iter().all(|r| r.fertilizer != "MOP"));
}

#[test]
fn recommend_organic_dosages_in_catalog_order() {
    let engine = field_engine();
    let recs = engine
        .recommend("trial_crop", &levels(dec!(30), dec!(10), dec!(35)))
        .unwrap();

    let organic: Vec<(&str, Nutrient, Decimal)> = recs
        .organic
        .iter()
        .map(|r| (r.fertilizer.as_str(), r.nutrient, r.dosage_kg))
        .collect();
    // N 20, P 20, K 5 short
    assert_eq!(
        organic,
        vec![
            ("Bone meal", Nutrient::Nitrogen, dec!(500)),
            ("Bone meal", Nutrient::Phosphorus, dec!(100)),
            ("Wood ash", Nutrient::Phosphorus, dec!(2000)),
            ("Wood ash", Nutrient::Potassium, dec!(100)),
        ]
    );
}

#[test]
fn recommend_skips_zero_deficiency_and_zero_content() {
    let engine = field_engine();
    let recs = engine
        .recommend("bean", &levels(dec!(0), dec!(2.5), dec!(20)))
        .unwrap();

    // Only phosphorus is short (10).
    for rec in recs.inorganic.iter().chain(recs.organic.iter()) {
        assert_eq!(rec.nutrient, Nutrient::Phosphorus);
    }
    let names: Vec<&str> = recs.inorganic.iter().map(|r| r.fertilizer.as_str()).collect();
    assert_eq!(names, vec!["DAP"]);
}

#[test]
fn recommend_nothing_when_all_targets_met() {
    let engine = Engine::builtin().unwrap();
    let recs = engine
        .recommend("coconut", &levels(dec!(80), dec!(30), dec!(120)))
        .unwrap();
    assert!(recs.is_empty());
}

#[test]
fn doubling_deficiency_doubles_dosages() {
    let engine = field_engine();
    // Deficiency (10, 5, 4) vs (20, 10, 8)
    let a = engine
        .recommend("trial_crop", &levels(dec!(40), dec!(25), dec!(36)))
        .unwrap();
    let b = engine
        .recommend("trial_crop", &levels(dec!(30), dec!(20), dec!(32)))
        .unwrap();

    assert_eq!(a.len(), b.len());
    let pairs = a
        .inorganic
        .iter()
        .zip(&b.inorganic)
        .chain(a.organic.iter().zip(&b.organic));
    for (x, y) in pairs {
        assert_eq!(x.fertilizer, y.fertilizer);
        assert_eq!(x.nutrient, y.nutrient);
        assert_eq!((x.dosage_kg * dec!(2)).round_dp(20), y.dosage_kg.round_dp(20));
    }
}

// ---------------------------------------------------------------------------
// Unknown crop
// ---------------------------------------------------------------------------

#[test]
fn unknown_crop_fails_both_operations() {
    let engine = Engine::builtin().unwrap();
    let observed = levels(dec!(10), dec!(10), dec!(10));

    assert!(matches!(
        engine.classify("quinoa", &observed),
        Err(MyllaError::UnknownCrop { .. })
    ));
    assert!(matches!(
        engine.recommend("quinoa", &observed),
        Err(MyllaError::UnknownCrop { .. })
    ));
    assert!(matches!(
        engine.analyze("quinoa", &observed),
        Err(MyllaError::UnknownCrop { .. })
    ));
}

// ---------------------------------------------------------------------------
// Combined analysis, soils and batches
// ---------------------------------------------------------------------------

#[test]
fn analyze_reports_deficiency_and_both_results() {
    let engine = field_engine();
    let analysis = engine
        .analyze("Trial crop", &levels(dec!(30), dec!(10), dec!(45)))
        .unwrap();

    assert_eq!(analysis.crop_id, "trial_crop");
    assert_eq!(analysis.deficiency, levels(dec!(20), dec!(20), dec!(0)));
    assert_eq!(analysis.classification.potassium, NutrientStatus::Excess(dec!(5)));
    assert_eq!(analysis.recommendations.inorganic.len(), 3);
}

#[test]
fn crops_for_soil_from_builtin_catalog() {
    let engine = Engine::builtin().unwrap();
    let crops: Vec<&str> = engine
        .crops_for_soil("black")
        .unwrap()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(crops, vec!["Rice", "Cotton", "Sugarcane"]);

    assert!(matches!(
        engine.crops_for_soil("Volcanic Soil"),
        Err(MyllaError::UnknownSoil { .. })
    ));
}

#[test]
fn batch_file_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.json");
    std::fs::write(
        &path,
        r#"[
            { "sample_id": "north", "crop": "trial_crop",
              "levels": { "nitrogen": "30", "phosphorus": "10", "potassium": "40" } },
            { "crop": "bean",
              "levels": { "nitrogen": "0", "phosphorus": "12.5", "potassium": "20" } }
        ]"#,
    )
    .unwrap();

    let engine = field_engine();
    let results = analyze_sample_file(&path, &engine, &AnalyzeOptions::default()).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].sample_id, "north");
    assert_eq!(results[1].sample_id, "2");
    assert!(results[1].analysis.classification.all_balanced());
}

#[test]
fn batch_with_unknown_crop_fails_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.json");
    std::fs::write(
        &path,
        r#"[
            { "crop": "trial_crop",
              "levels": { "nitrogen": "30", "phosphorus": "10", "potassium": "40" } },
            { "crop": "barley",
              "levels": { "nitrogen": "1", "phosphorus": "1", "potassium": "1" } }
        ]"#,
    )
    .unwrap();

    let engine = field_engine();
    let result = analyze_sample_file(&path, &engine, &AnalyzeOptions::default());
    assert!(matches!(result, Err(MyllaError::UnknownCrop { .. })));
}

#[test]
fn batch_negative_levels_need_opt_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.json");
    std::fs::write(
        &path,
        r#"[
            { "crop": "trial_crop",
              "levels": { "nitrogen": "-5", "phosphorus": "10", "potassium": "40" } }
        ]"#,
    )
    .unwrap();

    let engine = field_engine();
    let strict = analyze_sample_file(&path, &engine, &AnalyzeOptions::default());
    assert!(matches!(strict, Err(MyllaError::InvalidObservation { .. })));

    let lax = analyze_sample_file(
        &path,
        &engine,
        &AnalyzeOptions {
            allow_negative: true,
        },
    )
    .unwrap();
    assert_eq!(
        lax[0].analysis.classification.nitrogen,
        NutrientStatus::Deficient(dec!(55))
    );
}

#[test]
fn engine_shared_across_threads() {
    let engine = Arc::new(Engine::builtin().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let observed = NutrientLevels::new(Decimal::from(i * 10), dec!(10), dec!(40));
                engine.analyze("wheat", &observed).map(|a| a.deficiency.nitrogen)
            })
        })
        .collect();

    let shortfalls: Vec<Decimal> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(shortfalls, vec![dec!(50), dec!(40), dec!(30), dec!(20)]);
}
