use mylla_core::analysis::outcome::{
    Analysis, Classification, NutrientStatus, Recommendation, Recommendations,
};
use mylla_core::catalog::schema::CropTarget;
use mylla_core::model::NutrientLevels;
use mylla_core::trace::{TraceBundle, TraceSeverity};
use mylla_core::Decimal;

/// `{:.2}` truncates a `Decimal`, so round first.
fn two_dp(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Display label for a nutrient status, magnitudes at two decimals.
pub fn format_status(status: &NutrientStatus) -> String {
    match status {
        NutrientStatus::Excess(amount) => format!("Excess by {:.2}", two_dp(*amount)),
        NutrientStatus::Deficient(amount) => format!("Deficient by {:.2}", two_dp(*amount)),
        NutrientStatus::Balanced => "Balanced".to_string(),
    }
}

pub fn print_crop_header(crop: &CropTarget) {
    println!("=== {} ({}) ===\n", crop.name, crop.id);
}

pub fn print_analysis(analysis: &Analysis) {
    println!("=== {} ({}) ===\n", analysis.crop_name, analysis.crop_id);
    print_classification(&analysis.target, &analysis.observed, &analysis.classification);
    print_recommendations(&analysis.recommendations);
}

pub fn print_classification(
    target: &NutrientLevels,
    observed: &NutrientLevels,
    classification: &Classification,
) {
    println!(
        "  {:<12}  {:>10}  {:>10}  Status",
        "Nutrient", "Observed", "Target"
    );
    println!("  {}", "-".repeat(56));
    for (nutrient, status) in classification.iter() {
        println!(
            "  {:<12}  {:>10.2}  {:>10.2}  {}",
            nutrient,
            two_dp(observed.get(nutrient)),
            two_dp(target.get(nutrient)),
            format_status(&status)
        );
    }
    println!();
}

pub fn print_recommendations(recommendations: &Recommendations) {
    if recommendations.is_empty() {
        println!("  All nutrient targets met, no fertilizer needed.\n");
        return;
    }

    print_group("Inorganic fertilizers", &recommendations.inorganic);
    print_group("Organic fertilizers", &recommendations.organic);
}

fn print_group(title: &str, recommendations: &[Recommendation]) {
    println!("  {}:", title);
    if recommendations.is_empty() {
        println!("    (none in catalog supply the deficient nutrients)\n");
        return;
    }

    let max_name = recommendations
        .iter()
        .map(|r| r.fertilizer.len())
        .max()
        .unwrap_or(10);

    for rec in recommendations {
        println!("{}", format_recommendation(rec, max_name));
    }
    println!();
}

fn format_recommendation(rec: &Recommendation, name_width: usize) -> String {
    format!(
        "    {:<width$}  for {:<10}  {:>10.2} kg",
        rec.fertilizer,
        rec.nutrient,
        two_dp(rec.dosage_kg),
        width = name_width
    )
}

pub fn print_trace(bundle: &TraceBundle) {
    println!("Decision trace:\n");
    for decision in &bundle.decisions {
        let marker = match decision.severity {
            TraceSeverity::Important => "*",
            TraceSeverity::Info => " ",
        };
        println!("  {} [{}] {}", marker, decision.decision_id, decision.outcome);
        for step in &decision.steps {
            println!("      {}", step.message);
        }
    }

    if !bundle.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &bundle.warnings {
            match warning.sample_id {
                Some(ref id) => println!("  - [{}] {}", id, warning.message),
                None => println!("  - {}", warning.message),
            }
        }
    }
    println!();
}
