use crate::analysis::outcome::{Analysis, NutrientStatus, Recommendation, SampleAnalysis};
use crate::catalog::schema::FertilizerSpec;
use crate::model::{FertilizerClass, Nutrient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Important,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    ResolveCrop,
    CompareLevel,
    ComputeDeficiency,
    ComputeDosage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceDecisionTarget {
    Nutrient,
    Recommendation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDecision {
    pub decision_id: String,
    pub sample_id: String,
    pub crop_id: String,
    pub target: TraceDecisionTarget,
    pub nutrient: Nutrient,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fertilizer: Option<String>,
    /// Status code for nutrient decisions, fertilizer class for dosages.
    pub outcome: String,
    pub severity: TraceSeverity,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    pub message: String,
    pub severity: TraceSeverity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    pub decisions: Vec<TraceDecision>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for TraceBundle {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            decisions: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Explain how an analysis was reached, one decision per nutrient and one
/// per recommended dosage.
pub fn build_analysis_trace(
    sample_id: &str,
    analysis: &Analysis,
    fertilizers: &[FertilizerSpec],
) -> TraceBundle {
    let mut bundle = TraceBundle::default();

    let resolve = TraceStep {
        step_type: TraceStepType::ResolveCrop,
        message: format!(
            "Resolved crop '{}' ({}) with targets N {} / P {} / K {}",
            analysis.crop_id,
            analysis.crop_name,
            analysis.target.nitrogen,
            analysis.target.phosphorus,
            analysis.target.potassium
        ),
    };

    for (nutrient, status) in analysis.classification.iter() {
        let observed = analysis.observed.get(nutrient);
        let target = analysis.target.get(nutrient);
        let shortfall = analysis.deficiency.get(nutrient);

        let compare = match status {
            NutrientStatus::Excess(amount) => {
                format!("{nutrient}: observed {observed} > target {target}, excess {amount}")
            }
            NutrientStatus::Deficient(amount) => {
                format!("{nutrient}: observed {observed} < target {target}, deficient {amount}")
            }
            NutrientStatus::Balanced => {
                format!("{nutrient}: observed {observed} = target {target}")
            }
        };

        bundle.decisions.push(TraceDecision {
            decision_id: format!("dec_{}_{}", sample_id, nutrient.symbol().to_lowercase()),
            sample_id: sample_id.to_string(),
            crop_id: analysis.crop_id.clone(),
            target: TraceDecisionTarget::Nutrient,
            nutrient,
            fertilizer: None,
            outcome: status.code().to_string(),
            severity: if status.is_balanced() {
                TraceSeverity::Info
            } else {
                TraceSeverity::Important
            },
            steps: vec![
                resolve.clone(),
                TraceStep {
                    step_type: TraceStepType::CompareLevel,
                    message: compare,
                },
                TraceStep {
                    step_type: TraceStepType::ComputeDeficiency,
                    message: format!(
                        "{nutrient}: max(0, {target} - {observed}) = {shortfall}"
                    ),
                },
            ],
        });

        if observed < Decimal::ZERO {
            bundle.warnings.push(TraceWarning {
                sample_id: Some(sample_id.to_string()),
                message: format!("{nutrient} observed level {observed} is negative"),
                severity: TraceSeverity::Important,
            });
        }
    }

    let groups: [(FertilizerClass, &[Recommendation]); 2] = [
        (FertilizerClass::Inorganic, analysis.recommendations.inorganic.as_slice()),
        (FertilizerClass::Organic, analysis.recommendations.organic.as_slice()),
    ];

    for (class, recommendations) in groups {
        for (idx, rec) in recommendations.iter().enumerate() {
            let content = fertilizers
                .iter()
                .find(|f| f.name == rec.fertilizer)
                .map(|f| f.content_percent(rec.nutrient))
                .unwrap_or_default();
            let shortfall = analysis.deficiency.get(rec.nutrient);

            bundle.decisions.push(TraceDecision {
                decision_id: format!("dec_{}_{}_{}", sample_id, class, idx),
                sample_id: sample_id.to_string(),
                crop_id: analysis.crop_id.clone(),
                target: TraceDecisionTarget::Recommendation,
                nutrient: rec.nutrient,
                fertilizer: Some(rec.fertilizer.clone()),
                outcome: class.to_string(),
                severity: TraceSeverity::Info,
                steps: vec![TraceStep {
                    step_type: TraceStepType::ComputeDosage,
                    message: format!(
                        "{}: {} / {}% * 100 = {} kg of {}",
                        rec.nutrient, shortfall, content, rec.dosage_kg, rec.fertilizer
                    ),
                }],
            });
        }

        for nutrient in Nutrient::ALL {
            let short = analysis.deficiency.get(nutrient) > Decimal::ZERO;
            if short && !recommendations.iter().any(|r| r.nutrient == nutrient) {
                bundle.warnings.push(TraceWarning {
                    sample_id: Some(sample_id.to_string()),
                    message: format!(
                        "no {class} fertilizer in the catalog supplies {}",
                        nutrient.to_string().to_lowercase()
                    ),
                    severity: TraceSeverity::Important,
                });
            }
        }
    }

    bundle
}

/// Trace every sample of a batch into a single bundle.
pub fn build_batch_trace(samples: &[SampleAnalysis], fertilizers: &[FertilizerSpec]) -> TraceBundle {
    let mut bundle = TraceBundle::default();
    for sample in samples {
        let part = build_analysis_trace(&sample.sample_id, &sample.analysis, fertilizers);
        bundle.decisions.extend(part.decisions);
        bundle.warnings.extend(part.warnings);
    }
    bundle
}
