use mylla_core::error::MyllaError;
use mylla_core::trace::build_analysis_trace;

use crate::commands::{load_engine, observed_levels};
use crate::output;
use crate::SampleArgs;

pub fn analyze(args: &SampleArgs, with_trace: bool) -> Result<(), MyllaError> {
    let engine = load_engine(&args.catalog)?;
    let observed = observed_levels(args)?;
    let analysis = engine.analyze(&args.crop, &observed)?;
    let trace = with_trace.then(|| build_analysis_trace("1", &analysis, engine.fertilizers()));

    match args.output.as_str() {
        "json" => match trace {
            Some(ref bundle) => output::json::print(&serde_json::json!({
                "analysis": analysis,
                "trace": bundle,
            }))?,
            None => output::json::print(&analysis)?,
        },
        _ => {
            output::table::print_analysis(&analysis);
            if let Some(ref bundle) = trace {
                output::table::print_trace(bundle);
            }
        }
    }

    Ok(())
}

pub fn classify(args: &SampleArgs) -> Result<(), MyllaError> {
    let engine = load_engine(&args.catalog)?;
    let observed = observed_levels(args)?;
    let crop = engine.crop(&args.crop)?;
    let classification = engine.classify(&crop.id, &observed)?;

    match args.output.as_str() {
        "json" => output::json::print(&classification)?,
        _ => {
            output::table::print_crop_header(crop);
            output::table::print_classification(&crop.target, &observed, &classification);
        }
    }

    Ok(())
}

pub fn recommend(args: &SampleArgs) -> Result<(), MyllaError> {
    let engine = load_engine(&args.catalog)?;
    let observed = observed_levels(args)?;
    let crop = engine.crop(&args.crop)?;
    let recommendations = engine.recommend(&crop.id, &observed)?;

    match args.output.as_str() {
        "json" => output::json::print(&recommendations)?,
        _ => {
            output::table::print_crop_header(crop);
            output::table::print_recommendations(&recommendations);
        }
    }

    Ok(())
}
