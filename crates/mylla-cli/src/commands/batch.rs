use mylla_core::error::MyllaError;
use mylla_core::trace::build_batch_trace;
use mylla_core::{analyze_sample_file, AnalyzeOptions};
use std::path::Path;

use crate::commands::load_engine;
use crate::output;
use crate::CatalogArgs;

pub fn run(
    input_file: &Path,
    catalog: &CatalogArgs,
    allow_negative: bool,
    output_format: &str,
    with_trace: bool,
) -> Result<(), MyllaError> {
    let engine = load_engine(catalog)?;
    let options = AnalyzeOptions { allow_negative };
    let results = analyze_sample_file(input_file, &engine, &options)?;
    let trace = with_trace.then(|| build_batch_trace(&results, engine.fertilizers()));

    match output_format {
        "json" => match trace {
            Some(ref bundle) => output::json::print(&serde_json::json!({
                "samples": results,
                "trace": bundle,
            }))?,
            None => output::json::print(&results)?,
        },
        _ => {
            for (i, sample) in results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("--- Sample: {} ---\n", sample.sample_id);
                output::table::print_analysis(&sample.analysis);
            }
            if let Some(ref bundle) = trace {
                output::table::print_trace(bundle);
            }
        }
    }

    Ok(())
}
