mod commands;
mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mylla",
    version,
    about = "Soil nutrient analysis and fertilizer recommendations"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Crop, observed levels and catalog for a single-sample command.
#[derive(Args)]
pub struct SampleArgs {
    /// Crop id or name (e.g. "wheat")
    crop: String,

    /// Observed nitrogen (kg/acre)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    nitrogen: String,

    /// Observed phosphorus (kg/acre)
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    phosphorus: String,

    /// Observed potassium (kg/acre)
    #[arg(short = 'k', long, allow_negative_numbers = true)]
    potassium: String,

    /// Accept negative observed levels
    #[arg(long)]
    allow_negative: bool,

    #[command(flatten)]
    catalog: CatalogArgs,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    output: String,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog file (JSON or XLSX). Defaults to $MYLLA_CATALOG, then the built-in catalog
    #[arg(short, long = "catalog", value_name = "FILE")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a sample and recommend fertilizers
    Analyze {
        #[command(flatten)]
        sample: SampleArgs,

        /// Include the decision trace
        #[arg(long)]
        trace: bool,
    },
    /// Compare a sample with the crop's nutrient targets
    Classify {
        #[command(flatten)]
        sample: SampleArgs,
    },
    /// Recommend fertilizer dosages for a sample
    Recommend {
        #[command(flatten)]
        sample: SampleArgs,
    },
    /// Analyze a JSON file of samples
    Batch {
        /// Path to a JSON array of samples
        input_file: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Accept negative observed levels
        #[arg(long)]
        allow_negative: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Include the decision trace
        #[arg(long)]
        trace: bool,
    },
    /// Inspect and validate catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List crops and their nutrient targets
    List {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// List soil types
    Soils {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// List the crops valid for a soil type
    Crops {
        /// Soil name (e.g. "black" or "Black Soil")
        soil: String,

        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Print the catalog JSON schema with field descriptions
    Schema,
    /// Validate a catalog file
    Validate {
        /// Path to JSON or XLSX catalog
        file: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Analyze { sample, trace } => commands::analyze::analyze(&sample, trace),
        Commands::Classify { sample } => commands::analyze::classify(&sample),
        Commands::Recommend { sample } => commands::analyze::recommend(&sample),
        Commands::Batch {
            input_file,
            catalog,
            allow_negative,
            output,
            trace,
        } => commands::batch::run(&input_file, &catalog, allow_negative, &output, trace),
        Commands::Catalog { action } => match action {
            CatalogAction::List { catalog } => commands::catalog::list(&catalog),
            CatalogAction::Soils { catalog } => commands::catalog::soils(&catalog),
            CatalogAction::Crops { soil, catalog } => commands::catalog::crops(&soil, &catalog),
            CatalogAction::Schema => commands::catalog::schema(),
            CatalogAction::Validate { file } => commands::catalog::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
