//! Command-line front end.
//!
//! **Usage:**
//! ```bash
//! dermolens lesion.jpg [--seed 42] [--no-noise] [--triage] [--adjust] [--base 0.1,...]
//! dermolens --model-info [--triage]
//! ```
//!
//! Prints the prediction as JSON on stdout; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};

use dermolens::config::{self, ClassifyOptions, ScoringMode};
use dermolens::models::CLASS_COUNT;
use dermolens::{decode_image, ExtractionError, LesionClassifier};

#[derive(Parser, Debug)]
#[clap(name = "dermolens")]
#[clap(about = "Rule-based skin lesion classification with ABCDE screening")]
#[clap(version)]
struct Args {
    /// Lesion image (PNG, JPEG or TIFF)
    #[clap(required_unless_present = "model_info")]
    image: Option<PathBuf>,

    /// JSON file with classification options; flags below override it
    #[clap(long, value_name = "FILE", env = "DERMOLENS_OPTIONS")]
    options_json: Option<PathBuf>,

    /// Seed for reproducible noise
    #[clap(long)]
    seed: Option<u64>,

    /// Disable probability perturbation
    #[clap(long)]
    no_noise: bool,

    /// Score with ABCDE triage templates instead of per-class rules
    #[clap(long)]
    triage: bool,

    /// Apply the medical knowledge adjustment to the engine's own scores
    #[clap(long)]
    adjust: bool,

    /// External base distribution: seven comma-separated values in class order
    #[clap(long, value_delimiter = ',', allow_negative_numbers = true)]
    base: Option<Vec<f64>>,

    /// Omit the ABCDE score and feature summary
    #[clap(long)]
    no_abcde: bool,

    /// Print the engine descriptor instead of classifying
    #[clap(long)]
    model_info: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Base distribution needs 7 values, got {0}")]
    BaseLength(usize),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn build_options(args: &Args) -> Result<ClassifyOptions, CliError> {
    let mut options = match &args.options_json {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            ClassifyOptions::from_json(&json)?
        }
        None => ClassifyOptions::default(),
    };

    if let Some(seed) = args.seed {
        options.noise.seed = Some(seed);
    }
    if args.no_noise {
        options.noise.enabled = false;
    }
    if args.triage {
        options.mode = ScoringMode::AbcdeTriage;
    }
    if args.adjust {
        options.apply_medical_adjustment = true;
    }
    if args.no_abcde {
        options.include_abcde = false;
    }
    if let Some(values) = &args.base {
        let base: [f64; CLASS_COUNT] = values
            .as_slice()
            .try_into()
            .map_err(|_| CliError::BaseLength(values.len()))?;
        options.base_distribution = Some(base);
    }
    Ok(options)
}

fn run(args: &Args) -> Result<String, CliError> {
    let options = build_options(args)?;
    let engine = LesionClassifier::new();

    match (&args.image, args.model_info) {
        (Some(path), false) => {
            let bytes = read_file(path)?;
            let image = decode_image(&bytes)?;
            let result = engine.classify(&image, &options)?;
            Ok(serde_json::to_string_pretty(&result)?)
        }
        _ => Ok(serde_json::to_string_pretty(&engine.model_info(&options))?),
    }
}

fn main() -> ExitCode {
    dermolens::init_tracing();
    let args = Args::parse();

    info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(image = ?args.image, "{e}");
            ExitCode::FAILURE
        }
    }
}
