//! Repform: exercise repetition counting and form scoring.
//!
//! Repform takes the per-frame body landmarks produced by a pose estimator
//! for one recorded exercise video, counts repetitions and scores the form
//! of each one, returning a structured session report.
//!
//! # Modules
//!
//! - [`pose`]: Landmark types, joint-angle geometry and landmark readers
//! - [`exercise`]: Supported exercises and their movement patterns
//! - [`analysis`]: Repetition detection, form scoring and session reports
//! - [`error`]: Error types for repform operations
//!
//! # Example
//!
//! ```
//! use repform::analysis::{analyze_session, AnalyzeOptions};
//! use repform::exercise::ExerciseType;
//! use repform::pose::FrameLandmarks;
//!
//! let frames = vec![FrameLandmarks::NotDetected; 10];
//! let result = analyze_session(&frames, ExerciseType::Squat, &AnalyzeOptions::default());
//! assert_eq!(result.reps_detected, 0);
//! assert_eq!(result.reps.len(), 1);
//! ```

pub mod analysis;
pub mod error;
pub mod exercise;
pub mod logging;
pub mod pose;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

pub use analysis::{analyze, analyze_session, AnalyzeOptions, RepResult, SessionResult};
pub use error::RepformError;
pub use exercise::ExerciseType;

/// The repform CLI application.
#[derive(Parser)]
#[command(name = "repform")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Emit debug logs for this crate on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Count repetitions and score form from a landmark file.
    Analyze(AnalyzeArgs),
    /// List supported exercises and their movement patterns.
    ListExercises,
}

/// Arguments for the analyze subcommand.
#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Landmark file to analyze.
    input: PathBuf,

    /// Exercise performed in the recording.
    #[arg(long, short, env = "REPFORM_EXERCISE", default_value = "squat")]
    exercise: String,

    /// Input format ('json', 'csv', or 'auto' to pick by file extension).
    #[arg(long, default_value = "auto")]
    format: String,

    /// Body side to read joints from ('left' or 'right').
    #[arg(long, env = "REPFORM_SIDE", default_value = "left")]
    side: String,

    /// Treat landmarks below this confidence (0.0 to 1.0) as not detected.
    #[arg(long, env = "REPFORM_MIN_CONFIDENCE")]
    min_confidence: Option<f64>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Also write the JSON report to this file.
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Run the repform CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), RepformError> {
    let cli = Cli::parse();
    logging::LoggingConfig::from_env(cli.verbose).init()?;

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args),
        Some(Commands::ListExercises) => {
            run_list_exercises();
            Ok(())
        }
        None => {
            println!("repform {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Exercise repetition counting and form scoring.");
            println!();
            println!("Run 'repform --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the analyze subcommand.
fn run_analyze(args: AnalyzeArgs) -> Result<(), RepformError> {
    // Reject bad selectors before touching the input
    let exercise: ExerciseType = args.exercise.parse()?;
    let opts = AnalyzeOptions {
        side: args.side.parse().map_err(RepformError::InvalidOption)?,
        min_confidence: match args.min_confidence {
            Some(c) if !(0.0..=1.0).contains(&c) => {
                return Err(RepformError::InvalidOption(format!(
                    "--min-confidence must be between 0 and 1, got {}",
                    c
                )));
            }
            other => other,
        },
    };
    let output = match args.output.as_str() {
        "text" | "json" => args.output.as_str(),
        other => {
            return Err(RepformError::UnsupportedFormat(format!(
                "'{}' for --output (supported: text, json)",
                other
            )));
        }
    };

    let sequence = read_landmarks(&args.input, &args.format)?;
    debug!(
        input = %args.input.display(),
        frames = sequence.len(),
        detected = sequence.detected_count(),
        "landmarks loaded"
    );

    let result = analyze_session(&sequence.frames, exercise, &opts);

    if let Some(path) = &args.report {
        let file = std::fs::File::create(path).map_err(RepformError::Io)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &result)
            .map_err(|source| RepformError::ReportJsonWrite { source })?;
    }

    match output {
        "json" => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|source| RepformError::ReportJsonWrite { source })?;
            println!("{}", json);
        }
        _ => print!("{}", result),
    }

    Ok(())
}

/// Loads a landmark file in the requested format.
fn read_landmarks(path: &Path, format: &str) -> Result<pose::LandmarkSequence, RepformError> {
    let format = match format {
        "auto" => match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => "csv",
            _ => "json",
        },
        other => other,
    };

    match format {
        "json" => pose::io_json::read_landmarks_json(path),
        "csv" => pose::io_csv::read_landmarks_csv(path),
        other => Err(RepformError::UnsupportedFormat(format!(
            "'{}' (supported: json, csv, auto)",
            other
        ))),
    }
}

/// Execute the list-exercises subcommand.
fn run_list_exercises() {
    println!("Supported exercises:");
    for exercise in ExerciseType::ALL {
        println!("  {}", exercise.pattern());
    }
}
