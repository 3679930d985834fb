use std::path::PathBuf;
use thiserror::Error;

/// The main error type for repform operations.
#[derive(Debug, Error)]
pub enum RepformError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse landmark JSON from {path}: {source}")]
    LandmarksJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write landmark JSON to {path}: {source}")]
    LandmarksJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse landmark CSV from {path}: {source}")]
    LandmarksCsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write landmark CSV to {path}: {source}")]
    LandmarksCsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid landmark CSV in {path}: {message}")]
    LandmarksCsvInvalid { path: PathBuf, message: String },

    #[error("Failed to write session report: {source}")]
    ReportJsonWrite {
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown exercise type: {0}")]
    UnknownExercise(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}
