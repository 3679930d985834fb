//! JSON landmark files.
//!
//! The layout is one document per recorded video:
//!
//! ```json
//! {
//!   "frames": [
//!     { "left_shoulder": { "x": 0.52, "y": 0.31, "confidence": 0.98 }, "left_hip": { ... } },
//!     null
//!   ]
//! }
//! ```
//!
//! A `null` frame means the pose estimator detected nobody in that frame.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::frame::LandmarkSequence;
use crate::error::RepformError;

/// Reads a landmark sequence from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_landmarks_json(path: &Path) -> Result<LandmarkSequence, RepformError> {
    let file = File::open(path).map_err(RepformError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| RepformError::LandmarksJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a landmark sequence to a JSON file.
pub fn write_landmarks_json(path: &Path, sequence: &LandmarkSequence) -> Result<(), RepformError> {
    let file = File::create(path).map_err(RepformError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, sequence).map_err(|source| {
        RepformError::LandmarksJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a landmark sequence from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<LandmarkSequence, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a landmark sequence from raw JSON bytes.
///
/// Useful for fuzzing.
pub fn from_json_slice(bytes: &[u8]) -> Result<LandmarkSequence, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a landmark sequence to a JSON string.
pub fn to_json_string(sequence: &LandmarkSequence) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(sequence)
}
