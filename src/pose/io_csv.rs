//! CSV landmark files.
//!
//! # Layout
//!
//! One row per landmark, with the header `frame,joint,x,y,confidence`:
//! - `frame`: 0-based frame index; rows must be in non-decreasing frame order
//! - `joint`: snake_case joint name (`left_hip`, `right_knee`, ...)
//! - `x`, `y`: normalized coordinates
//! - `confidence`: optional, may be left empty
//!
//! A row with an empty `joint` (and empty coordinates) records a frame in
//! which nobody was detected. Frame indices skipped entirely between rows
//! are undetected frames too; a marker row is only needed for trailing
//! undetected frames, which would otherwise be lost.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::frame::{FrameLandmarks, LandmarkSequence};
use super::joint::Joint;
use super::point::LandmarkPoint;
use crate::error::RepformError;

/// Largest frame index accepted; about 77 hours of 60 fps video.
const MAX_FRAME_INDEX: usize = 1 << 24;

/// A single row in the landmark CSV layout.
#[derive(Debug, Serialize, Deserialize)]
struct LandmarkRow {
    frame: usize,
    joint: String,
    x: Option<f64>,
    y: Option<f64>,
    confidence: Option<f64>,
}

/// Reads a landmark sequence from a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, if frame indices
/// go backwards, or if a row names an unknown or repeated joint.
pub fn read_landmarks_csv(path: &Path) -> Result<LandmarkSequence, RepformError> {
    let file = File::open(path).map_err(RepformError::Io)?;
    let reader = BufReader::new(file);
    rows_to_sequence(csv::Reader::from_reader(reader), path)
}

/// Reads a landmark sequence from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_csv_str(csv_str: &str) -> Result<LandmarkSequence, RepformError> {
    from_csv_slice(csv_str.as_bytes())
}

/// Reads a landmark sequence from CSV bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_csv_slice(bytes: &[u8]) -> Result<LandmarkSequence, RepformError> {
    rows_to_sequence(csv::Reader::from_reader(bytes), Path::new("<bytes>"))
}

/// Writes a landmark sequence to a CSV string.
///
/// Undetected frames are written as marker rows so that trailing
/// undetected frames survive a round trip.
pub fn to_csv_string(sequence: &LandmarkSequence) -> Result<String, RepformError> {
    let dummy_path = Path::new("<string>");
    let mut csv_writer = csv::Writer::from_writer(Vec::new());

    for (frame, landmarks) in sequence.frames.iter().enumerate() {
        let rows: Vec<LandmarkRow> = match landmarks {
            FrameLandmarks::Detected(points) if !points.is_empty() => points
                .iter()
                .map(|(joint, point)| LandmarkRow {
                    frame,
                    joint: joint.as_str().to_string(),
                    x: Some(point.x),
                    y: Some(point.y),
                    confidence: point.confidence,
                })
                .collect(),
            _ => vec![LandmarkRow {
                frame,
                joint: String::new(),
                x: None,
                y: None,
                confidence: None,
            }],
        };

        for row in rows {
            csv_writer
                .serialize(&row)
                .map_err(|source| RepformError::LandmarksCsvWrite {
                    path: dummy_path.to_path_buf(),
                    source,
                })?;
        }
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| RepformError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| RepformError::LandmarksCsvInvalid {
        path: dummy_path.to_path_buf(),
        message: format!("Invalid UTF-8 in output: {}", e),
    })
}

/// Groups rows into frames.
fn rows_to_sequence<R: std::io::Read>(
    mut csv_reader: csv::Reader<R>,
    path: &Path,
) -> Result<LandmarkSequence, RepformError> {
    let invalid = |message: String| RepformError::LandmarksCsvInvalid {
        path: path.to_path_buf(),
        message,
    };

    // frame index -> landmarks (None for an explicit "no detection" row)
    let mut frames: BTreeMap<usize, Option<BTreeMap<Joint, LandmarkPoint>>> = BTreeMap::new();
    let mut last_frame: Option<usize> = None;

    for (row_idx, result) in csv_reader.deserialize().enumerate() {
        let row: LandmarkRow = result.map_err(|source| RepformError::LandmarksCsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let line = row_idx + 2; // header is line 1

        if row.frame > MAX_FRAME_INDEX {
            return Err(invalid(format!(
                "line {}: frame index {} exceeds the supported maximum {}",
                line, row.frame, MAX_FRAME_INDEX
            )));
        }

        if let Some(prev) = last_frame {
            if row.frame < prev {
                return Err(invalid(format!(
                    "line {}: frame {} appears after frame {}",
                    line, row.frame, prev
                )));
            }
        }
        last_frame = Some(row.frame);

        let joint_name = row.joint.trim();
        if joint_name.is_empty() {
            match frames.get(&row.frame) {
                Some(Some(_)) => {
                    return Err(invalid(format!(
                        "line {}: frame {} is marked undetected but has landmarks",
                        line, row.frame
                    )));
                }
                _ => {
                    frames.insert(row.frame, None);
                }
            }
            continue;
        }

        let joint: Joint = joint_name
            .parse()
            .map_err(|e: String| invalid(format!("line {}: {}", line, e)))?;
        let (x, y) = match (row.x, row.y) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                return Err(invalid(format!(
                    "line {}: joint '{}' is missing coordinates",
                    line, joint
                )));
            }
        };

        let entry = frames.entry(row.frame).or_insert_with(|| Some(BTreeMap::new()));
        let Some(points) = entry else {
            return Err(invalid(format!(
                "line {}: frame {} is marked undetected but has landmarks",
                line, row.frame
            )));
        };
        if points.contains_key(&joint) {
            return Err(invalid(format!(
                "line {}: joint '{}' repeated in frame {}",
                line, joint, row.frame
            )));
        }
        points.insert(
            joint,
            LandmarkPoint {
                x,
                y,
                confidence: row.confidence,
            },
        );
    }

    let frame_count = last_frame.map_or(0, |f| f + 1);
    let sequence = (0..frame_count)
        .map(|idx| FrameLandmarks::from(frames.remove(&idx).flatten()))
        .collect();

    Ok(LandmarkSequence::new(sequence))
}
