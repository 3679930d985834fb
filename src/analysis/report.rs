//! Session result types.
//!
//! [`SessionResult`] is the sole output of an analysis run. It renders as
//! text (Display) for terminals and serializes to the JSON response layout
//! consumed by the upload API.

use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::exercise::ExerciseType;

/// One completed (or synthesized) repetition.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RepResult {
    /// 1-based repetition number.
    #[serde(rename = "rep")]
    pub rep_index: usize,
    /// Ordered, never empty.
    pub feedback: Vec<String>,
    /// Form score in `[0, 100]`.
    pub score: u32,
    /// Angle name to degrees (one decimal). Empty when nothing was measured.
    pub metrics: BTreeMap<String, f64>,
    /// Index (into the full frame sequence) of the frame that was scored.
    #[serde(skip)]
    pub frame_index: Option<usize>,
}

impl RepResult {
    /// A zero-score result carrying a single explanatory message.
    pub fn unscored(
        rep_index: usize,
        message: impl Into<String>,
        frame_index: Option<usize>,
    ) -> Self {
        Self {
            rep_index,
            feedback: vec![message.into()],
            score: 0,
            metrics: BTreeMap::new(),
            frame_index,
        }
    }
}

impl fmt::Display for RepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rep {} (score {})", self.rep_index, self.score)?;
        if let Some(frame) = self.frame_index {
            write!(f, " @ frame {}", frame)?;
        }
        writeln!(f, ":")?;
        for line in &self.feedback {
            writeln!(f, "    - {}", line)?;
        }
        if !self.metrics.is_empty() {
            let metrics: Vec<String> = self
                .metrics
                .iter()
                .map(|(name, deg)| format!("{}={:.1}°", name, deg))
                .collect();
            writeln!(f, "    {}", metrics.join(", "))?;
        }
        Ok(())
    }
}

/// The analysis result for one recorded session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionResult {
    pub exercise: ExerciseType,
    /// Every frame in the input, detected or not.
    pub frames_analyzed: usize,
    /// Repetitions actually produced (0 when only the placeholder entry
    /// is present).
    pub reps_detected: usize,
    /// Mean rep score, one decimal.
    pub overall_score: f64,
    /// Never empty.
    pub reps: Vec<RepResult>,
    pub recommendations: Vec<String>,
}

#[derive(serde::Serialize)]
struct SessionWire<'a> {
    exercise_detected: &'a str,
    frames_analyzed: usize,
    reps_detected: usize,
    overall_score: f64,
    feedback_per_rep: &'a [RepResult],
    summary: SummaryWire<'a>,
}

#[derive(serde::Serialize)]
struct SummaryWire<'a> {
    total_reps: usize,
    average_score: f64,
    exercise_type: &'a str,
    recommendations: &'a [String],
}

impl Serialize for SessionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SessionWire {
            exercise_detected: self.exercise.as_str(),
            frames_analyzed: self.frames_analyzed,
            reps_detected: self.reps_detected,
            overall_score: self.overall_score,
            feedback_per_rep: &self.reps,
            summary: SummaryWire {
                total_reps: self.reps_detected,
                average_score: self.overall_score,
                exercise_type: self.exercise.as_str(),
                recommendations: &self.recommendations,
            },
        }
        .serialize(serializer)
    }
}

impl fmt::Display for SessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Exercise: {}", self.exercise)?;
        writeln!(f, "Frames analyzed: {}", self.frames_analyzed)?;
        writeln!(f, "Reps detected: {}", self.reps_detected)?;
        writeln!(f, "Overall score: {:.1}/100", self.overall_score)?;
        writeln!(f)?;

        for rep in &self.reps {
            write!(f, "  {}", rep)?;
        }

        if !self.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recommendations:")?;
            for rec in &self.recommendations {
                writeln!(f, "  - {}", rec)?;
            }
        }

        Ok(())
    }
}
