//! Exercise types and their movement patterns.
//!
//! [`ExerciseType`] is the closed set of supported exercises. Names are
//! parsed up front, so an unknown exercise is rejected before any frame is
//! looked at.

mod pattern;

pub use pattern::{
    pattern, AngleSpec, ExercisePattern, Motion, ARM_ANGLE, BACK_ANGLE, BODY_ANGLE, HIP_ANGLE,
    KNEE_ANGLE,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RepformError;

/// A supported exercise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    #[default]
    Squat,
    Deadlift,
    Pushup,
    Lunge,
    Plank,
}

impl ExerciseType {
    /// Every supported exercise, in registry order.
    pub const ALL: [ExerciseType; 5] = [
        ExerciseType::Squat,
        ExerciseType::Deadlift,
        ExerciseType::Pushup,
        ExerciseType::Lunge,
        ExerciseType::Plank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Squat => "squat",
            ExerciseType::Deadlift => "deadlift",
            ExerciseType::Pushup => "pushup",
            ExerciseType::Lunge => "lunge",
            ExerciseType::Plank => "plank",
        }
    }

    /// The movement pattern registered for this exercise.
    pub fn pattern(&self) -> &'static ExercisePattern {
        pattern(*self)
    }

    /// Returns true for exercises counted by the repetition state machine.
    pub fn is_dynamic(&self) -> bool {
        matches!(self.pattern().motion, Motion::Dynamic { .. })
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = RepformError;

    /// Parses an exercise name, case-insensitively.
    ///
    /// A few common spellings are accepted (`push-up`, `push_up`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "squat" => Ok(ExerciseType::Squat),
            "deadlift" => Ok(ExerciseType::Deadlift),
            "pushup" | "push-up" | "push_up" => Ok(ExerciseType::Pushup),
            "lunge" => Ok(ExerciseType::Lunge),
            "plank" => Ok(ExerciseType::Plank),
            _ => Err(RepformError::UnknownExercise(format!(
                "'{}' (supported: squat, deadlift, pushup, lunge, plank)",
                s
            ))),
        }
    }
}
