//! Static per-exercise movement patterns.

use std::fmt;

use super::ExerciseType;
use crate::pose::{joint_angle, BodyView, JointKind};

/// A named joint angle: the angle at `vertex` between `from` and `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleSpec {
    /// Metric name used in reports (`hip_angle`, `knee_angle`, ...).
    pub name: &'static str,
    pub from: JointKind,
    pub vertex: JointKind,
    pub to: JointKind,
}

impl AngleSpec {
    pub const fn new(
        name: &'static str,
        from: JointKind,
        vertex: JointKind,
        to: JointKind,
    ) -> Self {
        Self {
            name,
            from,
            vertex,
            to,
        }
    }

    /// Measures this angle in `view`, or `None` if it is undefined there.
    pub fn measure(&self, view: &BodyView<'_>) -> Option<f64> {
        joint_angle(
            view.point(self.from),
            view.point(self.vertex),
            view.point(self.to),
        )
    }
}

impl fmt::Display for AngleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.from, self.vertex, self.to)
    }
}

/// Shoulder-hip-knee.
pub const HIP_ANGLE: AngleSpec =
    AngleSpec::new("hip_angle", JointKind::Shoulder, JointKind::Hip, JointKind::Knee);
/// Hip-knee-ankle.
pub const KNEE_ANGLE: AngleSpec =
    AngleSpec::new("knee_angle", JointKind::Hip, JointKind::Knee, JointKind::Ankle);
/// Shoulder-elbow-wrist.
pub const ARM_ANGLE: AngleSpec =
    AngleSpec::new("arm_angle", JointKind::Shoulder, JointKind::Elbow, JointKind::Wrist);
/// Shoulder-hip-ankle, read as torso lean.
pub const BACK_ANGLE: AngleSpec =
    AngleSpec::new("back_angle", JointKind::Shoulder, JointKind::Hip, JointKind::Ankle);
/// Shoulder-hip-ankle, read as body line straightness.
pub const BODY_ANGLE: AngleSpec =
    AngleSpec::new("body_angle", JointKind::Shoulder, JointKind::Hip, JointKind::Ankle);

/// How repetitions of an exercise are delimited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Hysteresis on a primary angle: a rep starts below `down_deg` and
    /// completes above `up_deg`.
    Dynamic {
        primary: AngleSpec,
        down_deg: f64,
        up_deg: f64,
    },
    /// A held position, assessed once every `sample_interval` valid frames.
    StaticHold {
        sample_interval: usize,
        tolerance_deg: f64,
    },
}

/// Read-only configuration for one exercise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExercisePattern {
    pub exercise: ExerciseType,
    /// Every joint the form rules read. A frame lacking any of them cannot
    /// be scored.
    pub joints: &'static [JointKind],
    pub motion: Motion,
}

impl ExercisePattern {
    /// The primary angle for dynamic exercises.
    pub fn primary_angle(&self) -> Option<&AngleSpec> {
        match &self.motion {
            Motion::Dynamic { primary, .. } => Some(primary),
            Motion::StaticHold { .. } => None,
        }
    }

    /// Allowed deviation from a straight body line, for static holds.
    pub fn hold_tolerance(&self) -> Option<f64> {
        match self.motion {
            Motion::StaticHold { tolerance_deg, .. } => Some(tolerance_deg),
            Motion::Dynamic { .. } => None,
        }
    }
}

impl fmt::Display for ExercisePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.motion {
            Motion::Dynamic {
                primary,
                down_deg,
                up_deg,
            } => write!(
                f,
                "{:<10} primary {} ({}), down < {}°, up > {}°",
                self.exercise.as_str(),
                primary.name,
                primary,
                down_deg,
                up_deg
            ),
            Motion::StaticHold {
                sample_interval,
                tolerance_deg,
            } => write!(
                f,
                "{:<10} static hold, sampled every {} frames, body line ±{}°",
                self.exercise.as_str(),
                sample_interval,
                tolerance_deg
            ),
        }
    }
}

const SQUAT: ExercisePattern = ExercisePattern {
    exercise: ExerciseType::Squat,
    joints: &[
        JointKind::Shoulder,
        JointKind::Hip,
        JointKind::Knee,
        JointKind::Ankle,
    ],
    motion: Motion::Dynamic {
        primary: HIP_ANGLE,
        down_deg: 90.0,
        up_deg: 160.0,
    },
};

const DEADLIFT: ExercisePattern = ExercisePattern {
    exercise: ExerciseType::Deadlift,
    joints: &[
        JointKind::Shoulder,
        JointKind::Hip,
        JointKind::Knee,
        JointKind::Ankle,
    ],
    motion: Motion::Dynamic {
        primary: HIP_ANGLE,
        down_deg: 45.0,
        up_deg: 160.0,
    },
};

const PUSHUP: ExercisePattern = ExercisePattern {
    exercise: ExerciseType::Pushup,
    joints: &[
        JointKind::Shoulder,
        JointKind::Elbow,
        JointKind::Wrist,
        JointKind::Hip,
        JointKind::Ankle,
    ],
    motion: Motion::Dynamic {
        primary: ARM_ANGLE,
        down_deg: 90.0,
        up_deg: 160.0,
    },
};

const LUNGE: ExercisePattern = ExercisePattern {
    exercise: ExerciseType::Lunge,
    joints: &[JointKind::Hip, JointKind::Knee, JointKind::Ankle],
    motion: Motion::Dynamic {
        primary: KNEE_ANGLE,
        down_deg: 80.0,
        up_deg: 160.0,
    },
};

const PLANK: ExercisePattern = ExercisePattern {
    exercise: ExerciseType::Plank,
    joints: &[JointKind::Shoulder, JointKind::Hip, JointKind::Ankle],
    motion: Motion::StaticHold {
        sample_interval: 30,
        tolerance_deg: 10.0,
    },
};

/// Looks up the registered pattern for `exercise`.
pub fn pattern(exercise: ExerciseType) -> &'static ExercisePattern {
    match exercise {
        ExerciseType::Squat => &SQUAT,
        ExerciseType::Deadlift => &DEADLIFT,
        ExerciseType::Pushup => &PUSHUP,
        ExerciseType::Lunge => &LUNGE,
        ExerciseType::Plank => &PLANK,
    }
}
