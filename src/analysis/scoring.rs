//! Per-exercise form scoring.
//!
//! Each exercise has one rule set applied to a single frame. Scoring starts
//! at 100; rules append feedback and may deduct a fixed penalty. The final
//! score is floored at 0.
//!
//! If any joint the rule set reads is missing from the frame, scoring stops
//! before any angle is computed and the rep scores 0 with a single
//! explanatory message.

use std::collections::BTreeMap;

use super::report::RepResult;
use super::AnalyzeOptions;
use crate::exercise::{ExerciseType, ARM_ANGLE, BACK_ANGLE, BODY_ANGLE, HIP_ANGLE, KNEE_ANGLE};
use crate::pose::{deviation_from_straight, BodyView, FrameLandmarks, JointKind};

/// Feedback for a frame lacking required landmarks.
pub const NOT_DETECTED_FEEDBACK: &str = "form not analyzable — landmarks not detected";
/// Feedback for a frame whose landmarks coincide so an angle is undefined.
pub const DEGENERATE_FEEDBACK: &str = "form not analyzable — degenerate joint geometry";
/// Appended when no rule produced a message.
pub const DEFAULT_FEEDBACK: &str = "good form";

const FULL_SCORE: i32 = 100;

/// Scores one frame as repetition `rep_index`.
///
/// This never fails: frames that cannot be assessed produce a zero-score
/// result with an explanatory message.
pub fn score_frame(
    exercise: ExerciseType,
    frame: &FrameLandmarks,
    frame_index: usize,
    rep_index: usize,
    opts: &AnalyzeOptions,
) -> RepResult {
    let pattern = exercise.pattern();

    let view = match frame.view(opts.side, opts.min_confidence) {
        Some(view) if view.has_all(pattern.joints) => view,
        _ => return RepResult::unscored(rep_index, NOT_DETECTED_FEEDBACK, Some(frame_index)),
    };

    let assessment = match exercise {
        ExerciseType::Squat => assess_squat(&view),
        ExerciseType::Deadlift => assess_deadlift(&view),
        ExerciseType::Pushup => assess_pushup(&view),
        ExerciseType::Lunge => assess_lunge(&view),
        ExerciseType::Plank => pattern
            .hold_tolerance()
            .and_then(|tolerance| assess_plank(&view, tolerance)),
    };

    match assessment {
        Some(assessment) => assessment.finish(rep_index, frame_index),
        None => RepResult::unscored(rep_index, DEGENERATE_FEEDBACK, Some(frame_index)),
    }
}

/// Accumulates feedback, deductions and metrics for one frame.
#[derive(Debug, Default)]
struct Assessment {
    deductions: i32,
    feedback: Vec<String>,
    metrics: BTreeMap<String, f64>,
}

impl Assessment {
    fn note(&mut self, message: &str) {
        self.feedback.push(message.to_string());
    }

    fn penalize(&mut self, message: &str, points: i32) {
        self.feedback.push(message.to_string());
        self.deductions += points;
    }

    fn metric(&mut self, name: &str, degrees: f64) {
        self.metrics
            .insert(name.to_string(), (degrees * 10.0).round() / 10.0);
    }

    fn finish(mut self, rep_index: usize, frame_index: usize) -> RepResult {
        if self.feedback.is_empty() {
            self.note(DEFAULT_FEEDBACK);
        }
        let score = (FULL_SCORE - self.deductions).clamp(0, FULL_SCORE);
        RepResult {
            rep_index,
            feedback: self.feedback,
            score: score as u32,
            metrics: self.metrics,
            frame_index: Some(frame_index),
        }
    }
}

/// Knee ahead of the ankle along x.
fn knee_past_ankle(view: &BodyView<'_>) -> Option<bool> {
    let knee = view.point(JointKind::Knee)?;
    let ankle = view.point(JointKind::Ankle)?;
    Some(knee.x > ankle.x)
}

fn assess_squat(view: &BodyView<'_>) -> Option<Assessment> {
    let hip = HIP_ANGLE.measure(view)?;
    let back = BACK_ANGLE.measure(view)?;
    let knee_forward = knee_past_ankle(view)?;
    Some(squat_rules(hip, back, knee_forward))
}

fn squat_rules(hip: f64, back: f64, knee_forward: bool) -> Assessment {
    let mut a = Assessment::default();
    a.metric(HIP_ANGLE.name, hip);
    a.metric(BACK_ANGLE.name, back);

    if hip < 80.0 {
        a.note("excellent depth");
    } else if hip < 90.0 {
        a.note("good depth, go lower");
    } else {
        a.penalize("go deeper", 20);
    }

    if knee_forward {
        a.penalize("knees past toes, sit back into your hips", 15);
    }

    if back < 45.0 {
        a.penalize("keep your chest up, torso is leaning too far forward", 25);
    }

    a
}

fn assess_deadlift(view: &BodyView<'_>) -> Option<Assessment> {
    let hip = HIP_ANGLE.measure(view)?;
    let back = BACK_ANGLE.measure(view)?;

    let mut a = Assessment::default();
    a.metric(HIP_ANGLE.name, hip);
    a.metric(BACK_ANGLE.name, back);

    if hip < 60.0 {
        a.note("good hip hinge");
    } else {
        a.penalize("focus on hip hinge", 20);
    }

    if back < 30.0 {
        a.penalize("keep your back straight, avoid rounding", 25);
    }

    Some(a)
}

fn assess_pushup(view: &BodyView<'_>) -> Option<Assessment> {
    let arm = ARM_ANGLE.measure(view)?;
    let body = BODY_ANGLE.measure(view)?;
    Some(pushup_rules(arm, body))
}

/// An arm angle inside 80..=100 is neither praised nor penalized.
fn pushup_rules(arm: f64, body: f64) -> Assessment {
    let mut a = Assessment::default();
    a.metric(ARM_ANGLE.name, arm);
    a.metric(BODY_ANGLE.name, body);

    if arm < 80.0 {
        a.penalize("go lower", 20);
    } else if arm > 100.0 {
        a.note("good range of motion");
    }

    if deviation_from_straight(body) > 15.0 {
        a.penalize("keep your body in a straight line", 25);
    }

    a
}

fn assess_lunge(view: &BodyView<'_>) -> Option<Assessment> {
    let knee = KNEE_ANGLE.measure(view)?;
    let knee_forward = knee_past_ankle(view)?;
    Some(lunge_rules(knee, knee_forward))
}

fn lunge_rules(knee: f64, knee_forward: bool) -> Assessment {
    let mut a = Assessment::default();
    a.metric(KNEE_ANGLE.name, knee);

    if knee_forward {
        a.penalize("front knee past toes, keep it over your ankle", 20);
    } else {
        a.note("good knee alignment");
    }

    if knee < 80.0 {
        a.note("excellent lunge depth");
    } else if knee < 90.0 {
        a.note("good lunge depth");
    } else {
        a.penalize("go deeper", 15);
    }

    a
}

fn assess_plank(view: &BodyView<'_>, tolerance_deg: f64) -> Option<Assessment> {
    let body = BODY_ANGLE.measure(view)?;
    let hip = view.point(JointKind::Hip)?;
    let shoulder = view.point(JointKind::Shoulder)?;

    let mut a = Assessment::default();
    a.metric(BODY_ANGLE.name, body);

    if deviation_from_straight(body) > tolerance_deg {
        a.penalize("keep your body in a straight line", 30);
    } else {
        a.note("great body alignment");
    }

    if hip.y > shoulder.y {
        a.penalize("hips sagging, engage your core", 20);
    }

    Some(a)
}
