//! Session aggregation: overall score and recommendations.

use super::report::{RepResult, SessionResult};
use crate::exercise::ExerciseType;

/// Feedback on the placeholder entry of a session without repetitions.
pub const NO_REPS_FEEDBACK: &str =
    "no reps detected, make sure your full body is visible and check your form";

/// Combines per-rep results into the session result.
///
/// When `reps` is empty, a single zero-score placeholder entry is added so
/// the per-rep list is never empty; `reps_detected` stays 0.
pub fn summarize(
    exercise: ExerciseType,
    frames_analyzed: usize,
    mut reps: Vec<RepResult>,
) -> SessionResult {
    let reps_detected = reps.len();
    if reps.is_empty() {
        reps.push(RepResult::unscored(1, NO_REPS_FEEDBACK, None));
    }

    let overall_score = overall_score(&reps);
    let recommendations = vec![
        score_tier(overall_score).to_string(),
        tip(exercise).to_string(),
    ];

    SessionResult {
        exercise,
        frames_analyzed,
        reps_detected,
        overall_score,
        reps,
        recommendations,
    }
}

/// Mean rep score rounded to one decimal; 0.0 for no reps.
pub fn overall_score(reps: &[RepResult]) -> f64 {
    if reps.is_empty() {
        return 0.0;
    }
    let total: u64 = reps.iter().map(|r| u64::from(r.score)).sum();
    let mean = total as f64 / reps.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// One tiered message for the score, then the exercise tip when the
/// exercise name is recognised.
pub fn recommendations(overall_score: f64, exercise: &str) -> Vec<String> {
    let mut out = vec![score_tier(overall_score).to_string()];
    if let Some(message) = exercise_tip(exercise) {
        out.push(message.to_string());
    }
    out
}

/// The recommendation message for an overall score.
pub fn score_tier(overall_score: f64) -> &'static str {
    if overall_score >= 90.0 {
        "Excellent form! Keep up the great work."
    } else if overall_score >= 70.0 {
        "Good form overall. Focus on the feedback points to keep improving."
    } else if overall_score >= 50.0 {
        "Your form needs work. Consider lowering the weight and focusing on technique."
    } else {
        "Significant form issues detected. Consider working with a trainer."
    }
}

/// The fixed coaching tip for an exercise given by name.
pub fn exercise_tip(exercise: &str) -> Option<&'static str> {
    exercise.parse::<ExerciseType>().ok().map(tip)
}

/// The fixed coaching tip for an exercise.
pub fn tip(exercise: ExerciseType) -> &'static str {
    match exercise {
        ExerciseType::Squat => {
            "Squat: keep your weight on your heels and your knees tracking over your toes."
        }
        ExerciseType::Deadlift => {
            "Deadlift: keep the bar close to your body and drive the movement from your hips."
        }
        ExerciseType::Pushup => {
            "Push-up: keep your core tight and your body in one line from head to heels."
        }
        ExerciseType::Lunge => {
            "Lunge: keep your front knee over your ankle and your torso upright."
        }
        ExerciseType::Plank => {
            "Plank: squeeze your glutes and keep your hips level with your shoulders."
        }
    }
}
