//! Repetition counting and form scoring.
//!
//! [`analyze_session`] runs one forward pass over a fully materialized frame
//! sequence:
//!
//! 1. Frames without a usable detection are skipped. For static holds a
//!    frame is usable only if every joint the hold needs passes the side and
//!    confidence filters.
//! 2. Dynamic exercises feed their primary angle to a [`RepDetector`]; each
//!    completed repetition is scored by [`score_frame`].
//! 3. Static holds are sampled at a fixed interval by a [`HoldSampler`].
//! 4. A repetition still in progress when the frames run out is counted and
//!    scored on the last valid frame.
//! 5. [`summarize`] builds the [`SessionResult`].
//!
//! All state is local to the call, so independent sessions can run on
//! separate threads without coordination.

mod detector;
mod report;
mod scoring;
mod session;

pub use detector::{
    HoldSampler, Phase, RepDetector, RepEvent, RepState, STALL_CHECK_INTERVAL, STALL_DELTA_DEG,
};
pub use report::{RepResult, SessionResult};
pub use scoring::{score_frame, DEFAULT_FEEDBACK, DEGENERATE_FEEDBACK, NOT_DETECTED_FEEDBACK};
pub use session::{
    exercise_tip, overall_score, recommendations, score_tier, summarize, tip, NO_REPS_FEEDBACK,
};

use tracing::{debug, info, warn};

use crate::error::RepformError;
use crate::exercise::{ExerciseType, Motion};
use crate::pose::{BodySide, FrameLandmarks, LandmarkSequence};

/// Options for a session analysis.
#[derive(Clone, Debug, Default)]
pub struct AnalyzeOptions {
    /// Body side whose joints feed the angles.
    pub side: BodySide,
    /// If set, landmarks with a confidence below this are treated as absent.
    pub min_confidence: Option<f64>,
}

/// Analyzes a landmark sequence for an exercise given by name.
///
/// # Errors
/// Returns [`RepformError::UnknownExercise`] before looking at any frame if
/// `exercise` is not a supported exercise.
pub fn analyze(
    sequence: &LandmarkSequence,
    exercise: &str,
    opts: &AnalyzeOptions,
) -> Result<SessionResult, RepformError> {
    let exercise: ExerciseType = exercise.parse()?;
    Ok(analyze_session(&sequence.frames, exercise, opts))
}

/// Analyzes an ordered frame sequence for `exercise`.
pub fn analyze_session(
    frames: &[FrameLandmarks],
    exercise: ExerciseType,
    opts: &AnalyzeOptions,
) -> SessionResult {
    let pattern = exercise.pattern();

    let reps = match pattern.motion {
        Motion::Dynamic {
            primary,
            down_deg,
            up_deg,
        } => {
            let mut detector = RepDetector::new(down_deg, up_deg);
            let mut reps = Vec::new();

            for (frame_index, frame) in frames.iter().enumerate() {
                let Some(angle) = frame
                    .view(opts.side, opts.min_confidence)
                    .and_then(|view| primary.measure(&view))
                else {
                    continue;
                };

                if let Some(RepEvent::Completed {
                    rep_index,
                    scored_frame,
                }) = detector.observe(frame_index, angle)
                {
                    reps.push(score_rep(exercise, frames, scored_frame, rep_index, opts));
                }
            }

            let state = detector.state();
            debug!(
                phase = ?state.phase,
                reps = state.rep_count,
                last_valid_frame = ?state.last_valid_frame,
                "frames exhausted"
            );

            if let Some(RepEvent::Completed {
                rep_index,
                scored_frame,
            }) = detector.finish()
            {
                reps.push(score_rep(exercise, frames, scored_frame, rep_index, opts));
            }
            reps
        }
        Motion::StaticHold {
            sample_interval, ..
        } => {
            let mut sampler = HoldSampler::new(sample_interval);
            frames
                .iter()
                .enumerate()
                .filter(|(_, frame)| {
                    frame
                        .view(opts.side, opts.min_confidence)
                        .is_some_and(|view| view.has_all(pattern.joints))
                })
                .filter_map(|(frame_index, frame)| {
                    sampler
                        .observe(frame_index)
                        .map(|rep_index| score_frame(exercise, frame, frame_index, rep_index, opts))
                })
                .collect()
        }
    };

    let detected = frames.iter().filter(|f| f.is_detected()).count();
    if !frames.is_empty() && detected == 0 {
        warn!(frames = frames.len(), "no pose detected in any frame");
    } else if detected < frames.len() {
        warn!(
            skipped = frames.len() - detected,
            frames = frames.len(),
            "frames without a pose detection were skipped"
        );
    }

    let result = summarize(exercise, frames.len(), reps);
    info!(
        exercise = %exercise,
        frames = result.frames_analyzed,
        detected,
        reps = result.reps_detected,
        score = result.overall_score,
        "session analyzed"
    );
    result
}

fn score_rep(
    exercise: ExerciseType,
    frames: &[FrameLandmarks],
    frame_index: usize,
    rep_index: usize,
    opts: &AnalyzeOptions,
) -> RepResult {
    match frames.get(frame_index) {
        Some(frame) => score_frame(exercise, frame, frame_index, rep_index, opts),
        None => RepResult::unscored(rep_index, NOT_DETECTED_FEEDBACK, Some(frame_index)),
    }
}
