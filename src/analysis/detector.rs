//! Repetition detection.
//!
//! Dynamic exercises run a two-phase hysteresis machine over the primary
//! angle:
//!
//! ```text
//!            angle < down
//!   Resting ─────────────▶ Descending
//!      ▲                      │  │
//!      │   angle > up (rep!)  │  │ stalled (no rep)
//!      └──────────────────────┘◀─┘
//! ```
//!
//! A descent is treated as stalled when, on a stall-check frame, the angle
//! moved less than [`STALL_DELTA_DEG`] since the previous valid frame. Stall
//! checks fall on every [`STALL_CHECK_INTERVAL`]th valid frame.
//!
//! Static holds (plank) have no phases; every `sample_interval`th valid
//! frame is assessed on its own.
//!
//! Detector state lives in a [`RepState`] owned by a single pass; nothing is
//! shared between sessions.

use tracing::{debug, warn};

/// Angle change (degrees) below which a descent counts as stalled.
pub const STALL_DELTA_DEG: f64 = 5.0;

/// Stall checks run on every Nth valid frame.
pub const STALL_CHECK_INTERVAL: usize = 10;

/// Movement phase of a dynamic exercise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Resting,
    Descending,
}

/// The deepest point seen since the previous completed repetition.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bottom {
    frame_index: usize,
    angle: f64,
}

/// Mutable per-session detector state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepState {
    pub phase: Phase,
    /// Primary angle of the previous valid frame.
    pub last_angle: Option<f64>,
    /// Valid frames seen since the last stall-check frame (0 means the
    /// current frame is a check frame).
    pub frames_since_stall_check: usize,
    /// Repetitions completed so far.
    pub rep_count: usize,
    /// Frame index of the most recent valid frame.
    pub last_valid_frame: Option<usize>,
    bottom: Option<Bottom>,
}

/// What a valid frame did to the machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RepEvent {
    /// Resting → Descending.
    DescentStarted,
    /// Descending → Resting with a completed repetition, to be scored on
    /// `scored_frame`.
    Completed { rep_index: usize, scored_frame: usize },
    /// Descending → Resting without a repetition.
    StallReset,
}

/// Hysteresis detector for one dynamic exercise.
#[derive(Clone, Debug)]
pub struct RepDetector {
    down_deg: f64,
    up_deg: f64,
    state: RepState,
}

impl RepDetector {
    pub fn new(down_deg: f64, up_deg: f64) -> Self {
        Self {
            down_deg,
            up_deg,
            state: RepState::default(),
        }
    }

    pub fn state(&self) -> &RepState {
        &self.state
    }

    /// Feeds the primary angle of a valid frame.
    ///
    /// Frames whose angle could not be measured must not be fed at all; they
    /// neither advance the stall cadence nor alter the phase.
    pub fn observe(&mut self, frame_index: usize, angle: f64) -> Option<RepEvent> {
        let state = &mut self.state;

        let stall_check_due = state.frames_since_stall_check == 0;
        state.frames_since_stall_check =
            (state.frames_since_stall_check + 1) % STALL_CHECK_INTERVAL;

        if state.bottom.map_or(true, |b| angle < b.angle) {
            state.bottom = Some(Bottom { frame_index, angle });
        }

        let event = match state.phase {
            Phase::Resting if angle < self.down_deg => {
                state.phase = Phase::Descending;
                debug!(frame = frame_index, angle, "descent started");
                Some(RepEvent::DescentStarted)
            }
            Phase::Resting => None,
            Phase::Descending if angle > self.up_deg => {
                state.phase = Phase::Resting;
                state.rep_count += 1;
                let scored_frame = state
                    .bottom
                    .take()
                    .map_or(frame_index, |b| b.frame_index);
                debug!(
                    frame = frame_index,
                    angle,
                    rep = state.rep_count,
                    scored_frame,
                    "repetition completed"
                );
                Some(RepEvent::Completed {
                    rep_index: state.rep_count,
                    scored_frame,
                })
            }
            Phase::Descending => {
                let stalled = stall_check_due
                    && state
                        .last_angle
                        .is_some_and(|prev| (angle - prev).abs() < STALL_DELTA_DEG);
                if stalled {
                    state.phase = Phase::Resting;
                    debug!(frame = frame_index, angle, "descent stalled, resetting");
                    Some(RepEvent::StallReset)
                } else {
                    None
                }
            }
        };

        state.last_angle = Some(angle);
        state.last_valid_frame = Some(frame_index);
        event
    }

    /// Ends the pass.
    ///
    /// A repetition still in progress is completed and scored on the last
    /// valid frame.
    pub fn finish(mut self) -> Option<RepEvent> {
        let state = &mut self.state;
        match (state.phase, state.last_valid_frame) {
            (Phase::Descending, Some(scored_frame)) => {
                state.rep_count += 1;
                warn!(
                    rep = state.rep_count,
                    scored_frame, "sequence ended mid-repetition, counting partial rep"
                );
                Some(RepEvent::Completed {
                    rep_index: state.rep_count,
                    scored_frame,
                })
            }
            _ => None,
        }
    }
}

/// Fixed-interval sampler for static holds.
#[derive(Clone, Debug)]
pub struct HoldSampler {
    sample_interval: usize,
    valid_frames: usize,
    samples: usize,
}

impl HoldSampler {
    pub fn new(sample_interval: usize) -> Self {
        Self {
            sample_interval: sample_interval.max(1),
            valid_frames: 0,
            samples: 0,
        }
    }

    /// Feeds a valid frame; returns the interval number (1-based) when this
    /// frame should be assessed.
    pub fn observe(&mut self, frame_index: usize) -> Option<usize> {
        let due = self.valid_frames % self.sample_interval == 0;
        self.valid_frames += 1;
        if due {
            self.samples += 1;
            debug!(frame = frame_index, interval = self.samples, "hold interval sampled");
            Some(self.samples)
        } else {
            None
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(angles: &[Option<f64>]) -> (Vec<(usize, RepEvent)>, Option<RepEvent>) {
        let mut detector = RepDetector::new(90.0, 160.0);
        let mut events = Vec::new();
        for (idx, angle) in angles.iter().enumerate() {
            if let Some(angle) = angle {
                if let Some(event) = detector.observe(idx, *angle) {
                    events.push((idx, event));
                }
            }
        }
        (events, detector.finish())
    }

    fn completions(events: &[(usize, RepEvent)]) -> Vec<RepEvent> {
        events
            .iter()
            .filter(|(_, e)| matches!(e, RepEvent::Completed { .. }))
            .map(|(_, e)| *e)
            .collect()
    }

    /// 170 → 70 over frames 0..=9, then 80 → 170 over frames 10..=19.
    fn one_rep() -> Vec<Option<f64>> {
        let mut angles: Vec<Option<f64>> =
            (0..10).map(|i| Some(170.0 - i as f64 * 100.0 / 9.0)).collect();
        angles.extend((10..20).map(|i| Some(80.0 + (i - 10) as f64 * 10.0)));
        angles
    }

    #[test]
    fn test_constant_angle_never_counts() {
        let (events, flushed) = run(&vec![Some(150.0); 40]);
        assert!(events.is_empty());
        assert!(flushed.is_none());
    }

    #[test]
    fn test_single_rep_scored_at_bottom() {
        let (events, flushed) = run(&one_rep());
        assert_eq!(
            completions(&events),
            vec![RepEvent::Completed {
                rep_index: 1,
                scored_frame: 9
            }]
        );
        assert!(flushed.is_none());
        assert_eq!(events[0], (8, RepEvent::DescentStarted));
    }

    #[test]
    fn test_trailing_descent_is_flushed_from_last_valid_frame() {
        let mut angles = one_rep();
        angles.truncate(10); // ends at 70° in Descending
        angles.push(None); // undetected trailing frame
        let (events, flushed) = run(&angles);
        assert!(completions(&events).is_empty());
        assert_eq!(
            flushed,
            Some(RepEvent::Completed {
                rep_index: 1,
                scored_frame: 9
            })
        );
    }

    #[test]
    fn test_missing_frame_does_not_change_outcome() {
        let mut angles = one_rep();
        angles[5] = None;
        let (events, _) = run(&angles);
        assert_eq!(
            completions(&events),
            vec![RepEvent::Completed {
                rep_index: 1,
                scored_frame: 9
            }]
        );
    }

    #[test]
    fn test_stall_resets_without_counting() {
        // Descend to 70 by frame 5 and hold there through frame 10
        let mut angles: Vec<Option<f64>> = vec![
            Some(170.0),
            Some(150.0),
            Some(130.0),
            Some(110.0),
            Some(85.0),
            Some(70.0),
        ];
        angles.extend(std::iter::repeat(Some(70.0)).take(5));
        let (events, flushed) = run(&angles);
        assert_eq!(events.last(), Some(&(10, RepEvent::StallReset)));
        assert!(completions(&events).is_empty());
        assert!(flushed.is_none());
    }

    #[test]
    fn test_stall_cadence_counts_valid_frames_only() {
        // With frame 3 missing, the 10th valid frame is frame 11
        let mut angles: Vec<Option<f64>> = vec![Some(120.0), Some(85.0), Some(84.0), None];
        angles.extend(std::iter::repeat(Some(84.0)).take(8));
        let (events, _) = run(&angles);
        assert_eq!(events.last(), Some(&(11, RepEvent::StallReset)));
    }

    #[test]
    fn test_two_reps_have_consecutive_indices() {
        let mut angles = one_rep();
        angles.extend(one_rep());
        let (events, _) = run(&angles);
        assert_eq!(
            completions(&events),
            vec![
                RepEvent::Completed {
                    rep_index: 1,
                    scored_frame: 9
                },
                RepEvent::Completed {
                    rep_index: 2,
                    scored_frame: 29
                },
            ]
        );
    }

    #[test]
    fn test_state_tracks_phase_and_last_frame() {
        let mut detector = RepDetector::new(90.0, 160.0);
        detector.observe(0, 170.0);
        assert_eq!(detector.state().phase, Phase::Resting);
        detector.observe(2, 85.0);
        assert_eq!(detector.state().phase, Phase::Descending);
        assert_eq!(detector.state().last_angle, Some(85.0));
        assert_eq!(detector.state().last_valid_frame, Some(2));
        detector.observe(3, 165.0);
        assert_eq!(detector.state().phase, Phase::Resting);
        assert_eq!(detector.state().rep_count, 1);
    }

    #[test]
    fn test_hold_sampler_every_thirtieth_valid_frame() {
        let mut sampler = HoldSampler::new(30);
        let sampled: Vec<usize> = (0..90).filter(|i| sampler.observe(*i).is_some()).collect();
        assert_eq!(sampled, vec![0, 30, 60]);
        assert_eq!(sampler.samples(), 3);
    }
}
