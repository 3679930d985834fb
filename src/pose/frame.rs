//! Per-frame landmark sets and the ordered frame sequence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::joint::{BodySide, Joint, JointKind};
use super::point::LandmarkPoint;

/// The landmarks detected in one decoded video frame.
///
/// Serialized as a JSON object keyed by joint name, or `null` when the
/// pose estimator found nobody in the frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Option<BTreeMap<Joint, LandmarkPoint>>",
    into = "Option<BTreeMap<Joint, LandmarkPoint>>"
)]
pub enum FrameLandmarks {
    /// Landmarks keyed by joint. Joints the estimator did not report are
    /// simply absent from the map.
    Detected(BTreeMap<Joint, LandmarkPoint>),
    /// No pose was detected in this frame.
    #[default]
    NotDetected,
}

impl FrameLandmarks {
    /// Creates a detected frame from `(joint, point)` pairs.
    pub fn detected(points: impl IntoIterator<Item = (Joint, LandmarkPoint)>) -> Self {
        FrameLandmarks::Detected(points.into_iter().collect())
    }

    /// Returns true if the frame carries a detection.
    pub fn is_detected(&self) -> bool {
        matches!(self, FrameLandmarks::Detected(_))
    }

    /// Looks up a landmark by exact joint name.
    pub fn get(&self, joint: Joint) -> Option<&LandmarkPoint> {
        match self {
            FrameLandmarks::Detected(points) => points.get(&joint),
            FrameLandmarks::NotDetected => None,
        }
    }

    /// Number of landmarks present (0 for an undetected frame).
    pub fn len(&self) -> usize {
        match self {
            FrameLandmarks::Detected(points) => points.len(),
            FrameLandmarks::NotDetected => 0,
        }
    }

    /// Returns true if no landmarks are present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a side-resolved view of this frame, or `None` when the frame
    /// has no detection.
    pub fn view(&self, side: BodySide, min_confidence: Option<f64>) -> Option<BodyView<'_>> {
        match self {
            FrameLandmarks::Detected(points) => Some(BodyView {
                points,
                side,
                min_confidence,
            }),
            FrameLandmarks::NotDetected => None,
        }
    }
}

impl From<Option<BTreeMap<Joint, LandmarkPoint>>> for FrameLandmarks {
    fn from(value: Option<BTreeMap<Joint, LandmarkPoint>>) -> Self {
        match value {
            Some(points) => FrameLandmarks::Detected(points),
            None => FrameLandmarks::NotDetected,
        }
    }
}

impl From<FrameLandmarks> for Option<BTreeMap<Joint, LandmarkPoint>> {
    fn from(value: FrameLandmarks) -> Self {
        match value {
            FrameLandmarks::Detected(points) => Some(points),
            FrameLandmarks::NotDetected => None,
        }
    }
}

/// Read access to one side of the body in a detected frame.
///
/// Landmarks below the confidence floor (when one is set) and landmarks with
/// non-finite coordinates are reported as absent.
#[derive(Clone, Copy, Debug)]
pub struct BodyView<'a> {
    points: &'a BTreeMap<Joint, LandmarkPoint>,
    side: BodySide,
    min_confidence: Option<f64>,
}

impl BodyView<'_> {
    /// The landmark for `kind` on the selected side, if usable.
    pub fn point(&self, kind: JointKind) -> Option<LandmarkPoint> {
        let point = self.points.get(&self.side.joint(kind))?;
        if !point.is_finite() {
            return None;
        }
        match self.min_confidence {
            Some(threshold) if !point.meets_confidence(threshold) => None,
            _ => Some(*point),
        }
    }

    /// Returns true if every joint in `kinds` is usable.
    pub fn has_all(&self, kinds: &[JointKind]) -> bool {
        kinds.iter().all(|k| self.point(*k).is_some())
    }
}

/// The full, ordered landmark sequence for one recorded video.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSequence {
    /// One entry per decoded frame, in frame order.
    pub frames: Vec<FrameLandmarks>,
}

impl LandmarkSequence {
    pub fn new(frames: Vec<FrameLandmarks>) -> Self {
        Self { frames }
    }

    /// Total number of frames, detected or not.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames carrying a detection.
    pub fn detected_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_detected()).count()
    }
}
