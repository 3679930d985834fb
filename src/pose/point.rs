//! Single landmark coordinates reported by the pose estimator.

use serde::{Deserialize, Serialize};

/// A 2D landmark in normalized frame space (0.0 to 1.0 on both axes).
///
/// `y` grows downward, matching image coordinates. The optional
/// `confidence` is the estimator's visibility/presence score when it
/// reports one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl LandmarkPoint {
    /// Creates a landmark without a confidence score.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            confidence: None,
        }
    }

    /// Creates a landmark carrying a confidence score.
    #[inline]
    pub fn with_confidence(x: f64, y: f64, confidence: f64) -> Self {
        Self {
            x,
            y,
            confidence: Some(confidence),
        }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if the landmark clears `threshold`.
    ///
    /// Landmarks without a confidence score always pass.
    #[inline]
    pub fn meets_confidence(&self, threshold: f64) -> bool {
        self.confidence.map_or(true, |c| c >= threshold)
    }
}
