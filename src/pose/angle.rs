//! Joint angle geometry.
//!
//! Computes the angle at a vertex joint from the dot product of the two
//! limb vectors leaving it:
//!
//! ```text
//! cos(θ) = (ba · bc) / (|ba| × |bc|)
//! ```
//!
//! An undefined angle (missing landmark, zero-length limb, non-finite
//! coordinates) is `None`, never a numeric placeholder, so a genuine 0°
//! reading is distinguishable from "no measurement".

use super::point::LandmarkPoint;

/// Angle in degrees at `b` between rays `b→a` and `b→c`, in `[0, 180]`.
///
/// Returns `None` if either ray has zero length or any coordinate is not
/// finite.
pub fn angle_between(a: &LandmarkPoint, b: &LandmarkPoint, c: &LandmarkPoint) -> Option<f64> {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);

    let mag_ba = ba.0.hypot(ba.1);
    let mag_bc = bc.0.hypot(bc.1);
    if mag_ba == 0.0 || mag_bc == 0.0 {
        return None;
    }

    let cos = (ba.0 * bc.0 + ba.1 * bc.1) / (mag_ba * mag_bc);
    if !cos.is_finite() {
        return None;
    }

    // Rounding can push |cos| a hair past 1.0
    Some(cos.clamp(-1.0, 1.0).acos().to_degrees())
}

/// Like [`angle_between`], but any absent point yields `None`.
pub fn joint_angle(
    a: Option<LandmarkPoint>,
    b: Option<LandmarkPoint>,
    c: Option<LandmarkPoint>,
) -> Option<f64> {
    angle_between(&a?, &b?, &c?)
}

/// How far `angle` is from a straight line (180°).
#[inline]
pub fn deviation_from_straight(angle: f64) -> f64 {
    (180.0 - angle).abs()
}
