//! Pose landmark model.
//!
//! This module defines what the pose-estimation collaborator hands to the
//! analysis core: an ordered [`LandmarkSequence`] of per-frame
//! [`FrameLandmarks`], each either a map of named [`Joint`]s to
//! [`LandmarkPoint`]s or an explicit "no detection" marker.
//!
//! It also holds the joint-angle geometry everything else is built on, and
//! the readers for the two landmark file layouts (`io_json`, `io_csv`).
//!
//! # Example
//!
//! ```
//! use repform::pose::{joint_angle, BodySide, FrameLandmarks, Joint, JointKind, LandmarkPoint};
//!
//! let frame = FrameLandmarks::detected([
//!     (Joint::LeftShoulder, LandmarkPoint::new(0.5, 0.2)),
//!     (Joint::LeftHip, LandmarkPoint::new(0.5, 0.5)),
//!     (Joint::LeftKnee, LandmarkPoint::new(0.8, 0.5)),
//! ]);
//! let view = frame.view(BodySide::Left, None).unwrap();
//! let hip = joint_angle(
//!     view.point(JointKind::Shoulder),
//!     view.point(JointKind::Hip),
//!     view.point(JointKind::Knee),
//! );
//! assert!((hip.unwrap() - 90.0).abs() < 1e-9);
//! ```

mod angle;
mod frame;
pub mod io_csv;
pub mod io_json;
mod joint;
mod point;

pub use angle::{angle_between, deviation_from_straight, joint_angle};
pub use frame::{BodyView, FrameLandmarks, LandmarkSequence};
pub use joint::{BodySide, Joint, JointKind};
pub use point::LandmarkPoint;
