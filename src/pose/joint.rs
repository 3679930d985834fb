//! Named body joints and body-side selection.
//!
//! Pose estimators report sided landmarks (`left_knee`, `right_knee`, ...).
//! Exercise rules are written against side-agnostic [`JointKind`]s and
//! resolved to a concrete [`Joint`] through a [`BodySide`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A concrete landmark name as it appears in landmark files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    /// Every joint, in file order.
    pub const ALL: [Joint; 13] = [
        Joint::Nose,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    /// The snake_case name used in landmark files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Joint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Joint::ALL
            .iter()
            .copied()
            .find(|j| j.as_str() == s)
            .ok_or_else(|| format!("unknown joint '{}'", s))
    }
}

/// A side-agnostic joint used by exercise rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JointKind {
    Shoulder,
    Elbow,
    Wrist,
    Hip,
    Knee,
    Ankle,
}

impl JointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JointKind::Shoulder => "shoulder",
            JointKind::Elbow => "elbow",
            JointKind::Wrist => "wrist",
            JointKind::Hip => "hip",
            JointKind::Knee => "knee",
            JointKind::Ankle => "ankle",
        }
    }
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the body the analysis reads joints from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodySide {
    #[default]
    Left,
    Right,
}

impl BodySide {
    /// Resolves a side-agnostic joint to the landmark on this side.
    pub fn joint(self, kind: JointKind) -> Joint {
        match (self, kind) {
            (BodySide::Left, JointKind::Shoulder) => Joint::LeftShoulder,
            (BodySide::Left, JointKind::Elbow) => Joint::LeftElbow,
            (BodySide::Left, JointKind::Wrist) => Joint::LeftWrist,
            (BodySide::Left, JointKind::Hip) => Joint::LeftHip,
            (BodySide::Left, JointKind::Knee) => Joint::LeftKnee,
            (BodySide::Left, JointKind::Ankle) => Joint::LeftAnkle,
            (BodySide::Right, JointKind::Shoulder) => Joint::RightShoulder,
            (BodySide::Right, JointKind::Elbow) => Joint::RightElbow,
            (BodySide::Right, JointKind::Wrist) => Joint::RightWrist,
            (BodySide::Right, JointKind::Hip) => Joint::RightHip,
            (BodySide::Right, JointKind::Knee) => Joint::RightKnee,
            (BodySide::Right, JointKind::Ankle) => Joint::RightAnkle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodySide::Left => "left",
            BodySide::Right => "right",
        }
    }
}

impl fmt::Display for BodySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodySide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(BodySide::Left),
            "right" | "r" => Ok(BodySide::Right),
            other => Err(format!("unknown body side '{}' (expected left or right)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_name_roundtrip() {
        for joint in Joint::ALL {
            assert_eq!(joint.as_str().parse::<Joint>(), Ok(joint));
        }
        assert!("left_toe".parse::<Joint>().is_err());
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        let json = serde_json::to_string(&Joint::RightAnkle).unwrap();
        assert_eq!(json, "\"right_ankle\"");
    }

    #[test]
    fn test_side_resolution() {
        assert_eq!(BodySide::Left.joint(JointKind::Knee), Joint::LeftKnee);
        assert_eq!(BodySide::Right.joint(JointKind::Wrist), Joint::RightWrist);
        assert_eq!(BodySide::default(), BodySide::Left);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("Right".parse::<BodySide>(), Ok(BodySide::Right));
        assert!("middle".parse::<BodySide>().is_err());
    }
}
