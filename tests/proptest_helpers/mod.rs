#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use repform::pose::{FrameLandmarks, Joint, LandmarkPoint, LandmarkSequence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Normalized image coordinates plus an optional confidence.
pub fn arb_point() -> impl Strategy<Value = LandmarkPoint> {
    (
        0.0f64..=1.0,
        0.0f64..=1.0,
        prop::option::of(0.0f64..=1.0),
    )
        .prop_map(|(x, y, confidence)| LandmarkPoint { x, y, confidence })
}

/// A detected frame with a random subset of joints, or an undetected one.
pub fn arb_frame() -> BoxedStrategy<FrameLandmarks> {
    let detected = prop::collection::btree_map(
        prop::sample::select(Joint::ALL.to_vec()),
        arb_point(),
        0..Joint::ALL.len(),
    )
    .prop_map(FrameLandmarks::Detected);

    prop_oneof![
        1 => Just(FrameLandmarks::NotDetected),
        6 => detected,
    ]
    .boxed()
}

pub fn arb_sequence(max_frames: usize) -> BoxedStrategy<LandmarkSequence> {
    prop::collection::vec(arb_frame(), 0..=max_frames)
        .prop_map(LandmarkSequence::new)
        .boxed()
}

/// A left-side squat frame whose hip angle is `hip_deg`.
pub fn squat_frame(hip_deg: f64) -> FrameLandmarks {
    let theta = hip_deg.to_radians();
    FrameLandmarks::detected([
        (
            Joint::LeftShoulder,
            LandmarkPoint::new(0.5 + 0.2 * theta.cos(), 0.5 - 0.2 * theta.sin()),
        ),
        (Joint::LeftHip, LandmarkPoint::new(0.5, 0.5)),
        (Joint::LeftKnee, LandmarkPoint::new(0.7, 0.5)),
        (Joint::LeftAnkle, LandmarkPoint::new(0.7, 0.7)),
    ])
}

/// A run of squat frames following a random hip-angle trajectory.
pub fn arb_squat_session(max_frames: usize) -> BoxedStrategy<Vec<FrameLandmarks>> {
    prop::collection::vec(prop::option::weighted(0.9, 20.0f64..=179.0), 0..=max_frames)
        .prop_map(|angles| {
            angles
                .into_iter()
                .map(|a| a.map_or(FrameLandmarks::NotDetected, squat_frame))
                .collect()
        })
        .boxed()
}
