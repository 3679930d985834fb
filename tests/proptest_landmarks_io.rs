mod proptest_helpers;

use proptest::prelude::*;
use proptest_helpers::{arb_sequence, proptest_config};
use repform::pose::io_csv::{from_csv_str, to_csv_string};
use repform::pose::io_json::{from_json_str, to_json_string};
use repform::pose::{FrameLandmarks, LandmarkSequence};

// serde_json float parsing may land one ulp away without float_roundtrip
const EPS_JSON: f64 = 1e-12;

fn assert_close(
    left: &LandmarkSequence,
    right: &LandmarkSequence,
    eps: f64,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(left.len(), right.len());
    for (a, b) in left.frames.iter().zip(&right.frames) {
        match (a, b) {
            (FrameLandmarks::NotDetected, FrameLandmarks::NotDetected) => {}
            (FrameLandmarks::Detected(pa), FrameLandmarks::Detected(pb)) => {
                prop_assert_eq!(pa.keys().collect::<Vec<_>>(), pb.keys().collect::<Vec<_>>());
                for (p, q) in pa.values().zip(pb.values()) {
                    prop_assert!((p.x - q.x).abs() <= eps);
                    prop_assert!((p.y - q.y).abs() <= eps);
                    match (p.confidence, q.confidence) {
                        (Some(c), Some(d)) => prop_assert!((c - d).abs() <= eps),
                        (None, None) => {}
                        other => prop_assert!(false, "confidence mismatch: {:?}", other),
                    }
                }
            }
            other => prop_assert!(false, "detection mismatch: {:?}", other),
        }
    }
    Ok(())
}

/// CSV cannot tell an empty detection from no detection.
fn without_empty_detections(sequence: &LandmarkSequence) -> LandmarkSequence {
    LandmarkSequence::new(
        sequence
            .frames
            .iter()
            .map(|f| if f.is_empty() { FrameLandmarks::NotDetected } else { f.clone() })
            .collect(),
    )
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn json_preserves_frames(sequence in arb_sequence(40)) {
        let json = to_json_string(&sequence).unwrap();
        let restored = from_json_str(&json).unwrap();
        assert_close(&sequence, &restored, EPS_JSON)?;
    }

    #[test]
    fn csv_preserves_frames(sequence in arb_sequence(40)) {
        let csv = to_csv_string(&sequence).unwrap();
        let restored = from_csv_str(&csv).unwrap();
        assert_close(&without_empty_detections(&sequence), &restored, 0.0)?;
    }
}
