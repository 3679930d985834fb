//! Fuzz target for the analysis pass.
//!
//! Any landmark document that parses is analyzed for every exercise; the
//! pass must not panic on arbitrary geometry.

#![no_main]

use libfuzzer_sys::fuzz_target;
use repform::analysis::{analyze_session, AnalyzeOptions};
use repform::exercise::ExerciseType;
use repform::pose::io_json::from_json_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(sequence) = from_json_slice(data) {
        for exercise in ExerciseType::ALL {
            let _ = analyze_session(&sequence.frames, exercise, &AnalyzeOptions::default());
        }
    }
});
