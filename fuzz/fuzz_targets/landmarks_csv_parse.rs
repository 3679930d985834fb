//! Fuzz target for landmark CSV parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use repform::pose::io_csv::from_csv_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_csv_slice(data);
});
