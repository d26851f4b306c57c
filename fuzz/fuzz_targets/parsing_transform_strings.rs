#![no_main]

use libfuzzer_sys::fuzz_target;
use matrix3d::{from_string, from_string_or_identity};

fuzz_target!(|text: &str| {
    if let Ok(matrix) = from_string(text) {
        assert!(matrix.as_slice().iter().all(|value| value.is_finite()));
        assert_eq!(from_string(&matrix.to_string()), Ok(matrix));
        assert_eq!(from_string_or_identity(text), matrix);
    }
});
