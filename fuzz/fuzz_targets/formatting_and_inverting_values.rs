#![no_main]

use libfuzzer_sys::fuzz_target;
use matrix3d::{MatrixError, format, inverse, multiply};

fn is_finite(values: &[f64]) -> bool {
    values.iter().all(|value| value.is_finite())
}

fuzz_target!(|values: Vec<f64>| {
    match format(&values) {
        Ok(matrix) => {
            assert!(is_finite(matrix.as_slice()));
            match inverse(matrix) {
                Ok(inverted) => assert!(is_finite(inverted.as_slice())),
                Err(error) => assert!(
                    error == MatrixError::SingularMatrix || error.is_invalid_input()
                ),
            }
            match multiply(matrix, matrix) {
                Ok(product) => assert!(is_finite(product.as_slice())),
                Err(error) => assert!(error.is_invalid_input()),
            }
        }
        Err(MatrixError::InvalidLength { length }) => assert_eq!(length, values.len()),
        Err(error) => assert!(error.is_invalid_input()),
    }
});
