//! 2D and 3D transform matrices in the CSS `matrix()`/`matrix3d()` convention.
//!
//! Matrices are 4x4 and stored as 16 column-major elements ([`Matrix3d`]),
//! the order used by `matrix3d(...)`. The six-value `matrix(...)` short form
//! ([`Matrix2d`]) expands to the same canonical representation. On top of
//! that the crate provides the elementary transforms of CSS, composition,
//! inversion and conversion to and from transform property values.
//!
//! ```
//! use matrix3d::{from_string, multiply, rotate_z, to_string, translate};
//!
//! let moved = from_string("matrix(1, 0, 0, 1, 20, 0)").unwrap();
//! let composed = multiply(rotate_z(90.0), moved).unwrap();
//! assert!(to_string(composed).unwrap().starts_with("matrix3d("));
//! assert_eq!(moved, translate(20.0, None));
//! ```

#[macro_use]
mod macros;

pub mod algebra;
pub mod angle;
pub mod construct;
pub mod css;
pub mod error;
pub mod matrix;

pub use algebra::{inverse, multiply};
pub use angle::{Angle, Degrees, Radians};
pub use construct::{
    identity, perspective, rotate, rotate_x, rotate_y, rotate_z, scale, scale_x, scale_y, scale_z,
    skew, skew_x, skew_y, translate, translate_x, translate_y, translate_z, translate3d,
};
pub use css::{ParsePolicy, from_string, from_string_or_identity, parse_with_policy, to_string};
pub use error::{MatrixError, Result};
pub use matrix::{IntoMatrix3d, Matrix2d, Matrix3d, format};
