//! Conversion between matrices and CSS transform property values.

use crate::{
    error::{MatrixError, Result},
    matrix::{IntoMatrix3d, Matrix2d, Matrix3d, format},
};
use regex::Regex;
use std::{
    fmt::{self, Write},
    str::FromStr,
    sync::LazyLock,
};

/// The transform property keyword meaning "no transformation".
pub const NONE_KEYWORD: &str = "none";

const MIN_POSITIONAL_MAGNITUDE: f64 = 1e-6;
const MAX_POSITIONAL_MAGNITUDE: f64 = 1e21;

static MATRIX_FUNCTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"matrix(3d)?\(([^)]+)\)").unwrap());

/// How to handle text that is not a recognizable transform value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Report unrecognizable text as an error.
    #[default]
    Strict,
    /// Fall back to the identity for unrecognizable text.
    Lenient,
}

/// Returns a CSS transform property value equivalent to the source matrix.
/// The result always uses the long `matrix3d(...)` form.
///
/// # Errors
/// Propagates validation errors from converting `source`.
pub fn to_string(source: impl IntoMatrix3d) -> Result<String> {
    Ok(source.into_matrix3d()?.to_string())
}

/// Converts a CSS transform property value to a matrix.
///
/// Accepts the `none` keyword, the empty string, or text containing a
/// `matrix(...)` or `matrix3d(...)` function. The values inside the function
/// are separated by commas and optional whitespace.
///
/// # Errors
/// - [`MatrixError::Parse`] if no matrix function is found.
/// - [`MatrixError::InvalidNumber`] if a value is not a number.
/// - Validation errors from [`format`] for the parsed values.
pub fn from_string(text: &str) -> Result<Matrix3d> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NONE_KEYWORD {
        return Ok(Matrix3d::identity());
    }

    let captures = MATRIX_FUNCTION_REGEX
        .captures(trimmed)
        .ok_or_else(|| MatrixError::Parse {
            text: text.to_string(),
        })?;

    let values = captures[2]
        .split(',')
        .map(parse_number)
        .collect::<Result<Vec<_>>>()?;

    log::trace!(
        "Parsed {} values from {} function",
        values.len(),
        if captures.get(1).is_some() {
            "matrix3d"
        } else {
            "matrix"
        }
    );

    format(&values)
}

/// Converts a CSS transform property value to a matrix, falling back to the
/// identity when the text cannot be converted.
pub fn from_string_or_identity(text: &str) -> Matrix3d {
    from_string(text).unwrap_or_else(|error| {
        log::debug!("Using identity for transform {text:?}: {error}");
        Matrix3d::identity()
    })
}

/// Converts a CSS transform property value to a matrix using the given
/// policy for unrecognizable text.
///
/// # Errors
/// Only with [`ParsePolicy::Strict`], see [`from_string`].
pub fn parse_with_policy(text: &str, policy: ParsePolicy) -> Result<Matrix3d> {
    match policy {
        ParsePolicy::Strict => from_string(text),
        ParsePolicy::Lenient => Ok(from_string_or_identity(text)),
    }
}

fn parse_number(token: &str) -> Result<f64> {
    let token = token.trim();
    token.parse().map_err(|_| MatrixError::InvalidNumber {
        token: token.to_string(),
    })
}

fn write_values(f: &mut fmt::Formatter<'_>, name: &str, values: &[f64]) -> fmt::Result {
    f.write_str(name)?;
    f.write_char('(')?;
    for (idx, &value) in values.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write_number(f, value)?;
    }
    f.write_char(')')
}

/// Writes the number in positional notation within
/// `[MIN_POSITIONAL_MAGNITUDE, MAX_POSITIONAL_MAGNITUDE)` and in exponent
/// notation with an explicitly signed exponent outside of it.
fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    // Negative zero is rendered as plain zero.
    if value == 0.0 {
        return f.write_char('0');
    }
    let magnitude = value.abs();
    if (MIN_POSITIONAL_MAGNITUDE..MAX_POSITIONAL_MAGNITUDE).contains(&magnitude) {
        return write!(f, "{value}");
    }
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&text),
    }
}

impl fmt::Display for Matrix3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, "matrix3d", self.as_slice())
    }
}

impl fmt::Display for Matrix2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, "matrix", self.as_array())
    }
}

impl FromStr for Matrix3d {
    type Err = MatrixError;

    fn from_str(text: &str) -> Result<Self> {
        from_string(text)
    }
}
