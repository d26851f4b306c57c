//! Construction of elementary transforms from CSS function names.

use anyhow::{Context, Result, bail};
use matrix3d::{
    Matrix3d, perspective, rotate, rotate_x, rotate_y, rotate_z, scale, scale_x, scale_y, scale_z,
    skew, skew_x, skew_y, translate, translate_x, translate_y, translate_z, translate3d,
};

/// Builds the matrix for the CSS transform function with the given name
/// (case-insensitive) and numeric arguments. Angles are in degrees.
pub fn elementary_transform(function: &str, args: &[f64]) -> Result<Matrix3d> {
    let name = function.to_ascii_lowercase();
    let matrix = match (name.as_str(), args) {
        ("translate", &[x]) => translate(x, None),
        ("translate", &[x, y]) => translate(x, Some(y)),
        ("translate3d", &[x, y, z]) => translate3d(Some(x), Some(y), Some(z)),
        ("translatex", &[x]) => translate_x(x),
        ("translatey", &[y]) => translate_y(y),
        ("translatez", &[z]) => translate_z(z),
        ("scale", &[s]) => scale(s, None),
        ("scale", &[s, s_y]) => scale(s, Some(s_y)),
        ("scalex", &[s]) => scale_x(s),
        ("scaley", &[s]) => scale_y(s),
        ("scalez", &[s]) => scale_z(s),
        ("rotate", &[angle]) => rotate(angle),
        ("rotatex", &[angle]) => rotate_x(angle),
        ("rotatey", &[angle]) => rotate_y(angle),
        ("rotatez", &[angle]) => rotate_z(angle),
        ("skew", &[angle_x]) => skew(angle_x, None),
        ("skew", &[angle_x, angle_y]) => skew(angle_x, Some(angle_y)),
        ("skewx", &[angle]) => skew_x(angle),
        ("skewy", &[angle]) => skew_y(angle),
        ("perspective", &[distance]) => perspective(distance),
        _ => bail!(
            "Unsupported transform function {function} with {} argument(s)",
            args.len()
        ),
    };
    log::debug!("Built {function}({args:?})");

    Matrix3d::from_elements(matrix.into_array())
        .with_context(|| format!("{function}({args:?}) does not give a finite matrix"))
}
