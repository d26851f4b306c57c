//! Elementary transform matrices.
//!
//! Every constructor starts from the identity and overwrites the elements
//! specific to its transform, mirroring the CSS transform function of the same
//! name. Angles are given in degrees, distances in arbitrary length units (CSS
//! pixels in practice) and scale factors as plain multipliers.

use crate::{
    angle::{Angle, Degrees},
    matrix::Matrix3d,
};

/// Returns a matrix representing no transformation. The product of any matrix
/// with the identity is the original matrix.
pub fn identity() -> Matrix3d {
    Matrix3d::identity()
}

/// Returns a matrix representing translation along the x-axis.
pub fn translate_x(distance: f64) -> Matrix3d {
    identity().with(&[(12, distance)])
}

/// Returns a matrix representing translation along the y-axis.
pub fn translate_y(distance: f64) -> Matrix3d {
    identity().with(&[(13, distance)])
}

/// Returns a matrix representing translation along the z-axis.
pub fn translate_z(distance: f64) -> Matrix3d {
    identity().with(&[(14, distance)])
}

/// Returns a matrix representing 2D translation. The y-axis translation is
/// zero when `distance_y` is [`None`].
pub fn translate(distance_x: f64, distance_y: Option<f64>) -> Matrix3d {
    let matrix = translate_x(distance_x);
    match distance_y {
        Some(distance_y) => matrix.with(&[(13, distance_y)]),
        None => matrix,
    }
}

/// Returns a matrix representing 3D translation.
///
/// The translation is only applied when all three distances are given.
/// Otherwise the identity is returned.
pub fn translate3d(
    distance_x: Option<f64>,
    distance_y: Option<f64>,
    distance_z: Option<f64>,
) -> Matrix3d {
    match (distance_x, distance_y, distance_z) {
        (Some(x), Some(y), Some(z)) => identity().with(&[(12, x), (13, y), (14, z)]),
        _ => identity(),
    }
}

/// Returns a matrix representing scaling along the x-axis.
pub fn scale_x(scalar: f64) -> Matrix3d {
    identity().with(&[(0, scalar)])
}

/// Returns a matrix representing scaling along the y-axis.
pub fn scale_y(scalar: f64) -> Matrix3d {
    identity().with(&[(5, scalar)])
}

/// Returns a matrix representing scaling along the z-axis.
pub fn scale_z(scalar: f64) -> Matrix3d {
    identity().with(&[(10, scalar)])
}

/// Returns a matrix representing 2D scaling. `scalar` is used for both axes
/// unless `scalar_y` explicitly defines the y-axis scaling.
pub fn scale(scalar: f64, scalar_y: Option<f64>) -> Matrix3d {
    identity().with(&[(0, scalar), (5, scalar_y.unwrap_or(scalar))])
}

/// Returns a matrix representing rotation about the z-axis. This is an alias
/// for [`rotate_z`], matching the CSS `rotate()` function.
pub fn rotate(angle: f64) -> Matrix3d {
    rotate_z(angle)
}

/// Returns a matrix representing rotation about the x-axis by the given angle
/// in degrees.
pub fn rotate_x(angle: f64) -> Matrix3d {
    let (sin, cos) = Degrees(angle).radians().sin_cos();
    identity().with(&[(5, cos), (10, cos), (6, sin), (9, -sin)])
}

/// Returns a matrix representing rotation about the y-axis by the given angle
/// in degrees.
pub fn rotate_y(angle: f64) -> Matrix3d {
    let (sin, cos) = Degrees(angle).radians().sin_cos();
    identity().with(&[(0, cos), (10, cos), (8, sin), (2, -sin)])
}

/// Returns a matrix representing rotation about the z-axis by the given angle
/// in degrees.
pub fn rotate_z(angle: f64) -> Matrix3d {
    let (sin, cos) = Degrees(angle).radians().sin_cos();
    identity().with(&[(0, cos), (5, cos), (1, sin), (4, -sin)])
}

/// Returns a matrix representing shear along the x-axis by the given angle in
/// degrees.
pub fn skew_x(angle: f64) -> Matrix3d {
    identity().with(&[(4, Degrees(angle).radians().tan())])
}

/// Returns a matrix representing shear along the y-axis by the given angle in
/// degrees.
pub fn skew_y(angle: f64) -> Matrix3d {
    identity().with(&[(1, Degrees(angle).radians().tan())])
}

/// Returns a matrix representing 2D shear. `angle_x` defines the x-axis
/// shearing and the optional `angle_y` the y-axis shearing, both in degrees.
pub fn skew(angle_x: f64, angle_y: Option<f64>) -> Matrix3d {
    let matrix = skew_x(angle_x);
    match angle_y {
        Some(angle_y) => matrix.with(&[(1, Degrees(angle_y).radians().tan())]),
        None => matrix,
    }
}

/// Returns a matrix representing perspective with the given distance between
/// the viewer and the z = 0 plane.
///
/// A zero distance yields an infinite element.
pub fn perspective(distance: f64) -> Matrix3d {
    identity().with(&[(11, -1.0 / distance)])
}

/// The elementary constructors as associated functions. See the free
/// functions of the same names.
impl Matrix3d {
    pub fn translate_x(distance: f64) -> Self {
        translate_x(distance)
    }

    pub fn translate_y(distance: f64) -> Self {
        translate_y(distance)
    }

    pub fn translate_z(distance: f64) -> Self {
        translate_z(distance)
    }

    pub fn translate(distance_x: f64, distance_y: Option<f64>) -> Self {
        translate(distance_x, distance_y)
    }

    pub fn translate3d(
        distance_x: Option<f64>,
        distance_y: Option<f64>,
        distance_z: Option<f64>,
    ) -> Self {
        translate3d(distance_x, distance_y, distance_z)
    }

    pub fn scale_x(scalar: f64) -> Self {
        scale_x(scalar)
    }

    pub fn scale_y(scalar: f64) -> Self {
        scale_y(scalar)
    }

    pub fn scale_z(scalar: f64) -> Self {
        scale_z(scalar)
    }

    pub fn scale(scalar: f64, scalar_y: Option<f64>) -> Self {
        scale(scalar, scalar_y)
    }

    pub fn rotate(angle: f64) -> Self {
        rotate(angle)
    }

    pub fn rotate_x(angle: f64) -> Self {
        rotate_x(angle)
    }

    pub fn rotate_y(angle: f64) -> Self {
        rotate_y(angle)
    }

    pub fn rotate_z(angle: f64) -> Self {
        rotate_z(angle)
    }

    pub fn skew_x(angle: f64) -> Self {
        skew_x(angle)
    }

    pub fn skew_y(angle: f64) -> Self {
        skew_y(angle)
    }

    pub fn skew(angle_x: f64, angle_y: Option<f64>) -> Self {
        skew(angle_x, angle_y)
    }

    pub fn perspective(distance: f64) -> Self {
        perspective(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    const EPSILON: f64 = 1e-12;

    /// Asserts that `matrix` equals the identity except at the given indices.
    fn assert_identity_except(matrix: &Matrix3d, expected: &[(usize, f64)]) {
        let identity = identity();
        for idx in 0..16 {
            match expected.iter().find(|(expected_idx, _)| *expected_idx == idx) {
                Some(&(_, value)) => assert_abs_diff_eq!(matrix[idx], value, epsilon = EPSILON),
                None => assert_eq!(matrix[idx], identity[idx], "element {idx}"),
            }
        }
    }

    #[test]
    fn identity_is_one_where_index_is_multiple_of_five() {
        let matrix = identity();
        for idx in 0..16 {
            let expected = if idx % 5 == 0 { 1.0 } else { 0.0 };
            assert_eq!(matrix[idx], expected);
        }
    }

    #[test]
    fn axis_translations_set_single_element() {
        assert_identity_except(&translate_x(20.0), &[(12, 20.0)]);
        assert_identity_except(&translate_y(-7.5), &[(13, -7.5)]);
        assert_identity_except(&translate_z(3.0), &[(14, 3.0)]);
    }

    #[test]
    fn translating_with_optional_y_sets_both_elements() {
        assert_identity_except(&translate(20.0, Some(40.0)), &[(12, 20.0), (13, 40.0)]);
        assert_identity_except(&translate(20.0, None), &[(12, 20.0)]);
    }

    #[test]
    fn translating_with_zero_y_writes_zero() {
        assert_eq!(translate(20.0, Some(0.0)), translate(20.0, None));
    }

    #[test]
    fn translating_in_3d_sets_three_elements() {
        assert_identity_except(
            &translate3d(Some(1.0), Some(2.0), Some(3.0)),
            &[(12, 1.0), (13, 2.0), (14, 3.0)],
        );
    }

    #[test]
    fn translating_in_3d_with_missing_distance_gives_identity() {
        assert_eq!(translate3d(Some(1.0), Some(2.0), None), identity());
        assert_eq!(translate3d(None, Some(2.0), Some(3.0)), identity());
        assert_eq!(translate3d(None, None, None), identity());
    }

    #[test]
    fn axis_scalings_set_single_diagonal_element() {
        assert_identity_except(&scale_x(2.0), &[(0, 2.0)]);
        assert_identity_except(&scale_y(3.0), &[(5, 3.0)]);
        assert_identity_except(&scale_z(4.0), &[(10, 4.0)]);
    }

    #[test]
    fn scaling_uniformly_unless_y_is_given() {
        assert_identity_except(&scale(2.0, None), &[(0, 2.0), (5, 2.0)]);
        assert_identity_except(&scale(2.0, Some(0.5)), &[(0, 2.0), (5, 0.5)]);
        assert_identity_except(&scale(2.0, Some(0.0)), &[(0, 2.0), (5, 0.0)]);
    }

    #[test]
    fn rotating_about_x_places_sine_and_cosine() {
        assert_identity_except(
            &rotate_x(45.0),
            &[
                (5, FRAC_1_SQRT_2),
                (10, FRAC_1_SQRT_2),
                (6, FRAC_1_SQRT_2),
                (9, -FRAC_1_SQRT_2),
            ],
        );
    }

    #[test]
    fn rotating_about_y_places_sine_and_cosine() {
        assert_identity_except(
            &rotate_y(90.0),
            &[(0, 0.0), (10, 0.0), (8, 1.0), (2, -1.0)],
        );
    }

    #[test]
    fn rotating_about_z_places_sine_and_cosine() {
        assert_identity_except(
            &rotate_z(-90.0),
            &[(0, 0.0), (5, 0.0), (1, -1.0), (4, 1.0)],
        );
    }

    #[test]
    fn rotate_is_alias_for_rotate_z() {
        assert_eq!(rotate(33.0), rotate_z(33.0));
    }

    #[test]
    fn skewing_places_tangent_of_angle() {
        assert_identity_except(&skew_x(45.0), &[(4, 1.0)]);
        assert_identity_except(&skew_y(-45.0), &[(1, -1.0)]);
        assert_identity_except(&skew(45.0, Some(45.0)), &[(4, 1.0), (1, 1.0)]);
        assert_identity_except(&skew(45.0, None), &[(4, 1.0)]);
        assert_eq!(skew(30.0, None), skew_x(30.0));
    }

    #[test]
    fn skewing_by_right_angle_stays_finite() {
        assert!(skew_x(90.0).as_slice().iter().all(|value| value.is_finite()));
        assert!(perspective(0.0)[11].is_infinite());
    }

    #[test]
    fn perspective_places_negative_reciprocal_distance() {
        assert_identity_except(&perspective(400.0), &[(11, -0.0025)]);
    }

    #[test]
    fn associated_constructors_match_free_functions() {
        assert_eq!(Matrix3d::translate_x(1.5), translate_x(1.5));
        assert_eq!(Matrix3d::translate_y(-2.0), translate_y(-2.0));
        assert_eq!(Matrix3d::translate_z(3.0), translate_z(3.0));
        assert_eq!(Matrix3d::translate(1.0, Some(2.0)), translate(1.0, Some(2.0)));
        assert_eq!(
            Matrix3d::translate3d(Some(1.0), Some(2.0), Some(3.0)),
            translate3d(Some(1.0), Some(2.0), Some(3.0))
        );
        assert_eq!(Matrix3d::scale_x(2.0), scale_x(2.0));
        assert_eq!(Matrix3d::scale_y(3.0), scale_y(3.0));
        assert_eq!(Matrix3d::scale_z(4.0), scale_z(4.0));
        assert_eq!(Matrix3d::scale(2.0, None), scale(2.0, None));
        assert_eq!(Matrix3d::rotate(30.0), rotate(30.0));
        assert_eq!(Matrix3d::rotate_x(30.0), rotate_x(30.0));
        assert_eq!(Matrix3d::rotate_y(30.0), rotate_y(30.0));
        assert_eq!(Matrix3d::rotate_z(30.0), rotate_z(30.0));
        assert_eq!(Matrix3d::skew_x(10.0), skew_x(10.0));
        assert_eq!(Matrix3d::skew_y(10.0), skew_y(10.0));
        assert_eq!(Matrix3d::skew(10.0, Some(5.0)), skew(10.0, Some(5.0)));
        assert_eq!(Matrix3d::perspective(500.0), perspective(500.0));
    }
}
