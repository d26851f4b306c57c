//! Matrices in the CSS transform convention.
//!
//! A [`Matrix3d`] stores the 16 elements of a 4x4 matrix flattened in
//! column-major order, so that index `4 * column + row` holds the element at
//! `row` and `column`. This is the order in which the values appear inside a
//! CSS `matrix3d(...)` function. The 2D affine subset written as
//! `matrix(a, b, c, d, tx, ty)` is represented by [`Matrix2d`].

use crate::error::{MatrixError, Result};
use bytemuck::{Pod, Zeroable};
use std::ops::Index;

/// Number of elements in the long (`matrix3d`) form.
pub const LONG_FORM_LEN: usize = 16;

/// Number of elements in the short (`matrix`) form.
pub const SHORT_FORM_LEN: usize = 6;

/// Canonical indices written by the six short form values, in order.
pub const SHORT_FORM_INDICES: [usize; SHORT_FORM_LEN] = [0, 1, 4, 5, 12, 13];

const IDENTITY_ELEMENTS: [f64; LONG_FORM_LEN] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// A 4x4 transform matrix with its elements flattened in column-major order.
///
/// Values obtained through [`format`] or any of the parsing functions are
/// guaranteed to only contain finite elements. The elementary constructors
/// produce finite elements as long as their arguments are finite and not
/// degenerate (a zero perspective distance). Every fallible operation taking
/// an [`IntoMatrix3d`] rejects matrices with non-finite elements.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct Matrix3d {
    elements: [f64; LONG_FORM_LEN],
}

/// The 2D affine subset `[a, b, c, d, tx, ty]` of a [`Matrix3d`], as written
/// in a CSS `matrix(...)` function.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct Matrix2d {
    elements: [f64; SHORT_FORM_LEN],
}

/// Conversion into a canonical [`Matrix3d`].
///
/// Typed matrices are checked for non-finite elements. Raw numeric arrays,
/// slices and vectors go through [`format`].
pub trait IntoMatrix3d {
    fn into_matrix3d(self) -> Result<Matrix3d>;
}

impl Matrix3d {
    /// Creates the matrix representing no transformation.
    #[inline]
    pub const fn identity() -> Self {
        Self::wrap(IDENTITY_ELEMENTS)
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::wrap([0.0; LONG_FORM_LEN])
    }

    /// Creates a matrix from the given column-major elements, which must all
    /// be finite.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidInput`] naming the first non-finite
    /// element.
    pub fn from_elements(elements: [f64; LONG_FORM_LEN]) -> Result<Self> {
        ensure_finite(&elements)?;
        Ok(Self::wrap(elements))
    }

    /// Validates the given short or long form elements and returns the
    /// equivalent canonical matrix. See [`format`].
    pub fn format(source: &[f64]) -> Result<Self> {
        format(source)
    }

    /// The column-major elements of the matrix.
    #[inline]
    pub const fn as_array(&self) -> &[f64; LONG_FORM_LEN] {
        &self.elements
    }

    /// The column-major elements of the matrix as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    /// Consumes the matrix and returns its column-major elements.
    #[inline]
    pub const fn into_array(self) -> [f64; LONG_FORM_LEN] {
        self.elements
    }

    /// The element at the given row and column.
    ///
    /// # Panics
    /// If `row` or `column` is larger than 3.
    #[inline]
    pub fn element(&self, row: usize, column: usize) -> f64 {
        assert!(row < 4 && column < 4, "matrix position out of bounds");
        self.elements[4 * column + row]
    }

    /// Returns row `row` as the four elements `[m[row], m[row + 4], ...]`.
    #[inline]
    pub fn row(&self, row: usize) -> [f64; 4] {
        let m = &self.elements;
        [m[row], m[row + 4], m[row + 8], m[row + 12]]
    }

    /// Returns column `column` as four consecutive elements.
    #[inline]
    pub fn column(&self, column: usize) -> [f64; 4] {
        let k = 4 * column;
        let m = &self.elements;
        [m[k], m[k + 1], m[k + 2], m[k + 3]]
    }

    /// Whether every element outside the short form positions equals the
    /// identity's, meaning the matrix is exactly expressible as `matrix(...)`.
    pub fn is_2d(&self) -> bool {
        self.elements
            .iter()
            .zip(IDENTITY_ELEMENTS)
            .enumerate()
            .filter(|(idx, _)| !SHORT_FORM_INDICES.contains(idx))
            .all(|(_, (&value, identity_value))| value == identity_value)
    }

    /// Extracts the short form of the matrix, or [`None`] if the matrix has
    /// 3D components.
    pub fn to_short(&self) -> Option<Matrix2d> {
        if !self.is_2d() {
            return None;
        }
        Some(Matrix2d::wrap(
            SHORT_FORM_INDICES.map(|idx| self.elements[idx]),
        ))
    }

    /// Whether the matrix equals the identity within the given tolerance.
    pub fn is_identity(&self, epsilon: f64) -> bool {
        approx::abs_diff_eq!(*self, Self::identity(), epsilon = epsilon)
    }

    /// Returns a matrix with the given closure applied to each element.
    #[inline]
    pub fn mapped(&self, f: impl FnMut(f64) -> f64) -> Self {
        Self::wrap(self.elements.map(f))
    }

    #[inline]
    pub(crate) const fn wrap(elements: [f64; LONG_FORM_LEN]) -> Self {
        Self { elements }
    }

    #[inline]
    pub(crate) fn with(mut self, entries: &[(usize, f64)]) -> Self {
        for &(idx, value) in entries {
            self.elements[idx] = value;
        }
        self
    }
}

impl Default for Matrix3d {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<usize> for Matrix3d {
    type Output = f64;

    #[inline]
    fn index(&self, idx: usize) -> &f64 {
        &self.elements[idx]
    }
}

impl AsRef<[f64]> for Matrix3d {
    fn as_ref(&self) -> &[f64] {
        &self.elements
    }
}

impl From<Matrix2d> for Matrix3d {
    fn from(short: Matrix2d) -> Self {
        let mut elements = IDENTITY_ELEMENTS;
        for (idx, value) in SHORT_FORM_INDICES.into_iter().zip(short.elements) {
            elements[idx] = value;
        }
        Self::wrap(elements)
    }
}

impl_abs_diff_eq!(Matrix3d, |a, b, epsilon| {
    a.elements
        .iter()
        .zip(&b.elements)
        .all(|(a, b)| ::approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
});

impl_relative_eq!(Matrix3d, |a, b, epsilon, max_relative| {
    a.elements
        .iter()
        .zip(&b.elements)
        .all(|(a, b)| ::approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
});

impl Matrix2d {
    /// Creates a short form matrix from the six values of a CSS
    /// `matrix(a, b, c, d, tx, ty)` function.
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self::wrap([a, b, c, d, tx, ty])
    }

    /// Creates a short form matrix from six elements, which must all be
    /// finite.
    pub fn from_elements(elements: [f64; SHORT_FORM_LEN]) -> Result<Self> {
        ensure_finite(&elements)?;
        Ok(Self::wrap(elements))
    }

    /// The six values `[a, b, c, d, tx, ty]`.
    #[inline]
    pub const fn as_array(&self) -> &[f64; SHORT_FORM_LEN] {
        &self.elements
    }

    /// Expands the matrix to its canonical long form.
    #[inline]
    pub fn expanded(&self) -> Matrix3d {
        Matrix3d::from(*self)
    }

    #[inline]
    const fn wrap(elements: [f64; SHORT_FORM_LEN]) -> Self {
        Self { elements }
    }
}

impl_abs_diff_eq!(Matrix2d, |a, b, epsilon| {
    a.elements
        .iter()
        .zip(&b.elements)
        .all(|(a, b)| ::approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
});

/// Transformation matrices in the browser come in two flavors: `matrix` using
/// 6 values (short) and `matrix3d` using 16 values (long). This validates the
/// given values and expands short form matrices to their equivalent long form.
/// Long form values are returned unchanged.
///
/// # Errors
/// - [`MatrixError::InvalidLength`] if `source` has neither 6 nor 16 values.
/// - [`MatrixError::InvalidInput`] if any value is NaN or infinite.
pub fn format(source: &[f64]) -> Result<Matrix3d> {
    match source.len() {
        LONG_FORM_LEN => {
            let mut elements = [0.0; LONG_FORM_LEN];
            elements.copy_from_slice(source);
            Matrix3d::from_elements(elements)
        }
        SHORT_FORM_LEN => {
            let mut elements = [0.0; SHORT_FORM_LEN];
            elements.copy_from_slice(source);
            Matrix2d::from_elements(elements).map(Matrix3d::from)
        }
        length => Err(MatrixError::InvalidLength { length }),
    }
}

pub(crate) fn ensure_finite(elements: &[f64]) -> Result<()> {
    match elements.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(MatrixError::InvalidInput {
            index,
            value: elements[index],
        }),
        None => Ok(()),
    }
}

impl IntoMatrix3d for Matrix3d {
    fn into_matrix3d(self) -> Result<Matrix3d> {
        ensure_finite(&self.elements)?;
        Ok(self)
    }
}

impl IntoMatrix3d for &Matrix3d {
    fn into_matrix3d(self) -> Result<Matrix3d> {
        (*self).into_matrix3d()
    }
}

impl IntoMatrix3d for Matrix2d {
    fn into_matrix3d(self) -> Result<Matrix3d> {
        format(&self.elements)
    }
}

impl IntoMatrix3d for &Matrix2d {
    fn into_matrix3d(self) -> Result<Matrix3d> {
        (*self).into_matrix3d()
    }
}

macro_rules! impl_into_matrix3d_via_format {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoMatrix3d for $t {
                fn into_matrix3d(self) -> Result<Matrix3d> {
                    format(self.as_ref())
                }
            }
        )*
    };
}

impl_into_matrix3d_via_format!(
    [f64; SHORT_FORM_LEN],
    [f64; LONG_FORM_LEN],
    &[f64; SHORT_FORM_LEN],
    &[f64; LONG_FORM_LEN],
    &[f64],
    Vec<f64>,
    &Vec<f64>,
);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sequence(range: std::ops::RangeInclusive<i32>) -> Vec<f64> {
        range.map(f64::from).collect()
    }

    #[test]
    fn identity_has_ones_on_the_diagonal() {
        assert_eq!(
            Matrix3d::identity().into_array(),
            [
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0
            ]
        );
        assert_eq!(Matrix3d::default(), Matrix3d::identity());
    }

    #[test]
    fn formatting_short_form_expands_to_long_form() {
        let matrix = format(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(
            matrix.into_array(),
            [
                1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 6.0, 0.0, 1.0
            ]
        );
    }

    #[test]
    fn formatting_long_form_keeps_values() {
        let source = sequence(1..=16);
        let matrix = format(&source).unwrap();
        assert_eq!(matrix.as_slice(), source.as_slice());
    }

    #[test]
    fn formatting_empty_input_fails_with_invalid_length() {
        assert_eq!(format(&[]), Err(MatrixError::InvalidLength { length: 0 }));
    }

    #[test]
    fn formatting_wrong_length_fails_with_invalid_length() {
        assert_eq!(
            format(&[1.0, 2.0, 3.0]),
            Err(MatrixError::InvalidLength { length: 3 })
        );
        assert_eq!(
            format(&sequence(1..=15)),
            Err(MatrixError::InvalidLength { length: 15 })
        );
    }

    #[test]
    fn formatting_non_finite_values_fails_with_invalid_input() {
        let mut source = sequence(1..=16);
        source[7] = f64::INFINITY;
        assert_eq!(
            format(&source),
            Err(MatrixError::InvalidInput {
                index: 7,
                value: f64::INFINITY
            })
        );

        let result = format(&[1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0]);
        assert!(matches!(
            result,
            Err(MatrixError::InvalidInput { index: 1, .. })
        ));
    }

    #[test]
    fn elements_are_addressed_by_row_and_column() {
        let matrix = format(&sequence(1..=16)).unwrap();
        assert_eq!(matrix.element(0, 0), 1.0);
        assert_eq!(matrix.element(1, 0), 2.0);
        assert_eq!(matrix.element(0, 1), 5.0);
        assert_eq!(matrix.element(2, 3), 15.0);
        assert_eq!(matrix.row(1), [2.0, 6.0, 10.0, 14.0]);
        assert_eq!(matrix.column(2), [9.0, 10.0, 11.0, 12.0]);
        assert_eq!(matrix[12], 13.0);
    }

    #[test]
    fn short_form_is_recovered_from_2d_matrix() {
        let short = Matrix2d::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let long = short.expanded();
        assert!(long.is_2d());
        assert_eq!(long.to_short(), Some(short));
    }

    #[test]
    fn matrix_with_3d_components_has_no_short_form() {
        let mut elements = IDENTITY_ELEMENTS;
        elements[14] = 3.0;
        let matrix = Matrix3d::from_elements(elements).unwrap();
        assert!(!matrix.is_2d());
        assert_eq!(matrix.to_short(), None);
    }

    #[test]
    fn typed_and_raw_inputs_convert_to_the_same_matrix() {
        let short = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let expected = format(&short).unwrap();
        assert_eq!(short.into_matrix3d().unwrap(), expected);
        assert_eq!((&short).into_matrix3d().unwrap(), expected);
        assert_eq!(short.to_vec().into_matrix3d().unwrap(), expected);
        assert_eq!(
            Matrix2d::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
                .into_matrix3d()
                .unwrap(),
            expected
        );
        assert_eq!(expected.into_matrix3d().unwrap(), expected);
    }

    #[test]
    fn typed_matrix_with_non_finite_element_does_not_convert() {
        let matrix = Matrix3d::identity().with(&[(11, f64::NEG_INFINITY)]);
        assert_eq!(
            matrix.into_matrix3d(),
            Err(MatrixError::InvalidInput {
                index: 11,
                value: f64::NEG_INFINITY
            })
        );
        assert!((&matrix).into_matrix3d().is_err());

        let short = Matrix2d::new(1.0, 0.0, 0.0, 1.0, f64::NAN, 0.0);
        assert!(matches!(
            short.into_matrix3d(),
            Err(MatrixError::InvalidInput { index: 4, .. })
        ));
    }

    #[test]
    fn raw_input_with_wrong_length_does_not_convert() {
        assert_eq!(
            vec![1.0, 2.0, 3.0].into_matrix3d(),
            Err(MatrixError::InvalidLength { length: 3 })
        );
        assert_eq!(
            (&[1.0, 2.0, 3.0][..]).into_matrix3d(),
            Err(MatrixError::InvalidLength { length: 3 })
        );
    }

    prop_compose! {
        fn finite_element()(value in -1e6..1e6_f64) -> f64 {
            value
        }
    }

    proptest! {
        #[test]
        fn formatting_short_form_only_touches_short_form_indices(
            source in prop::array::uniform6(finite_element())
        ) {
            let matrix = format(&source).unwrap();
            for (idx, &value) in matrix.as_array().iter().enumerate() {
                match SHORT_FORM_INDICES.iter().position(|&short_idx| short_idx == idx) {
                    Some(short_position) => prop_assert_eq!(value, source[short_position]),
                    None => prop_assert_eq!(value, IDENTITY_ELEMENTS[idx]),
                }
            }
        }
    }

    proptest! {
        #[test]
        fn formatting_is_idempotent(
            short in prop::array::uniform6(finite_element()),
            long in prop::array::uniform16(finite_element()),
        ) {
            for source in [short.to_vec(), long.to_vec()] {
                let once = format(&source).unwrap();
                let twice = format(once.as_slice()).unwrap();
                prop_assert_eq!(once, twice);
            }
        }
    }

    proptest! {
        #[test]
        fn formatting_long_form_returns_identical_values(
            source in prop::array::uniform16(finite_element())
        ) {
            prop_assert_eq!(format(&source).unwrap().into_array(), source);
        }
    }
}
