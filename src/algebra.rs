//! Composition and inversion of transform matrices.

use crate::{
    error::{MatrixError, Result},
    matrix::{IntoMatrix3d, Matrix3d, ensure_finite},
};

/// Returns a matrix representing the combined transformations of both
/// argument matrices.
///
/// Order matters: the result applies `inner` first and `outer` second, as
/// for column vectors `v` we get `multiply(outer, inner) * v == outer *
/// (inner * v)`. Rotating and then translating is generally not the same as
/// translating and then rotating.
///
/// # Errors
/// - Validation errors from converting either argument, see
///   [`format`](crate::format).
/// - [`MatrixError::InvalidInput`] if the product overflows to a non-finite
///   element.
pub fn multiply(outer: impl IntoMatrix3d, inner: impl IntoMatrix3d) -> Result<Matrix3d> {
    let outer = outer.into_matrix3d()?;
    let inner = inner.into_matrix3d()?;
    Matrix3d::from_elements(outer.multiplied(&inner).into_array())
}

/// Returns a matrix representing the inverse transformation of the source
/// matrix. The product of a matrix and its inverse is the identity.
///
/// # Errors
/// - [`MatrixError::SingularMatrix`] if the determinant is zero.
/// - Validation errors from converting `source`.
/// - [`MatrixError::InvalidInput`] if the inverse overflows to a non-finite
///   element.
pub fn inverse(source: impl IntoMatrix3d) -> Result<Matrix3d> {
    source.into_matrix3d()?.inverted()
}

impl Matrix3d {
    /// Computes the product `self * inner`, where `inner` is the transform
    /// applied first. Elements may overflow to infinity; use [`multiply`] to
    /// have that reported.
    pub fn multiplied(&self, inner: &Self) -> Self {
        let mut product = [0.0; 16];
        for i in 0..4 {
            let row = self.row(i);
            for j in 0..4 {
                let col = inner.column(j);
                product[i + 4 * j] =
                    row[0] * col[0] + row[1] * col[1] + row[2] * col[2] + row[3] * col[3];
            }
        }
        Self::wrap(product)
    }

    /// Computes the inverse of this matrix by cofactor expansion along the
    /// 2x2 minors of the upper and lower halves.
    ///
    /// # Errors
    /// - [`MatrixError::InvalidInput`] if this matrix or its inverse has a
    ///   non-finite element.
    /// - [`MatrixError::SingularMatrix`] if the reciprocal of the determinant
    ///   is not finite.
    pub fn inverted(&self) -> Result<Self> {
        ensure_finite(self.as_slice())?;
        let m = self.as_array();

        let s0 = m[0] * m[5] - m[4] * m[1];
        let s1 = m[0] * m[6] - m[4] * m[2];
        let s2 = m[0] * m[7] - m[4] * m[3];
        let s3 = m[1] * m[6] - m[5] * m[2];
        let s4 = m[1] * m[7] - m[5] * m[3];
        let s5 = m[2] * m[7] - m[6] * m[3];

        let c5 = m[10] * m[15] - m[14] * m[11];
        let c4 = m[9] * m[15] - m[13] * m[11];
        let c3 = m[9] * m[14] - m[13] * m[10];
        let c2 = m[8] * m[15] - m[12] * m[11];
        let c1 = m[8] * m[14] - m[12] * m[10];
        let c0 = m[8] * m[13] - m[12] * m[9];

        let inv_det = 1.0 / (s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0);

        if !inv_det.is_finite() {
            log::debug!("Tried to invert singular matrix {m:?}");
            return Err(MatrixError::SingularMatrix);
        }

        Self::from_elements([
            (m[5] * c5 - m[6] * c4 + m[7] * c3) * inv_det,
            (-m[1] * c5 + m[2] * c4 - m[3] * c3) * inv_det,
            (m[13] * s5 - m[14] * s4 + m[15] * s3) * inv_det,
            (-m[9] * s5 + m[10] * s4 - m[11] * s3) * inv_det,
            //
            (-m[4] * c5 + m[6] * c2 - m[7] * c1) * inv_det,
            (m[0] * c5 - m[2] * c2 + m[3] * c1) * inv_det,
            (-m[12] * s5 + m[14] * s2 - m[15] * s1) * inv_det,
            (m[8] * s5 - m[10] * s2 + m[11] * s1) * inv_det,
            //
            (m[4] * c4 - m[5] * c2 + m[7] * c0) * inv_det,
            (-m[0] * c4 + m[1] * c2 - m[3] * c0) * inv_det,
            (m[12] * s4 - m[13] * s2 + m[15] * s0) * inv_det,
            (-m[8] * s4 + m[9] * s2 - m[11] * s0) * inv_det,
            //
            (-m[4] * c3 + m[5] * c1 - m[6] * c0) * inv_det,
            (m[0] * c3 - m[1] * c1 + m[2] * c0) * inv_det,
            (-m[12] * s3 + m[13] * s1 - m[14] * s0) * inv_det,
            (m[8] * s3 - m[9] * s1 + m[10] * s0) * inv_det,
        ])
    }
}

impl_binop!(Mul, mul, Matrix3d, Matrix3d, Matrix3d, |a, b| {
    a.multiplied(b)
});
