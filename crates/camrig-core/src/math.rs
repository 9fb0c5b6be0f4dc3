//! Mathematical utilities and type definitions.
//!
//! This module provides the fundamental scalar/vector/matrix types used
//! throughout the library and small helpers for homogeneous coordinates.

use nalgebra::{Matrix3, Matrix3x4, Matrix4, Point2, Point3, Vector2, Vector3, Vector4};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 2D vector with [`Real`] components.
pub type Vec2 = Vector2<Real>;
/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 4D vector with [`Real`] components (homogeneous 3D coordinates).
pub type Vec4 = Vector4<Real>;
/// 2D point with [`Real`] coordinates.
pub type Pt2 = Point2<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 3×4 matrix with [`Real`] entries (projection matrices).
pub type Mat34 = Matrix3x4<Real>;
/// 4×4 matrix with [`Real`] entries (homogeneous transforms).
pub type Mat4 = Matrix4<Real>;

/// Convert a 2D pixel coordinate into homogeneous coordinates `(u, v, 1)`.
pub fn to_homogeneous_2d(p: &Pt2) -> Vec3 {
    Vec3::new(p.x, p.y, 1.0)
}

/// Convert a 4D homogeneous vector back to a Euclidean 3D point.
///
/// The input is interpreted as `(x, y, z, w)` and the result is
/// `(x/w, y/w, z/w)`. Returns `None` when `|w|` does not exceed `w_epsilon`
/// (a point at infinity).
pub fn from_homogeneous_3d(v: &Vec4, w_epsilon: Real) -> Option<Pt3> {
    if v.w.abs() <= w_epsilon {
        return None;
    }
    Some(Pt3::new(v.x / v.w, v.y / v.w, v.z / v.w))
}

/// Check that a 3×3 matrix is a proper rotation: `RᵀR = I` and `det R = +1`
/// within `tol`.
pub fn is_rotation(m: &Mat3, tol: Real) -> bool {
    (m.transpose() * m - Mat3::identity()).norm() <= tol && (m.determinant() - 1.0).abs() <= tol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homogeneous_2d_appends_one() {
        let v = to_homogeneous_2d(&Pt2::new(320.0, 240.0));
        assert_eq!(v, Vec3::new(320.0, 240.0, 1.0));
    }

    #[test]
    fn homogeneous_3d_divides_by_w() {
        let p = from_homogeneous_3d(&Vec4::new(2.0, 4.0, 6.0, 2.0), 1e-9).unwrap();
        assert_eq!(p, Pt3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn homogeneous_3d_rejects_point_at_infinity() {
        assert!(from_homogeneous_3d(&Vec4::new(1.0, 1.0, 1.0, 0.0), 1e-9).is_none());
        assert!(from_homogeneous_3d(&Vec4::new(1.0, 1.0, 1.0, 1e-12), 1e-9).is_none());
    }

    #[test]
    fn rotation_check_accepts_identity_rejects_scaled() {
        assert!(is_rotation(&Mat3::identity(), 1e-9));
        assert!(!is_rotation(&(Mat3::identity() * 2.0), 1e-9));

        let mut reflected = Mat3::identity();
        reflected[(0, 0)] = -1.0;
        assert!(!is_rotation(&reflected, 1e-9));
    }
}
