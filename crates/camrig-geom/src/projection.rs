//! Camera projection matrices.

use camrig_core::{CameraData, Mat34, Port, Pt2, Pt3, Real};

/// Threshold below which a projected depth is treated as degenerate.
const DEPTH_EPSILON: Real = 1e-12;

/// Cached 3×4 projection matrix for one resolved camera.
///
/// The stored camera pose expresses the camera in the world frame, so
/// projecting a world point requires the inverted pose: the rotation is
/// inverted (its transpose, since it is orthonormal) and the translation
/// negated, giving `P = K · [Rᵀ | −t]`.
///
/// The matrix is computed once at construction; rebuild the [`Projector`]
/// (by rebuilding the whole camera array) when extrinsics change.
#[derive(Clone, Debug)]
pub struct Projector {
    port: Port,
    matrix: Mat34,
}

impl Projector {
    pub fn new(camera: &CameraData) -> Self {
        let r_inv = camera.rotation.transpose();
        let mut rt = Mat34::zeros();
        rt.fixed_view_mut::<3, 3>(0, 0).copy_from(&r_inv);
        rt.fixed_view_mut::<3, 1>(0, 3)
            .copy_from(&(-camera.translation));
        Self {
            port: camera.port,
            matrix: camera.matrix * rt,
        }
    }

    /// Port of the camera this projector belongs to.
    #[inline]
    pub fn port(&self) -> Port {
        self.port
    }

    /// The cached 3×4 projection matrix.
    #[inline]
    pub fn matrix(&self) -> &Mat34 {
        &self.matrix
    }

    /// Project a world point into pixel coordinates.
    ///
    /// Returns `None` when the point maps to a non-positive or negligible
    /// homogeneous depth (behind the camera or at infinity).
    pub fn project(&self, p_w: &Pt3) -> Option<Pt2> {
        let v = self.matrix * p_w.to_homogeneous();
        if v.z <= DEPTH_EPSILON {
            return None;
        }
        Some(Pt2::new(v.x / v.z, v.y / v.z))
    }
}
