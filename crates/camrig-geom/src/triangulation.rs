//! Two-view linear triangulation.
//!
//! Recovers 3-D positions from matched, undistorted pixel observations in
//! two calibrated views using the Direct Linear Transform: each observation
//! contributes two rows to a 4×4 homogeneous system whose null space (the
//! right singular vector of smallest singular value) is the world point.

use camrig_core::{
    from_homogeneous_3d, CameraData, Mat34, PointPacket, Port, Pt2, Pt3, Real, TriangulatedPacket,
};
use nalgebra::Matrix4;

use crate::{Projector, Undistorter};

/// Homogeneous weights at or below this magnitude (on the unit-norm SVD
/// solution vector) are points at infinity.
pub const W_EPSILON: Real = 1e-9;

/// Triangulate one correspondence from two projection matrices.
///
/// `x_a` and `x_b` must already be undistorted. Returns `None` for
/// degenerate geometry (parallel or coincident rays, non-finite solution) -
/// an expected outcome, not an error.
pub fn triangulate_pair(p_a: &Mat34, p_b: &Mat34, x_a: &Pt2, x_b: &Pt2) -> Option<Pt3> {
    let mut design: Matrix4<Real> = Matrix4::zeros();
    design
        .row_mut(0)
        .copy_from(&(x_a.x * p_a.row(2) - p_a.row(0)));
    design
        .row_mut(1)
        .copy_from(&(x_a.y * p_a.row(2) - p_a.row(1)));
    design
        .row_mut(2)
        .copy_from(&(x_b.x * p_b.row(2) - p_b.row(0)));
    design
        .row_mut(3)
        .copy_from(&(x_b.y * p_b.row(2) - p_b.row(1)));

    // Solve design * X = 0 via SVD; singular values are sorted descending,
    // so the null space is the last row of V^T.
    let svd = design.svd(false, true);
    let v_t = svd.v_t?;
    let h = v_t.row(3).transpose();

    if !h.iter().all(|v| v.is_finite()) {
        return None;
    }
    from_homogeneous_3d(&h, W_EPSILON)
}

/// Triangulation engine for one camera pair.
///
/// Owns the two cameras' projectors and undistorters; everything is cached
/// at construction and read-only afterwards, so one triangulator may be
/// shared freely across threads.
#[derive(Clone, Debug)]
pub struct StereoTriangulator {
    pair: (Port, Port),
    projector_a: Projector,
    projector_b: Projector,
    undistorter_a: Undistorter,
    undistorter_b: Undistorter,
}

impl StereoTriangulator {
    pub fn new(camera_a: &CameraData, camera_b: &CameraData) -> Self {
        Self {
            pair: (camera_a.port, camera_b.port),
            projector_a: Projector::new(camera_a),
            projector_b: Projector::new(camera_b),
            undistorter_a: Undistorter::new(camera_a),
            undistorter_b: Undistorter::new(camera_b),
        }
    }

    /// The `(first, second)` ports this triangulator was built for.
    #[inline]
    pub fn pair(&self) -> (Port, Port) {
        self.pair
    }

    /// Undistort and triangulate two index-aligned pixel batches.
    ///
    /// `xy_a` belongs to the first camera of the pair, `xy_b` to the second.
    /// Output slot `i` corresponds to input index `i`; degenerate
    /// correspondences come back as `None`. Empty input returns an empty
    /// vector without touching the solver.
    pub fn triangulate_points(&self, xy_a: &[Pt2], xy_b: &[Pt2]) -> Vec<Option<Pt3>> {
        if xy_a.is_empty() {
            return Vec::new();
        }
        let und_a = self.undistorter_a.undistort_points(xy_a);
        let und_b = self.undistorter_b.undistort_points(xy_b);

        und_a
            .iter()
            .zip(und_b.iter())
            .map(|(a, b)| {
                triangulate_pair(self.projector_a.matrix(), self.projector_b.matrix(), a, b)
            })
            .collect()
    }

    /// Triangulate a matched point packet for this pair.
    ///
    /// The packet's sequences must be oriented to this triangulator's pair
    /// order (first sequence = first port).
    pub fn triangulate(&self, packet: &PointPacket) -> TriangulatedPacket {
        TriangulatedPacket {
            pair: self.pair,
            frame_index: packet.frame_index,
            points: self.triangulate_points(&packet.points_a, &packet.points_b),
        }
    }
}
