//! Pairwise stereo extrinsics.
//!
//! A [`StereoPair`] stores the relative pose produced by stereo-calibrating
//! two cameras: the secondary camera's rotation and translation relative to
//! the primary, plus the calibration RMSE. The pair identity is undirected
//! (it links two ports) but the stored data is directional; [`StereoPair::inverse`]
//! re-orients it.

use crate::{Mat3, Mat4, Port, Real, Vec3};
use serde::{Deserialize, Serialize};

/// Relative pose between one calibrated camera pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StereoPair {
    /// `(primary, secondary)` ports. The rotation/translation express the
    /// secondary camera's pose relative to the primary.
    pub pair: (Port, Port),
    /// Orthonormal rotation of the secondary relative to the primary.
    pub rotation: Mat3,
    /// Translation of the secondary relative to the primary.
    pub translation: Vec3,
    /// Stereo calibration RMSE in pixels.
    pub error: Real,
}

impl StereoPair {
    pub fn new(pair: (Port, Port), rotation: Mat3, translation: Vec3, error: Real) -> Self {
        Self {
            pair,
            rotation,
            translation,
            error,
        }
    }

    /// Primary port (the frame the stored pose is expressed in).
    #[inline]
    pub fn primary(&self) -> Port {
        self.pair.0
    }

    /// Secondary port (the camera the stored pose belongs to).
    #[inline]
    pub fn secondary(&self) -> Port {
        self.pair.1
    }

    /// True when the pair links `a` and `b` in either orientation.
    pub fn connects(&self, a: Port, b: Port) -> bool {
        self.pair == (a, b) || self.pair == (b, a)
    }

    /// 4×4 homogeneous transformation: rotation and translation stacked into
    /// the top three rows, `[0, 0, 0, 1]` in the last.
    pub fn transformation(&self) -> Mat4 {
        let mut t = Mat4::identity();
        t.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        t.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        t
    }

    /// The same edge traversed backward: ports swapped, rotation inverted,
    /// translation carried through the inverse (`R⁻¹`, `−R⁻¹t`).
    pub fn inverse(&self) -> StereoPair {
        let r_inv = self.rotation.transpose();
        StereoPair {
            pair: (self.pair.1, self.pair.0),
            rotation: r_inv,
            translation: -(r_inv * self.translation),
            error: self.error,
        }
    }
}
