//! Per-camera calibration data.
//!
//! A [`CameraData`] value carries everything a single physical camera
//! contributes to triangulation: intrinsics, lens distortion, calibration
//! quality, and - once the rig has been resolved into a common frame - the
//! camera's world pose.

use crate::{Mat3, Real, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Camera key: the port a camera is connected on.
pub type Port = u32;

/// Brown-Conrady lens distortion coefficients, in the order they are stored
/// in calibration files: `[k1, k2, p1, p2, k3]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Distortion {
    /// Second-order radial coefficient.
    pub k1: Real,
    /// Fourth-order radial coefficient.
    pub k2: Real,
    /// First tangential coefficient.
    pub p1: Real,
    /// Second tangential coefficient.
    pub p2: Real,
    /// Sixth-order radial coefficient.
    pub k3: Real,
}

impl Distortion {
    /// Build from a coefficient array in storage order `[k1, k2, p1, p2, k3]`.
    pub fn from_coeffs(c: [Real; 5]) -> Self {
        Self {
            k1: c[0],
            k2: c[1],
            p1: c[2],
            p2: c[3],
            k3: c[4],
        }
    }

    /// Coefficients in storage order `[k1, k2, p1, p2, k3]`.
    pub fn coeffs(&self) -> [Real; 5] {
        [self.k1, self.k2, self.p1, self.p2, self.k3]
    }

    /// True when every coefficient is zero (ideal pinhole).
    pub fn is_zero(&self) -> bool {
        self.coeffs().iter().all(|c| *c == 0.0)
    }

    /// Apply the forward distortion model to a normalized image coordinate.
    ///
    /// `n` is a pinhole-normalized coordinate `(x, y)`; the result is the
    /// distorted normalized coordinate the lens actually produces.
    pub fn apply(&self, n: &Vec2) -> Vec2 {
        let (x, y) = (n.x, n.y);
        let r2 = x * x + y * y;
        let radial = 1.0 + self.k1 * r2 + self.k2 * r2 * r2 + self.k3 * r2 * r2 * r2;
        let dx = 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let dy = self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y;
        Vec2::new(x * radial + dx, y * radial + dy)
    }
}

/// Calibration data for one physical camera.
///
/// Constructed once per calibration session and immutable afterwards;
/// re-calibrating builds a fresh [`CameraData`] (and a fresh array) rather
/// than mutating a live one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraData {
    /// Unique camera key.
    pub port: Port,
    /// Image size as `(width, height)` in pixels.
    pub size: (u32, u32),
    /// Display rotation in quarter turns (0-3). Orientation hint only; not
    /// used in any projection math.
    pub rotation_count: u8,
    /// Intrinsic calibration RMSE in pixels.
    pub error: Real,
    /// 3×3 intrinsic matrix K.
    pub matrix: Mat3,
    /// Lens distortion coefficients.
    pub distortion: Distortion,
    /// Exposure setting the camera was calibrated at.
    pub exposure: i32,
    /// Number of calibration grids captured.
    pub grid_count: u32,
    /// Excluded from the rig when set.
    pub ignore: bool,
    /// Resolutions the camera has been verified to stream at.
    pub verified_resolutions: Vec<(u32, u32)>,
    /// Rotation of the camera pose in the common world frame. Identity for
    /// the anchor camera.
    pub rotation: Mat3,
    /// Translation of the camera pose in the common world frame. Zero for
    /// the anchor camera.
    pub translation: Vec3,
}

impl CameraData {
    /// Focal length along X in pixels.
    #[inline]
    pub fn fx(&self) -> Real {
        self.matrix[(0, 0)]
    }

    /// Focal length along Y in pixels.
    #[inline]
    pub fn fy(&self) -> Real {
        self.matrix[(1, 1)]
    }

    /// Principal point X coordinate in pixels.
    #[inline]
    pub fn cx(&self) -> Real {
        self.matrix[(0, 2)]
    }

    /// Principal point Y coordinate in pixels.
    #[inline]
    pub fn cy(&self) -> Real {
        self.matrix[(1, 2)]
    }

    /// True when the pose is exactly the world origin (anchor camera).
    pub fn is_at_origin(&self) -> bool {
        self.rotation == Mat3::identity() && self.translation == Vec3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic;

    #[test]
    fn distortion_storage_order_round_trips() {
        let coeffs = [-0.1, 0.02, 0.001, -0.002, 0.003];
        let d = Distortion::from_coeffs(coeffs);
        assert_eq!(d.k1, -0.1);
        assert_eq!(d.p1, 0.001);
        assert_eq!(d.k3, 0.003);
        assert_eq!(d.coeffs(), coeffs);
    }

    #[test]
    fn zero_distortion_is_identity() {
        let d = Distortion::default();
        assert!(d.is_zero());
        let n = Vec2::new(0.3, -0.2);
        assert_eq!(d.apply(&n), n);
    }

    #[test]
    fn distortion_displaces_off_axis_points() {
        let d = Distortion::from_coeffs([-0.1, 0.0, 0.0, 0.0, 0.0]);
        let n = Vec2::new(0.4, 0.0);
        let distorted = d.apply(&n);
        // barrel distortion pulls points toward the optical axis
        assert!(distorted.x < n.x, "expected {} < {}", distorted.x, n.x);
        assert_eq!(distorted.y, 0.0);
    }

    #[test]
    fn intrinsic_accessors_read_k() {
        let cam = synthetic::test_camera(
            2,
            Mat3::identity(),
            Vec3::zeros(),
            Distortion::default(),
        );
        assert_eq!(cam.fx(), 800.0);
        assert_eq!(cam.fy(), 780.0);
        assert_eq!(cam.cx(), 640.0);
        assert_eq!(cam.cy(), 360.0);
        assert!(cam.is_at_origin());
    }

    #[test]
    fn camera_data_serde_round_trip() {
        let cam = synthetic::test_camera(
            1,
            Mat3::identity(),
            Vec3::new(0.4, 0.0, 0.0),
            Distortion::from_coeffs([-0.1, 0.02, 0.0, 0.0, 0.001]),
        );
        let json = serde_json::to_string(&cam).unwrap();
        let restored: CameraData = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.port, 1);
        assert_eq!(restored.translation, cam.translation);
        assert_eq!(restored.distortion, cam.distortion);
    }
}
