//! Inverse lens distortion.
//!
//! Maps observed (distorted) pixel coordinates to the undistorted pixel
//! coordinates an ideal pinhole camera would have produced, by fixed-point
//! iteration of the Brown-Conrady model.

use camrig_core::{CameraData, Distortion, Pt2, Real};

/// Number of fixed-point iterations used to invert the distortion model.
///
/// Three iterations are adequate for typical webcam lenses. The loop runs
/// exactly this many times with no convergence check; results for inputs
/// where the series diverges are returned as-is. Kept fixed for
/// compatibility with existing calibration results.
pub const UNDISTORT_ITERATIONS: usize = 3;

/// Per-camera pixel undistortion.
#[derive(Clone, Debug)]
pub struct Undistorter {
    fx: Real,
    fy: Real,
    cx: Real,
    cy: Real,
    distortion: Distortion,
}

impl Undistorter {
    pub fn new(camera: &CameraData) -> Self {
        Self {
            fx: camera.fx(),
            fy: camera.fy(),
            cx: camera.cx(),
            cy: camera.cy(),
            distortion: camera.distortion,
        }
    }

    /// Undistort a single pixel coordinate.
    pub fn undistort_point(&self, p: &Pt2) -> Pt2 {
        let Distortion { k1, k2, p1, p2, k3 } = self.distortion;

        let x0 = (p.x - self.cx) / self.fx;
        let y0 = (p.y - self.cy) / self.fy;
        let (mut x, mut y) = (x0, y0);

        for _ in 0..UNDISTORT_ITERATIONS {
            let r2 = x * x + y * y;
            let k_inv = 1.0 / (1.0 + k1 * r2 + k2 * r2 * r2 + k3 * r2 * r2 * r2);
            let dx = 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x);
            let dy = p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y;
            x = (x0 - dx) * k_inv;
            y = (y0 - dy) * k_inv;
        }

        Pt2::new(x * self.fx + self.cx, y * self.fy + self.cy)
    }

    /// Undistort an ordered batch of pixels, preserving index
    /// correspondence. Empty input yields empty output.
    pub fn undistort_points(&self, points: &[Pt2]) -> Vec<Pt2> {
        points.iter().map(|p| self.undistort_point(p)).collect()
    }
}
