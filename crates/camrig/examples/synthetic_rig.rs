//! Triangulate a synthetic point grid seen by a three-camera rig.
//!
//! Builds ground-truth cameras, projects a shared grid through their true
//! (distorted) models, and recovers the 3-D points from every camera pair.

use anyhow::Result;
use camrig::core::{synthetic, Distortion, Mat3, Vec3};
use camrig::geom::StereoTriangulator;

fn main() -> Result<()> {
    let distortion = Distortion::from_coeffs([-0.1, 0.02, 0.0005, -0.0003, 0.0]);

    let cameras = [
        synthetic::test_camera(0, Mat3::identity(), Vec3::zeros(), distortion),
        synthetic::test_camera(
            1,
            synthetic::yaw_rotation(-0.1),
            Vec3::new(0.5, 0.0, 0.0),
            distortion,
        ),
        synthetic::test_camera(
            2,
            synthetic::yaw_rotation(0.12),
            Vec3::new(-0.45, 0.05, 0.0),
            distortion,
        ),
    ];

    let points = synthetic::target_points(4, 3, 0.15, 2.2);

    for (i, camera_a) in cameras.iter().enumerate() {
        for camera_b in &cameras[i + 1..] {
            let packet = synthetic::matched_packet(camera_a, camera_b, &points, 0)?;
            let triangulator = StereoTriangulator::new(camera_a, camera_b);
            let result = triangulator.triangulate(&packet);

            let max_err = points
                .iter()
                .zip(result.points.iter())
                .filter_map(|(truth, est)| est.map(|e| (e - truth).norm()))
                .fold(0.0_f64, f64::max);

            println!(
                "pair ({}, {}): {} points, max error {:.2e} m",
                camera_a.port,
                camera_b.port,
                result.valid_points().count(),
                max_err
            );
        }
    }

    Ok(())
}
