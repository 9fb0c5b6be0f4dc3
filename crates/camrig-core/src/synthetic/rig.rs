use crate::{CameraData, Distortion, Mat3, PointPacket, Port, Pt2, Pt3, Real, Vec2, Vec3};
use anyhow::Result;

/// Build a 3×3 intrinsic matrix from focal lengths and principal point.
pub fn intrinsic_matrix(fx: Real, fy: Real, cx: Real, cy: Real) -> Mat3 {
    Mat3::new(fx, 0.0, cx, 0.0, fy, cy, 0.0, 0.0, 1.0)
}

/// Rotation by `angle` radians about the +Y axis.
pub fn yaw_rotation(angle: Real) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
}

/// A camera with typical webcam intrinsics and the given world pose.
pub fn test_camera(port: Port, rotation: Mat3, translation: Vec3, distortion: Distortion) -> CameraData {
    CameraData {
        port,
        size: (1280, 720),
        rotation_count: 0,
        error: 0.3,
        matrix: intrinsic_matrix(800.0, 780.0, 640.0, 360.0),
        distortion,
        exposure: -7,
        grid_count: 25,
        ignore: false,
        verified_resolutions: vec![(640, 360), (1280, 720)],
        rotation,
        translation,
    }
}

/// Generate an `nx * ny` grid of world points centered on the optical axis
/// at distance `depth`, ordered row-major (Y major).
pub fn target_points(nx: usize, ny: usize, spacing: Real, depth: Real) -> Vec<Pt3> {
    let x0 = -(nx.saturating_sub(1) as Real) * spacing * 0.5;
    let y0 = -(ny.saturating_sub(1) as Real) * spacing * 0.5;
    let mut points = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            points.push(Pt3::new(
                x0 + i as Real * spacing,
                y0 + j as Real * spacing,
                depth,
            ));
        }
    }
    points
}

/// Project a world point through the camera's true (distorted) model.
///
/// Applies the inverted world pose (the same `[Rᵀ | −t]` convention the
/// projection matrices use), pinhole-normalizes, distorts, and maps through
/// K. Returns `None` for points at or behind the camera plane.
pub fn project_point(camera: &CameraData, p_w: &Pt3) -> Option<Pt2> {
    let p_c = camera.rotation.transpose() * p_w.coords - camera.translation;
    if p_c.z <= 0.0 {
        return None;
    }
    let n = Vec2::new(p_c.x / p_c.z, p_c.y / p_c.z);
    let d = camera.distortion.apply(&n);
    Some(Pt2::new(
        camera.fx() * d.x + camera.cx(),
        camera.fy() * d.y + camera.cy(),
    ))
}

/// Project a set of world points, requiring every point to be projectable.
pub fn project_points(camera: &CameraData, points: &[Pt3]) -> Result<Vec<Pt2>> {
    let mut pixels = Vec::with_capacity(points.len());
    for (idx, p) in points.iter().enumerate() {
        let Some(uv) = project_point(camera, p) else {
            anyhow::bail!("point {idx} not projectable into camera {}", camera.port);
        };
        pixels.push(uv);
    }
    Ok(pixels)
}

/// Build the matched point packet two cameras would report for a shared set
/// of world points.
pub fn matched_packet(
    camera_a: &CameraData,
    camera_b: &CameraData,
    points: &[Pt3],
    frame_index: u64,
) -> Result<PointPacket> {
    let xy_a = project_points(camera_a, points)?;
    let xy_b = project_points(camera_b, points)?;
    PointPacket::new((camera_a.port, camera_b.port), frame_index, xy_a, xy_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_rotation;

    #[test]
    fn yaw_rotation_is_orthonormal() {
        assert!(is_rotation(&yaw_rotation(0.35), 1e-12));
        assert!(is_rotation(&yaw_rotation(-1.2), 1e-12));
    }

    #[test]
    fn target_grid_is_centered() {
        let points = target_points(3, 3, 0.1, 2.0);
        assert_eq!(points.len(), 9);
        assert_eq!(points[4], Pt3::new(0.0, 0.0, 2.0));

        let cx: Real = points.iter().map(|p| p.x).sum::<Real>() / 9.0;
        assert!(cx.abs() < 1e-12);
    }

    #[test]
    fn origin_camera_projects_axis_point_to_principal_point() {
        let cam = test_camera(0, Mat3::identity(), Vec3::zeros(), Distortion::default());
        let uv = project_point(&cam, &Pt3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(uv, Pt2::new(640.0, 360.0));
    }

    #[test]
    fn points_behind_camera_are_rejected() {
        let cam = test_camera(0, Mat3::identity(), Vec3::zeros(), Distortion::default());
        assert!(project_point(&cam, &Pt3::new(0.0, 0.0, -1.0)).is_none());
        assert!(project_points(&cam, &[Pt3::new(0.0, 0.0, -1.0)]).is_err());
    }

    #[test]
    fn matched_packet_pairs_projections_by_index() {
        let cam_a = test_camera(0, Mat3::identity(), Vec3::zeros(), Distortion::default());
        let cam_b = test_camera(
            1,
            Mat3::identity(),
            Vec3::new(0.4, 0.0, 0.0),
            Distortion::default(),
        );
        let points = target_points(2, 2, 0.2, 2.0);

        let packet = matched_packet(&cam_a, &cam_b, &points, 3).unwrap();
        assert_eq!(packet.pair, (0, 1));
        assert_eq!(packet.len(), 4);
        // the second camera sits to the +X side, so it sees points shifted left
        for (a, b) in packet.iter() {
            assert!(b.x < a.x, "expected {} < {}", b.x, a.x);
        }
    }
}
