//! High-level entry crate for the `camrig-rs` toolbox.
//!
//! `camrig` resolves the geometry of a rigid array of calibrated cameras
//! into one common world frame and triangulates 3-D points from matched 2-D
//! observations:
//!
//! 1. Parse a calibration session document
//!    ([`pipeline::SessionConfig`]) carrying per-camera intrinsics and
//!    pairwise stereo extrinsics.
//! 2. Resolve every camera's pose against an anchor camera
//!    ([`pipeline::FrameResolver`]).
//! 3. Route matched point packets to per-pair triangulators
//!    ([`pipeline::ArrayTriangulator`]).
//!
//! Frame synchronization, 2-D tracking, and calibration itself are external
//! collaborators; this library consumes their outputs.
//!
//! ```
//! use camrig::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = r#"
//!     [cam_0]
//!     port = 0
//!     size = [1280, 720]
//!     rotation_count = 0
//!     error = 0.31
//!     matrix = [[800.0, 0.0, 640.0], [0.0, 780.0, 360.0], [0.0, 0.0, 1.0]]
//!     distortions = [-0.12, 0.03, 0.0008, -0.0005, 0.002]
//!     exposure = -7
//!     grid_count = 25
//!     ignore = false
//!     verified_resolutions = [[1280, 720]]
//!
//!     [cam_1]
//!     port = 1
//!     size = [1280, 720]
//!     rotation_count = 0
//!     error = 0.27
//!     matrix = [[795.0, 0.0, 652.0], [0.0, 790.0, 355.0], [0.0, 0.0, 1.0]]
//!     distortions = [-0.09, 0.01, 0.0, 0.0, 0.0]
//!     exposure = -7
//!     grid_count = 30
//!     ignore = false
//!     verified_resolutions = [[1280, 720]]
//!
//!     [stereo_0_1]
//!     rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
//!     translation = [0.5, 0.0, 0.02]
//!     RMSE = 0.52
//! "#;
//!
//! let config = SessionConfig::from_toml_str(document)?;
//! let array = FrameResolver::new(AnchorPolicy::Fixed(0)).resolve(&config)?;
//! assert_eq!(array.anchor(), 0);
//!
//! let triangulator = ArrayTriangulator::new(&array);
//! assert_eq!(triangulator.len(), 1);
//!
//! // an empty frame routes fine and produces an empty result
//! let packet = PointPacket::new((0, 1), 0, Vec::new(), Vec::new())?;
//! let result = triangulator.triangulate(&packet)?;
//! assert!(result.is_empty());
//! # Ok(())
//! # }
//! ```

/// Data model and math primitives.
pub mod core {
    pub use camrig_core::*;
}

/// Projection, undistortion, and linear triangulation.
pub mod geom {
    pub use camrig_geom::*;
}

/// Configuration, frame resolution, and pair orchestration.
pub mod pipeline {
    pub use camrig_pipeline::*;
}

/// Convenient re-exports for common use cases.
///
/// Import with `use camrig::prelude::*;` to get started quickly.
pub mod prelude {
    // Common types
    pub use crate::core::{
        CameraData, Distortion, Mat3, Mat4, PointPacket, Port, Pt2, Pt3, Real, StereoPair,
        TriangulatedPacket, Vec2, Vec3,
    };

    // Geometry engines
    pub use crate::geom::{Projector, StereoTriangulator, Undistorter};

    // Pipeline types
    pub use crate::pipeline::{
        AnchorPolicy, ArrayTriangulator, CameraArray, ConfigError, DisconnectedCameraError,
        FrameResolver, ResolveError, SessionConfig, UnknownPairError,
    };
}
