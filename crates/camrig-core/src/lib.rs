//! Core data model and math primitives for `camrig-rs`.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec2`, `Pt3`, ...),
//! - the per-camera calibration record ([`CameraData`]) and lens
//!   distortion coefficients ([`Distortion`]),
//! - pairwise stereo extrinsics ([`StereoPair`]),
//! - matched 2-D point packets and their 3-D results ([`PointPacket`],
//!   [`TriangulatedPacket`]),
//! - synthetic rig generation for tests and examples.
//!
//! Geometry convention: a camera's stored `rotation`/`translation` express
//! its pose in the common world frame (the anchor camera's frame). Projection
//! into a camera applies the inverted pose; see `camrig-geom`.

/// Per-camera calibration data.
pub mod camera;
/// Linear algebra type aliases and helpers.
pub mod math;
/// Matched point packets and triangulated results.
pub mod packet;
/// Pairwise stereo extrinsics.
pub mod stereo;
/// Synthetic rig generation helpers.
pub mod synthetic;

pub use camera::*;
pub use math::*;
pub use packet::*;
pub use stereo::*;
