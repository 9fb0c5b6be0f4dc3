//! Configuration parsing, frame resolution, and pair orchestration.
//!
//! This crate turns a calibration session document into a resolved
//! [`CameraArray`] (every camera posed in one common world frame) and routes
//! matched point packets to per-pair triangulators:
//!
//! `config → FrameResolver → CameraArray → ArrayTriangulator → 3-D points`

/// Camera array aggregate.
pub mod array;
/// Calibration session configuration document.
pub mod config;
/// Per-pair routing of matched point packets.
pub mod orchestrator;
/// Common-frame resolution from stereo edges.
pub mod resolver;

pub use array::*;
pub use config::*;
pub use orchestrator::*;
pub use resolver::*;
