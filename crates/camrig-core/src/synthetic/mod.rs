//! Synthetic rig helpers.
//!
//! The functions here build ground-truth cameras, world point grids, and
//! matched point packets by projecting through the full (distorted) camera
//! model. Tests and examples use them to exercise resolution and
//! triangulation against known geometry.

mod rig;

pub use rig::*;
