//! Projection, undistortion, and linear triangulation.
//!
//! Every function here is a pure computation over cached matrices and input
//! point batches: nothing blocks, nothing mutates shared state, so
//! independent camera pairs can be processed in parallel by the caller.

mod projection;
mod triangulation;
mod undistort;

pub use projection::*;
pub use triangulation::*;
pub use undistort::*;
