//! Camera array aggregate.
//!
//! A [`CameraArray`] is the resolved rig: every included camera posed in the
//! anchor camera's frame, plus the stereo edges the poses came from. It is
//! built once per calibration session (see [`FrameResolver`](crate::FrameResolver))
//! and never mutated; re-calibration replaces the whole value so in-flight
//! triangulation never observes a half-updated rig.

use std::collections::BTreeMap;

use anyhow::{ensure, Result};
use camrig_core::{CameraData, Port, StereoPair};
use serde::{Deserialize, Serialize};

/// A set of cameras resolved into one common world frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraArray {
    cameras: BTreeMap<Port, CameraData>,
    stereo: Vec<StereoPair>,
    anchor: Port,
}

impl CameraArray {
    /// Assemble an array from resolved cameras.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor port is missing from the camera set or
    /// the anchor camera is not posed at the world origin.
    pub fn new(
        cameras: BTreeMap<Port, CameraData>,
        stereo: Vec<StereoPair>,
        anchor: Port,
    ) -> Result<Self> {
        ensure!(!cameras.is_empty(), "camera array needs at least one camera");
        let anchor_camera = cameras
            .get(&anchor)
            .ok_or_else(|| anyhow::anyhow!("anchor port {anchor} is not in the camera set"))?;
        ensure!(
            anchor_camera.is_at_origin(),
            "anchor camera {anchor} must be posed at the world origin"
        );
        Ok(Self {
            cameras,
            stereo,
            anchor,
        })
    }

    /// The port whose camera defines the world frame.
    #[inline]
    pub fn anchor(&self) -> Port {
        self.anchor
    }

    /// Resolved cameras keyed by port.
    #[inline]
    pub fn cameras(&self) -> &BTreeMap<Port, CameraData> {
        &self.cameras
    }

    /// Look up one camera.
    pub fn camera(&self, port: Port) -> Option<&CameraData> {
        self.cameras.get(&port)
    }

    /// Included ports in ascending order.
    pub fn ports(&self) -> impl Iterator<Item = Port> + '_ {
        self.cameras.keys().copied()
    }

    /// The stereo edges the poses were resolved from.
    #[inline]
    pub fn stereo(&self) -> &[StereoPair] {
        &self.stereo
    }

    /// Number of included cameras.
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
