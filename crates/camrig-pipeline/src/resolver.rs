//! Common-frame resolution from stereo edges.
//!
//! The resolver picks an anchor camera, fixes it at the world origin, and
//! expresses every other camera's pose in that frame from the stereo edge
//! that links it directly to the anchor. Multi-hop chains are not composed:
//! a camera with no direct edge to the anchor is a
//! [`DisconnectedCameraError`]. The direct-edge lookup is deliberately
//! isolated in [`direct_edge_from_anchor`] so a path-composition step can
//! replace it without touching the array or the triangulators.

use std::collections::BTreeMap;

use camrig_core::{Port, Real, StereoPair};
use log::debug;
use thiserror::Error;

use crate::{CameraArray, SessionConfig};

/// Frame resolution cannot place a camera: it shares no stereo edge with
/// the anchor.
#[derive(Debug, Error)]
#[error("camera {port} has no stereo edge to anchor {anchor}")]
pub struct DisconnectedCameraError {
    pub port: Port,
    pub anchor: Port,
}

/// Errors raised while resolving a camera array.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Disconnected(#[from] DisconnectedCameraError),
    #[error("anchor port {0} is not an active camera in this session")]
    UnknownAnchor(Port),
    #[error("session has no active cameras")]
    NoCameras,
    #[error("camera array assembly failed: {0}")]
    Internal(#[from] anyhow::Error),
}

/// How the anchor camera is chosen.
///
/// The policy is injected rather than fixed: the best choice depends on the
/// session, and callers (GUI, CLI) own that decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorPolicy {
    /// Use the configured port as-is.
    Fixed(Port),
    /// Pick the active camera whose incident stereo edges have the lowest
    /// mean RMSE; ties break toward the lowest port.
    LowestMeanRmse,
}

/// Resolves every camera of a session into one common world frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameResolver {
    policy: AnchorPolicy,
}

impl FrameResolver {
    pub fn new(policy: AnchorPolicy) -> Self {
        Self { policy }
    }

    /// Build a [`CameraArray`] from a parsed session.
    ///
    /// Ignored cameras are excluded before resolution. The anchor receives
    /// the identity pose; every other camera takes its pose from its direct
    /// stereo edge to the anchor.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NoCameras`] if every camera is ignored
    /// - [`ResolveError::UnknownAnchor`] if a fixed anchor is absent/ignored
    /// - [`ResolveError::Disconnected`] naming the first camera (by port)
    ///   with no direct edge to the anchor
    pub fn resolve(&self, config: &SessionConfig) -> Result<CameraArray, ResolveError> {
        let active = config.active_ports();
        if active.is_empty() {
            return Err(ResolveError::NoCameras);
        }
        let edges: Vec<StereoPair> = config.active_stereo().into_iter().cloned().collect();

        let anchor = match self.policy {
            AnchorPolicy::Fixed(port) => {
                if !active.contains(&port) {
                    return Err(ResolveError::UnknownAnchor(port));
                }
                port
            }
            AnchorPolicy::LowestMeanRmse => lowest_mean_rmse_port(&active, &edges),
        };
        debug!("resolving {} cameras against anchor {anchor}", active.len());

        let mut cameras = BTreeMap::new();
        for port in active {
            let mut camera = config.cameras[&port].build();
            if port != anchor {
                let edge = direct_edge_from_anchor(&edges, anchor, port)
                    .ok_or(DisconnectedCameraError { port, anchor })?;
                debug!(
                    "camera {port} placed from edge ({}, {})",
                    edge.primary(),
                    edge.secondary()
                );
                camera.rotation = edge.rotation;
                camera.translation = edge.translation;
            }
            cameras.insert(port, camera);
        }

        Ok(CameraArray::new(cameras, edges, anchor)?)
    }
}

/// Find the stereo edge that places `port` relative to `anchor`, oriented
/// anchor-first.
///
/// An edge stored `(anchor, port)` is returned as-is; one stored
/// `(port, anchor)` is traversed backward, which inverts its transform.
/// Returns `None` when the two ports share no edge.
pub fn direct_edge_from_anchor(
    edges: &[StereoPair],
    anchor: Port,
    port: Port,
) -> Option<StereoPair> {
    edges.iter().find_map(|edge| {
        if edge.pair == (anchor, port) {
            Some(edge.clone())
        } else if edge.pair == (port, anchor) {
            Some(edge.inverse())
        } else {
            None
        }
    })
}

/// Anchor selection: the active port whose incident edges have the lowest
/// mean RMSE, ties broken by the lowest port.
fn lowest_mean_rmse_port(active: &[Port], edges: &[StereoPair]) -> Port {
    let mut sums: BTreeMap<Port, (Real, usize)> = BTreeMap::new();
    for edge in edges {
        for port in [edge.primary(), edge.secondary()] {
            let entry = sums.entry(port).or_insert((0.0, 0));
            entry.0 += edge.error;
            entry.1 += 1;
        }
    }

    active
        .iter()
        .copied()
        .min_by(|a, b| {
            let mean = |p: Port| {
                sums.get(&p)
                    .map(|(sum, n)| sum / *n as Real)
                    .unwrap_or(Real::INFINITY)
            };
            mean(*a)
                .partial_cmp(&mean(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(b))
        })
        .expect("active camera list is non-empty")
}
