//! Per-pair routing of matched point packets.
//!
//! The orchestrator enumerates every unordered pair of cameras in a
//! resolved array, builds one [`StereoTriangulator`] per pair, and routes
//! incoming packets to the matching triangulator. Triangulation is pure and
//! the per-pair state is read-only, so batches fan out across a thread pool
//! with no coordination.

use std::collections::BTreeMap;

use camrig_core::{PointPacket, Port, TriangulatedPacket};
use camrig_geom::StereoTriangulator;
use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use crate::CameraArray;

/// A packet referenced a camera pair that was never enumerated (for
/// example, one of its cameras is ignored or absent).
#[derive(Debug, Error)]
#[error("no triangulator for camera pair ({}, {})", pair.0, pair.1)]
pub struct UnknownPairError {
    pub pair: (Port, Port),
}

/// Owns one [`StereoTriangulator`] per camera pair of a resolved array.
#[derive(Clone, Debug)]
pub struct ArrayTriangulator {
    triangulators: BTreeMap<(Port, Port), StereoTriangulator>,
}

impl ArrayTriangulator {
    /// Enumerate all C(n,2) unordered pairs of the array's cameras
    /// (ascending port order, no self-pairs) and build their triangulators.
    pub fn new(array: &CameraArray) -> Self {
        let cameras: Vec<_> = array.cameras().values().collect();
        let mut triangulators = BTreeMap::new();

        for (i, camera_a) in cameras.iter().enumerate() {
            for camera_b in &cameras[i + 1..] {
                triangulators.insert(
                    (camera_a.port, camera_b.port),
                    StereoTriangulator::new(camera_a, camera_b),
                );
            }
        }
        debug!(
            "enumerated {} pairs over {} cameras",
            triangulators.len(),
            cameras.len()
        );

        Self { triangulators }
    }

    /// The enumerated pairs, ascending.
    pub fn pairs(&self) -> impl Iterator<Item = (Port, Port)> + '_ {
        self.triangulators.keys().copied()
    }

    /// Number of camera pairs.
    pub fn len(&self) -> usize {
        self.triangulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangulators.is_empty()
    }

    /// Route a packet to its pair's triangulator.
    ///
    /// The pair identity is undirected: a packet tagged `(b, a)` for an
    /// enumerated pair `(a, b)` is accepted with its point sequences
    /// swapped. A pair that was never enumerated fails with
    /// [`UnknownPairError`]; no other pair's state is touched.
    pub fn triangulate(&self, packet: &PointPacket) -> Result<TriangulatedPacket, UnknownPairError> {
        if let Some(triangulator) = self.triangulators.get(&packet.pair) {
            return Ok(triangulator.triangulate(packet));
        }
        let reversed = (packet.pair.1, packet.pair.0);
        if let Some(triangulator) = self.triangulators.get(&reversed) {
            return Ok(triangulator.triangulate(&packet.swapped()));
        }
        Err(UnknownPairError { pair: packet.pair })
    }

    /// Triangulate a batch of packets, independent pairs in parallel.
    ///
    /// Results preserve the input order; each packet fails or succeeds on
    /// its own.
    pub fn triangulate_batch(
        &self,
        packets: &[PointPacket],
    ) -> Vec<Result<TriangulatedPacket, UnknownPairError>> {
        packets.par_iter().map(|p| self.triangulate(p)).collect()
    }
}
