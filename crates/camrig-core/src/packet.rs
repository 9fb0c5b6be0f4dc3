//! Matched point packets and triangulated results.
//!
//! A [`PointPacket`] is the per-frame, per-pair unit of work produced by an
//! external tracker/synchronizer: two index-aligned pixel coordinate
//! sequences, where index `i` in both sequences refers to the same physical
//! point seen by both cameras of the pair. A [`TriangulatedPacket`] is the
//! corresponding 3-D output, preserving index correspondence.

use crate::{Port, Pt2, Pt3};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Matched 2-D observations for one camera pair in one frame.
///
/// Zero-length sequences are valid: they mean the pair shared no detections
/// that frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointPacket {
    /// `(first, second)` camera ports this packet belongs to.
    pub pair: (Port, Port),
    /// Frame identifier assigned by the upstream synchronizer.
    pub frame_index: u64,
    /// Pixel coordinates observed by the first camera of the pair.
    pub points_a: Vec<Pt2>,
    /// Pixel coordinates observed by the second camera, index-aligned with
    /// `points_a`.
    pub points_b: Vec<Pt2>,
}

impl PointPacket {
    /// Construct a packet, validating that the two sequences are
    /// index-aligned.
    ///
    /// # Errors
    ///
    /// Returns an error if the point counts differ.
    pub fn new(
        pair: (Port, Port),
        frame_index: u64,
        points_a: Vec<Pt2>,
        points_b: Vec<Pt2>,
    ) -> Result<Self> {
        ensure!(
            points_a.len() == points_b.len(),
            "point counts for pair ({}, {}) must match: {} vs {}",
            pair.0,
            pair.1,
            points_a.len(),
            points_b.len()
        );
        Ok(Self {
            pair,
            frame_index,
            points_a,
            points_b,
        })
    }

    /// Number of matched points in this packet.
    #[inline]
    pub fn len(&self) -> usize {
        self.points_a.len()
    }

    /// Returns true if the pair shared no detections this frame.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points_a.is_empty()
    }

    /// Iterate over matched `(first camera, second camera)` pixel pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Pt2, &Pt2)> {
        self.points_a.iter().zip(self.points_b.iter())
    }

    /// The same packet with the pair orientation (and point sequences)
    /// swapped.
    pub fn swapped(&self) -> PointPacket {
        PointPacket {
            pair: (self.pair.1, self.pair.0),
            frame_index: self.frame_index,
            points_a: self.points_b.clone(),
            points_b: self.points_a.clone(),
        }
    }
}

/// Triangulated 3-D points for one camera pair in one frame.
///
/// `points[i]` corresponds to index `i` of the input packet; `None` marks a
/// degenerate triangulation (rays parallel or coincident, point at
/// infinity). Degeneracy is expected geometry, not an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TriangulatedPacket {
    /// Camera pair the points were triangulated from.
    pub pair: (Port, Port),
    /// Frame identifier carried over from the input packet.
    pub frame_index: u64,
    /// One world-frame point (or degeneracy sentinel) per matched index.
    pub points: Vec<Option<Pt3>>,
}

impl TriangulatedPacket {
    /// Number of result slots (equals the input point count).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the input packet was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the successfully triangulated points.
    pub fn valid_points(&self) -> impl Iterator<Item = &Pt3> {
        self.points.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_creation_validates_alignment() {
        let a = vec![Pt2::new(100.0, 200.0), Pt2::new(150.0, 250.0)];
        let b = vec![Pt2::new(110.0, 205.0), Pt2::new(160.0, 255.0)];

        let packet = PointPacket::new((0, 1), 42, a, b).unwrap();
        assert_eq!(packet.len(), 2);
        assert!(!packet.is_empty());
        assert_eq!(packet.iter().count(), 2);
    }

    #[test]
    fn packet_rejects_mismatched_lengths() {
        let a = vec![Pt2::new(100.0, 200.0)];
        let b = vec![Pt2::new(110.0, 205.0), Pt2::new(160.0, 255.0)];
        assert!(PointPacket::new((0, 1), 0, a, b).is_err());
    }

    #[test]
    fn empty_packet_is_valid() {
        let packet = PointPacket::new((2, 3), 7, Vec::new(), Vec::new()).unwrap();
        assert!(packet.is_empty());
        assert_eq!(packet.len(), 0);
    }

    #[test]
    fn swapped_reverses_pair_and_sequences() {
        let a = vec![Pt2::new(1.0, 2.0)];
        let b = vec![Pt2::new(3.0, 4.0)];
        let packet = PointPacket::new((0, 1), 5, a, b).unwrap();

        let swapped = packet.swapped();
        assert_eq!(swapped.pair, (1, 0));
        assert_eq!(swapped.frame_index, 5);
        assert_eq!(swapped.points_a[0], Pt2::new(3.0, 4.0));
        assert_eq!(swapped.points_b[0], Pt2::new(1.0, 2.0));
    }

    #[test]
    fn triangulated_packet_skips_degenerate_slots() {
        let packet = TriangulatedPacket {
            pair: (0, 1),
            frame_index: 0,
            points: vec![Some(Pt3::new(0.0, 0.0, 2.0)), None, Some(Pt3::new(1.0, 0.0, 2.0))],
        };
        assert_eq!(packet.len(), 3);
        assert_eq!(packet.valid_points().count(), 2);
    }

    #[test]
    fn packet_serde_round_trip() {
        let packet = PointPacket::new(
            (0, 2),
            12,
            vec![Pt2::new(320.0, 240.0)],
            vec![Pt2::new(330.0, 241.0)],
        )
        .unwrap();

        let json = serde_json::to_string(&packet).unwrap();
        let restored: PointPacket = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.pair, (0, 2));
        assert_eq!(restored.len(), packet.len());
    }
}
