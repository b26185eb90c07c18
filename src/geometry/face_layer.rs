// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-face feature layer: sign classification of the view-dependent signal
//! and construction of the smooth edge crossing the face.
//!
//! A layer stores one scalar per face edge, index-aligned with the face's
//! oriented edges. The value at index `i` is the signal evaluated at the
//! start vertex of edge `i`. A value of exactly `0.0` means that vertex lies on
//! the feature line; the comparisons below are exact on purpose, the upstream
//! evaluator writes `0.0` deliberately and every case of the builder depends
//! on that count.

use super::nature::Nature;
use super::smooth_edge::{Configuration, SmoothEdge};
use super::winged_edge::OEdgeId;
use crate::config::SilhouetteConfig;
use crate::utils::math::linear_zero_crossing;
use tracing::{trace, warn};

/// The oriented edges and facing of the face a layer belongs to
#[derive(Debug, Clone, Copy)]
pub struct FaceTopology<'a> {
    pub oedges: &'a [OEdgeId],
    pub front: bool,
}

impl<'a> FaceTopology<'a> {
    pub fn new(oedges: &'a [OEdgeId], front: bool) -> Self {
        Self { oedges, front }
    }

    pub fn number_of_edges(&self) -> usize {
        self.oedges.len()
    }

    /// Oriented edge by cyclic index
    pub fn oedge(&self, index: usize) -> OEdgeId {
        self.oedges[index % self.oedges.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum SmoothEdgeState {
    #[default]
    Unbuilt,
    /// Every value is zero, no edge can exist
    Degenerate,
    Built(SmoothEdge),
}

/// Feature layer attached to one face
#[derive(Debug, Clone, Default)]
pub struct FaceLayer {
    dot_p: Vec<f32>,
    n_pos_dot_p: usize,
    n_null_dot_p: usize,
    nature: Nature,
    closest_point_index: usize,
    view_dependent: bool,
    smooth_edge: SmoothEdgeState,
}

impl FaceLayer {
    pub fn new(nature: Nature, view_dependent: bool) -> Self {
        Self {
            nature,
            view_dependent,
            ..Self::default()
        }
    }

    /// Layer pre-filled with one value per face edge
    pub fn with_dot_p(nature: Nature, view_dependent: bool, values: &[f32]) -> Self {
        let mut layer = Self::new(nature, view_dependent);
        layer.dot_p.reserve(values.len());
        for &value in values {
            layer.push_dot_p(value);
        }
        layer
    }

    pub fn dot_p(&self) -> &[f32] {
        &self.dot_p
    }

    pub fn n_pos_dot_p(&self) -> usize {
        self.n_pos_dot_p
    }

    pub fn n_null_dot_p(&self) -> usize {
        self.n_null_dot_p
    }

    pub fn n_neg_dot_p(&self) -> usize {
        self.dot_p.len() - self.n_pos_dot_p - self.n_null_dot_p
    }

    pub fn nature(&self) -> Nature {
        self.nature
    }

    pub fn set_nature(&mut self, nature: Nature) {
        self.nature = nature;
    }

    pub fn closest_point_index(&self) -> usize {
        self.closest_point_index
    }

    pub fn set_closest_point_index(&mut self, index: usize) {
        self.closest_point_index = index;
    }

    pub fn is_view_dependent(&self) -> bool {
        self.view_dependent
    }

    /// Append the value for the next edge
    pub fn push_dot_p(&mut self, value: f32) {
        self.dot_p.push(value);
        self.count_dot_p(value, 1);
    }

    /// Replace the value at `index`, returning the former one
    pub fn replace_dot_p(&mut self, index: usize, value: f32) -> Option<f32> {
        let former = std::mem::replace(self.dot_p.get_mut(index)?, value);
        self.count_dot_p(former, -1);
        self.count_dot_p(value, 1);
        Some(former)
    }

    fn count_dot_p(&mut self, value: f32, delta: isize) {
        if value > 0.0 {
            self.n_pos_dot_p = self.n_pos_dot_p.saturating_add_signed(delta);
        } else if value == 0.0 {
            self.n_null_dot_p = self.n_null_dot_p.saturating_add_signed(delta);
        }
    }

    /// Drop values, counters and any built edge
    pub fn clear(&mut self) {
        self.dot_p.clear();
        self.n_pos_dot_p = 0;
        self.n_null_dot_p = 0;
        self.closest_point_index = 0;
        self.smooth_edge = SmoothEdgeState::Unbuilt;
    }

    /// First edge whose start vertex lies exactly on the feature line
    pub fn get_0_vertex_index(&self) -> Option<usize> {
        self.dot_p.iter().position(|&value| value == 0.0)
    }

    /// First edge whose two endpoints both lie exactly on the feature line
    pub fn get_smooth_edge_index(&self) -> Option<usize> {
        let n = self.dot_p.len();
        (0..n).find(|&i| self.dot_p[i] == 0.0 && self.dot_p[(i + 1) % n] == 0.0)
    }

    /// Append, in ascending order, every edge the signal changes sign across
    pub fn retrieve_cusp_edges_indices(&self, cusp_edges: &mut Vec<usize>) {
        let n = self.dot_p.len();
        cusp_edges.extend((0..n).filter(|&i| self.dot_p[i] * self.dot_p[(i + 1) % n] < 0.0));
    }

    pub fn smooth_edge(&self) -> Option<&SmoothEdge> {
        match &self.smooth_edge {
            SmoothEdgeState::Built(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn has_smooth_edge(&self) -> bool {
        matches!(self.smooth_edge, SmoothEdgeState::Built(_))
    }

    /// Build the segment where the feature line crosses the face.
    ///
    /// Built at most once: later calls return the cached edge. A face whose
    /// values are all zero is remembered as having no edge. Every other
    /// configuration without a valid crossing yields `None`, which is a
    /// normal outcome.
    pub fn build_smooth_edge(
        &mut self,
        face: FaceTopology<'_>,
        config: &SilhouetteConfig,
    ) -> Option<&SmoothEdge> {
        match self.smooth_edge {
            SmoothEdgeState::Built(_) => return self.smooth_edge(),
            SmoothEdgeState::Degenerate => return None,
            SmoothEdgeState::Unbuilt => {}
        }

        let n = face.number_of_edges();
        if n == 0 || n != self.dot_p.len() {
            trace!(edges = n, values = self.dot_p.len(), "layer not aligned with face");
            return None;
        }

        if self.n_null_dot_p == n {
            self.smooth_edge = SmoothEdgeState::Degenerate;
            return None;
        }

        let edge = self.classify(face, config)?;
        trace!(configuration = ?edge.configuration, ta = edge.ta, tb = edge.tb, "built smooth edge");
        self.smooth_edge = SmoothEdgeState::Built(edge);
        self.smooth_edge()
    }

    fn classify(&self, face: FaceTopology<'_>, config: &SilhouetteConfig) -> Option<SmoothEdge> {
        let n = self.dot_p.len();
        let mut cusp_edges = Vec::with_capacity(2);

        let mut edge = if self.n_pos_dot_p != 0 && self.n_pos_dot_p != n && self.n_null_dot_p == 0 {
            // Enters through one edge and leaves through another
            self.retrieve_cusp_edges_indices(&mut cusp_edges);
            let (first, second) = match cusp_edges.as_slice() {
                &[first, second] => (first, second),
                _ => return None,
            };

            // The back-facing part stays on the right: the start edge goes from
            // positive to negative
            let (start, end) = if self.dot_p[first] > 0.0 {
                (first, second)
            } else {
                (second, first)
            };
            SmoothEdge::new(
                face.oedge(start),
                face.oedge(end),
                self.crossing(start),
                self.crossing(end),
                Configuration::EdgeEdge,
            )
        } else if self.n_null_dot_p == 1 {
            // One extremity is a mesh vertex
            if matches!(self.n_pos_dot_p, 0 | 2) {
                return None;
            }
            self.retrieve_cusp_edges_indices(&mut cusp_edges);
            let cusp = match cusp_edges.as_slice() {
                &[cusp] => cusp,
                _ => {
                    if config.diagnostics {
                        warn!(
                            cusp_edges = cusp_edges.len(),
                            "weird face configuration while building smooth edge"
                        );
                    }
                    return None;
                }
            };
            let zero = self.get_0_vertex_index()?;

            if self.dot_p[cusp] > 0.0 {
                SmoothEdge::new(
                    face.oedge(cusp),
                    face.oedge(zero),
                    self.crossing(cusp),
                    0.0,
                    Configuration::EdgeVertex,
                )
            } else {
                SmoothEdge::new(
                    face.oedge(zero),
                    face.oedge(cusp),
                    0.0,
                    self.crossing(cusp),
                    Configuration::VertexEdge,
                )
            }
        } else if self.n_null_dot_p == 2 {
            // The feature line runs along a mesh edge
            let index = self.get_smooth_edge_index()?;
            if face.front {
                // Collapses to a single point on front faces
                return None;
            }
            SmoothEdge::new(
                face.oedge((index + 1) % n),
                face.oedge((index + n - 1) % n),
                0.0,
                1.0,
                Configuration::VertexVertex,
            )
        } else {
            return None;
        };

        if self.nature.contains(Nature::SILHOUETTE) && self.n_null_dot_p != 2 {
            let front = self
                .dot_p
                .get(self.closest_point_index)
                .is_some_and(|&value| value + config.front_tolerance > 0.0);
            edge.set_front(front);
        }

        Some(edge)
    }

    fn crossing(&self, index: usize) -> f32 {
        let n = self.dot_p.len();
        linear_zero_crossing(self.dot_p[index], self.dot_p[(index + 1) % n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn oedges(n: usize) -> Vec<OEdgeId> {
        (0..n).map(|i| OEdgeId(100 + i)).collect()
    }

    fn silhouette(values: &[f32]) -> FaceLayer {
        FaceLayer::with_dot_p(Nature::SILHOUETTE, true, values)
    }

    #[test]
    fn test_counters_follow_pushes() {
        let layer = silhouette(&[1.0, 0.0, -1.0, 0.5, 0.0]);
        assert_eq!(layer.n_pos_dot_p(), 2);
        assert_eq!(layer.n_null_dot_p(), 2);
        assert_eq!(layer.n_neg_dot_p(), 1);
    }

    #[test]
    fn test_replace_dot_p_updates_counters() {
        let mut layer = silhouette(&[1.0, -1.0, 0.0]);
        assert_eq!(layer.replace_dot_p(2, 2.0), Some(0.0));
        assert_eq!(layer.n_pos_dot_p(), 2);
        assert_eq!(layer.n_null_dot_p(), 0);

        assert_eq!(layer.replace_dot_p(0, 0.0), Some(1.0));
        assert_eq!(layer.n_pos_dot_p(), 1);
        assert_eq!(layer.n_null_dot_p(), 1);

        assert_eq!(layer.replace_dot_p(7, 1.0), None);
    }

    #[test]
    fn test_zero_vertex_index() {
        assert_eq!(silhouette(&[1.0, 0.0, -1.0, 0.0]).get_0_vertex_index(), Some(1));
        assert_eq!(silhouette(&[1.0, -1.0, 2.0]).get_0_vertex_index(), None);
    }

    #[test]
    fn test_smooth_edge_index_wraps_around() {
        assert_eq!(silhouette(&[0.0, 1.0, 0.0]).get_smooth_edge_index(), Some(2));
        assert_eq!(silhouette(&[0.0, 1.0, 0.0, -1.0]).get_smooth_edge_index(), None);
    }

    #[test]
    fn test_cusp_edges_ascending() {
        let mut cusps = Vec::new();
        silhouette(&[1.0, -1.0, -1.0, 1.0]).retrieve_cusp_edges_indices(&mut cusps);
        assert_eq!(cusps, vec![0, 2]);

        // Zeros are not sign changes
        cusps.clear();
        silhouette(&[1.0, 0.0, -1.0, 0.5]).retrieve_cusp_edges_indices(&mut cusps);
        assert_eq!(cusps, vec![2]);
    }

    #[test]
    fn test_two_interior_crossings() {
        let edges = oedges(4);
        let mut layer = silhouette(&[1.0, -1.0, -1.0, 1.0]);
        let edge = *layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .unwrap();

        assert_eq!(edge.woea, edges[0]);
        assert_eq!(edge.woeb, edges[2]);
        assert_relative_eq!(edge.ta, 0.5);
        assert_relative_eq!(edge.tb, 0.5);
        assert_eq!(edge.configuration, Configuration::EdgeEdge);
        // closest point is index 0 with a positive value
        assert!(edge.front);
    }

    #[test]
    fn test_two_crossings_start_from_positive_edge() {
        let edges = oedges(4);
        let mut layer = silhouette(&[-1.0, 3.0, 1.0, -1.0]);
        let edge = *layer
            .build_smooth_edge(FaceTopology::new(&edges, false), &SilhouetteConfig::default())
            .unwrap();

        // cusp edges are 0 (negative start) and 2 (positive start)
        assert_eq!(edge.woea, edges[2]);
        assert_eq!(edge.woeb, edges[0]);
        assert_relative_eq!(edge.ta, 0.5);
        assert_relative_eq!(edge.tb, 0.25);
        assert!(!edge.front);
    }

    #[test]
    fn test_more_than_two_cusps_builds_nothing() {
        let edges = oedges(4);
        let mut layer = silhouette(&[1.0, -1.0, 1.0, -1.0]);
        assert!(layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .is_none());
        assert!(!layer.has_smooth_edge());
    }

    #[test]
    fn test_no_sign_change_builds_nothing() {
        let edges = oedges(3);
        let config = SilhouetteConfig::default();
        assert!(silhouette(&[1.0, 2.0, 3.0])
            .build_smooth_edge(FaceTopology::new(&edges, true), &config)
            .is_none());
        assert!(silhouette(&[-1.0, -2.0, -3.0])
            .build_smooth_edge(FaceTopology::new(&edges, true), &config)
            .is_none());
    }

    #[test]
    fn test_one_null_with_two_positives_is_rejected() {
        let edges = oedges(4);
        let mut layer = silhouette(&[1.0, 0.0, -1.0, 0.5]);
        assert_eq!(layer.n_pos_dot_p(), 2);
        assert_eq!(layer.get_0_vertex_index(), Some(1));
        assert!(layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .is_none());
    }

    #[test]
    fn test_one_null_vertex_start() {
        let edges = oedges(4);
        let mut layer = silhouette(&[1.0, 0.0, -1.0, -0.5]);
        let edge = *layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .unwrap();

        assert_eq!(edge.woea, edges[1]);
        assert_eq!(edge.woeb, edges[3]);
        assert_eq!(edge.ta, 0.0);
        assert_relative_eq!(edge.tb, 1.0 / 3.0, epsilon = 1e-6);
        assert_eq!(edge.configuration, Configuration::VertexEdge);
    }

    #[test]
    fn test_one_null_edge_start() {
        let edges = oedges(4);
        let mut layer = silhouette(&[0.0, 1.0, -1.0, -1.0]);
        let edge = *layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .unwrap();

        assert_eq!(edge.woea, edges[1]);
        assert_eq!(edge.woeb, edges[0]);
        assert_relative_eq!(edge.ta, 0.5);
        assert_eq!(edge.tb, 0.0);
        assert_eq!(edge.configuration, Configuration::EdgeVertex);
        // closest point sits on the line itself, inside the tolerance
        assert!(edge.front);
    }

    #[test]
    fn test_edge_on_boundary_back_face() {
        let edges = oedges(3);
        let mut layer = silhouette(&[0.0, 0.0, 1.0]);
        layer.set_closest_point_index(2);
        let edge = *layer
            .build_smooth_edge(FaceTopology::new(&edges, false), &SilhouetteConfig::default())
            .unwrap();

        assert_eq!(edge.woea, edges[1]);
        assert_eq!(edge.woeb, edges[2]);
        assert_eq!((edge.ta, edge.tb), (0.0, 1.0));
        assert_eq!(edge.configuration, Configuration::VertexVertex);
        // orientation is never evaluated on mesh edges
        assert!(!edge.front);
    }

    #[test]
    fn test_edge_on_boundary_front_face_is_skipped() {
        let edges = oedges(3);
        let mut layer = silhouette(&[0.0, 0.0, 1.0]);
        assert!(layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .is_none());
    }

    #[test]
    fn test_two_separate_nulls_build_nothing() {
        let edges = oedges(4);
        let mut layer = silhouette(&[0.0, 1.0, 0.0, -1.0]);
        assert!(layer
            .build_smooth_edge(FaceTopology::new(&edges, false), &SilhouetteConfig::default())
            .is_none());
    }

    #[test]
    fn test_all_zero_is_degenerate() {
        let edges = oedges(3);
        let mut layer = silhouette(&[0.0, 0.0, 0.0]);
        let config = SilhouetteConfig::default();
        assert!(layer.build_smooth_edge(FaceTopology::new(&edges, false), &config).is_none());

        // stays degenerate even once values change
        layer.replace_dot_p(0, 1.0);
        assert!(layer.build_smooth_edge(FaceTopology::new(&edges, false), &config).is_none());
    }

    #[test]
    fn test_three_nulls_unsupported() {
        let edges = oedges(4);
        let mut layer = silhouette(&[0.0, 0.0, 0.0, 1.0]);
        assert!(layer
            .build_smooth_edge(FaceTopology::new(&edges, false), &SilhouetteConfig::default())
            .is_none());
    }

    #[test]
    fn test_build_is_cached() {
        let edges = oedges(4);
        let config = SilhouetteConfig::default();
        let mut layer = silhouette(&[1.0, -1.0, -1.0, 1.0]);
        let first = *layer.build_smooth_edge(FaceTopology::new(&edges, true), &config).unwrap();

        // values changed after the build are ignored
        layer.replace_dot_p(1, 1.0);
        let second = *layer.build_smooth_edge(FaceTopology::new(&edges, true), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_front_tolerance() {
        let edges = oedges(4);
        let mut layer = silhouette(&[1.0, -1.0, -1.0, 1.0]);
        layer.set_closest_point_index(1);
        let edge = *layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .unwrap();
        assert!(!edge.front);

        let mut near_zero = silhouette(&[1.0, -0.005, -1.0, 1.0]);
        near_zero.set_closest_point_index(1);
        let edge = *near_zero
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .unwrap();
        assert!(edge.front);
    }

    #[test]
    fn test_non_silhouette_keeps_default_orientation() {
        let edges = oedges(4);
        let mut layer = FaceLayer::with_dot_p(Nature::RIDGE, false, &[1.0, -1.0, -1.0, 1.0]);
        let edge = *layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .unwrap();
        assert!(!edge.front);
    }

    #[test]
    fn test_misaligned_layer_builds_nothing() {
        let edges = oedges(3);
        let mut layer = silhouette(&[1.0, -1.0, -1.0, 1.0]);
        assert!(layer
            .build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default())
            .is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let edges = oedges(4);
        let mut layer = silhouette(&[1.0, -1.0, -1.0, 1.0]);
        layer.build_smooth_edge(FaceTopology::new(&edges, true), &SilhouetteConfig::default());
        assert!(layer.has_smooth_edge());

        layer.clear();
        assert!(layer.dot_p().is_empty());
        assert_eq!(layer.n_pos_dot_p(), 0);
        assert!(!layer.has_smooth_edge());
    }
}
