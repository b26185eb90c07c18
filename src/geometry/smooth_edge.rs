// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interpolated silhouette segment crossing a single face

use super::winged_edge::{OEdgeId, WXShape};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// How the segment meets the boundary of its face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Configuration {
    /// Both ends lie strictly inside a face edge
    EdgeEdge,
    /// Starts inside an edge, ends on a vertex
    EdgeVertex,
    /// Starts on a vertex, ends inside an edge
    VertexEdge,
    /// The segment is a mesh edge
    VertexVertex,
}

/// Where a feature line crosses a face.
///
/// The start lies on `woea` at parameter `ta`, the end on `woeb` at `tb`.
/// Both half-edges belong to the shape the edge was built from and are only
/// meaningful while that shape is alive and unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothEdge {
    pub woea: OEdgeId,
    pub woeb: OEdgeId,
    pub ta: f32,
    pub tb: f32,
    /// Whether the silhouette is seen from the front at its closest point
    pub front: bool,
    pub configuration: Configuration,
}

impl SmoothEdge {
    pub fn new(woea: OEdgeId, woeb: OEdgeId, ta: f32, tb: f32, configuration: Configuration) -> Self {
        Self {
            woea,
            woeb,
            ta,
            tb,
            front: false,
            configuration,
        }
    }

    pub fn set_front(&mut self, front: bool) {
        self.front = front;
    }

    /// Evaluate the start and end points on the shape
    pub fn endpoints(&self, shape: &WXShape) -> [Point3<f32>; 2] {
        [
            shape.point_on_oedge(self.woea, self.ta),
            shape.point_on_oedge(self.woeb, self.tb),
        ]
    }
}
