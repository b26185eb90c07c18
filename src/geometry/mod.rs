// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - winged-edge shape, feature layers and smooth edges

mod centroid;
mod face;
mod face_layer;
mod nature;
mod smooth_edge;
mod winged_edge;

pub use centroid::vertex_centroid;
pub use face::{SmoothEdgeStats, WXFace};
pub use face_layer::{FaceLayer, FaceTopology};
pub use nature::Nature;
pub use smooth_edge::{Configuration, SmoothEdge};
pub use winged_edge::{EdgeId, FaceId, OEdgeId, VertexId, WEdge, WOEdge, WVertex, WXShape};
