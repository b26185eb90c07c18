// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Winged Silhouette
//!
//! Feature-line extraction for stylized line rendering. Each face of a
//! winged-edge shape carries feature layers holding a view-dependent signal
//! per edge; the crate classifies the sign pattern of that signal and builds
//! the interpolated segment where a silhouette (or crease, ridge, ...) crosses
//! the face.

pub mod config;
pub mod error;
pub mod extractor;
pub mod geometry;
pub mod utils;

pub use config::SilhouetteConfig;
pub use error::{MeshError, MeshResult};
pub use extractor::SmoothEdgeExtractor;
pub use geometry::{
    Configuration, FaceId, FaceLayer, Nature, OEdgeId, SmoothEdge, SmoothEdgeStats, VertexId,
    WXFace, WXShape,
};

use anyhow::Result;

/// Build the smooth edge of every face layer of `shape`
pub fn extract_smooth_edges(shape: &mut WXShape, config: &SilhouetteConfig) -> Result<SmoothEdgeStats> {
    SmoothEdgeExtractor::new(config.clone()).extract(shape)
}
