// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smooth-edge pass over every face layer of a shape, optionally on rayon

use crate::config::SilhouetteConfig;
use crate::geometry::{SmoothEdgeStats, WXFace, WXShape};
use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

/// Builds the smooth edge of every face layer.
///
/// Face layers only read their own face, so faces are processed
/// independently and may run in parallel.
#[derive(Debug, Clone, Default)]
pub struct SmoothEdgeExtractor {
    config: SilhouetteConfig,
}

impl SmoothEdgeExtractor {
    pub fn new(config: SilhouetteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SilhouetteConfig {
        &self.config
    }

    /// Run the pass, returning how many layers ended up with an edge
    pub fn extract(&self, shape: &mut WXShape) -> Result<SmoothEdgeStats> {
        let config = &self.config;
        let faces = shape.faces_mut();

        let stats = if !config.parallel {
            Self::extract_sequential(faces, config)
        } else if let Some(threads) = config.parallelism {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .with_context(|| format!("Failed to build a pool of {threads} threads"))?;
            pool.install(|| Self::extract_parallel(faces, config))
        } else {
            Self::extract_parallel(faces, config)
        };

        debug!(
            faces = shape.face_count(),
            layers = stats.layers,
            built = stats.built,
            parallel = config.parallel,
            "smooth edge pass complete"
        );
        Ok(stats)
    }

    fn extract_sequential(faces: &mut [WXFace], config: &SilhouetteConfig) -> SmoothEdgeStats {
        faces
            .iter_mut()
            .map(|face| face.build_smooth_edges(config))
            .fold(SmoothEdgeStats::default(), SmoothEdgeStats::merge)
    }

    fn extract_parallel(faces: &mut [WXFace], config: &SilhouetteConfig) -> SmoothEdgeStats {
        faces
            .par_iter_mut()
            .map(|face| face.build_smooth_edges(config))
            .reduce(SmoothEdgeStats::default, SmoothEdgeStats::merge)
    }
}
