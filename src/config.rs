// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smooth-edge extraction configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default tolerance added to the closest-point dot product before the
/// front/back test of a silhouette.
pub const DEFAULT_FRONT_TOLERANCE: f32 = 0.01;

/// Configuration file looked up in the working directory by [`SilhouetteConfig::load`]
pub const CONFIG_FILE_NAME: &str = "silhouette.toml";

/// Smooth-edge extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilhouetteConfig {
    /// Tolerance for the front/back orientation of silhouette edges
    pub front_tolerance: f32,
    /// Emit warnings for inconsistent face configurations
    pub diagnostics: bool,
    /// Process faces on the rayon pool
    pub parallel: bool,
    /// Worker count for a dedicated pool; `None` uses the global pool
    pub parallelism: Option<usize>,
}

impl Default for SilhouetteConfig {
    fn default() -> Self {
        Self {
            front_tolerance: DEFAULT_FRONT_TOLERANCE,
            diagnostics: false,
            parallel: true,
            parallelism: None, // Auto-detect
        }
    }
}

impl SilhouetteConfig {
    /// Sequential configuration, handy for deterministic debugging
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: SilhouetteConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE_NAME).exists() {
            Self::from_file(CONFIG_FILE_NAME)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `SILHOUETTE_*` environment variables on top of the current values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(tolerance) = std::env::var("SILHOUETTE_FRONT_TOLERANCE") {
            self.front_tolerance = tolerance
                .parse()
                .with_context(|| format!("Invalid SILHOUETTE_FRONT_TOLERANCE: {tolerance}"))?;
        }

        if let Ok(diagnostics) = std::env::var("SILHOUETTE_DIAGNOSTICS") {
            self.diagnostics = diagnostics.parse().unwrap_or(false);
        }

        if let Ok(parallel) = std::env::var("SILHOUETTE_PARALLEL") {
            self.parallel = parallel.parse().unwrap_or(true);
        }

        if let Ok(parallelism) = std::env::var("SILHOUETTE_PARALLELISM") {
            self.parallelism = parallelism.parse().ok();
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
