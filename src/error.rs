// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for winged-edge construction and layer attachment

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised while building a shape or attaching face layers.
///
/// The smooth-edge builder never produces one of these: a face without a
/// silhouette crossing is reported as `None`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A face needs at least three vertices.
    #[error("degenerate face: need at least 3 vertices, got {count}")]
    DegenerateFace { count: usize },

    /// Vertex id does not exist in the shape.
    #[error("invalid vertex index {index} (shape has {vertex_count} vertices)")]
    InvalidVertex { index: usize, vertex_count: usize },

    /// Two consecutive vertices of a face are the same vertex.
    #[error("face repeats vertex {index} on consecutive corners")]
    RepeatedVertex { index: usize },

    /// The edge between two vertices is already used in this direction or by two faces.
    #[error("non-manifold edge between vertices {a} and {b}")]
    NonManifoldEdge { a: usize, b: usize },

    /// Per-vertex attribute list does not match the vertex count.
    #[error("{attribute} list has {actual} entries, face has {expected} vertices")]
    AttributeCountMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Layer values are not index-aligned with the face's edges.
    #[error("face layer has {actual} dot products, face has {expected} edges")]
    DotPCountMismatch { expected: usize, actual: usize },

    /// Face id does not exist in the shape.
    #[error("invalid face index {index} (shape has {face_count} faces)")]
    InvalidFace { index: usize, face_count: usize },
}
