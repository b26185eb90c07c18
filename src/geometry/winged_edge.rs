// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Winged-edge shape: vertices, edges, oriented half-edges and polygonal faces.
//!
//! Every edge owns one or two oriented edges (`WOEdge`), one per incident
//! face. An oriented edge runs from `a_vertex` to `b_vertex` and has the face
//! that owns it on its left.

use super::centroid::vertex_centroid;
use super::face::WXFace;
use super::face_layer::FaceLayer;
use super::nature::Nature;
use super::smooth_edge::SmoothEdge;
use crate::error::{MeshError, MeshResult};
use crate::utils::math::{lerp_point, polygon_normal};
use ahash::{AHashMap, AHashSet};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OEdgeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(pub usize);

/// Vertex of a winged-edge shape
#[derive(Debug, Clone)]
pub struct WVertex {
    pub position: Point3<f32>,
    /// Incident edges
    pub edges: Vec<EdgeId>,
    /// Lies on an edge used by a single face
    pub border: bool,
}

/// Oriented edge: one side of an edge, owned by a face
#[derive(Debug, Clone, Copy)]
pub struct WOEdge {
    pub a_vertex: VertexId,
    pub b_vertex: VertexId,
    /// Face on the left (owner)
    pub a_face: FaceId,
    /// Face on the right, if the edge is shared
    pub b_face: Option<FaceId>,
    pub owner: EdgeId,
}

/// Undirected edge joining one or two oriented edges
#[derive(Debug, Clone, Copy)]
pub struct WEdge {
    pub a_oedge: OEdgeId,
    pub b_oedge: Option<OEdgeId>,
    pub mark: bool,
}

impl WEdge {
    pub fn number_of_oedges(&self) -> usize {
        1 + usize::from(self.b_oedge.is_some())
    }
}

/// Winged-edge shape with feature-line face data
#[derive(Debug, Clone, Default)]
pub struct WXShape {
    vertices: Vec<WVertex>,
    oedges: Vec<WOEdge>,
    edges: Vec<WEdge>,
    faces: Vec<WXFace>,
    /// (min vertex, max vertex) -> edge
    edge_map: AHashMap<(usize, usize), EdgeId>,
}

impl WXShape {
    /// Create an empty shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its id
    pub fn add_vertex(&mut self, position: Point3<f32>) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(WVertex {
            position,
            edges: Vec::new(),
            border: false,
        });
        id
    }

    /// Create a face from vertices in counter-clockwise order.
    ///
    /// `edge_marks` is either empty or holds one flag per face edge.
    pub fn make_face(
        &mut self,
        vertices: &[VertexId],
        edge_marks: &[bool],
        material_index: u32,
    ) -> MeshResult<FaceId> {
        self.make_face_with_attributes(vertices, &[], &[], edge_marks, material_index)
    }

    /// Create a face with per-vertex normals and texture coordinates.
    ///
    /// Attribute lists are either empty or hold one entry per vertex. Missing
    /// normals default to the face normal.
    pub fn make_face_with_attributes(
        &mut self,
        vertices: &[VertexId],
        normals: &[Vector3<f32>],
        tex_coords: &[Point2<f32>],
        edge_marks: &[bool],
        material_index: u32,
    ) -> MeshResult<FaceId> {
        let n = vertices.len();
        self.validate_face(vertices)?;
        check_attribute_count("normal", n, normals.len())?;
        check_attribute_count("texture coordinate", n, tex_coords.len())?;
        check_attribute_count("edge mark", n, edge_marks.len())?;

        let face_id = FaceId(self.faces.len());
        let mut face_oedges = Vec::with_capacity(n);

        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let mark = edge_marks.get(i).copied().unwrap_or(false);
            face_oedges.push(self.link_oedge(a, b, face_id, mark));
        }

        for vertex in vertices {
            self.refresh_border(*vertex);
        }

        let positions: Vec<Point3<f32>> = vertices
            .iter()
            .map(|v| self.vertices[v.0].position)
            .collect();
        let normal = polygon_normal(&positions);
        let vertex_normals = if normals.is_empty() {
            vec![normal; n]
        } else {
            normals.to_vec()
        };
        let edge_marks = if edge_marks.is_empty() {
            vec![false; n]
        } else {
            edge_marks.to_vec()
        };

        self.faces.push(WXFace::new(
            face_id,
            face_oedges,
            normal,
            vertex_normals,
            tex_coords.to_vec(),
            edge_marks,
            material_index,
        ));
        self.compute_center(face_id);

        Ok(face_id)
    }

    /// Reject faces that would break the shape; leaves the shape untouched on error
    fn validate_face(&self, vertices: &[VertexId]) -> MeshResult<()> {
        let n = vertices.len();
        if n < 3 {
            return Err(MeshError::DegenerateFace { count: n });
        }
        if let Some(v) = vertices.iter().find(|v| v.0 >= self.vertices.len()) {
            return Err(MeshError::InvalidVertex {
                index: v.0,
                vertex_count: self.vertices.len(),
            });
        }

        let mut seen = AHashSet::with_capacity(n);
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            if a == b {
                return Err(MeshError::RepeatedVertex { index: a.0 });
            }
            let key = edge_key(a, b);
            let non_manifold = MeshError::NonManifoldEdge { a: a.0, b: b.0 };
            if !seen.insert(key) {
                return Err(non_manifold);
            }
            if let Some(edge) = self.edge_map.get(&key).map(|e| self.edges[e.0]) {
                // a shared edge must be traversed in the opposite direction
                if edge.b_oedge.is_some() || self.oedges[edge.a_oedge.0].a_vertex == a {
                    return Err(non_manifold);
                }
            }
        }
        Ok(())
    }

    fn link_oedge(&mut self, a: VertexId, b: VertexId, face: FaceId, mark: bool) -> OEdgeId {
        let oedge_id = OEdgeId(self.oedges.len());
        let key = edge_key(a, b);

        match self.edge_map.get(&key).copied() {
            Some(edge_id) => {
                let edge = &mut self.edges[edge_id.0];
                edge.b_oedge = Some(oedge_id);
                edge.mark |= mark;
                let twin = &mut self.oedges[edge.a_oedge.0];
                twin.b_face = Some(face);
                let twin_face = twin.a_face;
                self.oedges.push(WOEdge {
                    a_vertex: a,
                    b_vertex: b,
                    a_face: face,
                    b_face: Some(twin_face),
                    owner: edge_id,
                });
            }
            None => {
                let edge_id = EdgeId(self.edges.len());
                self.edges.push(WEdge {
                    a_oedge: oedge_id,
                    b_oedge: None,
                    mark,
                });
                self.edge_map.insert(key, edge_id);
                self.vertices[a.0].edges.push(edge_id);
                self.vertices[b.0].edges.push(edge_id);
                self.oedges.push(WOEdge {
                    a_vertex: a,
                    b_vertex: b,
                    a_face: face,
                    b_face: None,
                    owner: edge_id,
                });
            }
        }

        oedge_id
    }

    fn refresh_border(&mut self, vertex: VertexId) {
        let border = self.vertices[vertex.0]
            .edges
            .iter()
            .any(|e| self.edges[e.0].b_oedge.is_none());
        self.vertices[vertex.0].border = border;
    }

    /// Vertices of a face, in face order
    pub fn retrieve_vertex_list(&self, face: FaceId) -> Vec<VertexId> {
        self.faces[face.0]
            .oedges()
            .iter()
            .map(|oe| self.oedges[oe.0].a_vertex)
            .collect()
    }

    /// Recompute the cached centroid of a face from its current vertices
    pub fn compute_center(&mut self, face: FaceId) {
        let vertices = &self.vertices;
        let oedges = &self.oedges;
        let face = &mut self.faces[face.0];
        let center = vertex_centroid(
            face.oedges()
                .iter()
                .map(|oe| &vertices[oedges[oe.0].a_vertex.0].position),
        );
        if let Some(center) = center {
            face.set_center(center);
        }
    }

    /// Move a vertex, keeping centroids and normals of its faces in sync
    pub fn set_vertex_position(&mut self, vertex: VertexId, position: Point3<f32>) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        let Some(v) = self.vertices.get_mut(vertex.0) else {
            return Err(MeshError::InvalidVertex {
                index: vertex.0,
                vertex_count,
            });
        };
        v.position = position;

        let mut faces = Vec::new();
        for e in &self.vertices[vertex.0].edges {
            let edge = self.edges[e.0];
            faces.push(self.oedges[edge.a_oedge.0].a_face);
            if let Some(b) = edge.b_oedge {
                faces.push(self.oedges[b.0].a_face);
            }
        }
        faces.sort_unstable();
        faces.dedup();

        for face in faces {
            self.compute_center(face);
            let positions: Vec<Point3<f32>> = self
                .retrieve_vertex_list(face)
                .iter()
                .map(|v| self.vertices[v.0].position)
                .collect();
            self.faces[face.0].set_normal(polygon_normal(&positions));
        }
        Ok(())
    }

    /// Face across edge `index` of `face`, if the edge is shared
    pub fn bording_face(&self, face: FaceId, index: usize) -> Option<FaceId> {
        let oedge = self.faces[face.0].oedge(index);
        self.oedges[oedge.0].b_face
    }

    /// Point at parameter `t` along an oriented edge
    pub fn point_on_oedge(&self, oedge: OEdgeId, t: f32) -> Point3<f32> {
        let oe = &self.oedges[oedge.0];
        lerp_point(
            &self.vertices[oe.a_vertex.0].position,
            &self.vertices[oe.b_vertex.0].position,
            t,
        )
    }

    /// The other oriented edge of the same edge
    pub fn twin(&self, oedge: OEdgeId) -> Option<OEdgeId> {
        let edge = self.edges[self.oedges[oedge.0].owner.0];
        if edge.a_oedge == oedge {
            edge.b_oedge
        } else {
            Some(edge.a_oedge)
        }
    }

    /// Attach a layer to a face, returning its index on that face
    pub fn add_smooth_layer(&mut self, face: FaceId, layer: FaceLayer) -> MeshResult<usize> {
        let face_count = self.faces.len();
        self.faces
            .get_mut(face.0)
            .ok_or(MeshError::InvalidFace {
                index: face.0,
                face_count,
            })?
            .add_smooth_layer(layer)
    }

    /// Built smooth edges of every layer matching `nature`, with their face
    pub fn smooth_edges(&self, nature: Nature) -> Vec<(FaceId, SmoothEdge)> {
        self.faces
            .iter()
            .flat_map(|face| {
                face.retrieve_smooth_edges(nature)
                    .map(move |edge| (face.id(), *edge))
            })
            .collect()
    }

    pub fn vertex(&self, vertex: VertexId) -> &WVertex {
        &self.vertices[vertex.0]
    }

    pub fn oedge(&self, oedge: OEdgeId) -> &WOEdge {
        &self.oedges[oedge.0]
    }

    pub fn edge(&self, edge: EdgeId) -> &WEdge {
        &self.edges[edge.0]
    }

    pub fn face(&self, face: FaceId) -> &WXFace {
        &self.faces[face.0]
    }

    pub fn face_mut(&mut self, face: FaceId) -> &mut WXFace {
        &mut self.faces[face.0]
    }

    pub fn faces(&self) -> &[WXFace] {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut [WXFace] {
        &mut self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn oedge_count(&self) -> usize {
        self.oedges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

fn edge_key(a: VertexId, b: VertexId) -> (usize, usize) {
    if a.0 < b.0 {
        (a.0, b.0)
    } else {
        (b.0, a.0)
    }
}

fn check_attribute_count(attribute: &'static str, expected: usize, actual: usize) -> MeshResult<()> {
    if actual != 0 && actual != expected {
        return Err(MeshError::AttributeCountMismatch {
            attribute,
            expected,
            actual,
        });
    }
    Ok(())
}
