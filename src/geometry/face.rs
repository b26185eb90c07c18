// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygonal face of a winged-edge shape, carrying its feature layers

use super::face_layer::{FaceLayer, FaceTopology};
use super::nature::Nature;
use super::smooth_edge::SmoothEdge;
use super::winged_edge::{FaceId, OEdgeId};
use crate::config::SilhouetteConfig;
use crate::error::{MeshError, MeshResult};
use nalgebra::{Point2, Point3, Vector3};

/// Outcome of building the smooth edges of one or more faces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmoothEdgeStats {
    /// Layers visited
    pub layers: usize,
    /// Layers holding a smooth edge afterwards
    pub built: usize,
}

impl SmoothEdgeStats {
    pub fn without_edge(&self) -> usize {
        self.layers - self.built
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            layers: self.layers + other.layers,
            built: self.built + other.built,
        }
    }
}

/// Face of a winged-edge shape
#[derive(Debug, Clone)]
pub struct WXFace {
    id: FaceId,
    /// Oriented edges, in face order
    oedges: Vec<OEdgeId>,
    normal: Vector3<f32>,
    vertex_normals: Vec<Vector3<f32>>,
    tex_coords: Vec<Point2<f32>>,
    edge_marks: Vec<bool>,
    material_index: u32,
    center: Point3<f32>,
    front: bool,
    /// Distance to the viewpoint
    z: f32,
    /// Face normal against the view direction
    dotp: f32,
    layers: Vec<FaceLayer>,
}

impl WXFace {
    pub(crate) fn new(
        id: FaceId,
        oedges: Vec<OEdgeId>,
        normal: Vector3<f32>,
        vertex_normals: Vec<Vector3<f32>>,
        tex_coords: Vec<Point2<f32>>,
        edge_marks: Vec<bool>,
        material_index: u32,
    ) -> Self {
        Self {
            id,
            oedges,
            normal,
            vertex_normals,
            tex_coords,
            edge_marks,
            material_index,
            center: Point3::origin(),
            front: false,
            z: 0.0,
            dotp: 0.0,
            layers: Vec::new(),
        }
    }

    pub fn id(&self) -> FaceId {
        self.id
    }

    pub fn number_of_edges(&self) -> usize {
        self.oedges.len()
    }

    pub fn oedges(&self) -> &[OEdgeId] {
        &self.oedges
    }

    /// Oriented edge by cyclic index
    pub fn oedge(&self, index: usize) -> OEdgeId {
        self.oedges[index % self.oedges.len()]
    }

    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    pub(crate) fn set_normal(&mut self, normal: Vector3<f32>) {
        self.normal = normal;
    }

    pub fn vertex_normals(&self) -> &[Vector3<f32>] {
        &self.vertex_normals
    }

    pub fn tex_coords(&self) -> &[Point2<f32>] {
        &self.tex_coords
    }

    pub fn edge_marks(&self) -> &[bool] {
        &self.edge_marks
    }

    pub fn material_index(&self) -> u32 {
        self.material_index
    }

    pub fn set_material_index(&mut self, index: u32) {
        self.material_index = index;
    }

    /// Vertex-averaged center, kept in sync by the owning shape
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    pub(crate) fn set_center(&mut self, center: Point3<f32>) {
        self.center = center;
    }

    pub fn front(&self) -> bool {
        self.front
    }

    pub fn set_front(&mut self, front: bool) {
        self.front = front;
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn set_z(&mut self, z: f32) {
        self.z = z;
    }

    pub fn dotp(&self) -> f32 {
        self.dotp
    }

    pub fn set_dotp(&mut self, dotp: f32) {
        self.dotp = dotp;
    }

    pub fn topology(&self) -> FaceTopology<'_> {
        FaceTopology::new(&self.oedges, self.front)
    }

    /// Attach a layer, returning its index on this face
    pub fn add_smooth_layer(&mut self, layer: FaceLayer) -> MeshResult<usize> {
        if layer.dot_p().len() != self.number_of_edges() {
            return Err(MeshError::DotPCountMismatch {
                expected: self.number_of_edges(),
                actual: layer.dot_p().len(),
            });
        }
        self.layers.push(layer);
        Ok(self.layers.len() - 1)
    }

    pub fn smooth_layers(&self) -> &[FaceLayer] {
        &self.layers
    }

    pub fn smooth_layer(&self, index: usize) -> Option<&FaceLayer> {
        self.layers.get(index)
    }

    pub fn smooth_layer_mut(&mut self, index: usize) -> Option<&mut FaceLayer> {
        self.layers.get_mut(index)
    }

    /// Build (or fetch) the smooth edge of one layer
    pub fn build_smooth_edge(
        &mut self,
        layer: usize,
        config: &SilhouetteConfig,
    ) -> Option<&SmoothEdge> {
        let topology = FaceTopology::new(&self.oedges, self.front);
        self.layers.get_mut(layer)?.build_smooth_edge(topology, config)
    }

    /// Build the smooth edge of every layer
    pub fn build_smooth_edges(&mut self, config: &SilhouetteConfig) -> SmoothEdgeStats {
        let topology = FaceTopology::new(&self.oedges, self.front);
        let mut stats = SmoothEdgeStats::default();
        for layer in &mut self.layers {
            stats.layers += 1;
            if layer.build_smooth_edge(topology, config).is_some() {
                stats.built += 1;
            }
        }
        stats
    }

    /// Layers sharing at least one flag with `nature`
    pub fn retrieve_smooth_layers(&self, nature: Nature) -> impl Iterator<Item = &FaceLayer> {
        self.layers
            .iter()
            .filter(move |layer| layer.nature().intersects(nature))
    }

    /// Built smooth edges of the layers matching `nature`
    pub fn retrieve_smooth_edges(&self, nature: Nature) -> impl Iterator<Item = &SmoothEdge> {
        self.retrieve_smooth_layers(nature)
            .filter_map(FaceLayer::smooth_edge)
    }

    pub fn has_smooth_edges(&self) -> bool {
        self.layers.iter().any(FaceLayer::has_smooth_edge)
    }

    /// Drop view-dependent layers, ahead of a viewpoint change
    pub fn reset(&mut self) {
        self.layers.retain(|layer| !layer.is_view_dependent());
    }

    pub fn clear_layers(&mut self) {
        self.layers.clear();
    }
}
