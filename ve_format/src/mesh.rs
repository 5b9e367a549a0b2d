use crystal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::material::Material;

/// A fully resolved vertex, ready to be uploaded as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A named part of a model. Indices are local to `vertices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub material: Option<Material>,
}

impl Mesh {
    pub fn new(name: String, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            name,
            vertices,
            indices,
            material: None,
        }
    }

    pub fn with_material(mut self, material: Option<Material>) -> Self {
        self.material = material;
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
