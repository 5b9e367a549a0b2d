use std::collections::HashMap;

use crystal::prelude::*;
use serde::{Deserialize, Serialize};

/// Texture slots a material can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureMap {
    /// `map_Ka`
    Ambient,
    /// `map_Kd`
    Diffuse,
    /// `map_Ks`
    Specular,
    /// `map_Ns`
    SpecularHighlight,
    /// `map_d`
    Alpha,
    /// `map_Bump`, `map_bump` or `bump`
    Bump,
}

/// Surface description decoded from a `.mtl` file.
///
/// Colors default to black and scalars to zero; consumers usually render a
/// mesh without material as opaque white.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// `Ka`
    pub ambient: Vec3,
    /// `Kd`
    pub diffuse: Vec3,
    /// `Ks`
    pub specular: Vec3,
    /// `Ns`
    pub specular_exponent: f32,
    /// `Ni`
    pub optical_density: f32,
    /// `d`
    pub dissolve: f32,
    /// `illum`
    pub illumination: i32,
    pub texture_maps: HashMap<TextureMap, String>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn texture_map(&self, kind: TextureMap) -> Option<&str> {
        self.texture_maps.get(&kind).map(String::as_str)
    }
}
