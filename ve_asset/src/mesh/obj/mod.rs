mod builder;
mod meta;
mod parser;
mod triangulate;

use std::path::Path;

use ve_format::{
    material::Material,
    mesh::{Mesh, Vertex},
};

pub use self::meta::ObjMeta;
pub use self::parser::ObjError;
pub use self::triangulate::{triangulate, ConvexityCheck};

/// Result of decoding one `.obj` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjModel {
    pub meshes: Vec<Mesh>,
    /// Vertices of all meshes in encounter order.
    pub vertices: Vec<Vertex>,
    /// Indices into `vertices`.
    pub indices: Vec<u32>,
    pub materials: Vec<Material>,
}

pub fn load(path: &Path) -> Result<ObjModel, ObjError> {
    load_with(path, ObjMeta::default())
}

pub fn load_with(path: &Path, meta: ObjMeta) -> Result<ObjModel, ObjError> {
    parser::parse(path, meta)?.build()
}

/// Reusable decoder holding the result of the last successful [`Loader::load_file`].
#[derive(Debug, Default)]
pub struct Loader {
    meta: ObjMeta,
    model: ObjModel,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(meta: ObjMeta) -> Self {
        Self {
            meta,
            ..Self::default()
        }
    }

    /// Decodes `path`, replacing the previous result. On failure the loader is left empty.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ObjError> {
        self.model = ObjModel::default();
        self.model = load_with(path.as_ref(), self.meta)?;
        Ok(())
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.model.meshes
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.model.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.model.indices
    }

    pub fn materials(&self) -> &[Material] {
        &self.model.materials
    }

    pub fn model(&self) -> &ObjModel {
        &self.model
    }

    pub fn into_model(self) -> ObjModel {
        self.model
    }
}
