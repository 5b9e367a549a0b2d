use std::path::{Path, PathBuf};

use crystal::prelude::*;
use log::{debug, info, warn};
use ve_format::{
    material::Material,
    mesh::{Mesh, Vertex},
};

use super::{
    meta::ObjMeta,
    parser::ObjError,
    triangulate::triangulate,
    ObjModel,
};
use crate::{mesh::mtl, text, utils};

pub(crate) const UNNAMED: &str = "unnamed";

/// One vertex of a face line, still holding the raw index tokens.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ObjFaceIndex<'a> {
    pub(crate) vert_i: &'a str,
    pub(crate) uv_i: Option<&'a str>,
    pub(crate) normal_i: Option<&'a str>,
}

#[derive(Debug, Default, PartialEq)]
pub(crate) struct ObjFace<'a> {
    pub(crate) face_i: Vec<ObjFaceIndex<'a>>,
}

#[derive(Debug, Default)]
pub(crate) struct ObjSubmesh {
    pub(crate) name: String,
    pub(crate) material: Option<String>,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) indices: Vec<u32>,
}

impl ObjSubmesh {
    fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }
}

/// Everything collected while walking the lines of one `.obj` file.
#[derive(Debug, Default)]
pub(crate) struct ObjMeshBuilder {
    pub(crate) path: PathBuf,
    pub(crate) meta: ObjMeta,
    pub(crate) positions: Vec<Vec3>,
    pub(crate) uvs: Vec<Vec2>,
    pub(crate) normals: Vec<Vec3>,
    /// Set once the first `o`/`g` marker was seen.
    pub(crate) listening: bool,
    pub(crate) curr_submesh: ObjSubmesh,
    pub(crate) submeshes: Vec<ObjSubmesh>,
    // whole-file buffers
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) indices: Vec<u32>,
    pub(crate) materials: Vec<Material>,
}

impl ObjMeshBuilder {
    pub(crate) fn new(path: &Path, meta: ObjMeta) -> Self {
        Self {
            path: path.to_owned(),
            meta,
            curr_submesh: ObjSubmesh {
                name: UNNAMED.into(),
                ..ObjSubmesh::default()
            },
            ..Default::default()
        }
    }

    pub(crate) fn set_group(&mut self, name: &str) {
        let name = if name.is_empty() { UNNAMED } else { name };

        if self.listening && !self.curr_submesh.is_empty() {
            self.finish_submesh();
        }

        self.listening = true;
        self.curr_submesh.name = name.into();
    }

    pub(crate) fn use_material(&mut self, name: &str) {
        // a material switch inside a group starts a new submesh
        if !self.curr_submesh.is_empty() {
            self.finish_submesh();
        }

        self.curr_submesh.material = if name.is_empty() {
            None
        } else {
            Some(name.into())
        };
    }

    pub(crate) fn load_materials(&mut self, file: &str) {
        let path = utils::sibling_path(&self.path, file);

        match mtl::load(&path) {
            Ok(materials) => {
                info!("Found {} materials in {}", materials.len(), path.display());
                self.materials.extend(materials);
            }
            Err(err) => warn!("Could not load materials: {} ({})", err, path.display()),
        }
    }

    pub(crate) fn push_position(&mut self, position: [f32; 3]) {
        self.positions.push(self.flip(position));
    }

    pub(crate) fn push_uv(&mut self, uv: [f32; 2]) {
        self.uvs.push(uv.into());
    }

    pub(crate) fn push_normal(&mut self, normal: [f32; 3]) {
        self.normals.push(self.flip(normal));
    }

    // invert axes if necessary
    fn flip(&self, mut value: [f32; 3]) -> Vec3 {
        for n in 0..3 {
            if self.meta.flip_axis[n] {
                value[n] = -value[n];
            }
        }
        value.into()
    }

    pub(crate) fn push_face(&mut self, face: ObjFace) -> Result<(), ObjError> {
        let mut vertices: Vec<Vertex> = Vec::with_capacity(face.face_i.len());
        let mut missing_normal = false;

        for face_index in &face.face_i {
            let position = *text::resolve_index(&self.positions, face_index.vert_i)?;

            let uv = match face_index.uv_i {
                Some(token) => *text::resolve_index(&self.uvs, token)?,
                None => Vec2::zero(),
            };

            let normal = match face_index.normal_i {
                Some(token) => *text::resolve_index(&self.normals, token)?,
                None => {
                    missing_normal = true;
                    Vec3::zero()
                }
            };

            vertices.push(Vertex {
                position,
                normal,
                uv,
            });
        }

        // one flat normal for the whole face if any vertex lacks one
        if missing_normal {
            if vertices.len() < 3 {
                return Err(ObjError::DegenerateFace(vertices.len()));
            }

            let a = vertices[0].position - vertices[1].position;
            let b = vertices[2].position - vertices[1].position;
            let normal = a.cross_product(&b);

            for vertex in &mut vertices {
                vertex.normal = normal;
            }
        }

        let local_indices = triangulate(&vertices, self.meta.convexity_check);
        if local_indices.is_empty() {
            debug!("Dropping face with {} vertices", vertices.len());
            return Ok(());
        }

        let submesh_offset = self.curr_submesh.vertices.len() as u32;
        let file_offset = self.vertices.len() as u32;

        self.curr_submesh.vertices.extend_from_slice(&vertices);
        self.vertices.extend_from_slice(&vertices);

        self.curr_submesh
            .indices
            .extend(local_indices.iter().map(|i| i + submesh_offset));
        self.indices
            .extend(local_indices.iter().map(|i| i + file_offset));

        Ok(())
    }

    // moves the pending buffers into a finished submesh, keeping name and material
    fn finish_submesh(&mut self) {
        let mut submesh = ObjSubmesh {
            name: self.curr_submesh.name.clone(),
            material: self.curr_submesh.material.clone(),
            ..ObjSubmesh::default()
        };
        std::mem::swap(&mut submesh, &mut self.curr_submesh);

        submesh.name = self.unique_name(&submesh.name);
        debug!(
            "Finished submesh \"{}\" with {} triangles",
            submesh.name,
            submesh.indices.len() / 3
        );
        self.submeshes.push(submesh);
    }

    // appends `_2`, `_3`, ... until no finished submesh uses the name
    fn unique_name(&self, name: &str) -> String {
        let taken = |candidate: &str| self.submeshes.iter().any(|s| s.name == candidate);

        if !taken(name) {
            return name.to_owned();
        }

        let mut counter = 2;
        loop {
            let candidate = format!("{}_{}", name, counter);
            if !taken(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    pub(crate) fn build(mut self) -> Result<ObjModel, ObjError> {
        // push the last group/submesh
        if !self.curr_submesh.is_empty() {
            self.finish_submesh();
        }

        let materials = self.materials;
        let meshes: Vec<Mesh> = self
            .submeshes
            .into_iter()
            .map(|submesh| {
                let material = submesh
                    .material
                    .as_ref()
                    .and_then(|name| materials.iter().find(|m| &m.name == name))
                    .cloned();

                if material.is_none() {
                    if let Some(name) = &submesh.material {
                        warn!("Material \"{}\" of \"{}\" not found", name, submesh.name);
                    }
                }

                Mesh::new(submesh.name, submesh.vertices, submesh.indices).with_material(material)
            })
            .collect();

        if meshes.is_empty() && self.vertices.is_empty() && self.indices.is_empty() {
            return Err(ObjError::Empty(self.path));
        }

        Ok(ObjModel {
            meshes,
            vertices: self.vertices,
            indices: self.indices,
            materials,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn builder() -> ObjMeshBuilder {
        let mut builder = ObjMeshBuilder::new(Path::new("test.obj"), ObjMeta::default());
        builder.push_position([0.0, 0.0, 0.0]);
        builder.push_position([1.0, 0.0, 0.0]);
        builder.push_position([1.0, 1.0, 0.0]);
        builder.push_position([0.0, 1.0, 0.0]);
        builder.push_uv([0.5, 0.5]);
        builder.push_normal([0.0, 0.0, 1.0]);
        builder
    }

    fn face<'a>(tokens: &[(&'a str, Option<&'a str>, Option<&'a str>)]) -> ObjFace<'a> {
        ObjFace {
            face_i: tokens
                .iter()
                .map(|&(vert_i, uv_i, normal_i)| ObjFaceIndex {
                    vert_i,
                    uv_i,
                    normal_i,
                })
                .collect(),
        }
    }

    fn triangle() -> ObjFace<'static> {
        face(&[("1", None, None), ("2", None, None), ("3", None, None)])
    }

    #[test]
    fn test_flat_normal_for_missing_normals() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.push_face(face(&[
            ("1", Some("1"), None),
            ("2", Some("1"), None),
            ("3", Some("1"), None),
            ("4", Some("1"), None),
        ]))?;

        let expected = (Vec3::new(0.0, 0.0, 0.0) - Vec3::new(1.0, 0.0, 0.0))
            .cross_product(&(Vec3::new(1.0, 1.0, 0.0) - Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(expected, Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(builder.vertices.len(), 4);
        for vertex in &builder.vertices {
            assert_eq!(vertex.normal, expected);
            assert_eq!(vertex.uv, Vec2::new(0.5, 0.5));
        }
        assert_eq!(builder.indices, vec![3, 0, 1, 3, 1, 2]);

        Ok(())
    }

    #[test]
    fn test_one_missing_normal_overrides_face() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.push_face(face(&[
            ("1", None, Some("1")),
            ("2", None, None),
            ("3", None, Some("-1")),
        ]))?;

        let normals: Vec<Vec3> = builder.vertices.iter().map(|v| v.normal).collect();
        assert_eq!(normals, vec![Vec3::new(0.0, 0.0, -1.0); 3]);
        Ok(())
    }

    #[test]
    fn test_given_normals_are_kept() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.push_face(face(&[
            ("-4", None, Some("1")),
            ("-3", None, Some("1")),
            ("-2", None, Some("1")),
        ]))?;

        assert_eq!(builder.vertices[0].position, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(builder.vertices[2].position, Vec3::new(1.0, 1.0, 0.0));
        assert!(builder
            .vertices
            .iter()
            .all(|v| v.normal == Vec3::new(0.0, 0.0, 1.0) && v.uv == Vec2::zero()));
        Ok(())
    }

    #[test]
    fn test_face_errors() {
        let mut builder = builder();

        assert!(matches!(
            builder.push_face(face(&[("1", None, None), ("5", None, None), ("2", None, None)])),
            Err(ObjError::Index(text::TextError::IndexOutOfRange { index: 5, len: 4 }))
        ));
        assert!(matches!(
            builder.push_face(face(&[("1", Some("2"), None), ("2", None, None), ("3", None, None)])),
            Err(ObjError::Index(_))
        ));
        assert!(matches!(
            builder.push_face(face(&[("1", None, None), ("2", None, None)])),
            Err(ObjError::DegenerateFace(2))
        ));
    }

    #[test]
    fn test_short_face_with_normals_is_dropped() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.push_face(face(&[("1", None, Some("1")), ("2", None, Some("1"))]))?;

        assert!(builder.vertices.is_empty());
        assert!(builder.curr_submesh.is_empty());
        Ok(())
    }

    #[test]
    fn test_offsets() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.set_group("first");
        builder.push_face(triangle())?;
        builder.set_group("second");
        builder.push_face(triangle())?;
        builder.push_face(triangle())?;

        assert_eq!(builder.submeshes.len(), 1);
        assert_eq!(builder.curr_submesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(builder.indices, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);

        let model = builder.build()?;
        assert_eq!(model.meshes.len(), 2);
        assert_eq!(model.meshes[0].name, "first");
        assert_eq!(model.meshes[1].name, "second");
        assert_eq!(model.vertices.len(), 9);
        Ok(())
    }

    #[test]
    fn test_rename_empty_group() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.set_group("a");
        builder.set_group("b");
        builder.set_group("");
        builder.push_face(triangle())?;

        let model = builder.build()?;
        assert_eq!(model.meshes.len(), 1);
        assert_eq!(model.meshes[0].name, UNNAMED);
        Ok(())
    }

    #[test]
    fn test_first_marker_adopts_pending_faces() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.push_face(triangle())?;
        builder.set_group("late");

        let model = builder.build()?;
        assert_eq!(model.meshes.len(), 1);
        assert_eq!(model.meshes[0].name, "late");
        Ok(())
    }

    #[test]
    fn test_material_switch_splits_group() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.materials = vec![Material::new("A"), Material::new("B")];
        builder.set_group("cube");
        builder.use_material("A");
        builder.push_face(triangle())?;
        builder.push_face(triangle())?;
        builder.use_material("B");
        builder.push_face(triangle())?;
        builder.push_face(triangle())?;

        let model = builder.build()?;
        assert_eq!(model.meshes.len(), 2);
        assert_eq!(model.meshes[0].name, "cube");
        assert_eq!(model.meshes[1].name, "cube_2");
        assert_eq!(
            model.meshes[0].material.as_ref().map(|m| m.name.as_str()),
            Some("A")
        );
        assert_eq!(
            model.meshes[1].material.as_ref().map(|m| m.name.as_str()),
            Some("B")
        );
        assert_eq!(model.meshes[1].indices, vec![0, 1, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn test_unique_names() -> Result<(), ObjError> {
        let mut builder = builder();
        for _ in 0..3 {
            builder.set_group("part");
            builder.push_face(triangle())?;
        }

        let model = builder.build()?;
        let names: Vec<&str> = model.meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["part", "part_2", "part_3"]);
        Ok(())
    }

    #[test]
    fn test_unknown_material_is_none() -> Result<(), ObjError> {
        let mut builder = builder();
        builder.use_material("missing");
        builder.push_face(triangle())?;

        let model = builder.build()?;
        assert!(model.meshes[0].material.is_none());
        Ok(())
    }

    #[test]
    fn test_flip_axis() {
        let mut builder = ObjMeshBuilder::new(
            Path::new("test.obj"),
            ObjMeta {
                flip_axis: [true, false, true],
                ..ObjMeta::default()
            },
        );
        builder.push_position([1.0, 2.0, 3.0]);
        builder.push_normal([0.0, 1.0, -1.0]);

        assert_eq!(builder.positions, vec![Vec3::new(-1.0, 2.0, -3.0)]);
        assert_eq!(builder.normals, vec![Vec3::new(-0.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_empty_is_error() {
        let mut builder = builder();
        builder.set_group("nothing");
        assert!(matches!(builder.build(), Err(ObjError::Empty(_))));
    }
}
