use std::io;
use std::{
    num,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use super::{builder::*, meta::ObjMeta};
use crate::{
    text::{self, TextError},
    utils,
};

#[derive(thiserror::Error, Debug)]
pub enum ObjError {
    #[error("Not a Wavefront `.obj` file: {0}")]
    Extension(PathBuf),
    #[error("Failed to read model.")]
    Io(#[from] io::Error),
    #[error("Failed to parse float.")]
    ParseFloat(#[from] num::ParseFloatError),
    #[error("Invalid reference: {0}")]
    Index(#[from] TextError),
    #[error("Expected {expected} values for \"{token}\", found {found}.")]
    MissingValues {
        token: String,
        expected: usize,
        found: usize,
    },
    #[error("Failed to parse face vertex: \"{0}\"")]
    ParseFace(String),
    #[error("Can't derive a normal for a face with {0} vertices.")]
    DegenerateFace(usize),
    #[error("No geometry found in: {0}")]
    Empty(PathBuf),
}

// parses wavefront obj (https://en.wikipedia.org/wiki/Wavefront_.obj_file)
pub(crate) fn parse(filepath: &Path, meta: ObjMeta) -> Result<ObjMeshBuilder, ObjError> {
    if !utils::has_extension(filepath, "obj") {
        return Err(ObjError::Extension(filepath.to_owned()));
    }

    let lines = utils::read_lines(filepath)?;
    info!("Loading mesh: {}", filepath.display());

    let mut builder = ObjMeshBuilder::new(filepath, meta);

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        debug!("Parsing: \"{}\"", line);
        parse_line(&line, &mut builder)?;
    }

    Ok(builder)
}

fn parse_line(line: &str, builder: &mut ObjMeshBuilder) -> Result<(), ObjError> {
    let token = text::first_token(line);
    let value = text::tail(line);

    match token {
        // material library
        "mtllib" => builder.load_materials(value),
        // name or group (submesh)
        "o" | "g" => builder.set_group(value),
        // vertex
        "v" => builder.push_position(parse_vec3(token, value)?),
        // texture coordinates
        "vt" => builder.push_uv(parse_uv(value)?),
        // vertex normals
        "vn" => builder.push_normal(parse_vec3(token, value)?),
        // parameter space vertices
        "vp" => warn!("Parameter space vertices not supported. Ignoring."),
        "f" => builder.push_face(parse_face(value)?)?,
        // material
        "usemtl" => builder.use_material(value),
        // smothing groups
        "s" => debug!("Smothing groups not supported. Ignoring."),
        // comment
        _ if token.starts_with('#') => debug!("Comment: {:?}", value),
        // glued group marker like `gname`
        _ if token.starts_with('g') => builder.set_group(""),
        _ => warn!("Found invalid token: \"{}\"", token),
    };

    Ok(())
}

fn parse_vec3(token: &str, value: &str) -> Result<[f32; 3], ObjError> {
    let numbers = parse_numbers(token, value, 3)?;
    Ok([numbers[0], numbers[1], numbers[2]])
}

fn parse_uv(value: &str) -> Result<[f32; 2], ObjError> {
    let numbers = parse_numbers("vt", value, 2)?;
    Ok([numbers[0], numbers[1]])
}

// parses the first `count` numbers seperated by spaces, further values are ignored
fn parse_numbers(token: &str, value: &str, count: usize) -> Result<Vec<f32>, ObjError> {
    let fields = text::fields(value);
    if fields.len() < count {
        return Err(ObjError::MissingValues {
            token: token.to_owned(),
            expected: count,
            found: fields.len(),
        });
    }

    Ok(fields
        .iter()
        .take(count)
        .map(|x| x.parse())
        .collect::<Result<_, _>>()?)
}

// parses triplets/face indexes seperated by spaces, which are itself seperated by slashes
fn parse_face(value: &str) -> Result<ObjFace<'_>, ObjError> {
    let face_i = text::fields(value)
        .into_iter()
        .map(parse_face_index)
        .collect::<Result<_, _>>()?;
    Ok(ObjFace { face_i })
}

// a single face vertex: `v`, `v/vt`, `v//vn` or `v/vt/vn`
fn parse_face_index(value: &str) -> Result<ObjFaceIndex<'_>, ObjError> {
    let non_empty = |x: &&str| !x.is_empty();

    let (vert_i, uv_i, normal_i) = match text::split(value, "/").as_slice() {
        [v] => (*v, None, None),
        [v, vt] => (*v, Some(*vt).filter(non_empty), None),
        [v, vt, vn] => (*v, Some(*vt).filter(non_empty), Some(*vn).filter(non_empty)),
        _ => return Err(ObjError::ParseFace(value.to_owned())),
    };

    if vert_i.is_empty() {
        return Err(ObjError::ParseFace(value.to_owned()));
    }

    Ok(ObjFaceIndex {
        vert_i,
        uv_i,
        normal_i,
    })
}
