use std::io;
use std::{num, path::Path, path::PathBuf};

use crystal::prelude::*;
use log::{debug, info, warn};
use ve_format::material::{Material, TextureMap};

use crate::{text, utils};

#[derive(thiserror::Error, Debug)]
pub enum MaterialError {
    #[error("Not a material library: {0}")]
    Extension(PathBuf),
    #[error("Failed to read material library.")]
    Io(#[from] io::Error),
    #[error("Failed to parse float.")]
    ParseFloat(#[from] num::ParseFloatError),
    #[error("Failed to parse integer.")]
    ParseInt(#[from] num::ParseIntError),
    #[error("No materials found in: {0}")]
    Empty(PathBuf),
}

// key lines before the first `newmtl` fill the record that `newmtl` then names
#[derive(Debug, Default)]
struct MtlBuilder {
    current: Material,
    listening: bool,
    touched: bool,
    materials: Vec<Material>,
}

impl MtlBuilder {
    fn new_material(&mut self, name: &str) {
        if self.listening {
            let material = std::mem::take(&mut self.current);
            self.materials.push(material);
        }
        self.listening = true;
        self.current.name = if name.is_empty() { "none" } else { name }.to_owned();
    }

    fn current(&mut self) -> &mut Material {
        self.touched = true;
        &mut self.current
    }

    fn build(mut self) -> Vec<Material> {
        if self.listening || self.touched {
            self.materials.push(self.current);
        }
        self.materials
    }
}

/// Decodes a Wavefront `.mtl` material library.
pub fn load(path: &Path) -> Result<Vec<Material>, MaterialError> {
    if !utils::has_extension(path, "mtl") {
        return Err(MaterialError::Extension(path.to_owned()));
    }

    let lines = utils::read_lines(path)?;
    info!("Loading materials: {}", path.display());

    let mut builder = MtlBuilder::default();
    for line in lines {
        parse_line(&line?, &mut builder)?;
    }

    let materials = builder.build();
    if materials.is_empty() {
        return Err(MaterialError::Empty(path.to_owned()));
    }

    Ok(materials)
}

fn parse_line(line: &str, builder: &mut MtlBuilder) -> Result<(), MaterialError> {
    let token = text::first_token(line);
    let value = text::tail(line);

    match token {
        "" => return Ok(()),
        "#" => {
            debug!("Comment: {:?}", value);
            return Ok(());
        }
        "newmtl" => {
            builder.new_material(value);
            return Ok(());
        }
        _ => {}
    }

    if !builder.listening {
        debug!("Found \"{}\" before any newmtl", token);
    }
    let material = builder.current();

    match token {
        "Ka" => set_color(&mut material.ambient, token, value)?,
        "Kd" => set_color(&mut material.diffuse, token, value)?,
        "Ks" => set_color(&mut material.specular, token, value)?,
        "Ns" => material.specular_exponent = value.parse()?,
        "Ni" => material.optical_density = value.parse()?,
        "d" => material.dissolve = value.parse()?,
        // transparency, the inverse of dissolve
        "Tr" => material.dissolve = 1.0 - value.parse::<f32>()?,
        "illum" => material.illumination = value.parse()?,
        "map_Ka" => set_map(material, TextureMap::Ambient, value),
        "map_Kd" => set_map(material, TextureMap::Diffuse, value),
        "map_Ks" => set_map(material, TextureMap::Specular, value),
        "map_Ns" => set_map(material, TextureMap::SpecularHighlight, value),
        "map_d" => set_map(material, TextureMap::Alpha, value),
        "map_Bump" | "map_bump" | "bump" => set_map(material, TextureMap::Bump, value),
        _ => debug!("Unsupported material token: \"{}\". Ignoring.", token),
    };

    Ok(())
}

// colors need exactly three components, anything else is skipped
fn set_color(color: &mut Vec3, token: &str, value: &str) -> Result<(), MaterialError> {
    let fields = text::fields(value);
    if fields.len() != 3 {
        warn!(
            "Expected 3 values for \"{}\", found {}. Ignoring.",
            token,
            fields.len()
        );
        return Ok(());
    }

    *color = Vec3::new(fields[0].parse()?, fields[1].parse()?, fields[2].parse()?);
    Ok(())
}

fn set_map(material: &mut Material, kind: TextureMap, value: &str) {
    material.texture_maps.insert(kind, value.to_owned());
}
