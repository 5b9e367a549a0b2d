use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::triangulate::ConvexityCheck;
use crate::utils;

/// Per-file decoding options, read from a `.toml` file next to the model.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObjMeta {
    /// Mirrors positions and normals on the flagged axes.
    pub flip_axis: [bool; 3],
    pub convexity_check: ConvexityCheck,
}

impl ObjMeta {
    pub fn parse(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let meta: Self = toml::from_slice(&data)
            .with_context(|| format!("Invalid meta file: {}", path.display()))?;
        Ok(meta)
    }

    /// Parse meta from file called `file.toml` or alternativley from folder scoped meta file named `obj.toml` or else use default meta
    pub fn lookup(path: &Path) -> Result<Self> {
        let dir = path
            .parent()
            .with_context(|| format!("Path terminates in root or prefix: {}", path.display()))?;
        let meta_file = utils::file_name(path)?;

        let path = utils::combine_path(dir, meta_file, "toml")?;
        if path.is_file() {
            return Self::parse(&path);
        }

        // check if folder scoped meta exists
        let path = utils::combine_path(dir, "obj", "toml")?;
        if path.is_file() {
            return Self::parse(&path);
        }

        Ok(Self::default())
    }
}
