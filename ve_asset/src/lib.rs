//! Decoding of Wavefront `.obj` models and their `.mtl` material libraries
//! into the structures of `ve_format`.

pub mod mesh;
pub mod text;
pub mod utils;

pub use mesh::obj::{Loader, ObjError, ObjMeta, ObjModel};
