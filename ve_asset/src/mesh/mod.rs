pub mod mtl;
pub mod obj;
