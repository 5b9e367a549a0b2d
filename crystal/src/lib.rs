mod norm;
mod scalar;
mod vector;

#[cfg(test)]
mod test_util;

pub mod prelude {
    pub use crate::norm::Normed;
    pub use crate::scalar::Zero;
    pub use crate::vector::{Vec2, Vec3};
}
