use crate::vector::Vec3;

#[derive(Debug, Clone)]
pub struct VecCmp {
    error_margin: f32,
}

impl VecCmp {
    pub const DEFAULT: Self = Self { error_margin: 1e-5 };

    pub fn eq_margin(&self, is: &Vec3, should: &Vec3, error_margin: f32) {
        for (idx, (v1, v2)) in [(is.x, should.x), (is.y, should.y), (is.z, should.z)]
            .iter()
            .enumerate()
        {
            let diff_abs = (v1 - v2).abs();

            assert!(
                diff_abs <= error_margin,
                "is: {:?} should: {:?} (+- {:?}) @ {}",
                is,
                should,
                error_margin,
                idx
            );
        }
    }

    pub fn eq(&self, is: &Vec3, should: &Vec3) {
        self.eq_margin(is, should, self.error_margin)
    }
}

impl Default for VecCmp {
    fn default() -> Self {
        Self::DEFAULT
    }
}
