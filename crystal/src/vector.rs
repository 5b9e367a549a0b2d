use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{norm::Normed, scalar::Zero};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

macro_rules! impl_vec_ops {
    ( $( $vec:ident => $( $e:ident )+ ;)+ ) => {
        $(
            impl Add for $vec {
                type Output = $vec;

                fn add(self, rhs: $vec) -> $vec {
                    $vec { $( $e: self.$e + rhs.$e, )+ }
                }
            }

            impl Sub for $vec {
                type Output = $vec;

                fn sub(self, rhs: $vec) -> $vec {
                    $vec { $( $e: self.$e - rhs.$e, )+ }
                }
            }

            impl Mul<f32> for $vec {
                type Output = $vec;

                fn mul(self, rhs: f32) -> $vec {
                    $vec { $( $e: self.$e * rhs, )+ }
                }
            }

            impl Mul<$vec> for f32 {
                type Output = $vec;

                fn mul(self, rhs: $vec) -> $vec {
                    $vec { $( $e: self * rhs.$e, )+ }
                }
            }

            impl Neg for $vec {
                type Output = $vec;

                fn neg(self) -> $vec {
                    $vec { $( $e: -self.$e, )+ }
                }
            }

            impl AddAssign for $vec {
                fn add_assign(&mut self, rhs: $vec) {
                    $( self.$e += rhs.$e; )+
                }
            }

            impl SubAssign for $vec {
                fn sub_assign(&mut self, rhs: $vec) {
                    $( self.$e -= rhs.$e; )+
                }
            }

            impl MulAssign<f32> for $vec {
                fn mul_assign(&mut self, rhs: f32) {
                    $( self.$e *= rhs; )+
                }
            }

            impl Zero for $vec {
                fn zero() -> Self {
                    $vec { $( $e: 0.0, )+ }
                }
            }

            impl $vec {
                pub fn dot_product(&self, rhs: &$vec) -> f32 {
                    let mut value = 0.0;
                    $( value += self.$e * rhs.$e; )+
                    value
                }

                /// Angle to `rhs` in radians.
                ///
                /// Yields NaN if either vector has zero length.
                pub fn angle_between(&self, rhs: &$vec) -> f32 {
                    (self.dot_product(rhs) / (self.magnitude() * rhs.magnitude())).acos()
                }

                /// Projection of `self` onto `rhs`.
                pub fn projection(&self, rhs: &$vec) -> $vec {
                    (self.dot_product(rhs) / rhs.dot_product(rhs)) * *rhs
                }
            }

            impl Normed for $vec {
                type Norm = f32;

                fn magnitude(&self) -> Self::Norm {
                    self.magnitude_squared().sqrt()
                }

                fn magnitude_squared(&self) -> Self::Norm {
                    self.dot_product(self)
                }

                fn scale_mut(&mut self, n: Self::Norm) {
                    $( self.$e *= n; )+
                }

                fn unscale_mut(&mut self, n: Self::Norm) {
                    $( self.$e /= n; )+
                }
            }
        )+
    };
}

impl_vec_ops! {
    Vec2 => x y;
    Vec3 => x y z;
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn cross_product(&self, rhs: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(data: [f32; 2]) -> Self {
        Vec2::new(data[0], data[1])
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(data: [f32; 3]) -> Self {
        Vec3::new(data[0], data[1], data[2])
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(vec: Vec2) -> Self {
        [vec.x, vec.y]
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(vec: Vec3) -> Self {
        [vec.x, vec.y, vec.z]
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use crate::test_util::VecCmp;

    use super::*;

    #[test]
    fn vec_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));

        let mut c = a;
        c += b;
        c -= a;
        c *= 0.5;
        assert_eq!(c, Vec3::new(2.0, 2.5, 3.0));

        assert_eq!(Vec2::new(1.0, 2.0) + Vec2::new(0.5, 0.5), Vec2::new(1.5, 2.5));
    }

    #[test]
    fn vec_dot_product() {
        let cv1: Vec3 = [1.0, 1.0, 1.0].into();
        let cv2: Vec3 = [1.0, 1.0, 1.0].into();

        assert_eq!(cv1.dot_product(&cv2), 3.0);
        assert_eq!(Vec2::new(1.0, 0.0).dot_product(&Vec2::new(0.0, 1.0)), 0.0);
    }

    #[test]
    fn vec3_cross_product() {
        let a = Vec3::new(1.0, 2.0, -3.0);
        let b = Vec3::new(-6.0, 7.0, 0.2);

        VecCmp::DEFAULT.eq(&a.cross_product(&b), &Vec3::new(21.4, 17.8, 19.0));
        assert_eq!(
            Vec3::new(1.0, 0.0, 0.0).cross_product(&Vec3::new(0.0, 1.0, 0.0)),
            Vec3::new(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn vec3_magnitude() {
        assert_eq!(Vec3::new(2.0, 3.0, 6.0).magnitude(), 7.0);
        assert_eq!(Vec2::new(3.0, 4.0).magnitude(), 5.0);

        let mut v = Vec3::new(0.0, 0.0, 5.0);
        v.normalize();
        assert_eq!(v, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn vec3_angle_between() {
        let angle = Vec3::new(1.0, 0.0, 0.0).angle_between(&Vec3::new(0.0, 3.0, 0.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-6);

        assert!(Vec3::zero().angle_between(&Vec3::new(1.0, 0.0, 0.0)).is_nan());
    }

    #[test]
    fn vec3_projection() {
        let a = Vec3::new(2.0, 3.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);

        assert_eq!(a.projection(&b), Vec3::new(2.0, 0.0, 0.0));
    }
}
