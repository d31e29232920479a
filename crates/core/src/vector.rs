//! Minimal 2D vector value type used for particle and cursor state.
//!
//! [`Vec2`] is `Copy`, so the zero vector is just a value: there is no shared
//! instance a caller could mutate. In-place mutators (`scale`, `+=`, `-=`)
//! act on the receiver; `+` and `-` return new vectors.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 2D vector with `f64` components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns a fresh zero vector.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Vector pointing from `self` to `target`, i.e. `target - self`.
    pub fn to(self, target: Vec2) -> Vec2 {
        Vec2::new(target.x - self.x, target.y - self.y)
    }

    /// Multiplies both components by `factor` in place.
    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
    }

    /// Euclidean norm.
    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Vec2) -> f64 {
        self.to(other).magnitude()
    }

    /// True when both components are finite (not NaN or infinite).
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// Hosts that track pointer state with glam (winit/wgpu front ends) can hand
// positions straight to the cursor.
impl From<glam::DVec2> for Vec2 {
    fn from(v: glam::DVec2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<glam::Vec2> for Vec2 {
    fn from(v: glam::Vec2) -> Self {
        Vec2::new(f64::from(v.x), f64::from(v.y))
    }
}

impl From<Vec2> for glam::DVec2 {
    fn from(v: Vec2) -> Self {
        glam::DVec2::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_points_from_self_to_target() {
        let a = Vec2::new(1.0, 2.0);
        assert_eq!(a.to(Vec2::new(4.0, -2.0)), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn magnitude_is_euclidean_norm() {
        assert!((Vec2::new(3.0, 4.0).magnitude() - 5.0).abs() < f64::EPSILON);
        assert_eq!(Vec2::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn scale_mutates_in_place() {
        let mut v = Vec2::new(2.0, -3.0);
        v.scale(-0.5);
        assert_eq!(v, Vec2::new(-1.0, 1.5));
    }

    #[test]
    fn add_and_sub_assign_mutate_receiver() {
        let mut v = Vec2::new(1.0, 1.0);
        v += Vec2::new(2.0, 3.0);
        assert_eq!(v, Vec2::new(3.0, 4.0));
        v -= Vec2::new(1.0, 5.0);
        assert_eq!(v, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn pure_operators_leave_operands_untouched() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(10.0, 20.0);
        assert_eq!(a + b, Vec2::new(11.0, 22.0));
        assert_eq!(b - a, Vec2::new(9.0, 18.0));
        assert_eq!(a, Vec2::new(1.0, 2.0));
        assert_eq!(b, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn mutating_a_copy_of_zero_leaves_zero_intact() {
        let mut z = Vec2::ZERO;
        z += Vec2::new(5.0, 5.0);
        z.scale(3.0);
        assert_eq!(Vec2::ZERO, Vec2::new(0.0, 0.0));
        assert_eq!(Vec2::zero(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn is_finite_rejects_nan_and_infinity() {
        assert!(Vec2::new(1.0, -1.0).is_finite());
        assert!(!Vec2::new(f64::NAN, 0.0).is_finite());
        assert!(!Vec2::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn glam_conversions_preserve_components() {
        let v: Vec2 = glam::DVec2::new(1.5, -2.5).into();
        assert_eq!(v, Vec2::new(1.5, -2.5));
        let back: glam::DVec2 = v.into();
        assert_eq!(back, glam::DVec2::new(1.5, -2.5));
        let single: Vec2 = glam::Vec2::new(0.5, 4.0).into();
        assert_eq!(single, Vec2::new(0.5, 4.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn magnitude_is_non_negative(x in -1e6_f64..1e6, y in -1e6_f64..1e6) {
                prop_assert!(Vec2::new(x, y).magnitude() >= 0.0);
            }

            #[test]
            fn to_is_antisymmetric(
                ax in -1e3_f64..1e3, ay in -1e3_f64..1e3,
                bx in -1e3_f64..1e3, by in -1e3_f64..1e3,
            ) {
                let a = Vec2::new(ax, ay);
                let b = Vec2::new(bx, by);
                prop_assert_eq!(a.to(b), -b.to(a));
            }
        }
    }
}
