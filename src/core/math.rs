//=========================================================================
// Math Value Types
//=========================================================================
//
// Plain 2/3/4-component float vectors shared by scripts and the native
// side of the interop boundary.
//
// All types are `#[repr(C)]` so their layout matches what native code
// reads and writes through the call table. Arithmetic is componentwise.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

//=== Vector2 =============================================================

/// Two-component vector used for positions and forces.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::splat(0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector with every component set to `scalar`.
    pub const fn splat(scalar: f32) -> Self {
        Self { x: scalar, y: scalar }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalizes in place and returns the length before normalization.
    ///
    /// A zero-length vector is left at zero and `0.0` is returned; the
    /// result never contains NaN.
    pub fn normalize(&mut self) -> f32 {
        let length = self.length();
        if length > 0.0 {
            self.x /= length;
            self.y /= length;
        } else {
            *self = Self::ZERO;
        }
        length
    }

    /// Returns the unit vector, or `None` for a zero-length vector.
    pub fn try_normalized(self) -> Option<Self> {
        let length = self.length();
        (length > 0.0).then(|| Self::new(self.x / length, self.y / length))
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

//=== Vector3 =============================================================

/// Three-component vector. Used by the diagnostics echo call.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::splat(0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(scalar: f32) -> Self {
        Self { x: scalar, y: scalar, z: scalar }
    }

    /// Extends a 2D vector with a `z` component.
    pub const fn from_xy(xy: Vector2, z: f32) -> Self {
        Self { x: xy.x, y: xy.y, z }
    }

    pub fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn set_xy(&mut self, xy: Vector2) {
        self.x = xy.x;
        self.y = xy.y;
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

//=== Vector4 =============================================================

/// Four-component vector (colors, homogeneous coordinates).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const ZERO: Self = Self::splat(0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn splat(scalar: f32) -> Self {
        Self { x: scalar, y: scalar, z: scalar, w: scalar }
    }

    pub const fn from_xyz(xyz: Vector3, w: f32) -> Self {
        Self { x: xyz.x, y: xyz.y, z: xyz.z, w }
    }

    pub fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn set_xy(&mut self, xy: Vector2) {
        self.x = xy.x;
        self.y = xy.y;
    }

    pub fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn set_xyz(&mut self, xyz: Vector3) {
        self.x = xyz.x;
        self.y = xyz.y;
        self.z = xyz.z;
    }
}

impl Add for Vector4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar, self.w * scalar)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn addition_is_componentwise() {
        let a = Vector2::new(1.5, -2.0);
        let b = Vector2::new(0.5, 4.0);
        let sum = a + b;
        assert_eq!(sum.x, a.x + b.x);
        assert_eq!(sum.y, a.y + b.y);

        let c = Vector4::new(1.0, 2.0, 3.0, 4.0) + Vector4::splat(1.0);
        assert_eq!(c, Vector4::new(2.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn scaling_scales_length_by_abs_scalar() {
        let v = Vector2::new(3.0, 4.0);
        for s in [2.0_f32, -3.0, 0.25, 0.0] {
            assert!(((v * s).length() - v.length() * s.abs()).abs() < EPSILON);
        }

        let w = Vector3::new(1.0, 2.0, 2.0);
        assert!(((w * -2.0).length() - 6.0).abs() < EPSILON);
    }

    #[test]
    fn normalize_returns_previous_length() {
        let mut v = Vector2::new(3.0, 4.0);
        let length = v.normalize();
        assert_eq!(length, 5.0);
        assert!((v.length() - 1.0).abs() < EPSILON);
        assert!((v.x - 0.6).abs() < EPSILON);
    }

    #[test]
    fn normalize_zero_vector_clamps_to_zero() {
        let mut v = Vector2::ZERO;
        let length = v.normalize();
        assert_eq!(length, 0.0);
        assert_eq!(v, Vector2::ZERO);
        assert!(!v.x.is_nan() && !v.y.is_nan());
        assert_eq!(Vector2::ZERO.try_normalized(), None);
    }

    #[test]
    fn swizzles_read_and_write() {
        let mut v = Vector4::from_xyz(Vector3::new(1.0, 2.0, 3.0), 4.0);
        assert_eq!(v.xy(), Vector2::new(1.0, 2.0));
        v.set_xy(Vector2::new(9.0, 8.0));
        assert_eq!(v.xyz(), Vector3::new(9.0, 8.0, 3.0));

        let mut u = Vector3::from_xy(Vector2::new(1.0, 1.0), 5.0);
        u.set_xy(Vector2::splat(0.0));
        assert_eq!(u, Vector3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn negation_flips_every_component() {
        assert_eq!(-Vector3::new(1.0, -2.0, 3.0), Vector3::new(-1.0, 2.0, -3.0));
        assert_eq!(-Vector2::new(1.0, 0.0), Vector2::new(-1.0, 0.0));
    }
}
