//! Unit quaternions for 3D rotations.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};
use std::fmt;
use std::ops::{Mul, Neg};

use crate::{Axis, EPSILON, Float, Sign, Vector3, approx_cmp};

/// Absolute values that components of a quaternion representing one of the 24
/// rotational symmetries of a cube may take.
const CUBE_SYMMETRY_COMPONENTS: [Float; 4] = [0.0, 0.5, FRAC_1_SQRT_2, 1.0];

/// Maximum distance from an exact value that a component may be snapped from.
const SNAP_TOLERANCE: Float = 0.001;

/// Quaternion, usually of unit length, representing a rotation.
///
/// `q` and `-q` represent the same rotation; use [`Quat::canonicalize()`] or
/// [`Quat::is_same_rotation()`] when comparing.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    /// Scalar component.
    pub w: Float,
    /// X component of the bivector part.
    pub x: Float,
    /// Y component of the bivector part.
    pub y: Float,
    /// Z component of the bivector part.
    pub z: Float,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENT
    }
}

impl Quat {
    /// Identity rotation.
    pub const IDENT: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Constructs a quaternion from its components.
    pub const fn new(w: Float, x: Float, y: Float, z: Float) -> Self {
        Self { w, x, y, z }
    }

    /// Returns the rotation by `angle` radians around the positive end of
    /// `axis`, counterclockwise when looking down the axis toward the origin.
    pub fn from_axis_angle(axis: Axis, angle: Float) -> Self {
        let half = angle * 0.5;
        let mut v = Vector3::ZERO;
        v[axis] = half.sin();
        Self::new(half.cos(), v.x, v.y, v.z)
    }
    /// Returns an exact quarter turn around `axis` in the direction `sign`.
    pub fn quarter_turn(axis: Axis, sign: Sign) -> Self {
        let mut v = Vector3::ZERO;
        v[axis] = sign.to_float() * FRAC_1_SQRT_2;
        Self::new(FRAC_1_SQRT_2, v.x, v.y, v.z)
    }
    /// Returns a quarter turn around `axis` in the direction `sign`, scaled
    /// by `t` where `t=0` is the identity and `t=1` is the full quarter turn.
    pub fn partial_quarter_turn(axis: Axis, sign: Sign, t: Float) -> Self {
        Self::from_axis_angle(axis, sign.to_float() * FRAC_PI_2 * t)
    }

    /// Returns the components as an array `[w, x, y, z]`.
    pub fn to_array(self) -> [Float; 4] {
        [self.w, self.x, self.y, self.z]
    }
    fn from_array([w, x, y, z]: [Float; 4]) -> Self {
        Self::new(w, x, y, z)
    }
    /// Returns the bivector part as a vector.
    fn vector_part(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Returns the 4D dot product of two quaternions.
    pub fn dot(self, other: Self) -> Float {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }
    /// Returns the magnitude of the quaternion.
    pub fn mag(self) -> Float {
        self.dot(self).sqrt()
    }
    /// Returns the conjugate of the quaternion, which is its inverse if it has
    /// unit length.
    #[must_use]
    pub fn reverse(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }
    /// Returns a normalized copy of the quaternion, or `None` if it is zero.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let mag = self.mag();
        if !approx_cmp::is_approx_nonzero(mag) {
            return None;
        }
        Some(Self::from_array(self.to_array().map(|c| c / mag)))
    }

    /// Returns the equivalent quaternion whose first nonzero component is
    /// positive.
    #[must_use]
    pub fn canonicalize(self) -> Self {
        match self.to_array().into_iter().find(|&c| c.abs() > EPSILON) {
            Some(c) if c < 0.0 => -self,
            _ => self,
        }
    }

    /// Returns the quaternion with each component snapped to the exact value
    /// it would have if it represented a rotational symmetry of the cube, then
    /// canonicalized.
    ///
    /// If the quaternion is not close to a cube symmetry, it is normalized and
    /// canonicalized but otherwise returned unchanged.
    #[must_use]
    pub fn snap_to_cube_symmetry(self) -> Self {
        let unit = self.normalize().unwrap_or(Self::IDENT);
        let snapped = unit.to_array().map(|c| {
            CUBE_SYMMETRY_COMPONENTS
                .iter()
                .find(|&&exact| (c.abs() - exact).abs() < SNAP_TOLERANCE)
                .map(|&exact| exact.copysign(c))
        });
        match snapped {
            [Some(w), Some(x), Some(y), Some(z)] => Self::new(w, x, y, z).canonicalize(),
            _ => unit.canonicalize(),
        }
    }

    /// Returns whether two quaternions represent the same rotation.
    pub fn is_same_rotation(self, other: Self) -> bool {
        approx_cmp::approx_eq(self.dot(other).abs(), 1.0)
    }

    /// Rotates a vector by the quaternion.
    pub fn rotate(self, v: Vector3) -> Vector3 {
        let u = self.vector_part();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }
}

impl Mul for Quat {
    type Output = Quat;

    /// Composes two rotations. `a * b` applies `b` first, then `a`.
    fn mul(self, rhs: Self) -> Self::Output {
        let (w1, v1) = (self.w, self.vector_part());
        let (w2, v2) = (rhs.w, rhs.vector_part());
        let w = w1 * w2 - v1.dot(v2);
        let v = v2 * w1 + v1 * w2 + v1.cross(v2);
        Self::new(w, v.x, v.y, v.z)
    }
}

impl Neg for Quat {
    type Output = Quat;

    fn neg(self) -> Self::Output {
        Self::from_array(self.to_array().map(|c| -c))
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}i + {}j + {}k", self.w, self.x, self.y, self.z)
    }
}
