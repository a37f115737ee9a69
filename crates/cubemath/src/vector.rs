//! 3D vector math.

use std::fmt;
use std::ops::*;

use crate::{Axis, Float, approx_cmp};

/// 3D vector.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3 {
    /// X component.
    pub x: Float,
    /// Y component.
    pub y: Float,
    /// Z component.
    pub z: Float,
}

impl Vector3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Constructs a vector from its components.
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [Float; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the dot product of this vector with another.
    pub fn dot(self, rhs: Self) -> Float {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }
    /// Returns the cross product of two vectors.
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Returns the magnitude of the vector.
    pub fn mag(self) -> Float {
        self.mag2().sqrt()
    }
    /// Returns the squared magnitude of the vector.
    pub fn mag2(self) -> Float {
        self.dot(self)
    }

    /// Returns a normalized copy of the vector, or `None` if it is zero.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let mult = approx_cmp::try_div(1.0, self.mag())?;
        approx_cmp::is_approx_nonzero(self.mag()).then(|| self * mult)
    }

    /// Returns the component of the vector that is perpendicular to `axis`.
    pub fn rejected_from_axis(mut self, axis: Axis) -> Self {
        self[axis] = 0.0;
        self
    }

    /// Returns the axis with the largest absolute component, or `None` if the
    /// vector is zero. Ties are broken in favor of the earlier axis.
    pub fn dominant_axis(self) -> Option<Axis> {
        let mut best: Option<(Axis, Float)> = None;
        for axis in Axis::ALL {
            let x = self[axis].abs();
            if approx_cmp::is_approx_nonzero(x) && best.is_none_or(|(_, b)| x > b) {
                best = Some((axis, x));
            }
        }
        best.map(|(axis, _)| axis)
    }
}

impl Index<Axis> for Vector3 {
    type Output = Float;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
impl IndexMut<Axis> for Vector3 {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl Mul<Float> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: Float) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
