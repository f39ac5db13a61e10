//! Geometric primitives for the turtle: vectors, polar points and angles.
//!
//! All values here are plain `Copy` data. Operations return new values and
//! never mutate their operands. NaN and infinities are propagated, not
//! guarded; the turtle filters bad input before it gets this far.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Convert an angle in degrees to radians.
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Convert an angle in radians to degrees.
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// The unit an angle is measured in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

/// An angle tagged with its unit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub const fn degrees(value: f64) -> Angle {
        Angle { value, unit: AngleUnit::Degrees }
    }

    pub const fn radians(value: f64) -> Angle {
        Angle { value, unit: AngleUnit::Radians }
    }

    /// The angle expressed in degrees
    pub fn to_degrees(self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.value,
            AngleUnit::Radians => to_degrees(self.value),
        }
    }

    /// The angle expressed in radians
    pub fn to_radians(self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => to_radians(self.value),
            AngleUnit::Radians => self.value,
        }
    }

    pub fn is_nan(self) -> bool {
        self.value.is_nan()
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle { value: -self.value, unit: self.unit }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            AngleUnit::Degrees => write!(f, "{}°", self.value),
            AngleUnit::Radians => write!(f, "{} rad", self.value),
        }
    }
}

/// A point in polar coordinates; `angle` is in radians
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PolarPoint {
    pub radius: f64,
    pub angle: f64,
}

/// A 2D euclidean vector, doubling as a cartesian point.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2D {
    pub x: f64,
    pub y: f64,
}

impl Vec2D {
    pub const ZERO: Vec2D = Vec2D { x: 0.0, y: 0.0 };
    pub const X: Vec2D = Vec2D { x: 1.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2D { x, y }
    }

    /// Vector from the origin to a point given in polar coordinates
    pub fn from_polar(polar: PolarPoint) -> Self {
        let (sin, cos) = polar.angle.sin_cos();
        Vec2D::new(polar.radius * cos, polar.radius * sin)
    }

    /// Polar coordinates of the point this vector points to
    pub fn to_polar(self) -> PolarPoint {
        PolarPoint {
            radius: self.norm(),
            angle: self.y.atan2(self.x),
        }
    }

    /// The cartesian components as an array
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn dot(self, other: Vec2D) -> f64 {
        DVec2::from(self).dot(other.into())
    }

    /// Euclidean length
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector pointing the same way.
    ///
    /// Fails with [`NumericError::Zero`] for the zero vector, which has no
    /// direction.
    pub fn unit(self) -> Result<Vec2D, NumericError> {
        let norm = self.norm();
        if norm == 0.0 {
            Err(NumericError::Zero)
        } else if norm.is_nan() {
            Err(NumericError::NaN)
        } else if norm.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(self / norm)
        }
    }

    /// Rotate counter-clockwise around the origin by `radians`.
    pub fn rotate(self, radians: f64) -> Vec2D {
        DVec2::from_angle(radians).rotate(self.into()).into()
    }

    /// Rotate counter-clockwise around the origin by an angle in any unit.
    pub fn rotate_by(self, angle: Angle) -> Vec2D {
        self.rotate(angle.to_radians())
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Vec2D {
    fn from(v: DVec2) -> Self {
        Vec2D::new(v.x, v.y)
    }
}

impl From<Vec2D> for DVec2 {
    fn from(v: Vec2D) -> Self {
        DVec2::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Vec2D {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2D::new(x, y)
    }
}

impl From<[f64; 2]> for Vec2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Vec2D::new(x, y)
    }
}

impl Add for Vec2D {
    type Output = Vec2D;
    fn add(self, rhs: Vec2D) -> Vec2D {
        Vec2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// `a - b` is defined as `a + b * -1`
impl Sub for Vec2D {
    type Output = Vec2D;
    fn sub(self, rhs: Vec2D) -> Vec2D {
        self + rhs * -1.0
    }
}

impl Mul<f64> for Vec2D {
    type Output = Vec2D;
    fn mul(self, rhs: f64) -> Vec2D {
        Vec2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2D {
    type Output = Vec2D;
    fn div(self, rhs: f64) -> Vec2D {
        self * (1.0 / rhs)
    }
}

impl Neg for Vec2D {
    type Output = Vec2D;
    fn neg(self) -> Vec2D {
        self * -1.0
    }
}

impl fmt::Display for Vec2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn close(a: Vec2D, b: Vec2D) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    // ==================== Vec2D arithmetic ====================

    #[test]
    fn vector_arithmetic() {
        let a = Vec2D::new(3.0, 4.0);
        let b = Vec2D::new(1.0, -2.0);

        assert_eq!(a + b, Vec2D::new(4.0, 2.0));
        assert_eq!(a - b, Vec2D::new(2.0, 6.0));
        assert_eq!(a * 2.0, Vec2D::new(6.0, 8.0));
        assert_eq!(-a, Vec2D::new(-3.0, -4.0));
        assert_eq!(a.dot(b), -5.0);
    }

    #[test]
    fn operations_do_not_mutate_operands() {
        let a = Vec2D::new(1.0, 1.0);
        let _ = a + Vec2D::new(5.0, 5.0);
        let _ = a.rotate(PI);
        assert_eq!(a, Vec2D::new(1.0, 1.0));
    }

    #[test]
    fn norm_and_unit() {
        let v = Vec2D::new(3.0, 4.0);
        assert_eq!(v.norm(), 5.0);

        let u = v.unit().unwrap();
        assert!((u.norm() - 1.0).abs() < EPS);
        assert!(close(u, Vec2D::new(0.6, 0.8)));
    }

    #[test]
    fn unit_of_zero_vector_is_an_error() {
        assert_eq!(Vec2D::ZERO.unit(), Err(NumericError::Zero));
    }

    #[test]
    fn unit_of_nan_vector_is_an_error() {
        assert_eq!(Vec2D::new(f64::NAN, 1.0).unit(), Err(NumericError::NaN));
    }

    // ==================== Rotation ====================

    #[test]
    fn rotate_defaults_to_radians() {
        assert!(close(Vec2D::X.rotate(PI / 2.0), Vec2D::new(0.0, 1.0)));
        assert!(close(Vec2D::X.rotate(PI), Vec2D::new(-1.0, 0.0)));
    }

    #[test]
    fn rotate_by_degrees() {
        let r = Vec2D::X.rotate_by(Angle::degrees(90.0));
        assert!(close(r, Vec2D::new(0.0, 1.0)));

        let r = Vec2D::new(2.0, 0.0).rotate_by(Angle::degrees(-45.0));
        assert!(close(r, Vec2D::new(2.0_f64.sqrt(), -(2.0_f64.sqrt()))));
    }

    #[test]
    fn rotate_preserves_norm() {
        let v = Vec2D::new(-7.0, 2.5);
        for deg in [13.0, 90.0, 181.0, -270.0] {
            let r = v.rotate_by(Angle::degrees(deg));
            assert!((r.norm() - v.norm()).abs() < EPS);
        }
    }

    // ==================== Polar ====================

    #[test]
    fn polar_conversions() {
        let v = Vec2D::new(0.0, 2.0);
        let p = v.to_polar();
        assert!((p.radius - 2.0).abs() < EPS);
        assert!((p.angle - PI / 2.0).abs() < EPS);
        assert!(close(Vec2D::from_polar(p), v));
    }

    #[test]
    fn from_point_like_values() {
        assert_eq!(Vec2D::from((1.0, 2.0)), Vec2D::new(1.0, 2.0));
        assert_eq!(Vec2D::from([1.0, 2.0]), Vec2D::new(1.0, 2.0));
        assert_eq!(Vec2D::from(DVec2::new(1.0, 2.0)), Vec2D::new(1.0, 2.0));
        assert_eq!(Vec2D::new(1.0, 2.0).to_array(), [1.0, 2.0]);
    }

    // ==================== Angles ====================

    #[test]
    fn angle_conversions() {
        assert!((to_degrees(PI) - 180.0).abs() < EPS);
        assert!((to_radians(180.0) - PI).abs() < EPS);
        assert!((Angle::radians(PI / 4.0).to_degrees() - 45.0).abs() < EPS);
        assert!((Angle::degrees(90.0).to_radians() - PI / 2.0).abs() < EPS);
        assert_eq!(Angle::degrees(12.5).to_degrees(), 12.5);
        assert_eq!((-Angle::degrees(30.0)).value, -30.0);
    }

    #[test]
    fn nan_propagates() {
        let v = Vec2D::X * f64::NAN;
        assert!(!v.is_finite());
        assert!(Angle::degrees(f64::NAN).is_nan());
    }
}
