// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Values flowing through a motor mapping pipeline.
//!
//! A pipeline receives either a single normalized channel value, a tuple of
//! channel values (for stages that combine several inputs) or an orientation
//! quaternion. Every mapper produces a scalar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rotation quaternion in Hamilton convention, scalar part first.
///
/// Mappers expect unit quaternions but do not normalize their input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Rotation of `angle` radians about `axis`. A zero-length axis yields the identity.
    pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> Self {
        let len = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        if len < 1e-10 {
            return Self::identity();
        }
        let (sin_half, cos_half) = (0.5 * angle).sin_cos();
        let k = sin_half / len;
        Self::new(cos_half, axis[0] * k, axis[1] * k, axis[2] * k)
    }

    /// Build from `[w, x, y, z]`; `None` unless exactly four components are given.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [w, x, y, z] => Some(Self::new(*w, *x, *y, *z)),
            _ => None,
        }
    }

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Hamilton product; `a.multiply(&b)` applies `b` first, then `a` (intrinsic chaining).
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion::new(
            self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        )
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// The input a stage accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Anything; only the empty (identity) composite declares this.
    Any,
    Scalar,
    Quaternion,
    /// A tuple of exactly `n` channel values.
    Vector(usize),
}

impl Shape {
    pub fn accepts(&self, signal: &Signal) -> bool {
        match (self, signal) {
            (Shape::Any, _) => true,
            (Shape::Scalar, Signal::Scalar(_)) => true,
            (Shape::Quaternion, Signal::Quaternion(_)) => true,
            (Shape::Quaternion, Signal::Vector(values)) => values.len() == 4,
            (Shape::Vector(n), Signal::Vector(values)) => values.len() == *n,
            (Shape::Vector(1), Signal::Scalar(_)) => true,
            _ => false,
        }
    }

    /// Whether a stage of this shape can follow another stage, which always yields a scalar.
    pub fn accepts_scalar(&self) -> bool {
        matches!(self, Shape::Any | Shape::Scalar | Shape::Vector(1))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Any => write!(f, "any"),
            Shape::Scalar => write!(f, "scalar"),
            Shape::Quaternion => write!(f, "quaternion"),
            Shape::Vector(n) => write!(f, "{}-tuple", n),
        }
    }
}

/// One input sample, or the intermediate value between two stages.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Scalar(f64),
    Quaternion(Quaternion),
    Vector(Vec<f64>),
}

impl Signal {
    pub fn shape(&self) -> Shape {
        match self {
            Signal::Scalar(_) => Shape::Scalar,
            Signal::Quaternion(_) => Shape::Quaternion,
            Signal::Vector(values) => Shape::Vector(values.len()),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Signal::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// A quaternion, or a four-element tuple read as `(w, x, y, z)`.
    pub fn as_quaternion(&self) -> Option<Quaternion> {
        match self {
            Signal::Quaternion(q) => Some(*q),
            Signal::Vector(values) => Quaternion::from_slice(values),
            Signal::Scalar(_) => None,
        }
    }

    /// Channel values of a scalar or a tuple.
    pub fn as_slice(&self) -> Option<&[f64]> {
        match self {
            Signal::Scalar(value) => Some(std::slice::from_ref(value)),
            Signal::Vector(values) => Some(values.as_slice()),
            Signal::Quaternion(_) => None,
        }
    }
}

impl From<f64> for Signal {
    fn from(value: f64) -> Self {
        Signal::Scalar(value)
    }
}

impl From<Quaternion> for Signal {
    fn from(q: Quaternion) -> Self {
        Signal::Quaternion(q)
    }
}

impl From<Vec<f64>> for Signal {
    fn from(values: Vec<f64>) -> Self {
        Signal::Vector(values)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Scalar(value) => write!(f, "{}", value),
            Signal::Quaternion(q) => write!(f, "(w={}, x={}, y={}, z={})", q.w, q.x, q.y, q.z),
            Signal::Vector(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}
