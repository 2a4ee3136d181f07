// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Quaternion to single-angle extraction.
//!
//! Properly speaking these are Tait-Bryan angles, not Euler angles. Each
//! mapper returns one rotation angle (radians) of a fixed rotation order; the
//! axis is chosen when the stage is built and never re-evaluated per sample.
//!
//! Near gimbal lock (the `asin` argument at ±1) the two `atan2` angles are
//! numerically degenerate. That is inherent to the decomposition.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::config::consts::{QUATERNION_TO_EULER_YZX, QUATERNION_TO_EULER_YZY};
use crate::config::StageDescription;
use crate::errors::{ConfigError, MappingError};
use crate::observability::messages::mapper::AsinArgumentClamped;
use crate::observability::messages::StructuredLog;
use crate::signal::{Quaternion, Shape, Signal};
use crate::traits::{shape_mismatch, Mapper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Rotation-order convention of a quaternion stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// Intrinsic Y-Z-X (extrinsic X-Z-Y). With X the line of sight, Y
    /// vertical and Z horizontal, the Y, Z and X angles are yaw, pitch and
    /// roll.
    Yzx,
    /// X the line of sight, Y to the left, Z up. The `x` and `y` formulas
    /// of [`AxisOrder::Yzx`] trade places; `z` is shared.
    Yzy,
}

impl AxisOrder {
    pub fn stage_name(self) -> &'static str {
        match self {
            AxisOrder::Yzx => QUATERNION_TO_EULER_YZX,
            AxisOrder::Yzy => QUATERNION_TO_EULER_YZY,
        }
    }

    fn formula(self, axis: Axis) -> Formula {
        match (self, axis) {
            (AxisOrder::Yzx, Axis::Y) | (AxisOrder::Yzy, Axis::X) => Formula::Heading,
            (AxisOrder::Yzx, Axis::X) | (AxisOrder::Yzy, Axis::Y) => Formula::Bank,
            (_, Axis::Z) => Formula::Attitude,
        }
    }
}

/// The closed-form expression a built stage evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Formula {
    Heading,
    Attitude,
    Bank,
}

impl Formula {
    fn evaluate(self, q: &Quaternion) -> f64 {
        match self {
            Formula::Heading => heading(q),
            Formula::Attitude => attitude(q),
            Formula::Bank => bank(q),
        }
    }
}

/// Angle about the first rotation axis (Y for Y-Z-X).
fn heading(q: &Quaternion) -> f64 {
    (-2.0 * (q.z * q.x - q.w * q.y)).atan2(q.w * q.w - q.y * q.y - q.z * q.z + q.x * q.x)
}

/// Angle about the middle axis, `asin(2(yx + wz))`.
///
/// The argument is clamped to `[-1, 1]`; floating-point drift on a
/// near-unit quaternion at gimbal lock would otherwise yield NaN.
fn attitude(q: &Quaternion) -> f64 {
    let sine = 2.0 * (q.y * q.x + q.w * q.z);
    if sine.abs() > 1.0 {
        AsinArgumentClamped { argument: sine }.log();
    }
    sine.clamp(-1.0, 1.0).asin()
}

/// Angle about the last rotation axis (X for Y-Z-X).
fn bank(q: &Quaternion) -> f64 {
    (-2.0 * (q.y * q.z - q.w * q.x)).atan2(q.w * q.w + q.y * q.y - q.z * q.z - q.x * q.x)
}

#[derive(Debug, Clone, Deserialize)]
struct AxisParams {
    axis: Option<String>,
}

/// Extracts one Tait-Bryan angle from an orientation quaternion.
///
/// ```yaml
/// function:
///   - name: quaternion2euler
///     axis: z
///   - name: linear
///     scale: -2.92
///     translate: 0
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Quaternion2Euler {
    order: AxisOrder,
    axis: Axis,
    formula: Formula,
}

impl Quaternion2Euler {
    pub fn new(order: AxisOrder, axis: Axis) -> Self {
        Self {
            order,
            axis,
            formula: order.formula(axis),
        }
    }

    pub fn from_stage(order: AxisOrder, stage: &StageDescription) -> Result<Self, ConfigError> {
        let name = order.stage_name();
        let params: AxisParams = stage.params_as(name)?;
        let raw = params.axis.ok_or(ConfigError::MissingParameters {
            stage: name,
            expected: "'axis' (one of x, y, z)",
        })?;
        let axis = raw
            .parse::<Axis>()
            .map_err(|axis| ConfigError::InvalidAxis { stage: name, axis })?;
        Ok(Self::new(order, axis))
    }

    pub fn order(&self) -> AxisOrder {
        self.order
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn angle(&self, q: &Quaternion) -> f64 {
        self.formula.evaluate(q)
    }
}

impl Mapper for Quaternion2Euler {
    fn map(&self, input: &Signal) -> Result<Signal, MappingError> {
        let q = input.as_quaternion().ok_or_else(|| shape_mismatch(self, input))?;
        Ok(Signal::Scalar(self.angle(&q)))
    }

    fn name(&self) -> &'static str {
        self.order.stage_name()
    }

    fn input_shape(&self) -> Shape {
        Shape::Quaternion
    }
}
