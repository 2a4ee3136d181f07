// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Mapper implementations and the factory building them from configuration.
//!
//! Every mapper implements the [`Mapper`](crate::traits::Mapper) trait and is
//! created from a stage record plus the owning motor's range:
//! ```text
//! Stage description → MapperFactory → Mapper instance → MotorPipeline
//! ```
//!
//! # Available Mappers
//!
//! - **linear**: affine rescale, or fitting an input interval onto the motor range
//! - **weightedsum**: several saturated channels summed into one command
//! - **quaternion2euler**: one Y-Z-X Tait-Bryan angle of an orientation
//! - **quaternion2YZY**: the same with the `x`/`y` formulas swapped
//!
//! A list of stages builds a [`Composite`] applying them in order.
//!
//! # Examples
//!
//! ```rust
//! use motor_mapper::config::{FunctionDescription, MotorRange};
//! use motor_mapper::mappers::build;
//! use motor_mapper::signal::Signal;
//! use motor_mapper::traits::Mapper;
//!
//! let description: FunctionDescription = serde_yaml::from_str(r#"
//! - name: linear
//!   min: 0
//!   max: 1
//! "#).unwrap();
//!
//! let mapper = build(&description, &MotorRange::new(-1.0, 1.0)).unwrap();
//! assert_eq!(mapper.map(&Signal::Scalar(0.5)).unwrap(), Signal::Scalar(0.0));
//! ```

pub mod composite;
pub mod factory;
pub mod linear;
pub mod quaternion;
pub mod weighted_sum;

pub use composite::Composite;
pub use factory::{build, MapperFactory, MapperKind};
pub use linear::Linear;
pub use quaternion::{Axis, AxisOrder, Quaternion2Euler};
pub use weighted_sum::{Term, WeightedSum};

use crate::config::MotorRange;
use crate::errors::ConfigError;

pub(crate) fn ensure_finite(stage: &'static str, field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteParameter {
            stage,
            field: field.to_string(),
        })
    }
}

/// Range-fitting stages need a motor range whose bounds and span are finite.
pub(crate) fn ensure_finite_motor(stage: &'static str, motor: &MotorRange) -> Result<(), ConfigError> {
    ensure_finite(stage, "motor min", motor.min)?;
    ensure_finite(stage, "motor max", motor.max)?;
    ensure_finite(stage, "motor range", motor.span())
}

/// Width of `[min, max]`, rejecting empty and overflowing intervals.
pub(crate) fn interval_width(stage: &'static str, field: &str, min: f64, max: f64) -> Result<f64, ConfigError> {
    let width = max - min;
    ensure_finite(stage, &format!("{} width", field), width)?;
    if width == 0.0 {
        return Err(ConfigError::DegenerateRange {
            stage,
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(width)
}

/// A slope fitted over `[min, max]` must be finite.
pub(crate) fn ensure_fitted(
    stage: &'static str,
    field: &str,
    min: f64,
    max: f64,
    scale: f64,
) -> Result<f64, ConfigError> {
    if scale.is_finite() {
        Ok(scale)
    } else {
        Err(ConfigError::DegenerateRange {
            stage,
            field: field.to_string(),
            min,
            max,
        })
    }
}
