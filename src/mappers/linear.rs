// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::config::consts::LINEAR;
use crate::config::{MotorRange, StageDescription};
use crate::errors::{ConfigError, MappingError};
use crate::mappers::{ensure_finite, ensure_finite_motor, ensure_fitted, interval_width};
use crate::signal::{Shape, Signal};
use crate::traits::{shape_mismatch, Mapper};

/// Parameters of a `linear` stage; exactly one complete pair is used.
#[derive(Debug, Clone, Deserialize)]
struct LinearParams {
    scale: Option<f64>,
    translate: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

/// Linear mapper, in one of two forms:
///
/// ```yaml
/// function:
///   name: linear
///   scale: -2.92
///   translate: 0.3
/// ```
///
/// rescales to the given slope and offset, while
///
/// ```yaml
/// function:
///   name: linear
///   min: 0.252
///   max: -0.342
/// ```
///
/// maps the input interval `[min, max]` onto the motor's `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    pretranslate: f64,
    scale: f64,
    posttranslate: f64,
}

impl Linear {
    /// `value * scale + translate`
    pub fn affine(scale: f64, translate: f64) -> Self {
        Self {
            pretranslate: 0.0,
            scale,
            posttranslate: translate,
        }
    }

    /// Map `[input_min, input_max]` onto the motor range. The input bounds may be inverted.
    ///
    /// Fails when any bound is not finite, or the input interval is empty or
    /// too narrow for a finite slope.
    pub fn fit_range(input_min: f64, input_max: f64, motor: &MotorRange) -> Result<Self, ConfigError> {
        ensure_finite(LINEAR, "min", input_min)?;
        ensure_finite(LINEAR, "max", input_max)?;
        ensure_finite_motor(LINEAR, motor)?;

        let width = interval_width(LINEAR, "input range", input_min, input_max)?;
        let scale = ensure_fitted(LINEAR, "input range", input_min, input_max, motor.span() / width)?;

        Ok(Self {
            pretranslate: -input_min,
            scale,
            posttranslate: motor.min,
        })
    }

    /// Build from a stage record. The affine form wins when both pairs are present.
    pub fn from_stage(stage: &StageDescription, motor: &MotorRange) -> Result<Self, ConfigError> {
        let params: LinearParams = stage.params_as(LINEAR)?;

        let linear = match params {
            LinearParams {
                scale: Some(scale),
                translate: Some(translate),
                ..
            } => {
                ensure_finite(LINEAR, "scale", scale)?;
                ensure_finite(LINEAR, "translate", translate)?;
                Self::affine(scale, translate)
            }
            LinearParams {
                min: Some(min),
                max: Some(max),
                ..
            } => Self::fit_range(min, max, motor)?,
            _ => {
                return Err(ConfigError::MissingParameters {
                    stage: LINEAR,
                    expected: "either 'scale' and 'translate', or 'min' and 'max'",
                })
            }
        };

        Ok(linear)
    }

    pub fn apply(&self, value: f64) -> f64 {
        (value + self.pretranslate) * self.scale + self.posttranslate
    }
}

impl Mapper for Linear {
    fn map(&self, input: &Signal) -> Result<Signal, MappingError> {
        let value = input.as_scalar().ok_or_else(|| shape_mismatch(self, input))?;
        Ok(Signal::Scalar(self.apply(value)))
    }

    fn name(&self) -> &'static str {
        LINEAR
    }

    fn input_shape(&self) -> Shape {
        Shape::Scalar
    }
}
