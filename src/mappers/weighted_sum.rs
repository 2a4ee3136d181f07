// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::config::consts::WEIGHTED_SUM;
use crate::config::{MotorRange, StageDescription};
use crate::errors::{ConfigError, MappingError};
use crate::mappers::{ensure_finite, ensure_finite_motor, ensure_fitted, interval_width};
use crate::signal::{Shape, Signal};
use crate::traits::{shape_mismatch, Mapper};

/// One input channel of a weighted sum: its saturation interval and the
/// intermediate value it contributes at the far end of that interval.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Term {
    pub min: f64,
    pub max: f64,
    pub imax: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct WeightedSumParams {
    imin: Option<f64>,
    terms: Option<Vec<Term>>,
}

#[derive(Debug, Clone, PartialEq)]
struct ResolvedTerm {
    lower: f64,
    upper: f64,
    pretranslate: f64,
    scale: f64,
}

impl ResolvedTerm {
    fn contribution(&self, value: f64) -> f64 {
        (value.clamp(self.lower, self.upper) + self.pretranslate) * self.scale
    }
}

/// Maps the min-max range of every term onto its own intermediate range
/// `imin..imax`, sums the terms, and reads the sum as an intermediate value
/// where `0` is the motor's `min` and `1` its `max`. At rest every term
/// contributes nothing and the motor sits at `imin` of its range.
///
/// ```yaml
/// function:
///   name: weightedsum
///   imin: 0.402
///   terms:
///     - {min: 0, max: 1, imax: 0}
///     - {min: 0, max: 0.6, imax: 1}
/// ```
///
/// Each input is saturated to its own term interval first; inverted bounds
/// (`min > max`) are accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSum {
    terms: Vec<ResolvedTerm>,
    posttranslate: f64,
}

impl WeightedSum {
    pub fn new(imin: f64, terms: &[Term], motor: &MotorRange) -> Result<Self, ConfigError> {
        ensure_finite(WEIGHTED_SUM, "imin", imin)?;
        ensure_finite_motor(WEIGHTED_SUM, motor)?;
        if terms.is_empty() {
            return Err(ConfigError::EmptyTerms {
                stage: WEIGHTED_SUM,
            });
        }

        let span = motor.span();
        let resolved = terms
            .iter()
            .enumerate()
            .map(|(i, term)| {
                let field = format!("terms[{}]", i);
                ensure_finite(WEIGHTED_SUM, &format!("{}.min", field), term.min)?;
                ensure_finite(WEIGHTED_SUM, &format!("{}.max", field), term.max)?;
                ensure_finite(WEIGHTED_SUM, &format!("{}.imax", field), term.imax)?;
                let rise = term.imax - imin;
                ensure_finite(WEIGHTED_SUM, &format!("{}.imax - imin", field), rise)?;

                let width = interval_width(WEIGHTED_SUM, &field, term.min, term.max)?;
                let scale = ensure_fitted(WEIGHTED_SUM, &field, term.min, term.max, rise / width * span)?;

                Ok(ResolvedTerm {
                    lower: term.min.min(term.max),
                    upper: term.min.max(term.max),
                    pretranslate: -term.min,
                    scale,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let posttranslate = imin * span + motor.min;
        ensure_finite(WEIGHTED_SUM, "imin * motor range + motor min", posttranslate)?;

        Ok(Self {
            terms: resolved,
            posttranslate,
        })
    }

    pub fn from_stage(stage: &StageDescription, motor: &MotorRange) -> Result<Self, ConfigError> {
        let params: WeightedSumParams = stage.params_as(WEIGHTED_SUM)?;
        match params {
            WeightedSumParams {
                imin: Some(imin),
                terms: Some(terms),
            } => Self::new(imin, &terms, motor),
            _ => Err(ConfigError::MissingParameters {
                stage: WEIGHTED_SUM,
                expected: "'imin' and 'terms'",
            }),
        }
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

impl Mapper for WeightedSum {
    fn map(&self, input: &Signal) -> Result<Signal, MappingError> {
        let values = input
            .as_slice()
            .filter(|values| values.len() == self.terms.len())
            .ok_or_else(|| shape_mismatch(self, input))?;

        let sum: f64 = values
            .iter()
            .zip(&self.terms)
            .map(|(value, term)| term.contribution(*value))
            .sum();

        Ok(Signal::Scalar(sum + self.posttranslate))
    }

    fn name(&self) -> &'static str {
        WEIGHTED_SUM
    }

    fn input_shape(&self) -> Shape {
        Shape::Vector(self.terms.len())
    }
}
