// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while loading a motor configuration or building mappers from it.
//!
//! Every configuration mistake is detected before a pipeline exists, so a
//! built pipeline never misbehaves because of its description.

use crate::signal::Shape;
use std::fmt;
use thiserror::Error;

/// Build-time and load-time failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML or does not match the motor layout.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A stage names a mapper that is not in the registry.
    #[error("Unknown mapper '{name}' (available: {available})")]
    UnknownStage { name: String, available: String },

    /// Neither of the accepted parameter combinations is complete.
    #[error("Mapper '{stage}' requires {expected}")]
    MissingParameters {
        stage: &'static str,
        expected: &'static str,
    },

    /// Stage parameters have the wrong type.
    #[error("Invalid parameters for mapper '{stage}': {source}")]
    InvalidParameters {
        stage: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    /// The interval is empty, or so narrow its slope is not a finite number.
    #[error("Mapper '{stage}': {field} [{min}, {max}] is too narrow to map")]
    DegenerateRange {
        stage: &'static str,
        field: String,
        min: f64,
        max: f64,
    },

    #[error("Mapper '{stage}': parameter '{field}' must be finite")]
    NonFiniteParameter { stage: &'static str, field: String },

    #[error("Mapper '{stage}' needs at least one term")]
    EmptyTerms { stage: &'static str },

    /// Axis is not one of `x`, `y`, `z`.
    #[error("Mapper '{stage}': invalid axis '{axis}', expected one of x, y, z")]
    InvalidAxis { stage: &'static str, axis: String },

    /// A chained stage cannot take the scalar produced by its predecessor.
    #[error("Stage {position} ('{stage}') expects {expected} input but follows a stage producing a scalar")]
    IncompatibleStage {
        position: usize,
        stage: &'static str,
        expected: Shape,
    },

    /// A mapper failed to build for a specific motor.
    #[error("Motor '{motor}': {source}")]
    Motor {
        motor: String,
        #[source]
        source: Box<ConfigError>,
    },

    /// One or more motor entries failed validation.
    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    pub fn for_motor(motor: &str, source: ConfigError) -> Self {
        ConfigError::Motor {
            motor: motor.to_string(),
            source: Box::new(source),
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Problems found by validating motor entries, reported all at once.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two motor entries share a name
    DuplicateMotor { motor: String },
    /// A motor's `min` or `max` is NaN or infinite
    NonFiniteRange { motor: String },
    /// The rest position lies outside the motor's range
    DefaultOutOfRange {
        motor: String,
        default: f64,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateMotor { motor } => {
                write!(f, "Duplicate motor name: '{}'", motor)
            }
            ValidationError::NonFiniteRange { motor } => {
                write!(f, "Motor '{}' has a non-finite min or max", motor)
            }
            ValidationError::DefaultOutOfRange {
                motor,
                default,
                min,
                max,
            } => {
                write!(
                    f,
                    "Motor '{}' default {} lies outside its range [{}, {}]",
                    motor, default, min, max
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
