// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of motor entries.
//!
//! Checks that do not need a built mapper live here: unique motor names,
//! finite ranges and rest positions inside the range. Parameter problems of
//! individual stages are reported by the mapper factory when the pipeline is
//! built.

use crate::config::Config;
use crate::errors::ValidationError;
use crate::observability::messages::config::MotorValidationFailed;
use crate::observability::messages::StructuredLog;
use std::collections::HashSet;

/// Validate every motor entry, accumulating all problems found.
///
/// # Examples
///
/// ```rust
/// use motor_mapper::config::{parse_config, validate_motors};
///
/// let config = parse_config(r#"
/// motors:
///   - name: jaw
///     min: 0
///     max: 1
///     default: 2
///     binding:
///       function: {name: linear, scale: 1, translate: 0}
/// "#).unwrap();
///
/// let errors = validate_motors(&config).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// ```
pub fn validate_motors(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_motor_names(config) {
        errors.extend(duplicate_errors);
    }

    if let Err(range_errors) = validate_ranges(config) {
        errors.extend(range_errors);
    }

    for error in &errors {
        MotorValidationFailed { error }.log();
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_motor_names(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for motor in &config.motors {
        if !seen.insert(motor.name.as_str()) {
            errors.push(ValidationError::DuplicateMotor {
                motor: motor.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Ranges may be given in either order; a motor wired in reverse has `min > max`.
fn validate_ranges(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for motor in &config.motors {
        if !motor.min.is_finite() || !motor.max.is_finite() {
            errors.push(ValidationError::NonFiniteRange {
                motor: motor.name.clone(),
            });
            continue;
        }

        if let Some(default) = motor.default {
            let lower = motor.min.min(motor.max);
            let upper = motor.min.max(motor.max);
            if !(lower..=upper).contains(&default) {
                errors.push(ValidationError::DefaultOutOfRange {
                    motor: motor.name.clone(),
                    default,
                    min: motor.min,
                    max: motor.max,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
