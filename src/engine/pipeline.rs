// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::config::{Config, MotorEntry, MotorRange};
use crate::errors::{ConfigError, MappingError};
use crate::mappers::MapperFactory;
use crate::observability::messages::pipeline::{PipelineBuildFailed, PipelineBuildStarted, PipelineBuilt};
use crate::observability::messages::StructuredLog;
use crate::signal::{Shape, Signal};
use crate::traits::Mapper;

/// The built mapping of one motor: immutable once constructed.
#[derive(Debug)]
pub struct MotorPipeline {
    motor: String,
    range: MotorRange,
    input: Option<String>,
    mapper: Box<dyn Mapper>,
}

impl MotorPipeline {
    /// Build the pipeline described by a motor entry's binding.
    pub fn from_entry(entry: &MotorEntry) -> Result<Self, ConfigError> {
        let range = entry.range();
        let started = PipelineBuildStarted {
            motor: &entry.name,
            stage_count: entry.binding.function.stage_count(),
        };
        let span = started.span("motor_pipeline");
        let _guard = span.enter();
        started.log();

        let mapper = match MapperFactory::build(&entry.binding.function, &range) {
            Ok(mapper) => mapper,
            Err(error) => {
                PipelineBuildFailed {
                    motor: &entry.name,
                    error: &error,
                }
                .log();
                return Err(ConfigError::for_motor(&entry.name, error));
            }
        };

        PipelineBuilt {
            motor: &entry.name,
            mapper: mapper.name(),
            input_shape: &mapper.input_shape().to_string(),
        }
        .log();

        Ok(Self {
            motor: entry.name.clone(),
            range,
            input: entry.binding.input.clone(),
            mapper,
        })
    }

    pub fn motor(&self) -> &str {
        &self.motor
    }

    pub fn range(&self) -> MotorRange {
        self.range
    }

    /// Label of the input channel the driver should feed, if configured.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn input_shape(&self) -> Shape {
        self.mapper.input_shape()
    }

    /// Evaluate one sample into a motor command.
    pub fn command(&self, input: &Signal) -> Result<f64, MappingError> {
        let output = self.mapper.map(input)?;
        output.as_scalar().ok_or_else(|| MappingError::NonScalarOutput {
            motor: self.motor.clone(),
            actual: output.shape(),
        })
    }
}

/// All motor pipelines of a configuration, keyed by motor name.
#[derive(Debug, Default)]
pub struct MotorPipelines(BTreeMap<String, MotorPipeline>);

impl MotorPipelines {
    /// Build every motor's pipeline, stopping at the first configuration error.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let mut pipelines = BTreeMap::new();
        for entry in &cfg.motors {
            let pipeline = MotorPipeline::from_entry(entry)?;
            pipelines.insert(entry.name.clone(), pipeline);
        }
        Ok(Self(pipelines))
    }

    pub fn get(&self, motor: &str) -> Option<&MotorPipeline> {
        self.0.get(motor)
    }

    /// Pipelines in motor-name order.
    pub fn iter(&self) -> impl Iterator<Item = &MotorPipeline> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::signal::Quaternion;

    const CONFIG: &str = r#"
motors:
  - name: jaw
    min: -0.5
    max: 1.5
    binding:
      input: jaw_open
      function:
        name: linear
        min: 0
        max: 1
  - name: neck_roll
    min: -1
    max: 1
    binding:
      function:
        - name: quaternion2euler
          axis: x
        - name: linear
          scale: 2
          translate: 0
  - name: passthrough
    min: 0
    max: 1
    binding:
      function: []
"#;

    #[test]
    fn test_from_config() {
        let pipelines = MotorPipelines::from_config(&parse_config(CONFIG).unwrap()).unwrap();
        assert_eq!(pipelines.len(), 3);

        let names: Vec<&str> = pipelines.iter().map(|p| p.motor()).collect();
        assert_eq!(names, vec!["jaw", "neck_roll", "passthrough"]);

        let jaw = pipelines.get("jaw").unwrap();
        assert_eq!(jaw.input(), Some("jaw_open"));
        assert_eq!(jaw.range(), MotorRange::new(-0.5, 1.5));
        assert_eq!(jaw.command(&Signal::Scalar(0.0)).unwrap(), -0.5);
        assert_eq!(jaw.command(&Signal::Scalar(1.0)).unwrap(), 1.5);
    }

    #[test]
    fn test_quaternion_motor() {
        let pipelines = MotorPipelines::from_config(&parse_config(CONFIG).unwrap()).unwrap();
        let neck = pipelines.get("neck_roll").unwrap();
        assert_eq!(neck.input_shape(), Shape::Quaternion);

        let q = Quaternion::from_axis_angle([1.0, 0.0, 0.0], 0.2);
        let command = neck.command(&Signal::Quaternion(q)).unwrap();
        assert!((command - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_identity_pipeline_requires_scalar_output() {
        let pipelines = MotorPipelines::from_config(&parse_config(CONFIG).unwrap()).unwrap();
        let passthrough = pipelines.get("passthrough").unwrap();

        assert_eq!(passthrough.command(&Signal::Scalar(0.3)).unwrap(), 0.3);
        let err = passthrough.command(&Signal::Vector(vec![0.1, 0.2])).unwrap_err();
        assert_eq!(
            err,
            MappingError::NonScalarOutput {
                motor: "passthrough".to_string(),
                actual: Shape::Vector(2),
            }
        );
    }

    #[test]
    fn test_build_error_names_motor() {
        let cfg = parse_config(
            r#"
motors:
  - name: brow
    min: 0
    max: 1
    binding:
      function: {name: tanh}
"#,
        )
        .unwrap();

        let err = MotorPipelines::from_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Motor { ref motor, .. } if motor == "brow"));
        assert!(err.to_string().starts_with("Motor 'brow': Unknown mapper 'tanh'"));
    }

    #[test]
    fn test_unvalidated_non_finite_motor_range_is_rejected() {
        let cfg = parse_config(
            r#"
motors:
  - name: jaw
    min: .nan
    max: 1
    binding:
      function: {name: linear, min: 0, max: 1}
"#,
        )
        .unwrap();

        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let err = MotorPipelines::from_config(&cfg).unwrap_err();
            match err {
                ConfigError::Motor { motor, source } => {
                    assert_eq!(motor, "jaw");
                    assert!(matches!(*source, ConfigError::NonFiniteParameter { ref field, .. } if field == "motor min"));
                }
                other => panic!("expected a motor error, got {:?}", other),
            }
        });
    }
}
