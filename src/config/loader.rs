// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConfigError;
use crate::observability::messages::config::ConfigLoaded;
use crate::observability::messages::StructuredLog;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Motor mapping configuration.
///
/// Each motor entry binds one output channel to a mapping function that turns
/// incoming action-unit or orientation values into commands inside the
/// motor's physical range. It is typically loaded from a YAML file.
///
/// # Example
/// ```yaml
/// motors:
///   - name: jaw
///     min: -0.5
///     max: 1.2
///     binding:
///       input: jaw_open
///       function:
///         name: linear
///         min: 0
///         max: 1
///   - name: neck_yaw
///     min: -1.0
///     max: 1.0
///     binding:
///       input: head_orientation
///       function:
///         - name: quaternion2euler
///           axis: z
///         - name: linear
///           scale: -2.92
///           translate: 0
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub motors: Vec<MotorEntry>,
}

/// One actuator: its command range and the function feeding it.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorEntry {
    pub name: String,
    pub min: f64,
    pub max: f64,
    /// Rest position, if the motor has one.
    #[serde(default)]
    pub default: Option<f64>,
    pub binding: Binding,
}

impl MotorEntry {
    pub fn range(&self) -> MotorRange {
        MotorRange {
            min: self.min,
            max: self.max,
        }
    }
}

/// Physical command range of a motor, as seen by range-fitting mappers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorRange {
    pub min: f64,
    pub max: f64,
}

impl MotorRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `max - min`; negative for motors wired in reverse.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Where a motor's input comes from and how it is transformed.
#[derive(Debug, Clone, Deserialize)]
pub struct Binding {
    /// Label of the input channel; resolved by the driver feeding samples, not by the mapper.
    #[serde(default)]
    pub input: Option<String>,
    pub function: FunctionDescription,
}

/// A single stage, or an ordered chain of stages evaluated first to last.
///
/// Chains cannot nest: every element of a chain is a stage record.
#[derive(Debug, Clone)]
pub enum FunctionDescription {
    Stage(StageDescription),
    Chain(Vec<StageDescription>),
}

impl FunctionDescription {
    pub fn stage_count(&self) -> usize {
        match self {
            FunctionDescription::Stage(_) => 1,
            FunctionDescription::Chain(stages) => stages.len(),
        }
    }
}

/// A mapping is one stage and a sequence is a chain; field errors name the layout they came from.
impl<'de> Deserialize<'de> for FunctionDescription {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        match value {
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)
                .map(FunctionDescription::Stage)
                .map_err(|e| de::Error::custom(format!("invalid stage record: {}", e))),
            serde_yaml::Value::Sequence(_) => serde_yaml::from_value(value)
                .map(FunctionDescription::Chain)
                .map_err(|e| de::Error::custom(format!("invalid stage list: {}", e))),
            _ => Err(de::Error::custom(
                "function must be a stage record or a list of stage records",
            )),
        }
    }
}

/// A named stage record. Every key other than `name` is a stage parameter
/// (`scale`, `translate`, `min`, `max`, `imin`, `terms`, `axis`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct StageDescription {
    pub name: String,
    #[serde(flatten)]
    pub params: HashMap<String, serde_yaml::Value>,
}

impl StageDescription {
    /// Decode the parameters into the typed record of the mapper `stage`.
    pub fn params_as<T: DeserializeOwned>(&self, stage: &'static str) -> Result<T, ConfigError> {
        let mapping: serde_yaml::Mapping = self
            .params
            .iter()
            .map(|(key, value)| (serde_yaml::Value::String(key.clone()), value.clone()))
            .collect();
        serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
            .map_err(|source| ConfigError::InvalidParameters { stage, source })
    }
}

/// Parse a config from YAML text.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(content)?;
    Ok(cfg)
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path.as_ref())?;
    let cfg = parse_config(&content)?;

    ConfigLoaded {
        path: &path.as_ref().display().to_string(),
        motor_count: cfg.motors.len(),
    }
    .log();

    Ok(cfg)
}

/// Load and validate a config from a YAML file
///
/// All validation problems are collected and reported in one error.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_motors(&cfg).map_err(ConfigError::Validation)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
motors:
  - name: jaw
    min: -0.5
    max: 1.2
    binding:
      input: jaw_open
      function:
        name: linear
        min: 0
        max: 1
  - name: neck_yaw
    min: -1
    max: 1
    default: 0
    binding:
      function:
        - name: quaternion2euler
          axis: z
        - name: linear
          scale: -2.92
          translate: 0
"#;

        let cfg = parse_config(yaml).unwrap();
        assert_eq!(cfg.motors.len(), 2);
        assert_eq!(cfg.motors[0].name, "jaw");
        assert_eq!(cfg.motors[0].binding.input.as_deref(), Some("jaw_open"));
        assert_eq!(cfg.motors[0].range(), MotorRange::new(-0.5, 1.2));
        assert_eq!(cfg.motors[1].default, Some(0.0));

        match &cfg.motors[0].binding.function {
            FunctionDescription::Stage(stage) => {
                assert_eq!(stage.name, "linear");
                assert_eq!(stage.params.len(), 2);
                assert!(stage.params.contains_key("min"));
            }
            other => panic!("expected a single stage, got {:?}", other),
        }

        match &cfg.motors[1].binding.function {
            FunctionDescription::Chain(stages) => {
                let names: Vec<&str> = stages.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["quaternion2euler", "linear"]);
            }
            other => panic!("expected a chain, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_has_no_motors() {
        let cfg = parse_config("{}").unwrap();
        assert!(cfg.motors.is_empty());
    }

    #[test]
    fn test_nested_chains_are_rejected() {
        let yaml = r#"
motors:
  - name: jaw
    min: 0
    max: 1
    binding:
      function:
        - - name: linear
            scale: 1
            translate: 0
"#;
        assert!(matches!(parse_config(yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_stage_without_name_is_rejected() {
        let yaml = r#"
motors:
  - name: jaw
    min: 0
    max: 1
    binding:
      function:
        scale: 1
        translate: 0
"#;
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn test_malformed_function_reports_field() {
        let test_cases = vec![
            ("function: {scale: 1, translate: 0}", "invalid stage record", "missing field `name`"),
            ("function: [{name: linear}, {scale: 1}]", "invalid stage list", "missing field `name`"),
            ("function: [[{name: linear}]]", "invalid stage list", "invalid type: sequence"),
            ("function: linear", "stage record or a list of stage records", ""),
        ];

        for (function, context, detail) in test_cases {
            let yaml = format!("motors:\n  - name: jaw\n    min: 0\n    max: 1\n    binding:\n      {}\n", function);
            let message = parse_config(&yaml).unwrap_err().to_string();
            assert!(message.contains(context), "{}: {}", function, message);
            assert!(message.contains(detail), "{}: {}", function, message);
            assert!(!message.contains("untagged"), "{}: {}", function, message);
        }
    }

    #[test]
    fn test_stage_count() {
        let stage: FunctionDescription = serde_yaml::from_str("{name: linear, scale: 1, translate: 0}").unwrap();
        let chain: FunctionDescription = serde_yaml::from_str("[{name: linear}, {name: linear}]").unwrap();
        let empty: FunctionDescription = serde_yaml::from_str("[]").unwrap();
        assert_eq!(stage.stage_count(), 1);
        assert_eq!(chain.stage_count(), 2);
        assert_eq!(empty.stage_count(), 0);
    }

    #[test]
    fn test_params_as_reports_stage_on_type_error() {
        #[derive(Debug, Deserialize)]
        struct Params {
            #[allow(dead_code)]
            scale: f64,
        }

        let stage: StageDescription = serde_yaml::from_str("{name: linear, scale: steep}").unwrap();
        let err = stage.params_as::<Params>("linear").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameters { stage: "linear", .. }));
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let yaml = r#"
motors:
  - name: brow
    min: 0
    max: 1
    binding:
      function:
        name: weightedsum
        imin: 0.402
        terms:
          - {min: 0, max: 1, imax: 0}
          - {min: 0, max: 0.6, imax: 1}
"#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.motors.len(), 1);
    }

    #[test]
    fn test_load_and_validate_duplicate_motors() {
        let yaml = r#"
motors:
  - name: jaw
    min: 0
    max: 1
    binding:
      function: {name: linear, scale: 1, translate: 0}
  - name: jaw
    min: 0
    max: 1
    binding:
      function: {name: linear, scale: 1, translate: 0}
"#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let result = load_and_validate_config(file.path());
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("Duplicate motor name: 'jaw'"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
