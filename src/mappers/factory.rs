// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{LINEAR, QUATERNION_TO_EULER_YZX, QUATERNION_TO_EULER_YZY, WEIGHTED_SUM};
use crate::config::{FunctionDescription, MotorRange, StageDescription};
use crate::errors::ConfigError;
use crate::observability::messages::mapper::StageBuilt;
use crate::observability::messages::StructuredLog;
use crate::traits::Mapper;

use super::{AxisOrder, Composite, Linear, Quaternion2Euler, WeightedSum};

/// The closed set of stage variants a description can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperKind {
    Linear,
    WeightedSum,
    Quaternion2EulerYzx,
    Quaternion2EulerYzy,
}

/// Stage name to variant. Read-only; names match exactly.
const REGISTRY: &[(&str, MapperKind)] = &[
    (LINEAR, MapperKind::Linear),
    (WEIGHTED_SUM, MapperKind::WeightedSum),
    (QUATERNION_TO_EULER_YZX, MapperKind::Quaternion2EulerYzx),
    (QUATERNION_TO_EULER_YZY, MapperKind::Quaternion2EulerYzy),
];

impl MapperKind {
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, kind)| *kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            MapperKind::Linear => LINEAR,
            MapperKind::WeightedSum => WEIGHTED_SUM,
            MapperKind::Quaternion2EulerYzx => QUATERNION_TO_EULER_YZX,
            MapperKind::Quaternion2EulerYzy => QUATERNION_TO_EULER_YZY,
        }
    }

    /// All registered stage names, in registry order.
    pub fn names() -> Vec<&'static str> {
        REGISTRY.iter().map(|(name, _)| *name).collect()
    }

    /// Construct this variant from its stage record and the owning motor's range.
    pub fn construct(
        self,
        stage: &StageDescription,
        motor: &MotorRange,
    ) -> Result<Box<dyn Mapper>, ConfigError> {
        let mapper: Box<dyn Mapper> = match self {
            MapperKind::Linear => Box::new(Linear::from_stage(stage, motor)?),
            MapperKind::WeightedSum => Box::new(WeightedSum::from_stage(stage, motor)?),
            MapperKind::Quaternion2EulerYzx => {
                Box::new(Quaternion2Euler::from_stage(AxisOrder::Yzx, stage)?)
            }
            MapperKind::Quaternion2EulerYzy => {
                Box::new(Quaternion2Euler::from_stage(AxisOrder::Yzy, stage)?)
            }
        };
        Ok(mapper)
    }
}

/// Factory turning declarative function descriptions into executable mappers
pub struct MapperFactory;

impl MapperFactory {
    /// Build a mapper for one motor.
    ///
    /// A single stage record becomes that stage; a list of records becomes a
    /// [`Composite`] of the stages, each built against the same motor range.
    pub fn build(
        description: &FunctionDescription,
        motor: &MotorRange,
    ) -> Result<Box<dyn Mapper>, ConfigError> {
        match description {
            FunctionDescription::Stage(stage) => Self::build_stage(stage, motor),
            FunctionDescription::Chain(stages) => {
                let mappers = stages
                    .iter()
                    .map(|stage| Self::build_stage(stage, motor))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Box::new(Composite::new(mappers)?))
            }
        }
    }

    /// Build one stage record. Unknown names are a configuration error.
    pub fn build_stage(
        stage: &StageDescription,
        motor: &MotorRange,
    ) -> Result<Box<dyn Mapper>, ConfigError> {
        let kind = MapperKind::from_name(&stage.name).ok_or_else(|| ConfigError::UnknownStage {
            name: stage.name.clone(),
            available: MapperKind::names().join(", "),
        })?;

        let mapper = kind.construct(stage, motor)?;

        StageBuilt {
            stage: kind.name(),
            input_shape: mapper.input_shape(),
        }
        .log();

        Ok(mapper)
    }

    /// Check if a stage name is registered
    pub fn is_registered(name: &str) -> bool {
        MapperKind::from_name(name).is_some()
    }
}

/// Build a mapper from a function description; see [`MapperFactory::build`].
pub fn build(
    description: &FunctionDescription,
    motor: &MotorRange,
) -> Result<Box<dyn Mapper>, ConfigError> {
    MapperFactory::build(description, motor)
}
