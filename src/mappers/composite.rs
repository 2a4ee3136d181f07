// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::COMPOSITE;
use crate::errors::{ConfigError, MappingError};
use crate::signal::{Shape, Signal};
use crate::traits::Mapper;

/// Composition mapper. The output is obtained by applying each stage in
/// sequence, one after the other:
///
/// ```yaml
/// function:
///   - name: quaternion2euler
///     axis: z
///   - name: linear
///     scale: -2.92
///     translate: 0
/// ```
///
/// applies `quaternion2euler` first, then `linear`. An empty composite is
/// the identity.
#[derive(Debug)]
pub struct Composite {
    stages: Vec<Box<dyn Mapper>>,
}

impl Composite {
    /// Chain `stages`. Every stage after the first must accept the scalar its
    /// predecessor produces.
    pub fn new(stages: Vec<Box<dyn Mapper>>) -> Result<Self, ConfigError> {
        for (position, stage) in stages.iter().enumerate().skip(1) {
            let expected = stage.input_shape();
            if !expected.accepts_scalar() {
                return Err(ConfigError::IncompatibleStage {
                    position,
                    stage: stage.name(),
                    expected,
                });
            }
        }

        Ok(Self { stages })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}

impl Mapper for Composite {
    fn map(&self, input: &Signal) -> Result<Signal, MappingError> {
        let mut stages = self.stages.iter();
        let mut value = match stages.next() {
            Some(first) => first.map(input)?,
            None => return Ok(input.clone()),
        };
        for stage in stages {
            value = stage.map(&value)?;
        }
        Ok(value)
    }

    fn name(&self) -> &'static str {
        COMPOSITE
    }

    fn input_shape(&self) -> Shape {
        self.stages
            .first()
            .map(|stage| stage.input_shape())
            .unwrap_or(Shape::Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotorRange;
    use crate::mappers::{Axis, AxisOrder, Linear, Quaternion2Euler, Term, WeightedSum};
    use crate::signal::Quaternion;

    fn boxed<M: Mapper + 'static>(mapper: M) -> Box<dyn Mapper> {
        Box::new(mapper)
    }

    #[test]
    fn test_empty_composite_is_identity() {
        let identity = Composite::new(vec![]).unwrap();
        assert!(identity.is_empty());
        assert_eq!(identity.input_shape(), Shape::Any);

        let samples = vec![
            Signal::Scalar(-3.5),
            Signal::Vector(vec![0.1, 0.2, 0.3]),
            Signal::Quaternion(Quaternion::identity()),
        ];
        for sample in samples {
            assert_eq!(identity.map(&sample).unwrap(), sample);
        }
    }

    #[test]
    fn test_chain_applies_stages_in_order() {
        let a = Linear::affine(2.0, 1.0);
        let b = Linear::affine(-0.5, 3.0);
        let chain = Composite::new(vec![boxed(a.clone()), boxed(b.clone())]).unwrap();

        for v in [-2.0, 0.0, 0.25, 7.0] {
            let expected = b.map(&a.map(&Signal::Scalar(v)).unwrap()).unwrap();
            assert_eq!(chain.map(&Signal::Scalar(v)).unwrap(), expected);
        }
        // Order matters: b after a differs from a after b.
        assert_eq!(chain.map(&Signal::Scalar(1.0)).unwrap(), Signal::Scalar(1.5));
        assert_eq!(chain.stage_names(), vec!["linear", "linear"]);
    }

    #[test]
    fn test_quaternion_then_linear() {
        let chain = Composite::new(vec![
            boxed(Quaternion2Euler::new(AxisOrder::Yzx, Axis::Z)),
            boxed(Linear::affine(-2.92, 0.0)),
        ])
        .unwrap();
        assert_eq!(chain.input_shape(), Shape::Quaternion);

        let q = Quaternion::from_axis_angle([0.0, 0.0, 1.0], 0.1);
        let out = chain.map(&Signal::Quaternion(q)).unwrap().as_scalar().unwrap();
        assert!((out - (-0.292)).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_stage_that_cannot_take_a_scalar() {
        let err = Composite::new(vec![
            boxed(Linear::affine(1.0, 0.0)),
            boxed(Quaternion2Euler::new(AxisOrder::Yzx, Axis::X)),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::IncompatibleStage {
                position: 1,
                stage: "quaternion2euler",
                expected: Shape::Quaternion,
            }
        ));

        let motor = MotorRange::new(0.0, 1.0);
        let pair = WeightedSum::new(0.0, &[Term { min: 0.0, max: 1.0, imax: 1.0 }; 2], &motor).unwrap();
        assert!(Composite::new(vec![boxed(Linear::affine(1.0, 0.0)), boxed(pair)]).is_err());
    }

    #[test]
    fn test_saturating_tail_stage() {
        let motor = MotorRange::new(0.0, 1.0);
        let clamp = WeightedSum::new(0.0, &[Term { min: 0.0, max: 1.0, imax: 1.0 }], &motor).unwrap();
        let chain = Composite::new(vec![boxed(Linear::affine(10.0, 0.0)), boxed(clamp)]).unwrap();

        assert_eq!(chain.map(&Signal::Scalar(0.5)).unwrap(), Signal::Scalar(1.0));
    }

    #[test]
    fn test_shape_errors_propagate() {
        let chain = Composite::new(vec![boxed(Linear::affine(1.0, 0.0))]).unwrap();
        let err = chain.map(&Signal::Vector(vec![1.0, 2.0])).unwrap_err();
        assert!(matches!(err, MappingError::ShapeMismatch { stage: "linear", .. }));
    }
}
