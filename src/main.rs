// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;

use anyhow::{anyhow, bail, Context};
use motor_mapper::config::consts::DEFAULT_LOG_FILTER;
use motor_mapper::config::load_and_validate_config;
use motor_mapper::engine::MotorPipelines;
use motor_mapper::signal::{Quaternion, Shape, Signal};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// One evaluated sample, printed as a JSON line.
#[derive(Debug, Serialize)]
struct CommandOutput<'a> {
    motor: &'a str,
    input: String,
    command: f64,
}

/// One configured motor, printed by `--list`.
#[derive(Debug, Serialize)]
struct MotorSummary<'a> {
    motor: &'a str,
    min: f64,
    max: f64,
    input: Option<&'a str>,
    accepts: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <motors.yaml> <motor> <value[,value...]>", args[0]);
        eprintln!("       {} <motors.yaml> --list", args[0]);
        eprintln!("Example: {} configs/face.yaml jaw 0.5", args[0]);
        eprintln!("Example: {} configs/face.yaml neck_pitch 0.9962,0,0,0.0872", args[0]);
        std::process::exit(1);
    }

    let config_file = &args[1];
    let config = load_and_validate_config(config_file)
        .with_context(|| format!("failed to load configuration '{}'", config_file))?;
    let pipelines = MotorPipelines::from_config(&config)
        .with_context(|| format!("failed to build pipelines from '{}'", config_file))?;

    if args[2] == "--list" {
        for pipeline in pipelines.iter() {
            let range = pipeline.range();
            let summary = MotorSummary {
                motor: pipeline.motor(),
                min: range.min,
                max: range.max,
                input: pipeline.input(),
                accepts: pipeline.input_shape().to_string(),
            };
            println!("{}", serde_json::to_string(&summary)?);
        }
        return Ok(());
    }

    if args.len() < 4 {
        bail!("missing input value for motor '{}'", args[2]);
    }

    let pipeline = pipelines
        .get(&args[2])
        .ok_or_else(|| anyhow!("unknown motor '{}'", args[2]))?;
    let input = parse_signal(&args[3], pipeline.input_shape())?;
    let command = pipeline.command(&input)?;

    let output = CommandOutput {
        motor: pipeline.motor(),
        input: input.to_string(),
        command,
    };
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}

/// Read comma-separated values into the signal shape a pipeline expects.
fn parse_signal(raw: &str, shape: Shape) -> anyhow::Result<Signal> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid number '{}'", part))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;

    let signal = match (shape, values.as_slice()) {
        (Shape::Quaternion, [w, x, y, z]) => Signal::Quaternion(Quaternion::new(*w, *x, *y, *z)),
        (_, [value]) => Signal::Scalar(*value),
        _ => Signal::Vector(values),
    };
    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signal() {
        let test_cases = vec![
            ("0.5", Shape::Scalar, Signal::Scalar(0.5)),
            (" -1 ", Shape::Any, Signal::Scalar(-1.0)),
            ("0.2,0.4", Shape::Vector(2), Signal::Vector(vec![0.2, 0.4])),
            (
                "1,0,0,0",
                Shape::Quaternion,
                Signal::Quaternion(Quaternion::new(1.0, 0.0, 0.0, 0.0)),
            ),
            ("1,0,0,0", Shape::Vector(4), Signal::Vector(vec![1.0, 0.0, 0.0, 0.0])),
        ];

        for (raw, shape, expected) in test_cases {
            assert_eq!(parse_signal(raw, shape).unwrap(), expected, "for '{}'", raw);
        }
    }

    #[test]
    fn test_parse_signal_rejects_garbage() {
        assert!(parse_signal("0.5,abc", Shape::Vector(2)).is_err());
        assert!(parse_signal("", Shape::Scalar).is_err());
    }
}
