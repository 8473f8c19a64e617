//! Core trajectory types
//!
//! Includes:
//! - `Vec3` (double-precision 3-vector)
//! - `SimulationSample`, one predicted point on a trajectory
//! - `SolverError`, the error taxonomy shared by every crate in the workspace
//! - Argument checks and fixed-step helpers

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 3-component vector used for force, position and velocity.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Physics-engine default tick (50 Hz).
pub const DEFAULT_FIXED_STEP: f64 = 0.02;

/// Upper bound on loop iterations a single solve call may imply.
pub const MAX_STEPS: f64 = 100_000_000.0;

/// Upper bound on samples a closed-form series may materialize (about 56 MB).
pub const MAX_SAMPLES: f64 = 1_000_000.0;

/// -------------------------
/// Errors
/// -------------------------

#[derive(Debug, Error)]
pub enum SolverError {
    /// Mass, drag coefficient or force outside the valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Duration or step sizes rejected before any integration happens.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A drag model or strategy combination with no implementation.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// Configuration text that is not valid JSON or lacks/mistypes a field.
    /// Out-of-range values in well-formed input are `InvalidConfiguration`.
    #[error("malformed configuration: {0}")]
    MalformedConfiguration(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, SolverError>;

/// -------------------------
/// Samples
/// -------------------------

/// Predicted state at `timestamp` seconds after the start of motion.
///
/// Position is relative to the starting point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSample {
    pub timestamp: f64,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl SimulationSample {
    pub fn new(timestamp: f64, position: Vec3, velocity: Vec3) -> Self {
        Self { timestamp, position, velocity }
    }

    /// |v| [m/s]
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

impl fmt::Display for SimulationSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.position;
        let v = &self.velocity;
        write!(
            f,
            "t={:.3}s pos=({:.4}, {:.4}, {:.4}) vel=({:.4}, {:.4}, {:.4})",
            self.timestamp, p.x, p.y, p.z, v.x, v.y, v.z
        )
    }
}

/// -------------------------
/// Argument checks
/// -------------------------

/// `duration` must be finite and non-negative.
pub fn check_duration(duration: f64) -> Result<()> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(SolverError::InvalidArgument(format!(
            "duration must be finite and >= 0, got {duration}"
        )));
    }
    Ok(())
}

/// A step (sample or fixed) must be finite and strictly positive.
pub fn check_positive_step(name: &str, step: f64) -> Result<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SolverError::InvalidArgument(format!(
            "{name} must be finite and > 0, got {step}"
        )));
    }
    Ok(())
}

fn check_count(name: &str, step: f64, duration: f64, limit: f64, what: &str) -> Result<()> {
    check_positive_step(name, step)?;
    if duration / step > limit {
        return Err(SolverError::InvalidArgument(format!(
            "{name} {step} over duration {duration} exceeds {limit} {what}"
        )));
    }
    Ok(())
}

/// Positive step that implies at most `MAX_STEPS` loop iterations over `duration`.
pub fn check_step(name: &str, step: f64, duration: f64) -> Result<()> {
    check_count(name, step, duration, MAX_STEPS, "steps")
}

/// Positive sample spacing that yields at most `MAX_SAMPLES` samples over `duration`.
pub fn check_sample_step(step: f64, duration: f64) -> Result<()> {
    check_count("sample_step", step, duration, MAX_SAMPLES, "samples")
}

/// -------------------------
/// Time steps
/// -------------------------

/// Fixed step [s] for a physics tick rate [Hz].
pub fn fixed_step_from_hz(rate_hz: f64) -> Result<f64> {
    if !rate_hz.is_finite() || rate_hz <= 0.0 {
        return Err(SolverError::InvalidArgument(format!(
            "tick rate must be finite and > 0, got {rate_hz}"
        )));
    }
    Ok(1.0 / rate_hz)
}

/* -------------------------------- tests -------------------------------- */
