//! Closed-form solution of m*dv/dt = F - k*v.
//!
//! With a = F/m and decay rate k:
//!
//!   v(t) = a - exp(-k*t) * a / k
//!   x(t) = a*t + exp(-k*t) * a / k^2
//!
//! These are evaluated as written. They do not take the initial velocity into
//! account and x(0) is not zero, so results differ from the iterative strategy
//! except near the terminal regime. `k > 0` is enforced by the configuration.

use trajectory_core::{check_duration, check_sample_step, Result, SimulationSample, SolverError, Vec3};

use crate::config::PhysicalConfiguration;
use crate::TrajectoryStrategy;

#[derive(Clone, Copy, Debug)]
pub struct AnalyticStrategy {
    acceleration: Vec3,
    decay_rate: f64,
}

impl AnalyticStrategy {
    pub fn new(config: &PhysicalConfiguration) -> Result<Self> {
        let drag = config.drag_model().linear(config.drag_coefficient())?;
        let decay_rate = drag.coefficient();
        if decay_rate <= 0.0 {
            return Err(SolverError::InvalidConfiguration(
                "analytic strategy needs a drag coefficient > 0".into(),
            ));
        }
        Ok(Self { acceleration: config.acceleration(), decay_rate })
    }

    fn evaluate(&self, t: f64) -> SimulationSample {
        let a = self.acceleration;
        let k = self.decay_rate;
        let decay = (-k * t).exp();

        let velocity = a - a * (decay / k);
        let position = a * t + a * (decay / (k * k));
        SimulationSample::new(t, position, velocity)
    }
}

impl TrajectoryStrategy for AnalyticStrategy {
    fn name(&self) -> &'static str {
        "analytic"
    }

    /// `initial_velocity` and `fixed_step` are accepted for symmetry with the
    /// iterative strategy and have no effect.
    fn solve_at(
        &self,
        _initial_velocity: Vec3,
        duration: f64,
        _fixed_step: f64,
    ) -> Result<SimulationSample> {
        check_duration(duration)?;
        Ok(self.evaluate(duration))
    }

    /// Samples at `sample_step, 2*sample_step, ...` up to `duration`. Empty when
    /// `sample_step > duration`. At most `MAX_SAMPLES` samples are produced;
    /// spacings that would exceed it are rejected.
    fn solve_series(
        &self,
        _initial_velocity: Vec3,
        duration: f64,
        sample_step: f64,
        _fixed_step: f64,
    ) -> Result<Vec<SimulationSample>> {
        check_duration(duration)?;
        check_sample_step(sample_step, duration)?;

        let mut out = Vec::new();
        let mut t = sample_step;
        while t <= duration {
            let sample = self.evaluate(t);
            log::trace!("analytic sample {sample}");
            out.push(sample);
            t += sample_step;
        }
        Ok(out)
    }
}

/* -------------------------------- tests -------------------------------- */
