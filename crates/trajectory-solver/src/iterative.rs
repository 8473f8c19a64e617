//! Fixed-step integration matching a physics engine's per-tick force application.
//!
//! Per tick, in this order (explicit Euler; position uses the pre-tick velocity):
//!
//!   a  = F/m - k*v
//!   x += v*dt
//!   v += a*dt
//!
//! Samples are taken on the first tick whose accumulated time since the last
//! sample reaches `sample_step`, so timestamps are quantized to `fixed_step`.

use trajectory_core::{
    check_duration, check_positive_step, check_step, Result, SimulationSample, Vec3,
};
use trajectory_models::LinearDrag;

use crate::config::PhysicalConfiguration;
use crate::TrajectoryStrategy;

#[derive(Clone, Copy, Debug)]
pub struct IterativeStrategy {
    acceleration: Vec3,
    drag: LinearDrag,
}

impl IterativeStrategy {
    pub fn new(config: &PhysicalConfiguration) -> Result<Self> {
        let drag = config.drag_model().linear(config.drag_coefficient())?;
        Ok(Self { acceleration: config.acceleration(), drag })
    }

    /// Integrate from rest position with `initial_velocity`. Never returns an
    /// empty vector: if no tick hit the sample threshold, the final state is
    /// the only sample.
    fn integrate(
        &self,
        initial_velocity: Vec3,
        duration: f64,
        sample_step: f64,
        fixed_step: f64,
    ) -> Vec<SimulationSample> {
        let mut position = Vec3::zeros();
        let mut velocity = initial_velocity;
        let mut elapsed = 0.0;
        let mut since_sample = 0.0;

        let expected = (duration / sample_step.max(fixed_step)).ceil().min(4096.0) as usize;
        let mut out = Vec::with_capacity(expected + 1);

        while elapsed <= duration {
            let acceleration = self.acceleration - self.drag.deceleration(&velocity);
            position += velocity * fixed_step;
            velocity += acceleration * fixed_step;

            if since_sample >= sample_step {
                let sample = SimulationSample::new(elapsed, position, velocity);
                log::trace!("iterative sample {sample}");
                out.push(sample);
                since_sample = 0.0;
            }

            elapsed += fixed_step;
            since_sample += fixed_step;
        }

        if out.is_empty() {
            log::debug!(
                "no tick reached sample step {sample_step}s within {duration}s; returning final state"
            );
            out.push(SimulationSample::new(elapsed, position, velocity));
        }
        out
    }
}

impl TrajectoryStrategy for IterativeStrategy {
    fn name(&self) -> &'static str {
        "iterative"
    }

    fn solve_at(
        &self,
        initial_velocity: Vec3,
        duration: f64,
        fixed_step: f64,
    ) -> Result<SimulationSample> {
        check_duration(duration)?;
        check_step("fixed_step", fixed_step, duration)?;

        // One sample interval spanning the whole duration: the first (only)
        // sample is the state at `duration`.
        let samples = self.integrate(initial_velocity, duration, duration, fixed_step);
        Ok(samples[0])
    }

    fn solve_series(
        &self,
        initial_velocity: Vec3,
        duration: f64,
        sample_step: f64,
        fixed_step: f64,
    ) -> Result<Vec<SimulationSample>> {
        check_duration(duration)?;
        // The tick count depends on fixed_step only; a sample_step below it
        // samples every tick.
        check_positive_step("sample_step", sample_step)?;
        check_step("fixed_step", fixed_step, duration)?;

        Ok(self.integrate(initial_velocity, duration, sample_step, fixed_step))
    }
}

/* -------------------------------- tests -------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolvingStrategy;
    use approx::assert_abs_diff_eq;
    use trajectory_core::SolverError;
    use trajectory_models::DragModel;

    fn strategy(force: Vec3, mass: f64, drag: f64) -> IterativeStrategy {
        let cfg = PhysicalConfiguration::new(
            force,
            mass,
            drag,
            DragModel::VelocityProportional,
            SolvingStrategy::Iterative,
        )
        .unwrap();
        IterativeStrategy::new(&cfg).unwrap()
    }

    #[test]
    fn first_tick_uses_pre_tick_velocity_for_position() {
        // a = (1,0,0), k = 0.5, v0 = (2,0,0), dt = 0.1
        // a_tick = 1 - 0.5*2 = 0 -> x = 0.2, v = 2.0
        let s = strategy(Vec3::new(2.0, 0.0, 0.0), 2.0, 0.5);
        let out = s.integrate(Vec3::new(2.0, 0.0, 0.0), 0.0, 0.0, 0.1);
        assert_eq!(out.len(), 1);
        assert_abs_diff_eq!(out[0].timestamp, 0.0);
        assert_abs_diff_eq!(out[0].position.x, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(out[0].velocity.x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn euler_order_two_ticks() {
        // No drag, a = (0,-10,0), dt = 0.5, v0 = 0.
        // tick 1: x = 0,      v = -5
        // tick 2: x = -2.5,   v = -10
        let s = strategy(Vec3::new(0.0, -10.0, 0.0), 1.0, 0.0);
        let out = s.integrate(Vec3::zeros(), 0.5, 10.0, 0.5);
        assert_eq!(out.len(), 1);
        assert_abs_diff_eq!(out[0].timestamp, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[0].position.y, -2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out[0].velocity.y, -10.0, epsilon = 1e-12);
    }

    #[test]
    fn samples_are_quantized_to_ticks() {
        let s = strategy(Vec3::zeros(), 1.0, 0.0);
        // sample every 0.25s with 0.1s ticks: accumulator reaches 0.3 first
        let out = s.integrate(Vec3::new(1.0, 0.0, 0.0), 1.0, 0.25, 0.1);
        assert!(!out.is_empty());
        assert_abs_diff_eq!(out[0].timestamp, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn sample_step_below_tick_samples_every_tick() {
        let s = strategy(Vec3::zeros(), 1.0, 0.0);
        let out = s.solve_series(Vec3::new(1.0, 0.0, 0.0), 1.0, 1e-6, 0.25).unwrap();
        let stamps: Vec<f64> = out.iter().map(|o| o.timestamp).collect();
        assert_eq!(stamps, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn tiny_sample_step_is_not_capped_by_sample_count() {
        let s = strategy(Vec3::zeros(), 1.0, 0.0);
        let out = s.solve_series(Vec3::zeros(), 1000.0, 1e-6, 0.02).unwrap();
        assert!(out.len() > 49_000 && out.len() <= 50_001, "len = {}", out.len());
        assert!(matches!(
            s.solve_series(Vec3::zeros(), 1000.0, 0.0, 0.02),
            Err(SolverError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_non_positive_fixed_step() {
        let s = strategy(Vec3::zeros(), 1.0, 0.0);
        for dt in [0.0, -0.02, f64::NAN] {
            assert!(matches!(
                s.solve_at(Vec3::zeros(), 1.0, dt),
                Err(SolverError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn zero_duration_takes_one_tick() {
        let s = strategy(Vec3::zeros(), 1.0, 0.0);
        let out = s.solve_at(Vec3::new(3.0, 0.0, 0.0), 0.0, 0.02).unwrap();
        assert_abs_diff_eq!(out.timestamp, 0.0);
        assert_abs_diff_eq!(out.position.x, 0.06, epsilon = 1e-12);
    }
}
