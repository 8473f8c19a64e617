//! trajectory-solver
//!
//! Predicts position and velocity of a point mass under a constant force and
//! velocity-proportional drag:
//!
//!   m * dv/dt = F - k * v
//!
//! Two strategies sit behind one configuration:
//! - `Iterative`: fixed-step Euler, tick for tick with a physics engine, so the
//!   prediction matches what the engine will actually simulate (lead aiming).
//! - `Analytic`: closed-form exponential solution.
//!
//! The strategy is chosen once in [`TrajectorySolver::new`]; a solver holds no
//! mutable state and can be shared across threads.
//!
//! Conventions:
//! - Motion starts at the origin; positions are relative to the start point.
//! - Times in seconds. `fixed_step` is the engine tick, `sample_step` the
//!   spacing of returned samples.

mod analytic;
mod config;
mod iterative;

use core::fmt;

pub use analytic::AnalyticStrategy;
pub use config::{PhysicalConfiguration, SolvingStrategy};
pub use iterative::IterativeStrategy;
pub use trajectory_core::{
    fixed_step_from_hz, Result, SimulationSample, SolverError, Vec3, DEFAULT_FIXED_STEP,
};
pub use trajectory_models::DragModel;

/// A way of turning a configuration into trajectory samples.
pub trait TrajectoryStrategy: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// State at `timestamp == duration` (iterative: quantized to `fixed_step`).
    fn solve_at(
        &self,
        initial_velocity: Vec3,
        duration: f64,
        fixed_step: f64,
    ) -> Result<SimulationSample>;

    /// Samples spaced by `sample_step` over `(0, duration]`, increasing in time.
    fn solve_series(
        &self,
        initial_velocity: Vec3,
        duration: f64,
        sample_step: f64,
        fixed_step: f64,
    ) -> Result<Vec<SimulationSample>>;
}

/// Configured predictor. Built once, called any number of times.
#[derive(Debug)]
pub struct TrajectorySolver {
    config: PhysicalConfiguration,
    strategy: Box<dyn TrajectoryStrategy>,
}

impl TrajectorySolver {
    /// Resolve the drag model and pick the strategy.
    ///
    /// Fails with `UnsupportedConfiguration` for drag models without an
    /// implementation.
    pub fn new(config: PhysicalConfiguration) -> Result<Self> {
        let strategy: Box<dyn TrajectoryStrategy> = match config.solving_strategy() {
            SolvingStrategy::Iterative => Box::new(IterativeStrategy::new(&config)?),
            SolvingStrategy::Analytic => Box::new(AnalyticStrategy::new(&config)?),
        };

        log::debug!(
            "trajectory solver: strategy={} drag_model={:?} k={} a=({}, {}, {})",
            strategy.name(),
            config.drag_model(),
            config.drag_coefficient(),
            config.acceleration().x,
            config.acceleration().y,
            config.acceleration().z,
        );

        Ok(Self { config, strategy })
    }

    pub fn configuration(&self) -> &PhysicalConfiguration {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Position and velocity after `duration` seconds.
    ///
    /// `fixed_step` must be > 0 for the iterative strategy; the analytic
    /// strategy ignores it.
    pub fn solve_at(
        &self,
        initial_velocity: Vec3,
        duration: f64,
        fixed_step: f64,
    ) -> Result<SimulationSample> {
        self.strategy.solve_at(initial_velocity, duration, fixed_step)
    }

    /// Trajectory sampled every `sample_step` seconds up to `duration`.
    ///
    /// The iterative strategy always returns at least one sample; the analytic
    /// strategy returns none when `sample_step > duration`.
    pub fn solve_series(
        &self,
        initial_velocity: Vec3,
        duration: f64,
        sample_step: f64,
        fixed_step: f64,
    ) -> Result<Vec<SimulationSample>> {
        self.strategy.solve_series(initial_velocity, duration, sample_step, fixed_step)
    }
}

/* ----------------------------------- tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: DragModel, strategy: SolvingStrategy) -> PhysicalConfiguration {
        PhysicalConfiguration::new(Vec3::new(10.0, 0.0, 50.0), 5.0, 1.0, model, strategy).unwrap()
    }

    #[test]
    fn picks_configured_strategy() {
        let it = TrajectorySolver::new(config(DragModel::VelocityProportional, SolvingStrategy::Iterative))
            .unwrap();
        assert_eq!(it.strategy_name(), "iterative");

        let an = TrajectorySolver::new(config(DragModel::VelocityProportional, SolvingStrategy::Analytic))
            .unwrap();
        assert_eq!(an.strategy_name(), "analytic");
        assert_eq!(an.configuration().mass(), 5.0);
    }

    #[test]
    fn squared_drag_unsupported_for_both_strategies() {
        for strategy in [SolvingStrategy::Iterative, SolvingStrategy::Analytic] {
            let err = TrajectorySolver::new(config(DragModel::SquaredVelocityProportional, strategy))
                .unwrap_err();
            assert!(matches!(err, SolverError::UnsupportedConfiguration(_)));
        }
    }

    #[test]
    fn solver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrajectorySolver>();
    }
}
