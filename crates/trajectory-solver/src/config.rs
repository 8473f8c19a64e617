//! Physical parameters of a solve: force, mass, drag, and the chosen strategy.

use serde::{Deserialize, Serialize};
use trajectory_core::{Result, SolverError, Vec3};
use trajectory_models::DragModel;

/// How a trajectory is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolvingStrategy {
    /// Fixed-step integration, tick for tick with the physics engine.
    Iterative,
    /// Closed-form solution of m*dv/dt = F - k*v.
    Analytic,
}

/// Immutable once built. Every constructor path (including deserialization)
/// goes through [`PhysicalConfiguration::new`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationFile")]
pub struct PhysicalConfiguration {
    force: Vec3,
    mass: f64,
    drag_coefficient: f64,
    drag_model: DragModel,
    solving_strategy: SolvingStrategy,
}

/// Unvalidated on-disk layout.
#[derive(Deserialize)]
struct ConfigurationFile {
    force: Vec3,
    mass: f64,
    drag_coefficient: f64,
    drag_model: DragModel,
    solving_strategy: SolvingStrategy,
}

impl TryFrom<ConfigurationFile> for PhysicalConfiguration {
    type Error = SolverError;

    fn try_from(file: ConfigurationFile) -> Result<Self> {
        Self::new(
            file.force,
            file.mass,
            file.drag_coefficient,
            file.drag_model,
            file.solving_strategy,
        )
    }
}

impl PhysicalConfiguration {
    /// Validates:
    /// - every force component, `mass` and `drag_coefficient` finite
    /// - `mass > 0`
    /// - `drag_coefficient >= 0`, and `> 0` for [`SolvingStrategy::Analytic`]
    ///
    /// `SquaredVelocityProportional` is accepted here; building a solver from
    /// it fails with `UnsupportedConfiguration`.
    pub fn new(
        force: Vec3,
        mass: f64,
        drag_coefficient: f64,
        drag_model: DragModel,
        solving_strategy: SolvingStrategy,
    ) -> Result<Self> {
        if force.iter().any(|c| !c.is_finite()) {
            return Err(SolverError::InvalidConfiguration(format!(
                "force must be finite, got ({}, {}, {})",
                force.x, force.y, force.z
            )));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SolverError::InvalidConfiguration(format!(
                "mass must be finite and > 0, got {mass}"
            )));
        }
        if !drag_coefficient.is_finite() || drag_coefficient < 0.0 {
            return Err(SolverError::InvalidConfiguration(format!(
                "drag coefficient must be finite and >= 0, got {drag_coefficient}"
            )));
        }
        if solving_strategy == SolvingStrategy::Analytic && drag_coefficient == 0.0 {
            return Err(SolverError::InvalidConfiguration(
                "analytic strategy needs a drag coefficient > 0".into(),
            ));
        }

        Ok(Self { force, mass, drag_coefficient, drag_model, solving_strategy })
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Syntax and missing/mistyped fields are `MalformedConfiguration`; values
    /// rejected by [`PhysicalConfiguration::new`] keep their own error kind.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigurationFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    pub fn drag_model(&self) -> DragModel {
        self.drag_model
    }

    pub fn solving_strategy(&self) -> SolvingStrategy {
        self.solving_strategy
    }

    /// Constant force term a = F/m.
    pub fn acceleration(&self) -> Vec3 {
        self.force / self.mass
    }
}

/* -------------------------------- tests -------------------------------- */
