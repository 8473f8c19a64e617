//! trajectory-models
//!
//! Drag models for a point mass. A drag model turns the current velocity into a
//! drag deceleration that is subtracted from the constant force acceleration:
//!
//!   a(v) = F/m - drag(v)
//!
//! Exports:
//!   - `DragModel`, the configuration selector
//!   - `LinearDrag`, drag(v) = k * v  (velocity-proportional)
//!
//! Only models with defined math get an implementation type. Resolving a
//! selector without one (`SquaredVelocityProportional`) is an
//! `UnsupportedConfiguration` error rather than a zero or silent fallback.

use trajectory_core::{Result, SolverError, Vec3};

/// Which law the drag coefficient parameterizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
pub enum DragModel {
    /// drag = k * v
    VelocityProportional,
    /// drag = k * v^2 (declared, no implementation)
    SquaredVelocityProportional,
}

impl DragModel {
    /// Resolve this selector into the linear drag law.
    pub fn linear(self, coefficient: f64) -> Result<LinearDrag> {
        match self {
            DragModel::VelocityProportional => LinearDrag::new(coefficient),
            DragModel::SquaredVelocityProportional => Err(SolverError::UnsupportedConfiguration(
                format!("drag model {self:?} has no implementation"),
            )),
        }
    }
}

/// Velocity-proportional drag: deceleration = k * v.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearDrag {
    coefficient: f64,
}

impl LinearDrag {
    pub fn new(coefficient: f64) -> Result<Self> {
        if !coefficient.is_finite() || coefficient < 0.0 {
            return Err(SolverError::InvalidConfiguration(format!(
                "drag coefficient must be finite and >= 0, got {coefficient}"
            )));
        }
        Ok(Self { coefficient })
    }

    /// k [1/s]; also the exponential decay rate of the closed-form solution.
    #[inline]
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    #[inline]
    pub fn deceleration(&self, velocity: &Vec3) -> Vec3 {
        velocity * self.coefficient
    }
}

/* -------------------------------- tests -------------------------------- */
