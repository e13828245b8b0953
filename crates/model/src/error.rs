use seir_solvers::transient::{GridError, TimeGrid, euler};
use thiserror::Error;

use crate::Degeneracy;

/// Invalid simulation inputs, reported before any stepping occurs.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("{what} requires exactly {expected} values, got {found}")]
    Arity {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("duration must be finite and positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("step size must be finite and positive, got {0}")]
    NonPositiveStep(f64),

    #[error("step size {step} exceeds duration {duration}")]
    StepExceedsDuration { step: f64, duration: f64 },

    #[error("duration {duration} at step size {step} needs more than {max} steps")]
    TooManySteps { duration: f64, step: f64, max: usize },

    #[error("drift tolerance must be finite and non-negative, got {0}")]
    DriftTolerance(f64),
}

impl From<GridError> for ConfigError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::NonPositiveDuration(duration) => Self::NonPositiveDuration(duration),
            GridError::NonPositiveStep(step) => Self::NonPositiveStep(step),
            GridError::StepExceedsDuration { step, duration } => {
                Self::StepExceedsDuration { step, duration }
            }
            GridError::TooManySteps { duration, step } => Self::TooManySteps {
                duration,
                step,
                max: TimeGrid::MAX_STEPS,
            },
        }
    }
}

/// Errors returned by a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("integration failed: {0}")]
    Solver(#[from] euler::Error),

    /// The run was stopped by the degeneracy monitor; no samples were kept.
    #[error("integration halted after {completed} of {requested} steps: {reason}")]
    Halted {
        completed: usize,
        requested: usize,
        reason: Degeneracy,
    },
}

impl From<GridError> for SimulationError {
    fn from(err: GridError) -> Self {
        Self::Config(err.into())
    }
}
