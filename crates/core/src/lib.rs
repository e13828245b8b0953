//! Core traits and types for SEIR simulation.
//!
//! This crate defines the abstractions that the solvers and the epidemic model
//! build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: an initial value problem on a fixed time axis that
//!   extracts a state and its derivative and places stepped states on the axis
//! - [`StepIntegrable`]: a state that can be advanced by `derivative * delta`

mod model;
mod observer;
mod ode;
mod step;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use ode::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
