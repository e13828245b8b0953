//! Fixed-step numerical solvers.
//!
//! - [`transient::euler`]: explicit forward Euler integration of an
//!   [`OdeProblem`](seir_core::OdeProblem)
//! - [`transient::grid`]: evenly spaced time axes and the realized step size

pub mod transient;
