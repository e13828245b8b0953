//! Solvers for transient (time-marching) problems.

pub mod euler;
pub mod grid;

pub use grid::{GridError, TimeGrid};
