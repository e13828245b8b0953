//! SEIR epidemic simulation by forward Euler time-stepping.
//!
//! The model tracks four population fractions, Susceptible, Exposed, Infected
//! and Recovered, and advances them with:
//!
//! ```text
//! S' = S + (−ρβ·S·I)·h
//! E' = E + (ρβ·S·I − αE)·h
//! I' = I + (αE − γI)·h
//! R' = R + (γI)·h
//! ```
//!
//! where `h` is the realized step of an evenly spaced time axis (see
//! [`TimeGrid`](seir_solvers::transient::TimeGrid)).
//!
//! # Usage
//!
//! A one-off run returns a fully materialized [`SimulationRun`]:
//!
//! ```
//! use seir_model::{ModelParameters, StateVector, simulate};
//!
//! let params = ModelParameters::new(0.2, 1.75, 0.5, 0.1);
//! let run = simulate(StateVector::default(), params, 100.0, 0.1).unwrap();
//!
//! assert_eq!(run.len(), 1001);
//! assert!(run.final_state().recovered > 0.0);
//! ```
//!
//! A [`Simulation`] owns its samples and can be restarted from its initial
//! state or extended from its final state:
//!
//! ```
//! use seir_model::{ModelParameters, Simulation, StateVector};
//!
//! let mut sim = Simulation::new(StateVector::default(), ModelParameters::default());
//! sim.restart(5.0, 0.1).unwrap();
//! sim.extend(5.0, 0.1).unwrap();
//!
//! assert_eq!(sim.run().len(), 101);
//! assert_eq!(sim.run().end_time(), 10.0);
//! ```

mod degeneracy;
mod equations;
mod error;
mod export;
mod parameters;
mod run;
mod scenario;
mod simulation;
mod state;

pub use degeneracy::{DEFAULT_DRIFT_TOLERANCE, Degeneracy, DegeneracyMonitor};
pub use equations::{SeirInput, SeirModel, SeirProblem};
pub use error::{ConfigError, SimulationError};
pub use export::{ExportError, write_csv, write_csv_path};
pub use parameters::ModelParameters;
pub use run::{Sample, SimulationRun};
pub use scenario::{Preset, Scenario, ScenarioConfig, ScenarioError, SegmentConfig};
pub use simulation::{Simulation, simulate};
pub use state::{Compartment, StateRates, StateVector};
