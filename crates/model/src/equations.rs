use std::convert::Infallible;

use seir_core::{DerivativeOf, Model, OdeProblem};
use seir_solvers::transient::TimeGrid;

use crate::{ModelParameters, Sample, StateRates, StateVector};

/// Input to the SEIR model: a state on a time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeirInput {
    /// Position on the current segment's [`TimeGrid`].
    pub index: usize,

    /// Absolute simulation time in days.
    pub time: f64,

    pub state: StateVector,
}

impl SeirInput {
    /// The first input of a segment that starts at `sample`.
    #[must_use]
    pub fn at(sample: Sample) -> Self {
        Self {
            index: 0,
            time: sample.time,
            state: sample.state,
        }
    }
}

impl From<SeirInput> for Sample {
    fn from(input: SeirInput) -> Self {
        Sample {
            time: input.time,
            state: input.state,
        }
    }
}

/// The SEIR right-hand side as a [`Model`].
///
/// Calling the model returns the compartment rates at the input's state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeirModel {
    parameters: ModelParameters,
}

impl SeirModel {
    #[must_use]
    pub fn new(parameters: ModelParameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }
}

impl Model for SeirModel {
    type Input = SeirInput;
    type Output = StateRates;
    type Error = Infallible;

    fn call(&self, input: &SeirInput) -> Result<StateRates, Infallible> {
        Ok(self.parameters.rates(&input.state))
    }
}

/// Wires [`SeirModel`] to an ODE solver along one segment's time axis.
///
/// Times are read off the grid rather than accumulated, so the last input of
/// a segment lands on `origin + duration` exactly.
#[derive(Debug, Clone, Copy)]
pub struct SeirProblem<'a> {
    grid: &'a TimeGrid,
    origin: f64,
}

impl<'a> SeirProblem<'a> {
    /// Creates a problem for a segment starting at time `origin`.
    #[must_use]
    pub fn new(grid: &'a TimeGrid, origin: f64) -> Self {
        Self { grid, origin }
    }
}

impl OdeProblem for SeirProblem<'_> {
    type Input = SeirInput;
    type Output = StateRates;
    type Delta = f64;
    type State = StateVector;
    type Error = Infallible;

    fn steps(&self) -> usize {
        self.grid.steps()
    }

    fn step_size(&self) -> f64 {
        self.grid.realized_step()
    }

    fn state(&self, input: &SeirInput) -> Result<StateVector, Infallible> {
        Ok(input.state)
    }

    fn derivative(
        &self,
        _input: &SeirInput,
        output: &StateRates,
    ) -> Result<DerivativeOf<StateVector, f64>, Infallible> {
        Ok(*output)
    }

    fn input_at(&self, step: usize, state: StateVector) -> Result<SeirInput, Infallible> {
        Ok(SeirInput {
            index: step,
            time: self.origin + self.grid.time(step),
            state,
        })
    }
}
