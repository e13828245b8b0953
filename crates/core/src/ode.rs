use crate::{DerivativeOf, StepIntegrable};

/// An initial value problem stepped along a fixed time axis.
///
/// The problem owns the axis. It reports how many steps to take and how far
/// each one goes, and it places every stepped state back on the axis by its
/// step number. Times are therefore read from the axis rather than summed
/// step by step.
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta: Clone;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of steps after the initial point.
    fn steps(&self) -> usize;

    /// Distance covered by every step.
    fn step_size(&self) -> Self::Delta;

    /// Reads the integrated state out of a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input does not hold a usable state.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Turns a model call into the rate of change of the state.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be formed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds the model input at axis point `step`, counted from 1.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no input can be built for the state.
    fn input_at(&self, step: usize, state: Self::State) -> Result<Self::Input, Self::Error>;
}
