/// A callable model that maps an input to an output.
///
/// For ODE problems the output is typically the set of rates evaluated at the
/// input's state, which an [`OdeProblem`](crate::OdeProblem) turns into a
/// derivative.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A captured input/output pair from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    /// Exponential decay rate model: dx/dt = -k·x.
    struct Decay {
        k: f64,
    }

    impl Model for Decay {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(-self.k * input)
        }
    }

    #[test]
    fn call_evaluates_rate() {
        let model = Decay { k: 0.5 };
        assert_eq!(model.call(&4.0), Ok(-2.0));
    }

    #[test]
    fn snapshot_keeps_input_and_output() {
        let model = Decay { k: 2.0 };
        let input = 3.0;
        let snapshot = Snapshot::new(input, model.call(&input).unwrap());
        assert_eq!(snapshot.input, 3.0);
        assert_eq!(snapshot.output, -6.0);
    }
}
