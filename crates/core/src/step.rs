/// A trait for types that can be stepped using their derivative.
///
/// Generic ODE solvers advance a state by `derivative * delta`, where the
/// derivative is taken with respect to `Delta` (usually time in days).
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Shorthand for the [`StepIntegrable::Derivative`] of a state type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

#[cfg(test)]
mod tests {
    use super::*;

    // Two-compartment flow: a moves into b.
    #[derive(Debug, PartialEq)]
    struct Compartments {
        a: f64,
        b: f64,
    }

    struct Flow {
        da: f64,
        db: f64,
    }

    impl StepIntegrable<f64> for Compartments {
        type Derivative = Flow;

        fn step(&self, derivative: Flow, delta: f64) -> Self {
            Compartments {
                a: self.a + derivative.da * delta,
                b: self.b + derivative.db * delta,
            }
        }
    }

    #[test]
    fn step_moves_mass_between_compartments() {
        let state = Compartments { a: 1.0, b: 0.0 };
        let flow = Flow { da: -0.5, db: 0.5 };

        let next = state.step(flow, 0.5);

        assert_eq!(next, Compartments { a: 0.75, b: 0.25 });
    }

    #[test]
    fn zero_derivative_is_a_fixed_point() {
        let state = Compartments { a: 0.3, b: 0.7 };
        let next = state.step(Flow { da: 0.0, db: 0.0 }, 10.0);
        assert_eq!(next, Compartments { a: 0.3, b: 0.7 });
    }
}
