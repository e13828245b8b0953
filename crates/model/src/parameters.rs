use std::fmt;

use crate::{ConfigError, StateRates, StateVector};

/// Rate constants of the SEIR model, in units of 1/day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    /// α, the inverse of the mean incubation time.
    pub incubation_rate: f64,

    /// β, the average effective contact rate.
    pub contact_rate: f64,

    /// γ, the inverse of the mean infectious duration.
    pub recovery_rate: f64,

    /// ρ, a dimensionless dampener on transmission.
    ///
    /// Conceptually in `[0, 1]`, where `1` leaves transmission unchanged.
    pub distancing_factor: f64,
}

impl ModelParameters {
    #[must_use]
    pub fn new(
        incubation_rate: f64,
        contact_rate: f64,
        recovery_rate: f64,
        distancing_factor: f64,
    ) -> Self {
        Self {
            incubation_rate,
            contact_rate,
            recovery_rate,
            distancing_factor,
        }
    }

    /// Builds parameters from epidemiological quantities.
    ///
    /// Sets α = 1/`incubation_days`, γ = 1/`infectious_days`, β = R₀·γ and
    /// ρ = 1.
    #[must_use]
    pub fn from_reproduction_number(r0: f64, incubation_days: f64, infectious_days: f64) -> Self {
        let recovery_rate = 1.0 / infectious_days;
        Self::new(1.0 / incubation_days, r0 * recovery_rate, recovery_rate, 1.0)
    }

    /// Returns the effective basic reproduction number ρβ/γ.
    #[must_use]
    pub fn basic_reproduction_number(&self) -> f64 {
        self.distancing_factor * self.contact_rate / self.recovery_rate
    }

    /// Returns the parameters in order α, β, γ, ρ.
    #[must_use]
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.incubation_rate,
            self.contact_rate,
            self.recovery_rate,
            self.distancing_factor,
        ]
    }

    /// Returns `true` if every parameter is finite and non-negative.
    #[must_use]
    pub fn is_physical(&self) -> bool {
        self.as_array()
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }

    /// Evaluates the SEIR right-hand side at `state`.
    ///
    /// The infection term is evaluated as `ρ·β·S·I`, left to right.
    #[must_use]
    pub fn rates(&self, state: &StateVector) -> StateRates {
        let infection =
            self.distancing_factor * self.contact_rate * state.susceptible * state.infected;
        let incubation = self.incubation_rate * state.exposed;
        let recovery = self.recovery_rate * state.infected;

        StateRates {
            susceptible: -infection,
            exposed: infection - incubation,
            infected: incubation - recovery,
            recovered: recovery,
        }
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self::new(0.2, 1.8, 0.5, 1.0)
    }
}

impl From<[f64; 4]> for ModelParameters {
    fn from([alpha, beta, gamma, rho]: [f64; 4]) -> Self {
        Self::new(alpha, beta, gamma, rho)
    }
}

impl TryFrom<&[f64]> for ModelParameters {
    type Error = ConfigError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let values: [f64; 4] = values.try_into().map_err(|_| ConfigError::Arity {
            what: "model parameters",
            expected: 4,
            found: values.len(),
        })?;
        Ok(values.into())
    }
}

impl fmt::Display for ModelParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha={} beta={} gamma={} rho={}",
            self.incubation_rate, self.contact_rate, self.recovery_rate, self.distancing_factor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn slice_assigns_each_parameter_from_its_own_position() {
        let params = ModelParameters::try_from(&[0.2, 1.75, 0.5, 0.1][..]).unwrap();
        assert_eq!(params.incubation_rate, 0.2);
        assert_eq!(params.contact_rate, 1.75);
        assert_eq!(params.recovery_rate, 0.5);
        assert_eq!(params.distancing_factor, 0.1);
    }

    #[test]
    fn slice_with_wrong_arity_is_rejected() {
        let err = ModelParameters::try_from(&[0.2, 1.75][..]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Arity {
                what: "model parameters",
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn reproduction_number_round_trips() {
        let params = ModelParameters::from_reproduction_number(2.4, 5.5, 3.0);
        assert_relative_eq!(params.incubation_rate, 1.0 / 5.5);
        assert_relative_eq!(params.recovery_rate, 1.0 / 3.0);
        assert_relative_eq!(params.contact_rate, 0.8);
        assert_relative_eq!(params.basic_reproduction_number(), 2.4);
    }

    #[test]
    fn distancing_scales_reproduction_number() {
        let params = ModelParameters::new(0.2, 1.75, 0.5, 0.1);
        assert_relative_eq!(params.basic_reproduction_number(), 0.35);
    }

    #[test]
    fn rates_conserve_total() {
        let params = ModelParameters::new(0.2, 1.75, 0.5, 0.6);
        let rates = params.rates(&StateVector::new(0.7, 0.1, 0.15, 0.05));
        let net = rates.susceptible + rates.exposed + rates.infected + rates.recovered;
        assert_relative_eq!(net, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn rates_vanish_without_exposure_or_infection() {
        let params = ModelParameters::default();
        let rates = params.rates(&StateVector::new(0.8, 0.0, 0.0, 0.2));
        assert_eq!(rates.susceptible, 0.0);
        assert_eq!(rates.exposed, 0.0);
        assert_eq!(rates.infected, 0.0);
        assert_eq!(rates.recovered, 0.0);
    }

    #[test]
    fn physical_check_flags_negative_and_nan() {
        assert!(ModelParameters::default().is_physical());
        assert!(!ModelParameters::new(-0.1, 1.0, 1.0, 1.0).is_physical());
        assert!(!ModelParameters::new(0.1, f64::NAN, 1.0, 1.0).is_physical());
    }
}
