use std::fmt;

use seir_core::StepIntegrable;

use crate::ConfigError;

/// One of the four SEIR compartments, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compartment {
    Susceptible,
    Exposed,
    Infected,
    Recovered,
}

impl Compartment {
    /// All compartments in column order S, E, I, R.
    pub const ALL: [Compartment; 4] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infected,
        Compartment::Recovered,
    ];

    /// Returns the human-readable name of the compartment.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Compartment::Susceptible => "Susceptible",
            Compartment::Exposed => "Exposed",
            Compartment::Infected => "Infected",
            Compartment::Recovered => "Recovered",
        }
    }

    /// Looks up a compartment by name or initial, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|compartment| {
            let label = compartment.label();
            name.eq_ignore_ascii_case(label) || name.eq_ignore_ascii_case(&label[..1])
        })
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Population fractions at one instant.
///
/// The fractions are intended to sum to one, but nothing enforces it. Forward
/// Euler does not conserve the total exactly, and a poorly chosen step can
/// drive a fraction negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub susceptible: f64,
    pub exposed: f64,
    pub infected: f64,
    pub recovered: f64,
}

impl StateVector {
    #[must_use]
    pub fn new(susceptible: f64, exposed: f64, infected: f64, recovered: f64) -> Self {
        Self {
            susceptible,
            exposed,
            infected,
            recovered,
        }
    }

    /// A fully susceptible population seeded with exposed and infected
    /// fractions and nobody recovered.
    #[must_use]
    pub fn seeded(exposed: f64, infected: f64) -> Self {
        Self::new(1.0 - exposed - infected, exposed, infected, 0.0)
    }

    /// Returns `s + e + i + r`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.susceptible + self.exposed + self.infected + self.recovered
    }

    /// Returns the fractions in column order S, E, I, R.
    #[must_use]
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.susceptible,
            self.exposed,
            self.infected,
            self.recovered,
        ]
    }

    /// Returns the fraction held by a single compartment.
    #[must_use]
    pub fn get(&self, compartment: Compartment) -> f64 {
        match compartment {
            Compartment::Susceptible => self.susceptible,
            Compartment::Exposed => self.exposed,
            Compartment::Infected => self.infected,
            Compartment::Recovered => self.recovered,
        }
    }
}

impl Default for StateVector {
    /// One exposed person per thousand, everyone else susceptible.
    fn default() -> Self {
        Self::new(1.0 - 1.0 / 1000.0, 1.0 / 1000.0, 0.0, 0.0)
    }
}

impl From<[f64; 4]> for StateVector {
    fn from([s, e, i, r]: [f64; 4]) -> Self {
        Self::new(s, e, i, r)
    }
}

impl TryFrom<&[f64]> for StateVector {
    type Error = ConfigError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let values: [f64; 4] = values.try_into().map_err(|_| ConfigError::Arity {
            what: "initial state",
            expected: 4,
            found: values.len(),
        })?;
        Ok(values.into())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={} E={} I={} R={}",
            self.susceptible, self.exposed, self.infected, self.recovered
        )
    }
}

/// Time derivative of a [`StateVector`], in fractions per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateRates {
    pub susceptible: f64,
    pub exposed: f64,
    pub infected: f64,
    pub recovered: f64,
}

impl StepIntegrable<f64> for StateVector {
    type Derivative = StateRates;

    fn step(&self, rates: StateRates, dt: f64) -> Self {
        Self {
            susceptible: self.susceptible + rates.susceptible * dt,
            exposed: self.exposed + rates.exposed * dt,
            infected: self.infected + rates.infected * dt,
            recovered: self.recovered + rates.recovered * dt,
        }
    }
}
