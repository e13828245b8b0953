use std::{fs, io, path::Path};

use serde::Deserialize;
use seir_solvers::transient::TimeGrid;
use thiserror::Error;

use crate::{
    ConfigError, DEFAULT_DRIFT_TOLERANCE, ModelParameters, Simulation, SimulationError,
    StateVector,
};

const DEFAULT_DURATION: f64 = 100.0;
const DEFAULT_STEP: f64 = 0.1;

/// Errors that can occur while loading or running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid scenario: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// A scenario as written in a TOML file.
///
/// Every field is optional:
///
/// ```toml
/// initial = [0.999, 0.001, 0.0, 0.0]
/// parameters = [0.2, 1.75, 0.5, 0.1]
/// duration = 100.0
/// step = 0.1
/// drift_tolerance = 0.01
/// halt_on_non_finite = false
///
/// [[segments]]
/// duration = 50.0
/// step = 0.1
/// ```
///
/// `parameters` is ordered α, β, γ, ρ. Each entry in `segments` continues the
/// run from where the previous one ended.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default = "default_initial")]
    pub initial: Vec<f64>,

    #[serde(default = "default_parameters")]
    pub parameters: Vec<f64>,

    #[serde(default = "default_duration")]
    pub duration: f64,

    #[serde(default = "default_step")]
    pub step: f64,

    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance: f64,

    #[serde(default)]
    pub halt_on_non_finite: bool,

    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
}

/// A continuation segment in a [`ScenarioConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentConfig {
    pub duration: f64,

    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_initial() -> Vec<f64> {
    StateVector::default().as_array().to_vec()
}

fn default_parameters() -> Vec<f64> {
    ModelParameters::default().as_array().to_vec()
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

fn default_drift_tolerance() -> f64 {
    DEFAULT_DRIFT_TOLERANCE
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial: default_initial(),
            parameters: default_parameters(),
            duration: DEFAULT_DURATION,
            step: DEFAULT_STEP,
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
            halt_on_non_finite: false,
            segments: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    /// Parses a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scenario document.
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks arity and step sizes and produces a typed [`Scenario`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<Scenario, ConfigError> {
        let initial = StateVector::try_from(self.initial.as_slice())?;
        let parameters = ModelParameters::try_from(self.parameters.as_slice())?;
        if !self.drift_tolerance.is_finite() || self.drift_tolerance < 0.0 {
            return Err(ConfigError::DriftTolerance(self.drift_tolerance));
        }

        TimeGrid::new(self.duration, self.step)?;
        for segment in &self.segments {
            TimeGrid::new(segment.duration, segment.step)?;
        }

        Ok(Scenario {
            initial,
            parameters,
            duration: self.duration,
            step: self.step,
            drift_tolerance: self.drift_tolerance,
            halt_on_non_finite: self.halt_on_non_finite,
            segments: self
                .segments
                .iter()
                .map(|segment| (segment.duration, segment.step))
                .collect(),
        })
    }
}

/// A validated scenario, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub initial: StateVector,
    pub parameters: ModelParameters,
    pub duration: f64,
    pub step: f64,
    pub drift_tolerance: f64,
    pub halt_on_non_finite: bool,

    /// Continuation segments as `(duration, step)` pairs.
    pub segments: Vec<(f64, f64)>,
}

impl Scenario {
    /// Builds a simulation with this scenario's initial state and parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the drift tolerance is invalid.
    pub fn simulation(&self) -> Result<Simulation, ConfigError> {
        Ok(Simulation::new(self.initial, self.parameters)
            .with_drift_tolerance(self.drift_tolerance)?
            .halt_on_non_finite(self.halt_on_non_finite))
    }

    /// Runs the initial segment and then each continuation segment.
    ///
    /// # Errors
    ///
    /// Returns an error if any segment is misconfigured or halted.
    pub fn run(&self, verbose: bool) -> Result<Simulation, SimulationError> {
        let mut simulation = self.simulation()?.verbose(verbose);
        simulation.restart(self.duration, self.step)?;
        for &(duration, step) in &self.segments {
            simulation.extend(duration, step)?;
        }
        Ok(simulation)
    }
}

impl From<Scenario> for ScenarioConfig {
    fn from(scenario: Scenario) -> Self {
        Self {
            initial: scenario.initial.as_array().to_vec(),
            parameters: scenario.parameters.as_array().to_vec(),
            duration: scenario.duration,
            step: scenario.step,
            drift_tolerance: scenario.drift_tolerance,
            halt_on_non_finite: scenario.halt_on_non_finite,
            segments: scenario
                .segments
                .into_iter()
                .map(|(duration, step)| SegmentConfig { duration, step })
                .collect(),
        }
    }
}

impl From<Preset> for Scenario {
    fn from(preset: Preset) -> Self {
        preset.scenario()
    }
}

/// Built-in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Strong distancing (ρ = 0.1) over 100 days.
    Baseline,

    /// The baseline rates with no distancing (ρ = 1).
    Unmitigated,

    /// Germany 2020: 83.2 million people, R₀ = 2.4, 5.5 day incubation,
    /// 3 day infectious period, 40 000 exposed and 10 000 infected, 140 days.
    Germany2020,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Baseline, Preset::Unmitigated, Preset::Germany2020];

    /// Returns the preset's kebab-case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Preset::Baseline => "baseline",
            Preset::Unmitigated => "unmitigated",
            Preset::Germany2020 => "germany-2020",
        }
    }

    /// Looks up a preset by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }

    #[must_use]
    pub fn scenario(self) -> Scenario {
        let (initial, parameters, duration) = match self {
            Preset::Baseline => (
                StateVector::default(),
                ModelParameters::new(0.2, 1.75, 0.5, 0.1),
                100.0,
            ),
            Preset::Unmitigated => (
                StateVector::default(),
                ModelParameters::new(0.2, 1.75, 0.5, 1.0),
                100.0,
            ),
            Preset::Germany2020 => {
                let population = 83_200_000.0;
                (
                    StateVector::seeded(40_000.0 / population, 10_000.0 / population),
                    ModelParameters::from_reproduction_number(2.4, 5.5, 3.0),
                    140.0,
                )
            }
        };

        Scenario {
            initial,
            parameters,
            duration,
            step: DEFAULT_STEP,
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
            halt_on_non_finite: false,
            segments: Vec::new(),
        }
    }
}
