use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
#[cfg(feature = "plot")]
use seir_model::Compartment;
use seir_model::{Preset, Scenario, ScenarioConfig, SegmentConfig};

/// Command-line arguments of the `seir` binary.
#[derive(Debug, Parser)]
#[command(name = "seir")]
#[command(about = "Simulate an SEIR epidemic with forward Euler time-stepping")]
pub struct Args {
    /// Scenario file (TOML)
    #[arg(short, long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in scenario: baseline, unmitigated, or germany-2020
    #[arg(short, long, value_parser = parse_preset)]
    pub preset: Option<Preset>,

    /// Simulated time in days
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Step size in days
    #[arg(short, long)]
    pub step: Option<f64>,

    /// Initial fractions S,E,I,R
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub initial: Option<Vec<f64>>,

    /// Rate parameters alpha,beta,gamma,rho
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub parameters: Option<Vec<f64>>,

    /// Continue the run for another DURATION days (repeatable)
    #[arg(long = "extend", value_name = "DURATION")]
    pub extensions: Vec<f64>,

    /// Write the run as CSV to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Abandon the run if a fraction overflows to infinity or NaN
    #[arg(long)]
    pub halt_on_non_finite: bool,

    /// Open a chart of the run when it finishes
    #[cfg(feature = "plot")]
    #[arg(long)]
    pub plot: bool,

    /// Chart a single compartment (infected when no name is given)
    #[cfg(feature = "plot")]
    #[arg(
        long,
        value_name = "COMPARTMENT",
        num_args = 0..=1,
        default_missing_value = "infected",
        value_parser = parse_compartment
    )]
    pub plot_only: Option<Compartment>,

    /// Echo parameters and initial state as they are applied
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level: off, error, warn, info, debug, or trace
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

fn parse_preset(name: &str) -> Result<Preset, String> {
    Preset::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Preset::ALL.iter().map(|preset| preset.name()).collect();
        format!("unknown preset '{name}', expected one of: {}", known.join(", "))
    })
}

#[cfg(feature = "plot")]
fn parse_compartment(name: &str) -> Result<Compartment, String> {
    Compartment::from_name(name).ok_or_else(|| {
        format!("unknown compartment '{name}', expected one of: S, E, I, R or their names")
    })
}

impl Args {
    /// Returns the log level, raised to `info` when verbose.
    #[must_use]
    pub fn effective_log_level(&self) -> LevelFilter {
        if self.verbose {
            self.log_level.max(LevelFilter::Info)
        } else {
            self.log_level
        }
    }

    /// Returns whether a chart should be opened after the run.
    #[cfg(feature = "plot")]
    #[must_use]
    pub fn wants_chart(&self) -> bool {
        self.plot || self.plot_only.is_some()
    }

    /// Loads the base scenario and applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario file cannot be read or parsed.
    pub fn scenario_config(&self) -> Result<ScenarioConfig> {
        let mut config = match (&self.config, self.preset) {
            (Some(path), _) => ScenarioConfig::from_path(path)
                .with_context(|| format!("loading scenario from {}", path.display()))?,
            (None, Some(preset)) => Scenario::from(preset).into(),
            (None, None) => ScenarioConfig::default(),
        };

        if let Some(initial) = &self.initial {
            config.initial.clone_from(initial);
        }
        if let Some(parameters) = &self.parameters {
            config.parameters.clone_from(parameters);
        }
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(step) = self.step {
            config.step = step;
        }
        if self.halt_on_non_finite {
            config.halt_on_non_finite = true;
        }
        config
            .segments
            .extend(self.extensions.iter().map(|&duration| SegmentConfig {
                duration,
                step: config.step,
            }));

        Ok(config)
    }
}
