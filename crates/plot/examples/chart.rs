//! Interactive chart of a built-in scenario.
//!
//! # Usage
//!
//! ```text
//! cargo run --example chart -- baseline
//! cargo run --example chart -- unmitigated 0.5
//! cargo run --example chart -- germany-2020
//! ```
//!
//! The optional second argument overrides the step size in days. Large steps
//! make forward Euler overshoot; try `2` with `unmitigated` to see it.

use std::error::Error;

use seir_model::Preset;
use seir_plot::{Chart, ChartOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let name = std::env::args().nth(1).unwrap_or_else(|| "baseline".into());
    let Some(preset) = Preset::from_name(&name) else {
        eprintln!("Unknown scenario: {name}");
        eprintln!("Usage: chart [baseline|unmitigated|germany-2020] [step]");
        std::process::exit(1);
    };

    let mut scenario = preset.scenario();
    if let Some(step) = std::env::args().nth(2) {
        scenario.step = step.parse()?;
    }

    let simulation = scenario.run(true)?;
    for finding in simulation.degeneracies() {
        eprintln!("warning: {finding}");
    }

    let title = format!(
        "{name}: R0 = {:.2}, step = {} days",
        scenario.parameters.basic_reproduction_number(),
        scenario.step
    );
    Chart::from_run(simulation.run(), ChartOptions::new().title(title)).show()?;

    Ok(())
}
