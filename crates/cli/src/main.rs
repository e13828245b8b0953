mod cli;
mod logging;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use seir_model::{write_csv, write_csv_path};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = logging::init(args.effective_log_level())?;

    let config = args.scenario_config()?;
    let scenario = config.validate().context("invalid scenario")?;
    if args.verbose {
        info!("initial state: {}", scenario.initial);
        info!("parameters: {}", scenario.parameters);
        info!(
            "basic reproduction number: {}",
            scenario.parameters.basic_reproduction_number()
        );
    }

    let simulation = scenario.run(args.verbose)?;
    let run = simulation.run();
    if !simulation.degeneracies().is_empty() {
        warn!(
            "the final segment produced {} numerical warning(s); the output is unchanged",
            simulation.degeneracies().len()
        );
    }
    info!(
        "simulated {} samples up to t={}; final state {}",
        run.len(),
        run.end_time(),
        run.final_state()
    );

    match &args.output {
        Some(path) => {
            write_csv_path(run, path)
                .with_context(|| format!("writing CSV to {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => write_csv(run, io::stdout().lock()).context("writing CSV to stdout")?,
    }

    #[cfg(feature = "plot")]
    if args.wants_chart() {
        let mut options = seir_plot::ChartOptions::new();
        if let Some(compartment) = args.plot_only {
            options = options.only(compartment);
        }
        seir_plot::show(run, options)
            .map_err(|err| anyhow::anyhow!("failed to open chart window: {err}"))?;
    }

    Ok(())
}
