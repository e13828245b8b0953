use std::{fs, io, path::Path};

use serde::Serialize;
use thiserror::Error;

use crate::SimulationRun;

/// Errors that can occur while exporting a run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
struct Row {
    time: f64,
    susceptible: f64,
    exposed: f64,
    infected: f64,
    recovered: f64,
}

/// Writes a run as CSV with columns `time,susceptible,exposed,infected,recovered`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: io::Write>(run: &SimulationRun, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for sample in run {
        let state = &sample.state;
        csv.serialize(Row {
            time: sample.time,
            susceptible: state.susceptible,
            exposed: state.exposed,
            infected: state.infected,
            recovered: state.recovered,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes a run as CSV to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn write_csv_path(run: &SimulationRun, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    write_csv(run, io::BufWriter::new(file))
}
