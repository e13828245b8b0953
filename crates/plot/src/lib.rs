//! Line charts of SEIR simulation runs.
//!
//! The chart is drawn from a finished [`SimulationRun`] and never feeds
//! anything back into the simulation, so it can be swapped out or skipped.
//!
//! # Example
//!
//! ```ignore
//! use seir_model::{ModelParameters, StateVector, simulate};
//! use seir_plot::{Chart, ChartOptions};
//!
//! let run = simulate(StateVector::default(), ModelParameters::default(), 100.0, 0.1)?;
//! Chart::from_run(&run, ChartOptions::new().title("Unmitigated")).show()?;
//! ```

mod options;

pub use options::{ChartOptions, SeriesStyle};

use eframe::egui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};
use seir_model::{Compartment, SimulationRun};

/// One compartment's points, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub style: SeriesStyle,

    /// `[time, fraction]` pairs in time order.
    pub points: Vec<[f64; 2]>,
}

/// A chart of the four SEIR fractions over time.
#[derive(Debug, Clone)]
pub struct Chart {
    options: ChartOptions,
    traces: Vec<Trace>,
}

impl Chart {
    /// Collects the traces of every visible compartment in `run`.
    #[must_use]
    pub fn from_run(run: &SimulationRun, options: ChartOptions) -> Self {
        let traces = Compartment::ALL
            .into_iter()
            .filter(|compartment| options.series(*compartment).visible)
            .map(|compartment| Trace {
                style: options.series(compartment).clone(),
                points: run
                    .iter()
                    .map(|sample| [sample.time, sample.state.get(compartment)])
                    .collect(),
            })
            .collect();

        Self { options, traces }
    }

    /// Returns the visible traces in column order S, E, I, R.
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Opens a blocking native window displaying the chart.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self) -> Result<(), eframe::Error> {
        let title = self.options.title.clone();
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&title)
                .with_inner_size(self.options.size),
            ..Default::default()
        };

        eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(self))))
    }
}

impl eframe::App for Chart {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(self.options.title.as_str());
            });

            let mut plot = Plot::new("seir_chart")
                .x_axis_label(self.options.x_label.as_str())
                .y_axis_label(self.options.y_label.as_str())
                .show_grid(self.options.grid);
            if self.options.legend {
                plot = plot.legend(Legend::default());
            }

            let width = self.options.line_width;
            plot.show(ui, |plot_ui| {
                for trace in &self.traces {
                    let [r, g, b] = trace.style.color;
                    let points: PlotPoints = trace.points.iter().copied().collect();
                    let mut line = Line::new(points)
                        .name(trace.style.label.as_str())
                        .color(egui::Color32::from_rgb(r, g, b))
                        .width(width);
                    if trace.style.dashed {
                        line = line.style(LineStyle::dashed_loose());
                    }
                    plot_ui.line(line);
                }
            });
        });
    }
}

/// Draws `run` with `options` in a blocking native window.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show(run: &SimulationRun, options: ChartOptions) -> Result<(), eframe::Error> {
    Chart::from_run(run, options).show()
}

#[cfg(test)]
mod tests {
    use super::*;

    use seir_model::{ModelParameters, StateVector, simulate};

    fn run() -> SimulationRun {
        simulate(
            StateVector::default(),
            ModelParameters::new(0.2, 1.75, 0.5, 0.1),
            2.0,
            0.5,
        )
        .unwrap()
    }

    #[test]
    fn one_trace_per_compartment() {
        let chart = Chart::from_run(&run(), ChartOptions::new());
        let labels: Vec<&str> = chart
            .traces()
            .iter()
            .map(|trace| trace.style.label.as_str())
            .collect();
        assert_eq!(labels, ["Susceptible", "Exposed", "Infected", "Recovered"]);
    }

    #[test]
    fn traces_follow_the_run() {
        let run = run();
        let chart = Chart::from_run(&run, ChartOptions::new());

        for (trace, compartment) in chart.traces().iter().zip(Compartment::ALL) {
            assert_eq!(trace.points.len(), run.len());
            for (point, sample) in trace.points.iter().zip(&run) {
                assert_eq!(point[0], sample.time);
                assert_eq!(point[1], sample.state.get(compartment));
            }
        }
    }

    #[test]
    fn single_series_chart_has_one_trace() {
        let run = run();
        let chart = Chart::from_run(&run, ChartOptions::new().only(Compartment::Infected));

        assert_eq!(chart.traces().len(), 1);
        let trace = &chart.traces()[0];
        assert_eq!(trace.style.label, "Infected");
        let infected: Vec<f64> = run.iter().map(|sample| sample.state.infected).collect();
        let drawn: Vec<f64> = trace.points.iter().map(|point| point[1]).collect();
        assert_eq!(drawn, infected);
    }

    #[test]
    fn hidden_series_are_skipped() {
        let options = ChartOptions::new()
            .series_visible(Compartment::Susceptible, false)
            .series_visible(Compartment::Recovered, false);
        let chart = Chart::from_run(&run(), options);

        let labels: Vec<&str> = chart
            .traces()
            .iter()
            .map(|trace| trace.style.label.as_str())
            .collect();
        assert_eq!(labels, ["Exposed", "Infected"]);
    }

    #[test]
    fn options_flow_into_traces() {
        let options = ChartOptions::new().series_label(Compartment::Infected, "Infectious");
        let chart = Chart::from_run(&run(), options);
        assert_eq!(chart.traces()[2].style.label, "Infectious");
        assert_eq!(chart.options().series(Compartment::Infected).label, "Infectious");
    }
}
