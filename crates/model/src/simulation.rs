use log::{Level, debug, log, warn};
use seir_solvers::transient::{
    TimeGrid,
    euler::{self, Status},
};

use crate::{
    ConfigError, DEFAULT_DRIFT_TOLERANCE, Degeneracy, DegeneracyMonitor, ModelParameters,
    Sample, SeirInput, SeirModel, SeirProblem, SimulationError, SimulationRun, StateVector,
};

/// Runs a fresh simulation and returns its samples.
///
/// The run starts from `initial` at `t = 0` and ends at `t = duration`, with
/// `floor(duration / step) + 1` samples.
///
/// # Errors
///
/// Returns [`SimulationError::Config`] if `duration` or `step` is not finite
/// and positive, or if `step` exceeds `duration`.
pub fn simulate(
    initial: StateVector,
    parameters: ModelParameters,
    duration: f64,
    step: f64,
) -> Result<SimulationRun, SimulationError> {
    let mut simulation = Simulation::new(initial, parameters);
    simulation.restart(duration, step)?;
    Ok(simulation.into_run())
}

/// A simulation that owns its accumulated samples.
///
/// [`restart`](Simulation::restart) discards all samples and integrates from
/// the initial state. [`extend`](Simulation::extend) continues from the final
/// sample, so repeated extends build one long run.
#[derive(Debug, Clone)]
pub struct Simulation {
    initial: StateVector,
    parameters: ModelParameters,
    run: SimulationRun,
    drift_tolerance: f64,
    halt_on_non_finite: bool,
    verbose: bool,
    degeneracies: Vec<Degeneracy>,
}

impl Simulation {
    /// Creates a simulation whose run holds only `initial` at `t = 0`.
    #[must_use]
    pub fn new(initial: StateVector, parameters: ModelParameters) -> Self {
        warn_if_unphysical(&parameters);
        Self {
            initial,
            parameters,
            run: SimulationRun::starting_at(initial),
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
            halt_on_non_finite: false,
            verbose: false,
            degeneracies: Vec::new(),
        }
    }

    /// Sets the allowed drift of the population total before it is reported.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is negative or not finite.
    pub fn with_drift_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::DriftTolerance(tolerance));
        }
        self.drift_tolerance = tolerance;
        Ok(self)
    }

    /// Abandons a segment as soon as a fraction becomes infinite or NaN.
    ///
    /// A halted segment returns [`SimulationError::Halted`] and leaves the
    /// samples as they were before the call. Off by default, in which case
    /// overflowing values are kept in the run and only reported.
    #[must_use]
    pub fn halt_on_non_finite(mut self, halt: bool) -> Self {
        self.halt_on_non_finite = halt;
        self
    }

    /// Echoes parameter and state changes at `info` level instead of `debug`.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn initial_state(&self) -> StateVector {
        self.initial
    }

    #[must_use]
    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    #[must_use]
    pub fn run(&self) -> &SimulationRun {
        &self.run
    }

    #[must_use]
    pub fn into_run(self) -> SimulationRun {
        self.run
    }

    /// Returns the state of the last sample.
    #[must_use]
    pub fn final_state(&self) -> StateVector {
        self.run.final_state()
    }

    /// Returns the degeneracies found in the most recent segment.
    #[must_use]
    pub fn degeneracies(&self) -> &[Degeneracy] {
        &self.degeneracies
    }

    /// Discards all samples and integrates from the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] for an invalid `duration` or
    /// `step`, or [`SimulationError::Halted`] if the segment is abandoned.
    /// The samples are left unchanged in either case.
    pub fn restart(&mut self, duration: f64, step: f64) -> Result<&SimulationRun, SimulationError> {
        let grid = TimeGrid::new(duration, step)?;
        let start = Sample {
            time: 0.0,
            state: self.initial,
        };
        let segment = self.integrate(start, &grid)?;

        let mut run = SimulationRun::with_capacity(self.initial, grid.len());
        run.append(segment);
        self.run = run;
        Ok(&self.run)
    }

    /// Continues integration from the final sample.
    ///
    /// Appends `floor(duration / step)` samples and leaves existing samples
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] for an invalid `duration` or
    /// `step`, or [`SimulationError::Halted`] if the segment is abandoned.
    /// The samples are left unchanged in either case.
    pub fn extend(&mut self, duration: f64, step: f64) -> Result<&SimulationRun, SimulationError> {
        let grid = TimeGrid::new(duration, step)?;
        let segment = self.integrate(*self.run.last(), &grid)?;
        self.run.append(segment);
        Ok(&self.run)
    }

    /// Restarts when `reset` is `true`, otherwise extends.
    ///
    /// # Errors
    ///
    /// See [`restart`](Simulation::restart) and [`extend`](Simulation::extend).
    pub fn simulate(
        &mut self,
        duration: f64,
        step: f64,
        reset: bool,
    ) -> Result<&SimulationRun, SimulationError> {
        if reset {
            self.restart(duration, step)
        } else {
            self.extend(duration, step)
        }
    }

    /// Discards all samples, leaving only the initial state at `t = 0`.
    pub fn reset(&mut self) {
        self.run = SimulationRun::starting_at(self.initial);
        self.degeneracies.clear();
    }

    /// Replaces the state that [`restart`](Simulation::restart) starts from.
    ///
    /// Existing samples are kept until the next restart or reset.
    pub fn reinitialize(&mut self, initial: StateVector) {
        log!(
            self.echo_level(),
            "initial state set to S0={} E0={} I0={} R0={}",
            initial.susceptible,
            initial.exposed,
            initial.infected,
            initial.recovered
        );
        self.initial = initial;
    }

    /// Replaces the rate parameters used by subsequent segments.
    pub fn set_parameters(&mut self, parameters: ModelParameters) {
        log!(self.echo_level(), "parameters set to {parameters}");
        warn_if_unphysical(&parameters);
        self.parameters = parameters;
    }

    fn echo_level(&self) -> Level {
        if self.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// Steps along `grid` from `start` and returns the new samples, without
    /// the start itself. Findings replace [`degeneracies`](Self::degeneracies).
    fn integrate(
        &mut self,
        start: Sample,
        grid: &TimeGrid,
    ) -> Result<Vec<Sample>, SimulationError> {
        if grid.realized_step() != grid.nominal_step() {
            debug!(
                "step {} does not divide duration {}; stepping by {} instead",
                grid.nominal_step(),
                grid.duration(),
                grid.realized_step()
            );
        }
        log!(
            self.echo_level(),
            "integrating {} steps of {} days from t={} ({}; {})",
            grid.steps(),
            grid.realized_step(),
            start.time,
            self.parameters,
            start.state
        );

        let model = SeirModel::new(self.parameters);
        let problem = SeirProblem::new(grid, start.time);
        let mut monitor = DegeneracyMonitor::new(start.state.total(), self.drift_tolerance)
            .halt_on_non_finite(self.halt_on_non_finite);

        let solution = euler::solve(&model, &problem, SeirInput::at(start), &mut monitor)?;
        self.degeneracies = monitor.findings();

        let stopped = solution.status == Status::StoppedByObserver;
        if let Some(reason) = monitor.halt_reason().filter(|_| stopped) {
            warn!(
                "abandoned segment after {} of {} steps",
                solution.steps(),
                grid.steps()
            );
            return Err(SimulationError::Halted {
                completed: solution.steps(),
                requested: grid.steps(),
                reason,
            });
        }

        let segment: Vec<Sample> = solution.into_inputs().skip(1).map(Sample::from).collect();
        if let Some(last) = segment.last() {
            debug!("segment finished at t={} with {}", last.time, last.state);
        }
        Ok(segment)
    }
}

fn warn_if_unphysical(parameters: &ModelParameters) {
    if !parameters.is_physical() {
        warn!("parameters are not all finite and non-negative: {parameters}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn params() -> ModelParameters {
        ModelParameters::new(0.2, 1.75, 0.5, 1.0)
    }

    #[test]
    fn fresh_run_has_expected_shape() {
        let run = simulate(StateVector::default(), params(), 10.0, 0.1).unwrap();
        assert_eq!(run.len(), 101);
        assert_eq!(run.first().time, 0.0);
        assert_eq!(run.end_time(), 10.0);
        assert_eq!(run.initial_state(), StateVector::default());
    }

    #[test]
    fn invalid_grid_leaves_simulation_untouched() {
        let mut sim = Simulation::new(StateVector::default(), params());
        sim.restart(1.0, 0.1).unwrap();
        let before = sim.run().clone();

        let err = sim.restart(1.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Config(ConfigError::NonPositiveStep(_))
        ));
        let err = sim.extend(-1.0, 0.1).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Config(ConfigError::NonPositiveDuration(_))
        ));
        let err = sim.extend(0.5, 1.0).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Config(ConfigError::StepExceedsDuration { .. })
        ));

        assert_eq!(sim.run(), &before);
    }

    #[test]
    fn simulate_flag_dispatches() {
        let mut sim = Simulation::new(StateVector::default(), params());
        sim.simulate(2.0, 0.5, true).unwrap();
        assert_eq!(sim.run().len(), 5);
        sim.simulate(2.0, 0.5, false).unwrap();
        assert_eq!(sim.run().len(), 9);
        sim.simulate(2.0, 0.5, true).unwrap();
        assert_eq!(sim.run().len(), 5);
    }

    #[test]
    fn extension_times_continue_from_previous_end() {
        let mut sim = Simulation::new(StateVector::default(), params());
        sim.restart(1.0, 0.5).unwrap();
        sim.extend(1.0, 0.25).unwrap();

        let times: Vec<f64> = sim.run().times().collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0, 1.25, 1.5, 1.75, 2.0]);
    }

    #[test]
    fn reset_returns_to_initial_sample() {
        let mut sim = Simulation::new(StateVector::default(), params());
        sim.restart(3.0, 0.1).unwrap();
        sim.reset();
        assert_eq!(sim.run().len(), 1);
        assert_eq!(sim.final_state(), StateVector::default());
    }

    #[test]
    fn reinitialize_applies_on_next_restart() {
        let mut sim = Simulation::new(StateVector::default(), params());
        sim.restart(1.0, 0.1).unwrap();
        let previous_len = sim.run().len();

        let seeded = StateVector::seeded(0.0, 0.01);
        sim.reinitialize(seeded);
        assert_eq!(sim.run().len(), previous_len);
        assert_eq!(sim.run().initial_state(), StateVector::default());

        sim.restart(1.0, 0.1).unwrap();
        assert_eq!(sim.run().initial_state(), seeded);
    }

    #[test]
    fn set_parameters_affects_following_segments_only() {
        let mut sim = Simulation::new(StateVector::default(), params());
        sim.restart(5.0, 0.1).unwrap();
        let prefix = sim.run().as_slice().to_vec();

        // No transmission and no progression: the state freezes.
        sim.set_parameters(ModelParameters::new(0.0, 0.0, 0.0, 0.0));
        sim.extend(5.0, 0.1).unwrap();

        assert_eq!(&sim.run().as_slice()[..prefix.len()], prefix.as_slice());
        assert_eq!(sim.final_state(), prefix[prefix.len() - 1].state);
    }

    #[test]
    fn stable_step_reports_no_degeneracy() {
        let mut sim = Simulation::new(StateVector::default(), params());
        sim.restart(100.0, 0.1).unwrap();
        assert!(sim.degeneracies().is_empty());
    }

    #[test]
    fn unstable_step_is_reported_but_not_corrected() {
        // γ·h = 3 overshoots recovery on every step.
        let stiff = ModelParameters::new(0.2, 1.75, 3.0, 1.0);
        let initial = StateVector::new(0.5, 0.0, 0.5, 0.0);

        let mut sim = Simulation::new(initial, stiff);
        sim.restart(3.0, 1.0).unwrap();

        // I' = 0.5 + (0 - 3·0.5)·1 = -1.0
        assert_relative_eq!(sim.run()[1].state.infected, -1.0);
        assert!(sim.degeneracies().iter().any(|finding| matches!(
            finding,
            Degeneracy::NegativeFraction {
                compartment: crate::Compartment::Infected,
                ..
            }
        )));
    }

    /// Contact rate so large that the state overflows within a few steps.
    fn explosive() -> ModelParameters {
        ModelParameters::new(0.2, 1e6, 0.5, 1.0)
    }

    #[test]
    fn overflow_is_kept_and_reported_by_default() {
        let mut sim = Simulation::new(StateVector::default(), explosive());
        sim.restart(100.0, 1.0).unwrap();

        assert_eq!(sim.run().len(), 101);
        assert!(sim.run().final_state().total().is_nan());
        assert!(
            sim.degeneracies()
                .iter()
                .any(|finding| matches!(finding, Degeneracy::NonFinite { .. }))
        );
    }

    #[test]
    fn halting_abandons_the_segment() {
        let mut sim = Simulation::new(StateVector::default(), params()).halt_on_non_finite(true);
        sim.restart(2.0, 1.0).unwrap();
        let before = sim.run().clone();

        sim.set_parameters(explosive());
        let err = sim.extend(100.0, 1.0).unwrap_err();

        let SimulationError::Halted {
            completed,
            requested,
            reason,
        } = err
        else {
            panic!("expected a halted segment, got {err:?}");
        };
        assert!(completed < requested);
        assert_eq!(requested, 100);
        assert!(matches!(reason, Degeneracy::NonFinite { time, .. } if time > 2.0));
        assert_eq!(sim.run(), &before);
        assert!(sim.degeneracies().contains(&reason));
    }

    #[test]
    fn halted_restart_keeps_previous_samples() {
        let mut sim = Simulation::new(StateVector::default(), params()).halt_on_non_finite(true);
        sim.restart(3.0, 1.0).unwrap();
        let before = sim.run().clone();

        sim.set_parameters(explosive());
        assert!(matches!(
            sim.restart(100.0, 1.0),
            Err(SimulationError::Halted { .. })
        ));
        assert_eq!(sim.run(), &before);
    }

    #[test]
    fn huge_step_count_is_a_config_error() {
        let result = simulate(StateVector::default(), params(), 1e20, 1.0);
        assert!(matches!(
            result,
            Err(SimulationError::Config(ConfigError::TooManySteps { .. }))
        ));
    }

    #[test]
    fn drift_tolerance_is_validated() {
        let sim = Simulation::new(StateVector::default(), params());
        assert!(sim.clone().with_drift_tolerance(0.05).is_ok());
        assert_eq!(
            sim.with_drift_tolerance(-1.0).unwrap_err(),
            ConfigError::DriftTolerance(-1.0)
        );
    }
}
