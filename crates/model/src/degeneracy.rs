use log::warn;
use seir_core::Observer;
use seir_solvers::transient::euler::{Action, Event};
use thiserror::Error;

use crate::{Compartment, SeirInput, StateRates};

/// Default allowed deviation of the population total from its starting value.
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 0.01;

/// A sign that the step size is too large for the model's rates.
///
/// These are advisory. The offending values are kept in the output unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Degeneracy {
    #[error("{compartment} fraction went negative ({value}) at t={time}")]
    NegativeFraction {
        time: f64,
        compartment: Compartment,
        value: f64,
    },

    #[error("{compartment} fraction is no longer finite ({value}) at t={time}")]
    NonFinite {
        time: f64,
        compartment: Compartment,
        value: f64,
    },

    #[error("population total drifted to {total} (started at {expected}) at t={time}")]
    ConservationDrift { time: f64, total: f64, expected: f64 },
}

/// Watches Euler steps for negative fractions, overflow, and drift of the total.
///
/// Only the first occurrence of each kind is recorded and logged. By default
/// the monitor never stops the solver. With
/// [`halt_on_non_finite`](DegeneracyMonitor::halt_on_non_finite) it stops the
/// run at the first state holding an infinite or NaN fraction, since every
/// later step would be NaN as well.
#[derive(Debug, Clone)]
pub struct DegeneracyMonitor {
    expected_total: f64,
    tolerance: f64,
    halt_on_non_finite: bool,
    negative: Option<Degeneracy>,
    non_finite: Option<Degeneracy>,
    drift: Option<Degeneracy>,
}

impl DegeneracyMonitor {
    /// Creates a monitor for a segment whose initial total is `expected_total`.
    #[must_use]
    pub fn new(expected_total: f64, tolerance: f64) -> Self {
        Self {
            expected_total,
            tolerance,
            halt_on_non_finite: false,
            negative: None,
            non_finite: None,
            drift: None,
        }
    }

    /// Stops the solver once a fraction stops being finite.
    #[must_use]
    pub fn halt_on_non_finite(mut self, halt: bool) -> Self {
        self.halt_on_non_finite = halt;
        self
    }

    /// Returns the finding that stops the solver, if any has been seen.
    #[must_use]
    pub fn halt_reason(&self) -> Option<Degeneracy> {
        if self.halt_on_non_finite {
            self.non_finite
        } else {
            None
        }
    }

    /// Checks one input and records any new finding.
    pub fn inspect(&mut self, input: &SeirInput) {
        if self.negative.is_none() {
            let state = &input.state;
            if let Some(compartment) = Compartment::ALL
                .into_iter()
                .find(|compartment| state.get(*compartment) < 0.0)
            {
                let finding = Degeneracy::NegativeFraction {
                    time: input.time,
                    compartment,
                    value: state.get(compartment),
                };
                warn!("{finding}; consider a smaller step size");
                self.negative = Some(finding);
            }
        }

        if self.non_finite.is_none() {
            let state = &input.state;
            if let Some(compartment) = Compartment::ALL
                .into_iter()
                .find(|compartment| !state.get(*compartment).is_finite())
            {
                let finding = Degeneracy::NonFinite {
                    time: input.time,
                    compartment,
                    value: state.get(compartment),
                };
                warn!("{finding}; the step size is far too large for these rates");
                self.non_finite = Some(finding);
            }
        }

        if self.drift.is_none() {
            let total = input.state.total();
            if total.is_nan() || (total - self.expected_total).abs() > self.tolerance {
                let finding = Degeneracy::ConservationDrift {
                    time: input.time,
                    total,
                    expected: self.expected_total,
                };
                warn!("{finding}; consider a smaller step size");
                self.drift = Some(finding);
            }
        }
    }

    /// Returns the findings recorded so far in the order negative fraction,
    /// non-finite fraction, drift.
    #[must_use]
    pub fn findings(&self) -> Vec<Degeneracy> {
        self.negative
            .into_iter()
            .chain(self.non_finite)
            .chain(self.drift)
            .collect()
    }
}

impl Observer<Event<SeirInput, StateRates>, Action> for DegeneracyMonitor {
    fn observe(&mut self, event: &Event<SeirInput, StateRates>) -> Option<Action> {
        self.inspect(&event.snapshot.input);
        self.halt_reason().map(|_| Action::StopEarly)
    }
}

/// Allows `&mut DegeneracyMonitor` to be handed to a solver so the findings
/// can be read after it returns.
impl Observer<Event<SeirInput, StateRates>, Action> for &mut DegeneracyMonitor {
    fn observe(&mut self, event: &Event<SeirInput, StateRates>) -> Option<Action> {
        (*self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::StateVector;

    fn input(time: f64, state: StateVector) -> SeirInput {
        SeirInput {
            index: 0,
            time,
            state,
        }
    }

    #[test]
    fn healthy_state_has_no_findings() {
        let mut monitor = DegeneracyMonitor::new(1.0, DEFAULT_DRIFT_TOLERANCE);
        monitor.inspect(&input(0.0, StateVector::new(0.6, 0.2, 0.1, 0.1)));
        assert!(monitor.findings().is_empty());
    }

    #[test]
    fn reports_first_negative_fraction_only() {
        let mut monitor = DegeneracyMonitor::new(1.0, DEFAULT_DRIFT_TOLERANCE);
        monitor.inspect(&input(1.0, StateVector::new(-0.1, 0.6, 0.4, 0.1)));
        monitor.inspect(&input(2.0, StateVector::new(0.2, -0.3, 1.0, 0.1)));

        assert_eq!(
            monitor.findings(),
            vec![Degeneracy::NegativeFraction {
                time: 1.0,
                compartment: Compartment::Susceptible,
                value: -0.1,
            }]
        );
    }

    #[test]
    fn reports_drift_beyond_tolerance() {
        let mut monitor = DegeneracyMonitor::new(1.0, 0.01);
        monitor.inspect(&input(1.0, StateVector::new(0.5, 0.2, 0.2, 0.105)));
        assert!(monitor.findings().is_empty());

        monitor.inspect(&input(2.0, StateVector::new(0.5, 0.2, 0.2, 0.2)));
        let findings = monitor.findings();
        assert_eq!(findings.len(), 1);
        assert!(matches!(
            findings[0],
            Degeneracy::ConservationDrift { time, .. } if time == 2.0
        ));
    }

    #[test]
    fn nan_total_counts_as_drift() {
        let mut monitor = DegeneracyMonitor::new(1.0, 0.01);
        monitor.inspect(&input(3.0, StateVector::new(f64::NAN, 0.0, 0.0, 0.0)));
        assert_eq!(monitor.findings().len(), 1);
    }

    fn event(time: f64, state: StateVector) -> Event<SeirInput, StateRates> {
        Event {
            step: 1,
            snapshot: seir_core::Snapshot::new(
                input(time, state),
                StateRates {
                    susceptible: 0.0,
                    exposed: 0.0,
                    infected: 0.0,
                    recovered: 0.0,
                },
            ),
        }
    }

    #[test]
    fn observer_does_not_act_on_advisory_findings() {
        let mut monitor = DegeneracyMonitor::new(1.0, 0.0).halt_on_non_finite(true);
        assert_eq!(
            monitor.observe(&event(0.1, StateVector::new(2.0, -0.5, 0.0, 0.0))),
            None
        );
        assert_eq!(monitor.findings().len(), 2);
    }

    #[test]
    fn non_finite_fraction_is_reported() {
        let mut monitor = DegeneracyMonitor::new(1.0, DEFAULT_DRIFT_TOLERANCE);
        let action =
            monitor.observe(&event(5.0, StateVector::new(0.5, f64::INFINITY, 0.0, 0.0)));

        assert_eq!(action, None);
        assert_eq!(monitor.halt_reason(), None);
        assert!(monitor.findings().contains(&Degeneracy::NonFinite {
            time: 5.0,
            compartment: Compartment::Exposed,
            value: f64::INFINITY,
        }));
    }

    #[test]
    fn halting_monitor_stops_on_non_finite_fraction() {
        let mut monitor =
            DegeneracyMonitor::new(1.0, DEFAULT_DRIFT_TOLERANCE).halt_on_non_finite(true);
        assert_eq!(
            monitor.observe(&event(1.0, StateVector::new(0.5, 0.2, 0.2, 0.1))),
            None
        );

        let action = monitor.observe(&event(2.0, StateVector::new(0.5, 0.2, f64::NAN, 0.1)));
        assert_eq!(action, Some(Action::StopEarly));
        assert!(matches!(
            monitor.halt_reason(),
            Some(Degeneracy::NonFinite {
                compartment: Compartment::Infected,
                ..
            })
        ));
    }

    #[test]
    fn findings_render_readably() {
        let finding = Degeneracy::NegativeFraction {
            time: 4.0,
            compartment: Compartment::Infected,
            value: -0.5,
        };
        assert_eq!(
            finding.to_string(),
            "Infected fraction went negative (-0.5) at t=4"
        );
    }
}
