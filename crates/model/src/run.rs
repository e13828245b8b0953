use std::ops::Index;

use crate::StateVector;

/// A state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time in days since the start of the run.
    pub time: f64,

    pub state: StateVector,
}

/// A fully materialized, ordered sequence of samples.
///
/// A run always holds at least its initial sample. A freshly simulated run of
/// duration `D` and step `H` starts at `t = 0`, ends at `t = D`, and holds
/// `floor(D / H) + 1` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    samples: Vec<Sample>,
}

impl SimulationRun {
    /// Creates a run holding only `state` at `t = 0`.
    #[must_use]
    pub fn starting_at(state: StateVector) -> Self {
        Self {
            samples: vec![Sample { time: 0.0, state }],
        }
    }

    pub(crate) fn with_capacity(state: StateVector, capacity: usize) -> Self {
        let mut samples = Vec::with_capacity(capacity.max(1));
        samples.push(Sample { time: 0.0, state });
        Self { samples }
    }

    pub(crate) fn append(&mut self, samples: impl IntoIterator<Item = Sample>) {
        self.samples.extend(samples);
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; a run holds at least its initial sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterates over the sample times.
    pub fn times(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.time)
    }

    /// Iterates over the sample states.
    pub fn states(&self) -> impl ExactSizeIterator<Item = StateVector> + '_ {
        self.samples.iter().map(|sample| sample.state)
    }

    /// Returns the states as row-major `[S, E, I, R]` rows.
    #[must_use]
    pub fn rows(&self) -> Vec<[f64; 4]> {
        self.states().map(|state| state.as_array()).collect()
    }

    #[must_use]
    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    #[must_use]
    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    #[must_use]
    pub fn initial_state(&self) -> StateVector {
        self.first().state
    }

    #[must_use]
    pub fn final_state(&self) -> StateVector {
        self.last().state
    }

    /// Returns the time of the last sample.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.last().time
    }
}

impl Index<usize> for SimulationRun {
    type Output = Sample;

    fn index(&self, index: usize) -> &Sample {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a SimulationRun {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, s: f64) -> Sample {
        Sample {
            time,
            state: StateVector::new(s, 1.0 - s, 0.0, 0.0),
        }
    }

    #[test]
    fn starts_with_single_sample_at_zero() {
        let run = SimulationRun::starting_at(StateVector::default());
        assert_eq!(run.len(), 1);
        assert!(!run.is_empty());
        assert_eq!(run.end_time(), 0.0);
        assert_eq!(run.initial_state(), run.final_state());
    }

    #[test]
    fn append_keeps_order() {
        let mut run = SimulationRun::starting_at(StateVector::new(1.0, 0.0, 0.0, 0.0));
        run.append([sample(0.5, 0.9), sample(1.0, 0.8)]);

        assert_eq!(run.len(), 3);
        assert_eq!(run.times().collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
        assert_eq!(run[2], sample(1.0, 0.8));
        assert_eq!(run.final_state().susceptible, 0.8);
        assert_eq!(run.end_time(), 1.0);
    }

    #[test]
    fn rows_are_in_column_order() {
        let mut run = SimulationRun::starting_at(StateVector::new(0.1, 0.2, 0.3, 0.4));
        run.append([sample(1.0, 0.5)]);

        assert_eq!(run.rows(), vec![[0.1, 0.2, 0.3, 0.4], [0.5, 0.5, 0.0, 0.0]]);
    }

    #[test]
    fn iterates_by_reference() {
        let run = SimulationRun::starting_at(StateVector::default());
        let count = (&run).into_iter().count();
        assert_eq!(count, 1);
        assert!(run.get(1).is_none());
    }
}
