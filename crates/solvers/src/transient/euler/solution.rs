use seir_core::Snapshot;

/// How the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every step on the problem's axis was taken.
    Complete,

    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// The result of an Euler integration.
///
/// The history always holds the initial snapshot, so it is never empty.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,

    /// Snapshot at every step, starting with the initial input.
    pub history: Vec<Snapshot<I, O>>,
}

impl<I, O> Solution<I, O> {
    pub(crate) fn starting_with(initial: Snapshot<I, O>) -> Self {
        Self {
            status: Status::Complete,
            history: vec![initial],
        }
    }

    /// Number of integration steps taken.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.history.len() - 1
    }

    /// Returns the most recent snapshot.
    #[must_use]
    pub fn last(&self) -> &Snapshot<I, O> {
        &self.history[self.history.len() - 1]
    }

    /// Consumes the solution and returns the model inputs in step order.
    pub fn into_inputs(self) -> impl Iterator<Item = I> {
        self.history.into_iter().map(|snapshot| snapshot.input)
    }
}
