use std::error::Error as StdError;

type Source = Box<dyn StdError + Send + Sync>;

/// A failure inside an Euler run, tagged with the step it happened on.
///
/// Step 0 is the model call on the initial input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model failed at step {step}: {source}")]
    Model { step: usize, source: Source },

    #[error("problem failed at step {step}: {source}")]
    Problem { step: usize, source: Source },
}

impl Error {
    /// Returns the step the failure happened on.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Error::Model { step, .. } | Error::Problem { step, .. } => *step,
        }
    }

    pub(crate) fn model<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Model {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Problem {
            step,
            source: Box::new(err),
        }
    }
}
