use thiserror::Error;

/// An evenly spaced time axis from zero to a fixed duration.
///
/// The number of steps is `N = floor(duration / step)` and the axis holds
/// `N + 1` points `t_k = k * (duration / N)`, with the last point pinned to
/// `duration` exactly.
///
/// When `duration` is not an exact multiple of the requested step, the spacing
/// of the axis differs from the request. Solvers must advance by
/// [`realized_step`](TimeGrid::realized_step), which is `t[1] - t[0]`, so that
/// the states line up with the axis.
///
/// ```
/// use seir_solvers::transient::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 0.3).unwrap();
/// assert_eq!(grid.steps(), 3);
/// assert_eq!(grid.len(), 4);
/// assert_eq!(grid.time(3), 1.0);
/// assert!((grid.realized_step() - 1.0 / 3.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    duration: f64,
    nominal_step: f64,
    steps: usize,
    realized_step: f64,
}

/// Errors that can occur when constructing a [`TimeGrid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("duration must be finite and positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("step size must be finite and positive, got {0}")]
    NonPositiveStep(f64),

    #[error("step size {step} exceeds duration {duration}")]
    StepExceedsDuration { step: f64, duration: f64 },

    #[error(
        "duration {duration} at step size {step} needs more than {max} steps",
        max = TimeGrid::MAX_STEPS
    )]
    TooManySteps { duration: f64, step: f64 },
}

impl TimeGrid {
    /// Largest number of steps a grid may hold.
    ///
    /// Every point becomes a stored sample, so longer axes are rejected up
    /// front instead of exhausting memory partway through a run.
    pub const MAX_STEPS: usize = 100_000_000;

    /// Creates a grid covering `[0, duration]` with roughly `step` spacing.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is non-finite or non-positive, if
    /// `step` is larger than `duration`, or if the axis would need more than
    /// [`MAX_STEPS`](TimeGrid::MAX_STEPS) steps.
    pub fn new(duration: f64, step: f64) -> Result<Self, GridError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(GridError::NonPositiveDuration(duration));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(GridError::NonPositiveStep(step));
        }
        if step > duration {
            return Err(GridError::StepExceedsDuration { step, duration });
        }

        // `step <= duration` keeps the quotient at or above one, and the
        // bound below keeps it well inside `usize`.
        let quotient = (duration / step).floor();
        #[allow(clippy::cast_precision_loss)]
        let max_steps = Self::MAX_STEPS as f64;
        if quotient > max_steps {
            return Err(GridError::TooManySteps { duration, step });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = quotient as usize;
        #[allow(clippy::cast_precision_loss)]
        let realized_step = duration / steps as f64;

        Ok(Self {
            duration,
            nominal_step: step,
            steps,
            realized_step,
        })
    }

    /// Returns the number of integration steps, `N`.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the number of points on the axis, `N + 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps + 1
    }

    /// Always `false`; a grid holds at least its two endpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the final time on the axis.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns the step size that was requested.
    #[must_use]
    pub fn nominal_step(&self) -> f64 {
        self.nominal_step
    }

    /// Returns the spacing actually used between axis points.
    #[must_use]
    pub fn realized_step(&self) -> f64 {
        self.realized_step
    }

    /// Returns the time of point `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k` is past the end of the axis.
    #[must_use]
    pub fn time(&self, k: usize) -> f64 {
        assert!(k <= self.steps, "grid index {k} out of range 0..={}", self.steps);
        if k == self.steps {
            self.duration
        } else {
            #[allow(clippy::cast_precision_loss)]
            let k = k as f64;
            k * self.realized_step
        }
    }

    /// Iterates over all points of the axis in order.
    pub fn times(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len()).map(|k| self.time(k))
    }
}
