/// Receives solver events and decides how the iteration should proceed.
///
/// Observers let callers monitor or steer a solver without changing its API.
/// They are used for logging, collecting diagnostics, or stopping early.
///
/// `observe` returns `Option<A>`: `Some(action)` requests a solver-specific
/// action and `None` lets the solver continue unchanged.
///
/// Closures automatically implement `Observer`, and `()` is a no-op observer
/// that always returns `None`.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Halt {
        Now,
    }

    fn drive<O: Observer<usize, Halt>>(mut observer: O, limit: usize) -> usize {
        for step in 0..limit {
            if let Some(Halt::Now) = observer.observe(&step) {
                return step;
            }
        }
        limit
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 10), 10);
    }

    #[test]
    fn closure_observer_can_halt() {
        let halted_at = drive(|step: &usize| (*step == 3).then_some(Halt::Now), 10);
        assert_eq!(halted_at, 3);
    }

    #[test]
    fn closure_observer_can_collect() {
        let mut seen = Vec::new();
        drive(
            |step: &usize| {
                seen.push(*step);
                None
            },
            4,
        );
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
