use seir_core::Snapshot;

/// Event emitted by the Euler solver for each accepted snapshot.
///
/// Step 0 is the initial input before any integration; steps 1..=N follow
/// each integration step.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    /// Zero-based step number.
    pub step: usize,

    /// Model input and output at this step.
    pub snapshot: Snapshot<I, O>,
}
