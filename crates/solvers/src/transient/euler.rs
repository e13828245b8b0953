//! Forward Euler solver for ODE problems.
//!
//! Steps a model forward with the explicit Euler update:
//!
//! ```text
//! state_{n+1} = state_n + derivative_n * dt
//! ```
//!
//! The scheme is first order and non-adaptive. Local truncation error is
//! O(dt²) and global error O(dt). No stability correction is applied, so a
//! step that is large relative to the model's rates can overshoot or blow up.
//! Observers can watch for that and stop the run.
//!
//! # Example
//!
//! ```ignore
//! use seir_solvers::transient::euler;
//!
//! // `problem` fixes the axis: the step count and the step size.
//! let solution = euler::solve_unobserved(&model, &problem, initial_input)?;
//!
//! for snapshot in &solution.history {
//!     println!("{:?} -> {:?}", snapshot.input, snapshot.output);
//! }
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use seir_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable};

/// Integrates an ODE problem with forward Euler along the problem's axis.
///
/// The model is called once on `initial` and once after every step. Each
/// step reads only the previous snapshot, so all state components advance
/// from the same old values. The observer sees every snapshot, starting with
/// step 0, and can end the run with [`Action::StopEarly`]; the solution then
/// holds the history up to and including the snapshot it stopped on.
///
/// # Errors
///
/// Returns an error naming the step if the model or problem fails.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let dt = problem.step_size();
    let output = model.call(&initial).map_err(|err| Error::model(0, err))?;
    let mut solution = Solution::starting_with(Snapshot::new(initial, output));

    for step in 0..=problem.steps() {
        if step > 0 {
            let next = advance(model, problem, solution.last(), step, dt.clone())?;
            solution.history.push(next);
        }

        let event = Event {
            step,
            snapshot: solution.last().clone(),
        };
        if observer.observe(&event) == Some(Action::StopEarly) {
            solution.status = Status::StoppedByObserver;
            break;
        }
    }

    Ok(solution)
}

/// Integrates an ODE problem with forward Euler without observation.
///
/// # Errors
///
/// Returns an error naming the step if the model or problem fails.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
{
    solve(model, problem, initial, ())
}

/// Takes step number `step` from `current`.
fn advance<M, P>(
    model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    step: usize,
    dt: P::Delta,
) -> Result<Snapshot<M::Input, M::Output>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
{
    let state = problem
        .state(&current.input)
        .map_err(|err| Error::problem(step, err))?;
    let derivative = problem
        .derivative(&current.input, &current.output)
        .map_err(|err| Error::problem(step, err))?;

    let input = problem
        .input_at(step, state.step(derivative, dt))
        .map_err(|err| Error::problem(step, err))?;
    let output = model.call(&input).map_err(|err| Error::model(step, err))?;

    Ok(Snapshot::new(input, output))
}
