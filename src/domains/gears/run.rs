//! A single in-flight operation.
//!
//! [`GearRun`] is a small state machine: each call to [`GearRun::step`]
//! processes the next touched digit position, commits it to the shared
//! register and returns the resulting snapshot. Once carries and borrows
//! are exhausted it returns the terminal [`Outcome`] and then `None`.
//!
//! [`GearRun::into_stream`] wraps the machine in a `Stream` that sleeps for
//! a settle delay between steps, which is what the animated replay needs.
//! Dropping a run (or its stream) before the terminal event cancels it:
//! committed steps stay, the busy flag is released.

use futures::{Stream, stream};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::register::{GearState, OperationKind, OperationRequest, lock, place_name};
use super::snapshot::{GearEvent, Outcome, RunReport};

/// An accepted operation, advanced one digit position at a time.
#[derive(Debug)]
pub struct GearRun {
    state: Arc<Mutex<GearState>>,
    request: OperationRequest,
    input_digits: Vec<i64>,
    position: usize,
    carry: i64,
    outcome: Option<Outcome>,
}

impl GearRun {
    /// Caller must already have marked the state busy.
    pub(super) fn new(state: Arc<Mutex<GearState>>, request: OperationRequest) -> Self {
        Self {
            state,
            input_digits: request.input_digits(),
            request,
            position: 0,
            carry: 0,
            outcome: None,
        }
    }

    /// Whether the terminal event has been produced.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advance to the next event, or `None` once the run is over.
    pub fn step(&mut self) -> Option<GearEvent> {
        if self.is_finished() {
            return None;
        }
        Some(self.advance())
    }

    fn advance(&mut self) -> GearEvent {
        let mut state = lock(&self.state);
        let gear_count = state.gear_count();
        let sign = self.request.kind.sign();

        loop {
            let position = self.position;

            // Past the last gear only a pending carry or borrow can remain.
            if position >= gear_count {
                let register = state.display();
                let outcome = match self.carry {
                    0 => Outcome::complete(register),
                    carry if carry > 0 => Outcome::overflow(register, carry),
                    borrow => Outcome::underflow(register, borrow),
                };
                state.set_busy(false);
                state.set_status(outcome.status.clone());
                info!(
                    kind = ?outcome.kind,
                    register = %outcome.register,
                    "Operation finished"
                );
                self.outcome = Some(outcome.clone());
                return GearEvent::Finished(outcome);
            }

            let input_digit = self.input_digits.get(position).copied().unwrap_or(0);
            let total_change = input_digit * sign + self.carry;

            if total_change == 0 && position >= self.input_digits.len() && self.carry == 0 {
                debug!(position, "Gear untouched, skipping");
                self.position += 1;
                continue;
            }

            let current = i64::from(state.digit(position));
            let (new_digit, carry_out) = match self.request.kind {
                OperationKind::Add => {
                    let sum = current + total_change;
                    (sum.rem_euclid(10), sum.div_euclid(10))
                }
                OperationKind::Subtract => {
                    let tmp = current + total_change;
                    if tmp >= 0 { (tmp, 0) } else { (tmp + 10, -1) }
                }
            };

            state.commit(position, new_digit as u8, total_change);
            state.set_status(step_status(position, total_change, carry_out));
            self.carry = carry_out;
            self.position += 1;

            let snapshot = state.snapshot(position, carry_out);
            debug!(
                position,
                digit = snapshot.digit,
                rotation = snapshot.rotation,
                carry = carry_out,
                "Gear step committed"
            );
            return GearEvent::Step(snapshot);
        }
    }

    /// Turn the run into a stream that waits `delay` after every step.
    ///
    /// The stream yields each [`GearEvent::Step`] as soon as it is committed
    /// and ends right after the single [`GearEvent::Finished`].
    pub fn into_stream(self, delay: Duration) -> impl Stream<Item = GearEvent> + Send {
        stream::unfold((self, false), move |(mut run, settle)| async move {
            if settle && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let event = run.step()?;
            let settle = matches!(event, GearEvent::Step(_));
            Some((event, (run, settle)))
        })
    }

    /// Drive the run to its end, collecting every snapshot.
    pub async fn run_to_end(mut self, delay: Duration) -> RunReport {
        let mut steps = Vec::new();
        if let Some(outcome) = &self.outcome {
            return RunReport {
                steps,
                outcome: outcome.clone(),
            };
        }
        loop {
            match self.advance() {
                GearEvent::Step(snapshot) => {
                    steps.push(snapshot);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                GearEvent::Finished(outcome) => return RunReport { steps, outcome },
            }
        }
    }
}

impl Drop for GearRun {
    fn drop(&mut self) {
        if self.is_finished() {
            return;
        }
        let mut state = lock(&self.state);
        let status = format!(
            "Operation cancelled. Register left at {}.",
            state.display()
        );
        warn!(position = self.position, "{}", status);
        state.set_busy(false);
        state.set_status(status);
    }
}

/// Status line for one committed step.
fn step_status(position: usize, total_change: i64, carry: i64) -> String {
    let action = if carry > 0 {
        format!("Carry of {} generated.", carry)
    } else if carry < 0 {
        format!("Borrow of {} generated.", carry.abs())
    } else {
        "Operation step complete.".to_string()
    };
    format!(
        "{} gear rotated by {}. {}",
        place_name(position),
        total_change,
        action
    )
}
