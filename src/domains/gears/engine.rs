//! The gear engine: owner of the register and gatekeeper for operations.

use std::sync::{Arc, Mutex};
use tracing::{info, instrument, warn};

use super::error::GearError;
use super::register::{
    GearReading, GearState, MAX_GEAR_COUNT, OperationRequest, capacity, lock,
};
use super::run::GearRun;
use super::snapshot::StepSnapshot;

/// A fixed-width decimal counting machine.
///
/// Cloning is cheap and every clone drives the same register. At most one
/// operation is in flight at a time; while it is, [`GearEngine::execute`]
/// and [`GearEngine::reset`] are rejected with [`GearError::Busy`].
#[derive(Debug, Clone)]
pub struct GearEngine {
    state: Arc<Mutex<GearState>>,
}

impl GearEngine {
    /// Create an all-zero machine. `gear_count` is clamped to `1..=9`.
    pub fn new(gear_count: usize) -> Self {
        let gear_count = gear_count.clamp(1, MAX_GEAR_COUNT);
        info!("Initializing gear engine with {} gears", gear_count);
        Self {
            state: Arc::new(Mutex::new(GearState::new(gear_count))),
        }
    }

    pub fn gear_count(&self) -> usize {
        lock(&self.state).gear_count()
    }

    /// Largest amount an operation may use, `10^N - 1`.
    pub fn capacity(&self) -> u64 {
        capacity(self.gear_count())
    }

    /// Digits, least significant first.
    pub fn digits(&self) -> Vec<u8> {
        lock(&self.state).digits().to_vec()
    }

    /// Cumulative rotation per gear, least significant first.
    pub fn rotation(&self) -> Vec<i64> {
        lock(&self.state).rotation().to_vec()
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).is_busy()
    }

    pub fn status(&self) -> String {
        lock(&self.state).status().to_string()
    }

    /// Register read most-significant first.
    pub fn display(&self) -> String {
        lock(&self.state).display()
    }

    pub fn reading(&self) -> GearReading {
        lock(&self.state).reading()
    }

    /// Zero every gear and rotation offset.
    pub fn reset(&self) -> Result<StepSnapshot, GearError> {
        let mut state = lock(&self.state);
        if state.is_busy() {
            warn!("Reset rejected: operation in flight");
            return Err(GearError::Busy);
        }
        state.clear();
        info!("Gears reset");
        Ok(state.snapshot(0, 0))
    }

    /// Accept an operation and return the run that performs it.
    ///
    /// Validation happens here, before anything is mutated; the returned
    /// run holds the busy flag until it finishes or is dropped.
    #[instrument(skip(self), fields(amount = request.amount, operation = %request.kind))]
    pub fn execute(&self, request: OperationRequest) -> Result<GearRun, GearError> {
        let mut state = lock(&self.state);
        if state.is_busy() {
            warn!("Operation rejected: another one is in flight");
            return Err(GearError::Busy);
        }

        if request.amount <= 0 {
            warn!("Operation rejected: non-positive amount");
            return Err(GearError::invalid_amount(request.amount.to_string()));
        }

        let capacity = capacity(state.gear_count());
        if request.amount.unsigned_abs() > capacity {
            warn!("Operation rejected: amount exceeds capacity {}", capacity);
            return Err(GearError::capacity_exceeded(request.amount, capacity));
        }

        state.set_busy(true);
        state.set_status(format!("{} {}...", request.kind.gerund(), request.amount));
        info!("Operation accepted");
        drop(state);

        Ok(GearRun::new(self.state.clone(), request))
    }
}

impl Default for GearEngine {
    fn default() -> Self {
        Self::new(super::register::DEFAULT_GEAR_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::gears::{GearEvent, OutcomeKind, RunReport};
    use futures::StreamExt;
    use std::time::Duration;

    fn run(engine: &GearEngine, request: OperationRequest) -> RunReport {
        let run = engine.execute(request).unwrap();
        tokio_test::block_on(run.run_to_end(Duration::ZERO))
    }

    #[test]
    fn test_new_engine_is_zeroed() {
        let engine = GearEngine::default();
        assert_eq!(engine.digits(), vec![0, 0, 0]);
        assert_eq!(engine.rotation(), vec![0, 0, 0]);
        assert!(!engine.is_busy());
        assert_eq!(engine.capacity(), 999);
        assert_eq!(
            engine.status(),
            "Gears initialized and set to 0. Ready to calculate!"
        );
    }

    #[test]
    fn test_gear_count_is_clamped() {
        assert_eq!(GearEngine::new(0).gear_count(), 1);
        assert_eq!(GearEngine::new(42).gear_count(), MAX_GEAR_COUNT);
    }

    #[test]
    fn test_add_five_from_zero() {
        let engine = GearEngine::default();
        let report = run(&engine, OperationRequest::add(5));

        assert_eq!(report.steps.len(), 1);
        let step = &report.steps[0];
        assert_eq!(step.position, 0);
        assert_eq!(step.digit, 5);
        assert_eq!(step.rotation, 5);
        assert_eq!(step.carry, 0);
        assert_eq!(step.status, "Units gear rotated by 5. Operation step complete.");

        assert_eq!(report.outcome.kind, OutcomeKind::Complete);
        assert_eq!(report.outcome.status, "Operation complete. Final Result: 005.");
        assert_eq!(engine.status(), report.outcome.status);
        assert!(!engine.is_busy());
    }

    #[test]
    fn test_carry_ripples_through_every_gear() {
        let engine = GearEngine::default();
        run(&engine, OperationRequest::add(99));
        assert_eq!(engine.digits(), vec![9, 9, 0]);

        let report = run(&engine, OperationRequest::add(1));
        let carries: Vec<_> = report.steps.iter().map(|s| s.carry).collect();
        let digits: Vec<_> = report.steps.iter().map(|s| s.digit).collect();
        assert_eq!(carries, vec![1, 1, 0]);
        assert_eq!(digits, vec![0, 0, 1]);
        assert_eq!(
            report.steps[1].status,
            "Tens gear rotated by 1. Carry of 1 generated."
        );
        assert_eq!(report.outcome.register, "100");
        assert_eq!(engine.rotation(), vec![10, 10, 1]);
    }

    #[test]
    fn test_subtract_below_zero_underflows_without_rollback() {
        let engine = GearEngine::default();
        let report = run(&engine, OperationRequest::subtract(1));

        assert_eq!(report.steps.len(), 3);
        for step in &report.steps {
            assert_eq!(step.digit, 9);
            assert_eq!(step.carry, -1);
        }
        assert_eq!(report.outcome.kind, OutcomeKind::Underflow);
        assert!(!report.outcome.is_success());
        assert_eq!(
            report.outcome.status,
            "Error: Result is negative! Cannot borrow from the next column."
        );

        // Committed steps are not reverted.
        assert_eq!(engine.digits(), vec![9, 9, 9]);
        assert_eq!(engine.rotation(), vec![-1, -1, -1]);
        assert!(!engine.is_busy());
    }

    #[test]
    fn test_subtract_larger_amount_underflows() {
        let engine = GearEngine::default();
        run(&engine, OperationRequest::add(12));
        let report = run(&engine, OperationRequest::subtract(30));
        assert_eq!(report.outcome.kind, OutcomeKind::Underflow);
    }

    #[test]
    fn test_overflow_wraps_and_warns() {
        let engine = GearEngine::default();
        run(&engine, OperationRequest::add(999));
        let report = run(&engine, OperationRequest::add(1));

        assert_eq!(report.outcome.kind, OutcomeKind::Overflow);
        assert_eq!(report.outcome.overflow_carry(), Some(1));
        assert!(report.outcome.is_success());
        assert_eq!(report.outcome.register, "000");
        assert_eq!(
            report.outcome.status,
            "Operation complete. WARNING: Result (000) exceeded machine capacity. Overflow: 1"
        );
    }

    #[test]
    fn test_overflow_result_is_sum_mod_capacity() {
        let engine = GearEngine::default();
        run(&engine, OperationRequest::add(750));
        let report = run(&engine, OperationRequest::add(500));
        assert_eq!(report.outcome.overflow_carry(), Some(1));
        assert_eq!(engine.reading().value, "250");
    }

    #[test]
    fn test_add_from_zero_matches_padded_amount() {
        for amount in [1, 9, 10, 42, 99, 100, 305, 999] {
            let engine = GearEngine::default();
            let report = run(&engine, OperationRequest::add(amount));
            assert_eq!(report.outcome.kind, OutcomeKind::Complete);
            assert_eq!(report.outcome.register, format!("{:03}", amount));
        }
    }

    #[test]
    fn test_add_then_subtract_smaller() {
        for (a, b) in [(5, 5), (100, 1), (999, 998), (450, 55), (21, 19)] {
            let engine = GearEngine::default();
            run(&engine, OperationRequest::add(a));
            let report = run(&engine, OperationRequest::subtract(b));
            assert_eq!(report.outcome.kind, OutcomeKind::Complete, "{a} - {b}");
            assert_eq!(report.outcome.register, format!("{:03}", a - b));
        }
    }

    #[test]
    fn test_untouched_high_gears_are_skipped() {
        let engine = GearEngine::default();
        let report = run(&engine, OperationRequest::add(7));
        assert_eq!(report.steps.len(), 1);

        // A middle zero digit still counts: it is within the amount's width.
        let report = run(&engine, OperationRequest::add(101));
        let positions: Vec<_> = report.steps.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(report.steps[1].rotation, 0);
    }

    #[test]
    fn test_untouched_high_gears_are_skipped_on_subtract() {
        let engine = GearEngine::default();
        run(&engine, OperationRequest::add(123));

        let report = run(&engine, OperationRequest::subtract(3));
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].position, 0);
        assert_eq!(report.steps[0].digit, 0);
        assert_eq!(report.steps[0].carry, 0);
        assert_eq!(report.outcome.register, "120");
        assert_eq!(engine.rotation(), vec![0, 2, 1]);
    }

    #[test]
    fn test_rotation_accumulates_total_change() {
        let engine = GearEngine::default();
        run(&engine, OperationRequest::add(8));
        run(&engine, OperationRequest::add(5));
        run(&engine, OperationRequest::subtract(4));
        // Units: +8, +5, -4. Tens: +1 (carry), then -1 (borrow).
        assert_eq!(engine.rotation(), vec![9, 0, 0]);
        assert_eq!(engine.display(), "009");
        assert_eq!(engine.reading().angles, vec![324, 0, 0]);
    }

    #[test]
    fn test_invalid_amounts_are_rejected_before_mutation() {
        let engine = GearEngine::default();
        run(&engine, OperationRequest::add(3));
        let before = engine.reading();

        for amount in [0, -5] {
            let err = engine.execute(OperationRequest::add(amount)).unwrap_err();
            assert!(matches!(err, GearError::InvalidAmount { .. }));
        }
        let err = engine.execute(OperationRequest::subtract(1000)).unwrap_err();
        assert_eq!(err, GearError::capacity_exceeded(1000, 999));

        assert_eq!(engine.reading(), before);
        assert!(!engine.is_busy());
    }

    #[test]
    fn test_busy_rejects_execute_and_reset() {
        let engine = GearEngine::default();
        let mut run = engine.execute(OperationRequest::add(5)).unwrap();
        assert!(engine.is_busy());
        assert_eq!(engine.status(), "Adding 5...");

        assert_eq!(
            engine.execute(OperationRequest::add(1)).unwrap_err(),
            GearError::Busy
        );
        assert_eq!(engine.reset().unwrap_err(), GearError::Busy);

        assert!(matches!(run.step(), Some(GearEvent::Step(_))));
        assert!(matches!(run.step(), Some(GearEvent::Finished(_))));
        assert!(run.step().is_none());
        assert!(!engine.is_busy());
        assert!(engine.execute(OperationRequest::add(1)).is_ok());
    }

    #[test]
    fn test_dropping_a_run_cancels_without_rollback() {
        let engine = GearEngine::default();
        let mut run = engine.execute(OperationRequest::subtract(1)).unwrap();
        run.step();
        run.step();
        drop(run);

        assert!(!engine.is_busy());
        assert_eq!(engine.digits(), vec![9, 9, 0]);
        assert_eq!(engine.status(), "Operation cancelled. Register left at 099.");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let engine = GearEngine::default();
        run(&engine, OperationRequest::subtract(1));

        let snapshot = engine.reset().unwrap();
        assert_eq!(snapshot.register, "000");
        assert_eq!(snapshot.rotation, 0);
        assert_eq!(
            snapshot.status,
            "Gears initialized and set to 0. Ready to calculate!"
        );
        let first = engine.reading();
        engine.reset().unwrap();
        assert_eq!(engine.reading(), first);
        assert_eq!(first.digits, vec![0, 0, 0]);
        assert_eq!(first.rotation, vec![0, 0, 0]);
    }

    #[test]
    fn test_clones_share_the_register() {
        let engine = GearEngine::default();
        let observer = engine.clone();
        run(&engine, OperationRequest::add(64));
        assert_eq!(observer.display(), "064");
    }

    #[test]
    fn test_wider_machine() {
        let engine = GearEngine::new(5);
        assert_eq!(engine.capacity(), 99_999);
        let report = run(&engine, OperationRequest::add(9_999));
        let report_up = run(&engine, OperationRequest::add(1));
        assert_eq!(report.outcome.register, "09999");
        assert_eq!(report_up.outcome.register, "10000");
        assert_eq!(report_up.steps[4].place, "Ten Thousands");
    }

    #[tokio::test]
    async fn test_stream_ends_with_single_finished_event() {
        let engine = GearEngine::default();
        let events: Vec<_> = engine
            .execute(OperationRequest::add(123))
            .unwrap()
            .into_stream(Duration::ZERO)
            .collect()
            .await;

        assert_eq!(events.len(), 4);
        assert!(events[..3].iter().all(|e| matches!(e, GearEvent::Step(_))));
        match &events[3] {
            GearEvent::Finished(outcome) => assert_eq!(outcome.register, "123"),
            other => panic!("Expected Finished, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_settles_between_steps() {
        let engine = GearEngine::default();
        let delay = Duration::from_millis(550);
        let mut stream = Box::pin(
            engine
                .execute(OperationRequest::add(111))
                .unwrap()
                .into_stream(delay),
        );

        let start = tokio::time::Instant::now();
        let mut arrivals = Vec::new();
        while let Some(event) = stream.next().await {
            arrivals.push((start.elapsed(), matches!(event, GearEvent::Finished(_))));
        }

        let expected: Vec<_> = [0, 550, 1100, 1650]
            .into_iter()
            .map(Duration::from_millis)
            .zip([false, false, false, true])
            .collect();
        assert_eq!(arrivals, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_stream_mid_run_releases_engine() {
        let engine = GearEngine::default();
        let mut stream = Box::pin(
            engine
                .execute(OperationRequest::add(999))
                .unwrap()
                .into_stream(Duration::from_millis(550)),
        );

        assert!(matches!(stream.next().await, Some(GearEvent::Step(_))));
        assert!(engine.is_busy());
        drop(stream);

        assert!(!engine.is_busy());
        assert_eq!(engine.digits(), vec![9, 0, 0]);
    }
}
