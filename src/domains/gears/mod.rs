//! Gears domain module.
//!
//! A fixed-width decimal adder/subtractor modelled as a train of ten-tooth
//! gears. Each operation walks the digit positions from the units gear
//! upward, propagating carries (addition) or borrows (subtraction), and
//! publishes one snapshot per gear it turns so clients can replay the
//! motion step by step.
//!
//! ## Architecture
//!
//! - `register.rs` - Digit/rotation registers and operation requests
//! - `engine.rs` - `GearEngine`, the owner of the register and busy flag
//! - `run.rs` - `GearRun`, the per-operation state machine and its stream
//! - `snapshot.rs` - Step snapshots and terminal outcomes
//! - `error.rs` - Request rejection errors

mod engine;
mod error;
mod register;
mod run;
mod snapshot;

pub use engine::GearEngine;
pub use error::GearError;
pub use register::{
    DEFAULT_GEAR_COUNT, DEGREES_PER_STEP, GearReading, GearState, MAX_GEAR_COUNT,
    OperationKind, OperationRequest, RESET_STATUS, capacity, place_name,
};
pub use run::GearRun;
pub use snapshot::{GearEvent, Outcome, OutcomeKind, RunReport, StepSnapshot};
