//! Gear counter tools.
//!
//! - `gear_execute` - add or subtract an amount, step by step
//! - `gear_reset` - turn every gear back to zero
//! - `gear_state` - read the register

mod common;
pub mod execute;
pub mod reset;
pub mod state;

pub use execute::{GearExecuteParams, GearExecuteTool};
pub use reset::{GearResetParams, GearResetTool};
pub use state::{GearStateParams, GearStateTool};
