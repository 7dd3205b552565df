//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod gears;

pub use gears::{
    GearExecuteParams, GearExecuteTool, GearResetParams, GearResetTool, GearStateParams,
    GearStateTool,
};
