//! Domains module containing business logic organized by bounded contexts.
//!
//! - **gears**: the carry/borrow engine and its step-by-step replay
//! - **tools**: MCP tools that drive the engine
//! - **resources**: read-only views of the engine and its documentation

pub mod gears;
pub mod resources;
pub mod tools;
