//! Mechanical Gear Counter
//!
//! A fixed-width decimal register built from gears, one per digit. Adding or
//! subtracting turns the gears one at a time from the units gear upward,
//! carrying or borrowing into the next gear, and records a snapshot after
//! every step so a client can replay the motion. The register is exposed to
//! clients over the Model Context Protocol (MCP).
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **gears**: the register, the step-by-step engine and its snapshots
//!   - **tools**: MCP tools driving the engine
//!   - **resources**: read-only views of the register and its documentation
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use gear_counter_mcp_server::{GearEngine, domains::gears::OperationRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = GearEngine::new(3);
//!     let run = engine.execute(OperationRequest::add(46))?;
//!     let report = run.run_to_end(Duration::from_millis(550)).await;
//!     println!("{}", report.outcome.status);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::gears::GearEngine;
