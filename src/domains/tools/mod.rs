//! Tools domain module.
//!
//! MCP tools driving the gear engine: `gear_execute`, `gear_reset` and
//! `gear_state`. Each tool lives in `definitions/gears/` and exposes the same
//! shape: a params struct, `execute()` with the logic, `to_tool()` metadata,
//! `create_route()` for rmcp transports and `http_handler()` for the HTTP
//! transport. `router.rs` and `registry.rs` must list the same tools.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
