//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only wires
//! them to the shared engine.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;
use crate::domains::gears::GearEngine;

use super::definitions::{GearExecuteTool, GearResetTool, GearStateTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(engine: GearEngine, config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GearExecuteTool::create_route(engine.clone(), config))
        .with_route(GearResetTool::create_route(engine.clone()))
        .with_route(GearStateTool::create_route(engine))
}
