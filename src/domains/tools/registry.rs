//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::config::Config;
use crate::domains::gears::GearEngine;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{GearExecuteTool, GearResetTool, GearStateTool};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Holds the engine every tool call acts on, so HTTP calls and routed
/// STDIO/TCP calls see the same register.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub struct ToolRegistry {
    engine: GearEngine,
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(engine: GearEngine, config: Arc<Config>) -> Self {
        Self { engine, config }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GearExecuteTool::NAME,
            GearResetTool::NAME,
            GearStateTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GearExecuteTool::to_tool(),
            GearResetTool::to_tool(),
            GearStateTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            GearExecuteTool::NAME => {
                GearExecuteTool::http_handler(arguments, self.engine.clone(), self.config.clone())
                    .await
            }
            GearResetTool::NAME => GearResetTool::http_handler(arguments, self.engine.clone()),
            GearStateTool::NAME => GearStateTool::http_handler(self.engine.clone()),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::unknown_tool(name))
            }
        }
    }
}
