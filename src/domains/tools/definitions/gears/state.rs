//! Gear state tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::structured_result;
use crate::domains::gears::{GearEngine, GearReading};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// The state tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GearStateParams {}

/// Gear state tool - reads the register without touching it.
pub struct GearStateTool;

impl GearStateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "gear_state";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read the current gear digits, rotations, status message \
        and whether an operation is in progress.";

    pub fn execute(engine: &GearEngine) -> CallToolResult {
        let reading = engine.reading();
        let summary = format!("Register: {}. {}", reading.value, reading.status);
        structured_result(summary, &reading, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(engine: GearEngine) -> Result<serde_json::Value, ToolError> {
        serde_json::to_value(Self::execute(&engine)).map_err(|e| ToolError::encode(Self::NAME, e))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GearStateParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<GearReading>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(engine: GearEngine) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let engine = engine.clone();
            async move { Ok(Self::execute(&engine)) }.boxed()
        })
    }
}
