//! Gear reset tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{error_result, structured_result};
use crate::domains::gears::{GearEngine, StepSnapshot};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// The reset tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GearResetParams {}

/// Gear reset tool - turns every gear back to zero.
pub struct GearResetTool;

impl GearResetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "gear_reset";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Reset every gear and its rotation to 0. \
        Refused while an operation is still turning the gears.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(_params: &GearResetParams, engine: &GearEngine) -> CallToolResult {
        info!("Gear reset tool called");

        match engine.reset() {
            Ok(snapshot) => structured_result(snapshot.status.clone(), &snapshot, false),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        engine: GearEngine,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GearResetParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(Self::NAME, e))?;
        let result = Self::execute(&params, &engine);
        serde_json::to_value(&result).map_err(|e| ToolError::encode(Self::NAME, e))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GearResetParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<StepSnapshot>().into()),
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
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let engine = engine.clone();
            async move {
                let params: GearResetParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &engine))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::gears::OperationRequest;
    use crate::domains::tools::definitions::gears::common::first_text;
    use std::time::Duration;

    #[test]
    fn test_reset_after_operation() {
        let engine = GearEngine::default();
        let run = engine.execute(OperationRequest::add(321)).unwrap();
        tokio_test::block_on(run.run_to_end(Duration::ZERO));

        let result = GearResetTool::execute(&GearResetParams::default(), &engine);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            first_text(&result),
            "Gears initialized and set to 0. Ready to calculate!"
        );
        assert_eq!(result.structured_content.unwrap()["register"], "000");
        assert_eq!(engine.rotation(), vec![0, 0, 0]);
    }

    #[test]
    fn test_reset_refused_while_busy() {
        let engine = GearEngine::default();
        let mut run = engine.execute(OperationRequest::add(20)).unwrap();
        run.step();

        let result = GearResetTool::execute(&GearResetParams::default(), &engine);
        assert_eq!(result.is_error, Some(true));
        assert_eq!(engine.display(), "000");

        run.step();
        assert_eq!(engine.display(), "020");
    }

    #[test]
    fn test_to_tool() {
        assert_eq!(GearResetTool::to_tool().name, "gear_reset");
    }
}
