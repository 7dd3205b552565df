//! Gear execute tool definition.
//!
//! Adds or subtracts an amount on the gear train and returns every step
//! the gears went through, followed by the final status.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{error_result, structured_result};
use crate::core::config::Config;
use crate::domains::gears::{GearEngine, OperationKind, OperationRequest, Outcome, StepSnapshot};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the gear execute tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GearExecuteParams {
    /// Positive whole number to apply, at most the machine capacity
    /// (999 for three gears). A numeric string is accepted too.
    #[serde(default)]
    pub amount: serde_json::Value,

    /// "add" (default) or "subtract".
    #[serde(default)]
    pub operation: OperationKind,
}

// ============================================================================
// Output Structure (JSON format for AI agents)
// ============================================================================

/// Result of a gear operation.
#[derive(Debug, Serialize, JsonSchema)]
struct ExecuteResult {
    /// Operation that was performed.
    operation: OperationKind,
    /// Amount that was applied.
    amount: i64,
    /// One snapshot per gear that turned, units first.
    steps: Vec<StepSnapshot>,
    /// How the operation ended.
    outcome: Outcome,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Gear execute tool - runs one add/subtract operation.
pub struct GearExecuteTool;

impl GearExecuteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "gear_execute";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add or subtract a positive amount on the mechanical gear counter. \
        Gears turn one at a time from the units gear upward, carrying on addition and borrowing on subtraction. \
        Returns every gear step and the final status, including overflow warnings and negative-result errors.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(operation = %params.operation))]
    pub async fn execute(
        params: &GearExecuteParams,
        engine: &GearEngine,
        config: &Config,
    ) -> CallToolResult {
        info!("Gear execute tool called with amount {}", params.amount);

        let request = match OperationRequest::from_value(
            &params.amount,
            params.operation,
            engine.capacity(),
        ) {
            Ok(request) => request,
            Err(e) => return error_result(&e.to_string()),
        };

        let run = match engine.execute(request) {
            Ok(run) => run,
            Err(e) => return error_result(&e.to_string()),
        };

        let report = run.run_to_end(config.gears.step_delay()).await;
        info!(
            "Gear operation finished after {} steps: {}",
            report.steps.len(),
            report.outcome.status
        );

        let is_error = !report.outcome.is_success();
        let summary = report.outcome.status.clone();
        let result = ExecuteResult {
            operation: request.kind,
            amount: request.amount,
            steps: report.steps,
            outcome: report.outcome,
        };

        structured_result(summary, &result, is_error)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        engine: GearEngine,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GearExecuteParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(Self::NAME, e))?;

        info!("Gear execute tool (HTTP) called");

        let result = Self::execute(&params, &engine, &config).await;

        // Serialize the full CallToolResult to preserve structuredContent
        serde_json::to_value(&result).map_err(|e| ToolError::encode(Self::NAME, e))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GearExecuteParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ExecuteResult>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(engine: GearEngine, config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let engine = engine.clone();
            let config = config.clone();
            async move {
                let params: GearExecuteParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &engine, &config).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::gears::common::first_text;
    use serde_json::json;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.gears.step_delay_ms = 0;
        config
    }

    fn params(amount: serde_json::Value, operation: OperationKind) -> GearExecuteParams {
        GearExecuteParams { amount, operation }
    }

    #[tokio::test]
    async fn test_execute_add() {
        let engine = GearEngine::default();
        let result = GearExecuteTool::execute(
            &params(json!(5), OperationKind::Add),
            &engine,
            &test_config(),
        )
        .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(first_text(&result), "Operation complete. Final Result: 005.");

        let structured = result.structured_content.expect("structured_content should exist");
        assert_eq!(structured["operation"], "add");
        assert_eq!(structured["amount"], 5);
        assert_eq!(structured["steps"].as_array().unwrap().len(), 1);
        assert_eq!(structured["steps"][0]["digit"], 5);
        assert_eq!(structured["outcome"]["kind"], "complete");
    }

    #[tokio::test]
    async fn test_execute_underflow_is_error_with_steps() {
        let engine = GearEngine::default();
        let result = GearExecuteTool::execute(
            &params(json!("1"), OperationKind::Subtract),
            &engine,
            &test_config(),
        )
        .await;

        assert_eq!(result.is_error, Some(true));
        assert!(first_text(&result).contains("Result is negative"));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["steps"].as_array().unwrap().len(), 3);
        assert_eq!(structured["outcome"]["kind"], "underflow");
        assert_eq!(engine.display(), "999");
    }

    #[tokio::test]
    async fn test_execute_overflow_is_warning() {
        let engine = GearEngine::default();
        let config = test_config();
        GearExecuteTool::execute(&params(json!(999), OperationKind::Add), &engine, &config).await;
        let result =
            GearExecuteTool::execute(&params(json!(2), OperationKind::Add), &engine, &config)
                .await;

        assert_eq!(result.is_error, Some(false));
        assert!(first_text(&result).contains("WARNING"));
        assert_eq!(result.structured_content.unwrap()["outcome"]["carry"], 1);
        assert_eq!(engine.display(), "001");
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_amounts() {
        let engine = GearEngine::default();
        let config = test_config();

        for amount in [json!(0), json!(-4), json!("four"), json!(null)] {
            let result =
                GearExecuteTool::execute(&params(amount, OperationKind::Add), &engine, &config)
                    .await;
            assert_eq!(result.is_error, Some(true));
            assert_eq!(first_text(&result), "Please enter a positive number.");
        }

        let result =
            GearExecuteTool::execute(&params(json!(1000), OperationKind::Add), &engine, &config)
                .await;
        assert_eq!(
            first_text(&result),
            "Error: Input amount (1000) exceeds machine capacity (999)."
        );

        let result = GearExecuteTool::execute(
            &params(json!("123456789012345678901234"), OperationKind::Add),
            &engine,
            &config,
        )
        .await;
        assert_eq!(
            first_text(&result),
            "Error: Input amount (123456789012345678901234) exceeds machine capacity (999)."
        );
        assert_eq!(engine.display(), "000");
    }

    #[tokio::test]
    async fn test_execute_rejected_while_busy() {
        let engine = GearEngine::default();
        let _run = engine.execute(OperationRequest::add(1)).unwrap();

        let result = GearExecuteTool::execute(
            &params(json!(1), OperationKind::Add),
            &engine,
            &test_config(),
        )
        .await;
        assert_eq!(result.is_error, Some(true));
        assert!(first_text(&result).contains("still turning"));
    }

    #[test]
    fn test_params_defaults() {
        let params: GearExecuteParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.operation, OperationKind::Add);
        assert!(params.amount.is_null());

        let params: GearExecuteParams =
            serde_json::from_value(json!({ "amount": 3, "operation": "subtract" })).unwrap();
        assert_eq!(params.operation, OperationKind::Subtract);

        assert!(
            serde_json::from_value::<GearExecuteParams>(json!({ "operation": "multiply" }))
                .is_err()
        );
    }

    #[test]
    fn test_to_tool() {
        let tool = GearExecuteTool::to_tool();
        assert_eq!(tool.name, "gear_execute");
        assert!(tool.output_schema.is_some());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_execute_http_handler() {
        let engine = GearEngine::default();
        let result = GearExecuteTool::http_handler(
            json!({ "amount": 42 }),
            engine.clone(),
            Arc::new(test_config()),
        )
        .await
        .unwrap();

        assert_eq!(result["structuredContent"]["outcome"]["register"], "042");
        assert_eq!(engine.display(), "042");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_execute_http_handler_bad_operation() {
        let result = GearExecuteTool::http_handler(
            json!({ "amount": 1, "operation": "divide" }),
            GearEngine::default(),
            Arc::new(test_config()),
        )
        .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments { .. })));
    }
}
