//! Helpers shared by the gear tools.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Text summary plus structured JSON content.
///
/// Falls back to a plain error result if `data` cannot be serialized.
pub fn structured_result<T: Serialize>(summary: String, data: &T, is_error: bool) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(value) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(value),
            is_error: Some(is_error),
            meta: None,
        },
        Err(e) => error_result(&format!("Failed to serialize tool output: {}", e)),
    }
}

/// Text content of the first item of a result.
#[cfg(test)]
pub fn first_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}
