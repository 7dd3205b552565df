//! Tool dispatch errors.
//!
//! Only failures of the plumbing around a tool live here. A gear engine
//! refusal (busy, bad amount) is a normal tool result with `is_error` set.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments object does not match the tool's parameter schema.
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The tool ran but its result could not be encoded as JSON.
    #[error("Failed to encode {tool} result: {source}")]
    Encode {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ToolError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn invalid_arguments(tool: &'static str, source: serde_json::Error) -> Self {
        Self::InvalidArguments { tool, source }
    }

    pub fn encode(tool: &'static str, source: serde_json::Error) -> Self {
        Self::Encode { tool, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments_names_the_tool() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = ToolError::invalid_arguments("gear_execute", source);
        assert!(err.to_string().starts_with("Invalid arguments for gear_execute:"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unknown_tool_display() {
        assert_eq!(
            ToolError::unknown_tool("gear_spin").to_string(),
            "Unknown tool: gear_spin"
        );
    }
}
