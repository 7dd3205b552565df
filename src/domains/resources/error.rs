//! Resource read errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource is registered under this URI.
    #[error("Unknown resource: {0}")]
    UnknownUri(String),

    /// A dynamic resource could not be rendered.
    #[error("Failed to render {uri}: {source}")]
    Render {
        uri: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ResourceError {
    pub fn unknown_uri(uri: impl Into<String>) -> Self {
        Self::UnknownUri(uri.into())
    }

    pub fn render(uri: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Render {
            uri: uri.into(),
            source,
        }
    }

    /// Whether the client asked for something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownUri(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_uri() {
        let err = ResourceError::unknown_uri("gear://nowhere");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Unknown resource: gear://nowhere");
    }
}
