//! Transports the gear counter can be served over.
//!
//! Every transport hands clones of one [`McpServer`](crate::core::McpServer)
//! to its connections, so they all drive the same gears.
//!
//! | Feature | Transport | Wire format |
//! |---|---|---|
//! | `stdio` (default) | [`stdio::StdioTransport`] | MCP over stdin/stdout |
//! | `tcp` | [`tcp::TcpTransport`] | line-delimited JSON-RPC per socket |
//! | `http` | [`http::HttpTransport`] | JSON-RPC over POST, plus `GET /gears` |

mod config;
mod error;
mod service;

#[cfg(feature = "stdio")]
pub mod stdio;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "http")]
pub mod http;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
