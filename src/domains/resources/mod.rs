//! Resources domain module.
//!
//! Read-only views MCP clients can fetch: the live gear register
//! (`gear://state`) and the usage documentation (`gear://docs/readme`).
//!
//! - `definitions/` - one file per resource, implementing `ResourceDefinition`
//! - `registry.rs` - the list of exposed resources
//! - `service.rs` - listing and reading for the server handler

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{RenderFn, ResourceEntry, get_all_resources};
pub use service::ResourceService;
