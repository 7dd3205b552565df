//! Resource definitions, one file per resource.
//!
//! A resource is a URI plus a renderer. Renderers get the engine so a
//! resource can describe the machine as it is right now; static resources
//! simply ignore it.

use super::error::ResourceError;
use crate::domains::gears::GearEngine;

pub mod docs_readme;
pub mod gear_state;

pub use docs_readme::DocsReadmeResource;
pub use gear_state::GearStateResource;

/// A readable resource.
pub trait ResourceDefinition {
    const URI: &'static str;
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const MIME_TYPE: &'static str;

    /// Render the resource body.
    fn render(engine: &GearEngine) -> Result<String, ResourceError>;
}
