//! Live register of the gear engine.

use super::ResourceDefinition;
use crate::domains::gears::GearEngine;
use crate::domains::resources::error::ResourceError;

/// Current register as JSON, same payload as the `gear_state` tool.
pub struct GearStateResource;

impl ResourceDefinition for GearStateResource {
    const URI: &'static str = "gear://state";
    const NAME: &'static str = "Gear State";
    const DESCRIPTION: &'static str =
        "Digits, rotations, status message and busy flag of the gear counter";
    const MIME_TYPE: &'static str = "application/json";

    fn render(engine: &GearEngine) -> Result<String, ResourceError> {
        serde_json::to_string_pretty(&engine.reading())
            .map_err(|e| ResourceError::render(Self::URI, e))
    }
}
