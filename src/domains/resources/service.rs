//! Resource listing and reading.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::{ResourceEntry, get_all_resources};
use crate::domains::gears::GearEngine;

/// Serves the registered resources, rendering them from one engine.
pub struct ResourceService {
    engine: GearEngine,
    resources: BTreeMap<String, ResourceEntry>,
}

impl ResourceService {
    pub fn new(engine: GearEngine) -> Self {
        let resources: BTreeMap<_, _> = get_all_resources()
            .into_iter()
            .map(|entry| (entry.resource.raw.uri.clone(), entry))
            .collect();
        info!("Registered {} resources", resources.len());

        Self { engine, resources }
    }

    /// All resources, ordered by URI.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Render the resource at `uri` as it is right now.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::unknown_uri(uri))?;

        let text = (entry.render)(&self.engine)?;
        debug!(uri, bytes = text.len(), "Rendered resource");

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}
