//! The list of resources the server exposes.

use rmcp::model::{AnnotateAble, RawResource, Resource};

use super::definitions::{DocsReadmeResource, GearStateResource, ResourceDefinition};
use super::error::ResourceError;
use crate::domains::gears::GearEngine;

/// Renders a resource body from the engine.
pub type RenderFn = fn(&GearEngine) -> Result<String, ResourceError>;

/// Listing metadata paired with its renderer.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    pub resource: Resource,
    pub render: RenderFn,
}

fn entry<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        render: R::render,
    }
}

/// Every registered resource.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![entry::<GearStateResource>(), entry::<DocsReadmeResource>()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_match_uris() {
        let entries = get_all_resources();
        let uris: Vec<_> = entries.iter().map(|e| e.resource.raw.uri.as_str()).collect();
        assert_eq!(uris, vec![GearStateResource::URI, DocsReadmeResource::URI]);
    }

    #[test]
    fn test_entries_carry_mime_types() {
        let entries = get_all_resources();
        assert_eq!(
            entries[0].resource.raw.mime_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(
            entries[1].resource.raw.mime_type.as_deref(),
            Some("text/markdown")
        );
    }
}
