//! The MCP server handler.
//!
//! `McpServer` owns the gear engine and wires it to the tool router and the
//! resource service. rmcp transports (STDIO, TCP) go through the
//! `ServerHandler` impl; the HTTP transport calls the plain helper methods,
//! which dispatch through `ToolRegistry` instead of the router.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{gears::GearEngine, resources::ResourceService, tools::build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions advertised to clients on initialization.
pub const INSTRUCTIONS: &str = "Mechanical gear counter. Use gear_execute to add or subtract \
    an amount one gear at a time, gear_reset to zero the gears and gear_state or the \
    gear://state resource to read them.";

/// The main MCP server handler.
///
/// Owns one gear engine; every connection and transport served by clones
/// of this handler drives the same gears.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The gear engine driven by the tools.
    engine: GearEngine,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let engine = GearEngine::new(config.gears.gear_count);
        let resource_service = Arc::new(ResourceService::new(engine.clone()));

        Self {
            tool_router: build_tool_router::<Self>(engine.clone(), config.clone()),
            config,
            engine,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the gear engine.
    pub fn engine(&self) -> &GearEngine {
        &self.engine
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> crate::Result<serde_json::Value> {
        let registry = ToolRegistry::new(self.engine.clone(), self.config.clone());
        Ok(registry.call_tool(name, arguments).await?)
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> crate::Result<serde_json::Value> {
        let result = self.resource_service.read_resource(uri).await?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    McpError::resource_not_found(e.to_string(), None)
                } else {
                    McpError::internal_error(e.to_string(), None)
                }
            })
    }
}
