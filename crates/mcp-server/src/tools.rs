//! MCP tools for the diagram generator
//!
//! Exposes text and structured-list diagram generation to MCP clients.

use crate::config::ServerConfig;
use crate::pipeline::{self, EdgeItem, GenerationOutcome, PipelineError, ServiceItem};
use archdiag_classifier::TextClassifier;
use archdiag_renderer::{DiagramRenderer, LayoutDirection, OutputFormat};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_DIAGRAM_NAME: &str = "Architecture";

/// Archdiag MCP service
#[derive(Clone)]
pub struct ArchdiagService {
    config: ServerConfig,
    classifier: Arc<TextClassifier>,
    renderer: Arc<DiagramRenderer>,
    tool_router: ToolRouter<Self>,
}

impl ArchdiagService {
    pub fn new(classifier: TextClassifier, config: ServerConfig) -> Self {
        Self {
            config,
            classifier: Arc::new(classifier),
            renderer: Arc::new(DiagramRenderer::new()),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for ArchdiagService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Archdiag generates cloud architecture diagrams. Use 'generate_diagram_from_text' with a natural language description, or 'generate_diagram_from_services' with an explicit service list. Both return a rendered PNG or SVG diagram.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tool Input/Output Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TextDiagramRequest {
    /// Natural language description of the architecture
    #[schemars(description = "Natural language description of the cloud architecture")]
    pub description: String,

    /// Diagram title (default: "Architecture")
    #[schemars(description = "Diagram title")]
    pub diagram_name: Option<String>,

    /// Output format: png or svg
    #[schemars(description = "Output format: png or svg")]
    pub output_format: Option<String>,

    /// Layout direction: TB (top-bottom) or LR (left-right)
    #[schemars(description = "Layout direction: TB or LR")]
    pub layout_direction: Option<String>,

    /// Write the diagram here instead of returning inline bytes
    #[schemars(description = "Optional file path for the rendered diagram")]
    pub output_path: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ServicesDiagramRequest {
    /// Services to diagram, in order
    #[schemars(description = "Service list; each entry needs `type` and `name`")]
    pub services: Vec<ServiceItem>,

    /// Explicit connections by service name; when omitted, services chain in
    /// the supplied order
    #[schemars(description = "Optional edges referencing service names")]
    pub edges: Option<Vec<EdgeItem>>,

    /// Diagram title (default: "Architecture")
    #[schemars(description = "Diagram title")]
    pub diagram_name: Option<String>,

    /// Output format: png or svg
    #[schemars(description = "Output format: png or svg")]
    pub output_format: Option<String>,

    /// Layout direction: TB (top-bottom) or LR (left-right)
    #[schemars(description = "Layout direction: TB or LR")]
    pub layout_direction: Option<String>,

    /// Write the diagram here instead of returning inline bytes
    #[schemars(description = "Optional file path for the rendered diagram")]
    pub output_path: Option<String>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct DiagramResponse {
    pub success: bool,
    pub message: String,
    /// Type ids of every identified service, in discovery order
    pub services_identified: Vec<String>,
    pub node_count: usize,
    pub edge_count: usize,
    pub format: String,
    /// Set when the diagram was written to a requested path
    pub file_path: Option<String>,
    /// Set when the diagram is returned inline
    pub image_base64: Option<String>,
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl ArchdiagService {
    /// Generate a diagram from a free-text description
    #[tool(description = "Generate a cloud architecture diagram from a natural language description. Identifies services, infers connections, and renders a PNG or SVG diagram.")]
    pub async fn generate_diagram_from_text(
        &self,
        Parameters(request): Parameters<TextDiagramRequest>,
    ) -> Result<CallToolResult, McpError> {
        let (format, direction) = match self.layout_options(
            request.output_format.as_deref(),
            request.layout_direction.as_deref(),
        ) {
            Ok(options) => options,
            Err(message) => return Ok(stage_error("validation", &message)),
        };
        let name = diagram_name(request.diagram_name.as_deref());

        let outcome = pipeline::generate_from_text(
            &self.classifier,
            &self.renderer,
            &request.description,
            &name,
            format,
            direction,
        )
        .await;

        self.finish(outcome, request.output_path.as_deref())
    }

    /// Generate a diagram from a structured service list
    #[tool(description = "Generate a cloud architecture diagram from a structured list of services ({type, name} pairs). Services chain in the supplied order unless explicit edges are given.")]
    pub async fn generate_diagram_from_services(
        &self,
        Parameters(request): Parameters<ServicesDiagramRequest>,
    ) -> Result<CallToolResult, McpError> {
        let (format, direction) = match self.layout_options(
            request.output_format.as_deref(),
            request.layout_direction.as_deref(),
        ) {
            Ok(options) => options,
            Err(message) => return Ok(stage_error("validation", &message)),
        };
        let name = diagram_name(request.diagram_name.as_deref());
        let edges = request.edges.unwrap_or_default();

        let outcome = pipeline::generate_from_services(
            &self.renderer,
            &request.services,
            &edges,
            &name,
            format,
            direction,
        );

        self.finish(outcome, request.output_path.as_deref())
    }
}

impl ArchdiagService {
    fn layout_options(
        &self,
        format: Option<&str>,
        direction: Option<&str>,
    ) -> Result<(OutputFormat, LayoutDirection), String> {
        let format = match format {
            Some(raw) => raw.parse::<OutputFormat>().map_err(|e| e.to_string())?,
            None => self.config.default_format,
        };
        let direction = match direction {
            Some(raw) => raw.parse::<LayoutDirection>().map_err(|e| e.to_string())?,
            None => self.config.default_direction,
        };
        Ok((format, direction))
    }

    fn finish(
        &self,
        outcome: Result<GenerationOutcome, PipelineError>,
        output_path: Option<&str>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => return Ok(stage_error(e.stage(), &e.to_string())),
        };

        let response = match build_response(outcome, output_path) {
            Ok(response) => response,
            Err(e) => return Ok(stage_error(e.stage(), &e.to_string())),
        };

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response).unwrap_or_default(),
        )]))
    }
}

fn diagram_name(requested: Option<&str>) -> String {
    requested
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DIAGRAM_NAME)
        .to_string()
}

fn stage_error(stage: &str, message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "Error in {stage} stage: {message}"
    ))])
}

/// Write the diagram out or inline it, then assemble the response payload
pub fn build_response(
    outcome: GenerationOutcome,
    output_path: Option<&str>,
) -> Result<DiagramResponse, PipelineError> {
    let result = outcome.result;

    let (file_path, image_base64) = match output_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => {
            std::fs::write(path, &result.bytes).map_err(|source| PipelineError::WriteOutput {
                path: path.to_string(),
                source,
            })?;
            log::info!("Wrote diagram to {path}");
            (Some(path.to_string()), None)
        }
        None => (None, Some(BASE64.encode(&result.bytes))),
    };

    Ok(DiagramResponse {
        success: true,
        message: outcome.message,
        services_identified: result.services_identified,
        node_count: result.node_count,
        edge_count: result.edge_count,
        format: result.format.to_string(),
        file_path,
        image_base64,
    })
}
