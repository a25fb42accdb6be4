//! Diagram-generation pipeline shared by the MCP tools.
//!
//! Each request flows classification -> graph build -> render, end to end
//! synchronously and independently; the only shared state is the read-only
//! service catalog.

use archdiag_catalog::{catalog, ServiceEdge, ServiceInstance};
use archdiag_classifier::TextClassifier;
use archdiag_graph::{EdgeDefault, GraphBuilder, GraphError};
use archdiag_renderer::{DiagramRenderer, DiagramResult, LayoutDirection, OutputFormat, RenderError};
use rmcp::schemars;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// One entry of a structured service list.
///
/// Fields are optional so that validation can name the offending index
/// instead of failing opaquely during deserialization.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct ServiceItem {
    /// Service type identifier (e.g. "appservice", "sqldatabase")
    #[serde(rename = "type")]
    pub type_id: Option<String>,

    /// Display name for the diagram node
    pub name: Option<String>,
}

/// Optional explicit relation between two named services
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct EdgeItem {
    /// Source service name
    pub from: String,

    /// Target service name
    pub to: String,

    /// Optional connector label
    pub label: Option<String>,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("services[{index}] is missing required field `{field}`")]
    MalformedService { index: usize, field: &'static str },

    #[error(transparent)]
    Build(#[from] GraphError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write diagram to {path}: {source}")]
    WriteOutput {
        path: String,
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Which stage failed, for user-visible diagnostics
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MalformedService { .. } => "validation",
            Self::Build(_) => "build",
            Self::Render(_) => "render",
            Self::WriteOutput { .. } => "output",
        }
    }
}

/// A rendered diagram plus the human-readable summary for the response
#[derive(Debug)]
pub struct GenerationOutcome {
    pub result: DiagramResult,
    pub message: String,
}

/// Classify free text and build the architecture graph.
///
/// Never fails on classification: remote unavailability falls back inside
/// the classifier, and zero recognized services is a valid empty graph.
pub async fn classify_and_build(
    classifier: &TextClassifier,
    description: &str,
) -> Result<archdiag_graph::ArchitectureGraph, PipelineError> {
    let extraction = classifier.extract(description).await;
    // The classifier already infers adjacency edges for the text path;
    // no chain default here.
    let graph = GraphBuilder::new(EdgeDefault::None)
        .build(extraction.instances, extraction.edges)?;
    Ok(graph)
}

/// Validate a structured service list and build its graph.
///
/// With no explicit edges the services chain in the supplied order - the
/// documented default for "structured input, no relationships specified".
pub fn build_from_services(
    items: &[ServiceItem],
    edges: &[EdgeItem],
) -> Result<archdiag_graph::ArchitectureGraph, PipelineError> {
    let instances = instances_from_items(items)?;
    let edges = resolve_edge_names(&instances, edges);
    let graph = GraphBuilder::new(EdgeDefault::Chain).build(instances, edges)?;
    Ok(graph)
}

/// Render a built graph and attach the outcome message
pub fn render_graph(
    renderer: &DiagramRenderer,
    graph: &archdiag_graph::ArchitectureGraph,
    diagram_name: &str,
    format: OutputFormat,
    direction: LayoutDirection,
) -> Result<GenerationOutcome, PipelineError> {
    let result = renderer.render(graph, diagram_name, format, direction)?;
    let message = if result.node_count == 0 {
        "No services were identified; generated a structurally valid empty diagram".to_string()
    } else {
        format!(
            "Generated diagram with {} services and {} connections",
            result.node_count, result.edge_count
        )
    };
    Ok(GenerationOutcome { result, message })
}

/// Full text path: classify, build, render
pub async fn generate_from_text(
    classifier: &TextClassifier,
    renderer: &DiagramRenderer,
    description: &str,
    diagram_name: &str,
    format: OutputFormat,
    direction: LayoutDirection,
) -> Result<GenerationOutcome, PipelineError> {
    let graph = classify_and_build(classifier, description).await?;
    render_graph(renderer, &graph, diagram_name, format, direction)
}

/// Full structured path: validate, build, render
pub fn generate_from_services(
    renderer: &DiagramRenderer,
    items: &[ServiceItem],
    edges: &[EdgeItem],
    diagram_name: &str,
    format: OutputFormat,
    direction: LayoutDirection,
) -> Result<GenerationOutcome, PipelineError> {
    let graph = build_from_services(items, edges)?;
    render_graph(renderer, &graph, diagram_name, format, direction)
}

fn instances_from_items(items: &[ServiceItem]) -> Result<Vec<ServiceInstance>, PipelineError> {
    let mut instances = Vec::with_capacity(items.len());
    let mut taken_ids: HashSet<String> = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let type_id = required_field(item.type_id.as_deref(), index, "type")?;
        let name = required_field(item.name.as_deref(), index, "name")?;

        let resolved = catalog().resolve(type_id);
        let mut instance_id = slug(name);
        // User-supplied names may collide; instance ids must not
        while !taken_ids.insert(instance_id.clone()) {
            instance_id = format!("{instance_id}-{index}");
        }

        instances.push(ServiceInstance::new(instance_id, resolved.type_id, name));
    }

    Ok(instances)
}

fn required_field<'a>(
    value: Option<&'a str>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, PipelineError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(PipelineError::MalformedService { index, field })
}

/// Request edges reference service names; the graph wants instance ids.
/// Unmatched names pass through and are dropped by the builder's
/// no-dangling-edge rule.
fn resolve_edge_names(instances: &[ServiceInstance], edges: &[EdgeItem]) -> Vec<ServiceEdge> {
    let find = |name: &str| {
        instances
            .iter()
            .find(|i| i.display_name.eq_ignore_ascii_case(name.trim()))
            .map(|i| i.instance_id.clone())
            .unwrap_or_else(|| name.trim().to_string())
    };

    edges
        .iter()
        .map(|edge| {
            let mut resolved = ServiceEdge::new(find(&edge.from), find(&edge.to));
            resolved.label = edge.label.clone();
            resolved
        })
        .collect()
}

fn slug(display_name: &str) -> String {
    let id: String = display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if id.is_empty() {
        "service".to_string()
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(type_id: &str, name: &str) -> ServiceItem {
        ServiceItem {
            type_id: Some(type_id.to_string()),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn structured_services_chain_in_order() {
        let graph = build_from_services(
            &[item("appservice", "WebApp"), item("sqldatabase", "Database")],
            &[],
        )
        .unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let (from, to, _) = graph.edges().next().unwrap();
        assert_eq!(from.display_name, "WebApp");
        assert_eq!(to.display_name, "Database");
    }

    #[test]
    fn explicit_edges_suppress_the_chain() {
        let graph = build_from_services(
            &[
                item("appservice", "Web"),
                item("sqldatabase", "DB"),
                item("rediscache", "Cache"),
            ],
            &[EdgeItem {
                from: "Web".to_string(),
                to: "Cache".to_string(),
                label: Some("caches".to_string()),
            }],
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 1);
        let (from, to, data) = graph.edges().next().unwrap();
        assert_eq!(from.display_name, "Web");
        assert_eq!(to.display_name, "Cache");
        assert_eq!(data.label.as_deref(), Some("caches"));
    }

    #[test]
    fn missing_type_names_the_offending_index() {
        let err = build_from_services(
            &[
                item("appservice", "Web"),
                ServiceItem {
                    type_id: None,
                    name: Some("DB".to_string()),
                },
            ],
            &[],
        )
        .unwrap_err();

        assert!(
            matches!(err, PipelineError::MalformedService { index: 1, field: "type" }),
            "got: {err}"
        );
        assert_eq!(err.stage(), "validation");
    }

    #[test]
    fn missing_name_names_the_offending_index() {
        let err = build_from_services(
            &[ServiceItem {
                type_id: Some("appservice".to_string()),
                name: Some("   ".to_string()),
            }],
            &[],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MalformedService { index: 0, field: "name" }
        ));
    }

    #[test]
    fn colliding_names_get_distinct_instance_ids() {
        let graph = build_from_services(
            &[item("appservice", "Node"), item("sqldatabase", "Node")],
            &[],
        )
        .unwrap();
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn single_service_has_no_edges() {
        let graph = build_from_services(&[item("appservice", "Solo")], &[]).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[tokio::test]
    async fn text_path_uses_classifier_edges() {
        let classifier = TextClassifier::local_only();
        let graph = classify_and_build(
            &classifier,
            "A web application with Azure App Service, SQL Database, and Redis Cache",
        )
        .await
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.service_types(),
            vec!["appservice", "sqldatabase", "rediscache"]
        );
    }

    #[tokio::test]
    async fn empty_description_builds_empty_graph() {
        let classifier = TextClassifier::local_only();
        let graph = classify_and_build(&classifier, "").await.unwrap();
        assert!(graph.is_empty());
    }
}
