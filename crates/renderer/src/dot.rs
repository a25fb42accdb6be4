use crate::types::LayoutDirection;
use archdiag_catalog::catalog;
use archdiag_graph::ArchitectureGraph;
use std::fmt::Write;

/// Emit the Graphviz DOT description for an architecture graph.
///
/// Nodes are grouped into one subgraph cluster per category (first-appearance
/// order), styled through each type's renderer attribute fragment. An empty
/// graph still produces a valid, renderable document.
pub fn dot_source(graph: &ArchitectureGraph, name: &str, direction: LayoutDirection) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "digraph {} {{", quote(name));
    let _ = writeln!(out, "    label={};", quote(name));
    let _ = writeln!(out, "    labelloc=t;");
    let _ = writeln!(out, "    rankdir={};", direction.rankdir());
    let _ = writeln!(out, "    fontname=\"Helvetica\";");
    let _ = writeln!(out, "    node [fontname=\"Helvetica\"];");

    for (cluster_idx, cluster) in graph.clusters.iter().enumerate() {
        let _ = writeln!(out, "    subgraph cluster_{cluster_idx} {{");
        let _ = writeln!(out, "        label={};", quote(cluster.category.label()));
        let _ = writeln!(out, "        style=rounded;");
        let _ = writeln!(out, "        color=gray;");

        for instance_id in &cluster.instance_ids {
            let Some(instance) = graph
                .find_instance(instance_id)
                .and_then(|idx| graph.get_instance(idx))
            else {
                continue;
            };
            let resolved = catalog().resolve(&instance.type_id);
            let _ = writeln!(
                out,
                "        {} [label={}, {}];",
                quote(&instance.instance_id),
                quote(&instance.display_name),
                resolved.renderer_ref
            );
        }

        let _ = writeln!(out, "    }}");
    }

    for (from, to, data) in graph.edges() {
        match &data.label {
            Some(label) => {
                let _ = writeln!(
                    out,
                    "    {} -> {} [label={}];",
                    quote(&from.instance_id),
                    quote(&to.instance_id),
                    quote(label)
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "    {} -> {};",
                    quote(&from.instance_id),
                    quote(&to.instance_id)
                );
            }
        }
    }

    out.push_str("}\n");
    out
}

/// Quote and escape an identifier or label for DOT
fn quote(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + 2);
    escaped.push('"');
    for c in raw.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped.push('"');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use archdiag_catalog::{ServiceEdge, ServiceInstance};
    use archdiag_graph::{EdgeDefault, GraphBuilder};

    fn sample_graph() -> ArchitectureGraph {
        GraphBuilder::new(EdgeDefault::Chain)
            .build(
                vec![
                    ServiceInstance::new("web", "appservice", "WebApp"),
                    ServiceInstance::new("db", "sqldatabase", "Orders DB"),
                ],
                vec![],
            )
            .unwrap()
    }

    #[test]
    fn emits_digraph_with_direction() {
        let dot = dot_source(&sample_graph(), "Shop", LayoutDirection::LeftRight);
        assert!(dot.starts_with("digraph \"Shop\" {"));
        assert!(dot.contains("rankdir=LR;"));
    }

    #[test]
    fn clusters_nodes_by_category() {
        let dot = dot_source(&sample_graph(), "Shop", LayoutDirection::TopBottom);
        assert!(dot.contains("subgraph cluster_0"));
        assert!(dot.contains("label=\"Compute\";"));
        assert!(dot.contains("subgraph cluster_1"));
        assert!(dot.contains("label=\"Database\";"));
    }

    #[test]
    fn nodes_carry_labels_and_renderer_attributes() {
        let dot = dot_source(&sample_graph(), "Shop", LayoutDirection::TopBottom);
        assert!(dot.contains("\"web\" [label=\"WebApp\", shape=box"));
        assert!(dot.contains("\"db\" [label=\"Orders DB\", shape=cylinder"));
    }

    #[test]
    fn edges_become_connectors() {
        let dot = dot_source(&sample_graph(), "Shop", LayoutDirection::TopBottom);
        assert!(dot.contains("\"web\" -> \"db\";"));
    }

    #[test]
    fn edge_labels_are_preserved() {
        let graph = GraphBuilder::default()
            .build(
                vec![
                    ServiceInstance::new("web", "appservice", "WebApp"),
                    ServiceInstance::new("db", "sqldatabase", "DB"),
                ],
                vec![ServiceEdge::new("web", "db").with_label("reads")],
            )
            .unwrap();
        let dot = dot_source(&graph, "Shop", LayoutDirection::TopBottom);
        assert!(dot.contains("[label=\"reads\"];"));
    }

    #[test]
    fn empty_graph_is_still_valid_dot() {
        let graph = GraphBuilder::default().build(vec![], vec![]).unwrap();
        let dot = dot_source(&graph, "Empty", LayoutDirection::TopBottom);
        assert!(dot.starts_with("digraph \"Empty\" {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(!dot.contains("subgraph"));
    }

    #[test]
    fn labels_with_quotes_are_escaped() {
        let graph = GraphBuilder::default()
            .build(
                vec![ServiceInstance::new("x", "generic", "a \"quoted\" name")],
                vec![],
            )
            .unwrap();
        let dot = dot_source(&graph, "Q", LayoutDirection::TopBottom);
        assert!(dot.contains("label=\"a \\\"quoted\\\" name\""));
    }
}
