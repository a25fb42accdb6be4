use crate::error::{GraphError, Result};
use crate::types::{ArchitectureGraph, EdgeData};
use archdiag_catalog::{catalog, ServiceEdge, ServiceInstance};
use std::collections::HashSet;

/// Default applied when no explicit edges are supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDefault {
    /// Leave the graph edgeless
    None,

    /// Connect instances in the supplied order (N-1 chain edges).
    ///
    /// This is the documented default for structured input with no
    /// relationships specified; it is not an inference.
    Chain,
}

/// Build architecture graphs from identified services
pub struct GraphBuilder {
    edge_default: EdgeDefault,
}

impl GraphBuilder {
    pub fn new(edge_default: EdgeDefault) -> Self {
        Self { edge_default }
    }

    /// Build a graph from instances and optional explicit edges.
    ///
    /// Deterministic: the same inputs produce an isomorphic graph every time.
    /// Instance order is preserved, duplicate edges between the same ordered
    /// pair collapse, and edges referencing unknown instance ids are dropped
    /// so no dangling edge ever survives the build.
    pub fn build(
        &self,
        instances: Vec<ServiceInstance>,
        edges: Vec<ServiceEdge>,
    ) -> Result<ArchitectureGraph> {
        let mut graph = ArchitectureGraph::new();

        // Phase 1: nodes, clustered by resolved category
        for instance in instances {
            if graph.find_instance(&instance.instance_id).is_some() {
                return Err(GraphError::DuplicateInstance(instance.instance_id));
            }
            let category = catalog().resolve(&instance.type_id).category;
            graph.add_instance(instance, category);
        }

        // Phase 2: edges, with the chain default for edgeless input
        let edges = if edges.is_empty() && self.edge_default == EdgeDefault::Chain {
            Self::chain_edges(&graph)
        } else {
            edges
        };

        let mut seen: HashSet<(String, String)> = HashSet::new();
        for edge in edges {
            let key = (edge.from_id.clone(), edge.to_id.clone());
            if !seen.insert(key) {
                continue;
            }

            let (from, to) = match (
                graph.find_instance(&edge.from_id),
                graph.find_instance(&edge.to_id),
            ) {
                (Some(from), Some(to)) => (from, to),
                _ => {
                    log::warn!(
                        "Dropping edge {} -> {}: endpoint not in graph",
                        edge.from_id,
                        edge.to_id
                    );
                    continue;
                }
            };

            graph.add_edge(from, to, EdgeData { label: edge.label });
        }

        log::info!(
            "Built architecture graph: {} nodes, {} edges, {} clusters",
            graph.node_count(),
            graph.edge_count(),
            graph.clusters.len()
        );

        Ok(graph)
    }

    fn chain_edges(graph: &ArchitectureGraph) -> Vec<ServiceEdge> {
        let ids: Vec<&str> = graph.instances().map(|i| i.instance_id.as_str()).collect();
        ids.windows(2)
            .map(|pair| ServiceEdge::new(pair[0], pair[1]))
            .collect()
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(EdgeDefault::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archdiag_catalog::ServiceCategory;

    fn instance(id: &str, type_id: &str) -> ServiceInstance {
        ServiceInstance::new(id, type_id, id)
    }

    #[test]
    fn preserves_instance_order() {
        let builder = GraphBuilder::default();
        let graph = builder
            .build(
                vec![
                    instance("web", "appservice"),
                    instance("db", "sqldatabase"),
                    instance("cache", "rediscache"),
                ],
                vec![],
            )
            .unwrap();

        let ids: Vec<&str> = graph.instances().map(|i| i.instance_id.as_str()).collect();
        assert_eq!(ids, vec!["web", "db", "cache"]);
    }

    #[test]
    fn chain_default_yields_n_minus_one_edges() {
        let builder = GraphBuilder::new(EdgeDefault::Chain);
        let graph = builder
            .build(
                vec![
                    instance("a", "appservice"),
                    instance("b", "sqldatabase"),
                    instance("c", "storageaccount"),
                ],
                vec![],
            )
            .unwrap();
        assert_eq!(graph.edge_count(), 2);

        let single = builder.build(vec![instance("a", "appservice")], vec![]).unwrap();
        assert_eq!(single.edge_count(), 0);

        let empty = builder.build(vec![], vec![]).unwrap();
        assert_eq!(empty.node_count(), 0);
        assert_eq!(empty.edge_count(), 0);
    }

    #[test]
    fn chain_default_does_not_override_explicit_edges() {
        let builder = GraphBuilder::new(EdgeDefault::Chain);
        let graph = builder
            .build(
                vec![
                    instance("a", "appservice"),
                    instance("b", "sqldatabase"),
                    instance("c", "storageaccount"),
                ],
                vec![ServiceEdge::new("a", "c")],
            )
            .unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let builder = GraphBuilder::default();
        let graph = builder
            .build(
                vec![instance("a", "appservice"), instance("b", "sqldatabase")],
                vec![
                    ServiceEdge::new("a", "b"),
                    ServiceEdge::new("a", "b"),
                    ServiceEdge::new("b", "a"),
                ],
            )
            .unwrap();
        // Same ordered pair collapses; the reverse direction does not
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let builder = GraphBuilder::default();
        let graph = builder
            .build(
                vec![instance("a", "appservice")],
                vec![ServiceEdge::new("a", "ghost"), ServiceEdge::new("ghost", "a")],
            )
            .unwrap();
        assert_eq!(graph.edge_count(), 0);

        // Invariant: every surviving edge references existing instances
        for (from, to, _) in graph.edges() {
            assert!(graph.find_instance(&from.instance_id).is_some());
            assert!(graph.find_instance(&to.instance_id).is_some());
        }
    }

    #[test]
    fn duplicate_instance_id_is_rejected() {
        let builder = GraphBuilder::default();
        let err = builder
            .build(
                vec![instance("a", "appservice"), instance("a", "sqldatabase")],
                vec![],
            )
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateInstance(id) if id == "a"));
    }

    #[test]
    fn clusters_follow_first_appearance_order() {
        let builder = GraphBuilder::default();
        let graph = builder
            .build(
                vec![
                    instance("web", "appservice"),
                    instance("db", "sqldatabase"),
                    instance("cache", "rediscache"),
                    instance("fn", "functionapp"),
                ],
                vec![],
            )
            .unwrap();

        let categories: Vec<ServiceCategory> =
            graph.clusters.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![ServiceCategory::Compute, ServiceCategory::Database]
        );
        assert_eq!(graph.clusters[0].instance_ids, vec!["web", "fn"]);
        assert_eq!(graph.clusters[1].instance_ids, vec!["db", "cache"]);
    }

    #[test]
    fn unknown_type_clusters_as_generic() {
        let builder = GraphBuilder::default();
        let graph = builder
            .build(vec![instance("x", "mystery-box")], vec![])
            .unwrap();
        assert_eq!(graph.clusters.len(), 1);
        assert_eq!(graph.clusters[0].category, ServiceCategory::Generic);
    }

    #[test]
    fn build_is_deterministic() {
        let builder = GraphBuilder::new(EdgeDefault::Chain);
        let make = || {
            builder
                .build(
                    vec![instance("a", "appservice"), instance("b", "sqldatabase")],
                    vec![],
                )
                .unwrap()
        };
        let first = make();
        let second = make();
        assert_eq!(first.service_types(), second.service_types());
        assert_eq!(first.edge_count(), second.edge_count());
        assert_eq!(first.clusters, second.clusters);
    }
}
