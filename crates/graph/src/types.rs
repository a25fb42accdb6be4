use archdiag_catalog::{ServiceCategory, ServiceInstance};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Edge payload in the architecture graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Optional connector label
    pub label: Option<String>,
}

/// Visual grouping of instances sharing a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub category: ServiceCategory,

    /// Member instance ids in discovery order
    pub instance_ids: Vec<String>,
}

/// Typed architecture graph for one generation request
///
/// Invariant: every edge endpoint references an existing instance, and every
/// instance belongs to exactly one cluster (its type's category).
#[derive(Debug)]
pub struct ArchitectureGraph {
    /// Directed graph (instance -> instance)
    pub graph: DiGraph<ServiceInstance, EdgeData>,

    /// Instance id -> NodeIndex mapping for fast lookup
    pub id_index: HashMap<String, NodeIndex>,

    /// Category clusters in first-appearance order of any member
    pub clusters: Vec<Cluster>,
}

impl ArchitectureGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_index: HashMap::new(),
            clusters: Vec::new(),
        }
    }

    /// Add an instance node, registering it in its category cluster
    pub fn add_instance(
        &mut self,
        instance: ServiceInstance,
        category: ServiceCategory,
    ) -> NodeIndex {
        let instance_id = instance.instance_id.clone();

        let idx = self.graph.add_node(instance);
        self.id_index.insert(instance_id.clone(), idx);

        match self.clusters.iter_mut().find(|c| c.category == category) {
            Some(cluster) => cluster.instance_ids.push(instance_id),
            None => self.clusters.push(Cluster {
                category,
                instance_ids: vec![instance_id],
            }),
        }

        idx
    }

    /// Add an edge between existing nodes
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: EdgeData) {
        self.graph.add_edge(from, to, edge);
    }

    /// Find node by instance id
    pub fn find_instance(&self, instance_id: &str) -> Option<NodeIndex> {
        self.id_index.get(instance_id).copied()
    }

    /// Get node data
    pub fn get_instance(&self, idx: NodeIndex) -> Option<&ServiceInstance> {
        self.graph.node_weight(idx)
    }

    /// All instances in discovery order
    pub fn instances(&self) -> impl Iterator<Item = &ServiceInstance> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
    }

    /// All edges as (from instance, to instance, payload)
    pub fn edges(&self) -> impl Iterator<Item = (&ServiceInstance, &ServiceInstance, &EdgeData)> {
        self.graph.edge_references().filter_map(|e| {
            let from = self.graph.node_weight(e.source())?;
            let to = self.graph.node_weight(e.target())?;
            Some((from, to, e.weight()))
        })
    }

    /// Ordered type ids of every identified service
    pub fn service_types(&self) -> Vec<String> {
        self.instances().map(|i| i.type_id.clone()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for ArchitectureGraph {
    fn default() -> Self {
        Self::new()
    }
}
