use serde::{Deserialize, Serialize};

/// Visual grouping category for a service type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    Compute,
    Storage,
    Database,
    Networking,
    Security,
    Monitoring,
    Generic,
}

impl ServiceCategory {
    /// Display label used for cluster titles
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
            Self::Database => "Database",
            Self::Networking => "Networking",
            Self::Security => "Security",
            Self::Monitoring => "Monitoring",
            Self::Generic => "Generic",
        }
    }
}

/// Immutable catalog entry for a canonical service type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTypeDescriptor {
    /// Canonical key (e.g. "sqldatabase")
    pub id: &'static str,

    /// Category used for cluster assignment
    pub category: ServiceCategory,

    /// Opaque handle the rendering backend understands
    /// (a Graphviz node attribute fragment)
    pub renderer_ref: &'static str,

    /// Label used when the caller supplies no display name
    pub default_label: &'static str,
}

/// One occurrence of a service type within an architecture
///
/// Immutable after creation; owned by the diagram-generation request that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    /// Unique within a diagram; ordering follows discovery order
    pub instance_id: String,

    /// Canonical service type key (resolved through the catalog)
    pub type_id: String,

    /// User-supplied or derived display name
    pub display_name: String,
}

impl ServiceInstance {
    pub fn new(
        instance_id: impl Into<String>,
        type_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            type_id: type_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Directed relation between two service instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEdge {
    pub from_id: String,
    pub to_id: String,
    pub label: Option<String>,
}

impl ServiceEdge {
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
