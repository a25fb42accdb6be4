use crate::types::{ServiceCategory, ServiceTypeDescriptor};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Declarative registry of every known service type.
///
/// Loaded once at first use; read-only afterwards, so unsynchronized
/// concurrent reads are safe.
static DESCRIPTORS: &[ServiceTypeDescriptor] = &[
    ServiceTypeDescriptor {
        id: "appservice",
        category: ServiceCategory::Compute,
        renderer_ref: "shape=box, style=\"rounded,filled\", fillcolor=\"#0072c6\", fontcolor=white",
        default_label: "App Service",
    },
    ServiceTypeDescriptor {
        id: "functionapp",
        category: ServiceCategory::Compute,
        renderer_ref: "shape=box, style=\"rounded,filled\", fillcolor=\"#ffb900\"",
        default_label: "Function App",
    },
    ServiceTypeDescriptor {
        id: "virtualmachine",
        category: ServiceCategory::Compute,
        renderer_ref: "shape=box3d, style=filled, fillcolor=\"#0072c6\", fontcolor=white",
        default_label: "Virtual Machine",
    },
    ServiceTypeDescriptor {
        id: "machinelearning",
        category: ServiceCategory::Compute,
        renderer_ref: "shape=box, style=\"rounded,filled\", fillcolor=\"#008575\", fontcolor=white",
        default_label: "Machine Learning",
    },
    ServiceTypeDescriptor {
        id: "sqldatabase",
        category: ServiceCategory::Database,
        renderer_ref: "shape=cylinder, style=filled, fillcolor=\"#68217a\", fontcolor=white",
        default_label: "SQL Database",
    },
    ServiceTypeDescriptor {
        id: "cosmosdb",
        category: ServiceCategory::Database,
        renderer_ref: "shape=cylinder, style=filled, fillcolor=\"#3999c6\", fontcolor=white",
        default_label: "Cosmos DB",
    },
    ServiceTypeDescriptor {
        id: "rediscache",
        category: ServiceCategory::Database,
        renderer_ref: "shape=cylinder, style=filled, fillcolor=\"#dc382d\", fontcolor=white",
        default_label: "Redis Cache",
    },
    ServiceTypeDescriptor {
        id: "storageaccount",
        category: ServiceCategory::Storage,
        renderer_ref: "shape=folder, style=filled, fillcolor=\"#7fba00\"",
        default_label: "Storage Account",
    },
    ServiceTypeDescriptor {
        id: "blobstorage",
        category: ServiceCategory::Storage,
        renderer_ref: "shape=folder, style=filled, fillcolor=\"#7fba00\"",
        default_label: "Blob Storage",
    },
    ServiceTypeDescriptor {
        id: "loadbalancer",
        category: ServiceCategory::Networking,
        renderer_ref: "shape=diamond, style=filled, fillcolor=\"#00bcf2\"",
        default_label: "Load Balancer",
    },
    ServiceTypeDescriptor {
        id: "applicationgateway",
        category: ServiceCategory::Networking,
        renderer_ref: "shape=diamond, style=filled, fillcolor=\"#00bcf2\"",
        default_label: "Application Gateway",
    },
    ServiceTypeDescriptor {
        id: "virtualnetwork",
        category: ServiceCategory::Networking,
        renderer_ref: "shape=hexagon, style=filled, fillcolor=\"#00bcf2\"",
        default_label: "Virtual Network",
    },
    ServiceTypeDescriptor {
        id: "servicebus",
        category: ServiceCategory::Networking,
        renderer_ref: "shape=cds, style=filled, fillcolor=\"#00bcf2\"",
        default_label: "Service Bus",
    },
    ServiceTypeDescriptor {
        id: "keyvault",
        category: ServiceCategory::Security,
        renderer_ref: "shape=box, style=\"rounded,filled\", fillcolor=\"#e81123\", fontcolor=white",
        default_label: "Key Vault",
    },
    ServiceTypeDescriptor {
        id: "loganalytics",
        category: ServiceCategory::Monitoring,
        renderer_ref: "shape=note, style=filled, fillcolor=\"#68217a\", fontcolor=white",
        default_label: "Log Analytics",
    },
    ServiceTypeDescriptor {
        id: "generic",
        category: ServiceCategory::Generic,
        renderer_ref: "shape=box, style=filled, fillcolor=\"#d2d2d2\"",
        default_label: "Service",
    },
];

/// Synonym phrases recognized in free text and structured type fields.
///
/// The table lives in the catalog, not the classifier, so both resolution
/// paths agree on what a phrase means.
static SYNONYMS: &[(&str, &str)] = &[
    ("application gateway", "applicationgateway"),
    ("machine learning", "machinelearning"),
    ("web application", "appservice"),
    ("storage account", "storageaccount"),
    ("virtual network", "virtualnetwork"),
    ("virtual machine", "virtualmachine"),
    ("load balancer", "loadbalancer"),
    ("log analytics", "loganalytics"),
    ("blob storage", "blobstorage"),
    ("sql database", "sqldatabase"),
    ("function app", "functionapp"),
    ("app services", "appservice"),
    ("app gateway", "applicationgateway"),
    ("app service", "appservice"),
    ("redis cache", "rediscache"),
    ("service bus", "servicebus"),
    ("sql server", "sqldatabase"),
    ("key vault", "keyvault"),
    ("cosmos db", "cosmosdb"),
    ("functions", "functionapp"),
    ("web app", "appservice"),
    ("storage", "storageaccount"),
    ("webapp", "appservice"),
    ("cosmos", "cosmosdb"),
    ("redis", "rediscache"),
    ("blob", "blobstorage"),
    ("vnet", "virtualnetwork"),
    ("sql", "sqldatabase"),
    ("vm", "virtualmachine"),
];

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::new);

/// Process-wide immutable catalog
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Result of resolving a type identifier through the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Canonical key for known types; normalized input for unknown ones
    pub type_id: String,

    pub category: ServiceCategory,

    /// Graphviz attribute fragment for this type's node
    pub renderer_ref: &'static str,

    /// Default display label; the original identifier for unknown types
    pub label: String,
}

/// Immutable lookup structure over the service type registry
pub struct Catalog {
    by_key: HashMap<String, &'static ServiceTypeDescriptor>,
    generic: &'static ServiceTypeDescriptor,
}

impl Catalog {
    fn new() -> Self {
        let mut by_key: HashMap<String, &'static ServiceTypeDescriptor> = HashMap::new();
        for descriptor in DESCRIPTORS {
            by_key.insert(descriptor.id.to_string(), descriptor);
        }
        let generic = by_key["generic"];
        for (phrase, canonical) in SYNONYMS {
            let descriptor = by_key
                .get(*canonical)
                .copied()
                .unwrap_or(generic);
            by_key.entry(phrase.replace(' ', "")).or_insert(descriptor);
        }
        Self { by_key, generic }
    }

    /// Resolve a type identifier to rendering metadata.
    ///
    /// Total function: unknown identifiers resolve to the `Generic` descriptor
    /// with the original identifier preserved as the label, so unrecognized
    /// services stay visible instead of being dropped.
    pub fn resolve(&self, type_id: &str) -> ResolvedType {
        let key = normalize(type_id);
        if let Some(descriptor) = self.by_key.get(key.as_str()) {
            return ResolvedType {
                type_id: descriptor.id.to_string(),
                category: descriptor.category,
                renderer_ref: descriptor.renderer_ref,
                label: descriptor.default_label.to_string(),
            };
        }

        let label = {
            let trimmed = type_id.trim();
            if trimmed.is_empty() {
                self.generic.default_label.to_string()
            } else {
                trimmed.to_string()
            }
        };
        ResolvedType {
            type_id: if key.is_empty() { self.generic.id.to_string() } else { key },
            category: ServiceCategory::Generic,
            renderer_ref: self.generic.renderer_ref,
            label,
        }
    }

    /// Synonym phrases paired with their canonical type ids, longest phrase
    /// first, for the local classifier's keyword scan
    pub fn synonyms(&self) -> &'static [(&'static str, &'static str)] {
        SYNONYMS
    }

    /// All registered descriptors
    pub fn descriptors(&self) -> impl Iterator<Item = &'static ServiceTypeDescriptor> {
        DESCRIPTORS.iter()
    }
}

/// Lowercase and strip separators so "App Service", "app-service" and
/// "Azure.AppService" all produce the same key.
fn normalize(raw: &str) -> String {
    let key: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    // Original-style identifiers carry an "Azure." prefix
    match key.strip_prefix("azure") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolve_known_key() {
        let resolved = catalog().resolve("sqldatabase");
        assert_eq!(resolved.type_id, "sqldatabase");
        assert_eq!(resolved.category, ServiceCategory::Database);
        assert_eq!(resolved.label, "SQL Database");
    }

    #[test]
    fn resolve_is_case_and_separator_insensitive() {
        for raw in ["App Service", "APPSERVICE", "app-service", "Azure.AppService"] {
            let resolved = catalog().resolve(raw);
            assert_eq!(resolved.type_id, "appservice", "input: {raw}");
            assert_eq!(resolved.category, ServiceCategory::Compute);
        }
    }

    #[test]
    fn synonyms_share_a_descriptor() {
        let a = catalog().resolve("webapp");
        let b = catalog().resolve("web application");
        let c = catalog().resolve("appservice");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn unknown_key_resolves_generic_and_keeps_identifier() {
        let resolved = catalog().resolve("QuantumMainframe");
        assert_eq!(resolved.category, ServiceCategory::Generic);
        assert_eq!(resolved.label, "QuantumMainframe");
        // Deterministic: same input, same resolution
        assert_eq!(resolved, catalog().resolve("QuantumMainframe"));
    }

    #[test]
    fn empty_key_still_resolves() {
        let resolved = catalog().resolve("");
        assert_eq!(resolved.category, ServiceCategory::Generic);
        assert_eq!(resolved.type_id, "generic");
        assert_eq!(resolved.label, "Service");
    }

    #[test]
    fn every_descriptor_round_trips() {
        for descriptor in catalog().descriptors() {
            let resolved = catalog().resolve(descriptor.id);
            assert_eq!(resolved.type_id, descriptor.id);
            assert_eq!(resolved.category, descriptor.category);
        }
    }

    #[test]
    fn synonym_table_is_longest_first() {
        let synonyms = catalog().synonyms();
        for pair in synonyms.windows(2) {
            assert!(
                pair[0].0.len() >= pair[1].0.len(),
                "{} before {}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn every_synonym_targets_a_registered_type() {
        for (phrase, canonical) in catalog().synonyms() {
            let resolved = catalog().resolve(canonical);
            assert_eq!(resolved.type_id, *canonical, "synonym: {phrase}");
            assert_ne!(resolved.category, ServiceCategory::Generic, "synonym: {phrase}");
        }
    }
}
