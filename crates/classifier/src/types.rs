use archdiag_catalog::{ServiceEdge, ServiceInstance};
use serde::{Deserialize, Serialize};

/// Output schema shared by both classification strategies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Identified services in discovery order
    pub instances: Vec<ServiceInstance>,

    /// Inferred or remotely supplied connections
    pub edges: Vec<ServiceEdge>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Derive a diagram-unique instance id from a display name
pub(crate) fn slug(display_name: &str) -> String {
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

/// Allocates display names, disambiguating repeats with an appended ordinal
/// ("WebApp", "WebApp2", "WebApp3")
#[derive(Default)]
pub(crate) struct NameAllocator {
    counts: std::collections::HashMap<String, usize>,
}

impl NameAllocator {
    pub fn allocate(&mut self, base: &str) -> String {
        let count = self.counts.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base.to_string()
        } else {
            format!("{base}{count}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_separators() {
        assert_eq!(slug("App Service2"), "appservice2");
        assert_eq!(slug("SQL Database"), "sqldatabase");
        assert_eq!(slug("!!"), "service");
    }

    #[test]
    fn name_allocator_appends_ordinals() {
        let mut names = NameAllocator::default();
        assert_eq!(names.allocate("WebApp"), "WebApp");
        assert_eq!(names.allocate("WebApp"), "WebApp2");
        assert_eq!(names.allocate("WebApp"), "WebApp3");
        assert_eq!(names.allocate("Database"), "Database");
    }
}
