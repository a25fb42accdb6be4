use crate::classifier::ClassifyStrategy;
use crate::error::Result;
use crate::types::{slug, Extraction, NameAllocator};
use archdiag_catalog::{catalog, ServiceEdge, ServiceInstance};
use async_trait::async_trait;
use std::collections::HashSet;

/// Words that never serve as a fallback label
const STOPWORDS: &[&str] = &[
    "the", "and", "with", "for", "our", "using", "this", "that", "into", "from", "are",
];

#[derive(Debug, Clone, Copy)]
struct Hit {
    pos: usize,
    len: usize,
    type_id: &'static str,
}

/// Heuristic keyword-scan strategy, always available
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClassifier;

impl LocalClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Scan the description for catalog synonym tokens in order of
    /// appearance.
    ///
    /// Each first occurrence of a recognized type yields one instance;
    /// repeat mentions of the same type deduplicate. Sequential adjacency of
    /// recognized mentions becomes a directed edge in text order. When
    /// nothing matches, non-blank text yields a single `Generic` instance
    /// labeled from the first noun-like token, and blank text yields an
    /// empty extraction; both are valid results.
    pub fn scan(&self, description: &str) -> Extraction {
        let lowered = description.to_lowercase();

        // Collect every synonym occurrence. The table is ordered longest
        // phrase first, so sorting by (position, longer-first) lets one pass
        // resolve overlaps like "blob storage" vs "storage".
        let mut hits: Vec<Hit> = Vec::new();
        for (phrase, type_id) in catalog().synonyms() {
            let mut offset = 0;
            while let Some(found) = lowered[offset..].find(phrase) {
                let pos = offset + found;
                hits.push(Hit {
                    pos,
                    len: phrase.len(),
                    type_id,
                });
                offset = pos + phrase.len();
            }
        }
        hits.sort_by(|a, b| a.pos.cmp(&b.pos).then(b.len.cmp(&a.len)));

        let mut seen_types: HashSet<&str> = HashSet::new();
        let mut names = NameAllocator::default();
        let mut instances = Vec::new();
        let mut consumed_until = 0;

        for hit in hits {
            if hit.pos < consumed_until {
                continue;
            }
            consumed_until = hit.pos + hit.len;

            if !seen_types.insert(hit.type_id) {
                continue;
            }

            let resolved = catalog().resolve(hit.type_id);
            let display_name = names.allocate(&resolved.label);
            instances.push(ServiceInstance::new(
                slug(&display_name),
                resolved.type_id,
                display_name,
            ));
        }

        if instances.is_empty() {
            return self.fallback_extraction(description);
        }

        // Adjacency heuristic: consecutive recognized mentions connect in
        // text order.
        let edges = instances
            .windows(2)
            .map(|pair| ServiceEdge::new(&pair[0].instance_id, &pair[1].instance_id))
            .collect();

        log::debug!(
            "Local classification found {} services in description",
            instances.len()
        );

        Extraction { instances, edges }
    }

    /// Degenerate case: no recognized tokens at all
    fn fallback_extraction(&self, description: &str) -> Extraction {
        let token = description
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .find(|word| {
                word.len() >= 3
                    && word.chars().all(|c| c.is_ascii_alphabetic())
                    && !STOPWORDS.contains(&word.to_ascii_lowercase().as_str())
            });

        match token {
            Some(word) => {
                let label = title_case(word);
                log::debug!("No service tokens recognized; labeling generic node {label:?}");
                Extraction {
                    instances: vec![ServiceInstance::new(slug(&label), "generic", label)],
                    edges: vec![],
                }
            }
            None => Extraction::default(),
        }
    }
}

#[async_trait]
impl ClassifyStrategy for LocalClassifier {
    async fn extract(&self, description: &str) -> Result<Extraction> {
        Ok(self.scan(description))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
