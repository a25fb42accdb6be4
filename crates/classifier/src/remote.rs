use crate::classifier::ClassifyStrategy;
use crate::config::ClassifierConfig;
use crate::error::{ClassifierError, Result};
use crate::types::{slug, Extraction, NameAllocator};
use archdiag_catalog::{catalog, ServiceEdge, ServiceInstance};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;

/// Fixed instruction sent with every classification request
const SYSTEM_INSTRUCTION: &str = "You are an expert cloud architect. Parse the given \
architecture description and return ONLY valid JSON of the form \
{\"services\": [{\"type\": \"...\", \"name\": \"...\"}], \
\"edges\": [{\"from\": \"...\", \"to\": \"...\"}]}. \
Use short canonical service types such as appservice, sqldatabase, storageaccount. \
Edges reference service names. Return only the JSON, no additional text.";

/// Expected response schema; any deviation is a schema violation
#[derive(Debug, Deserialize)]
struct RemotePayload {
    services: Vec<RemoteService>,
    #[serde(default)]
    edges: Vec<RemoteEdge>,
}

#[derive(Debug, Deserialize)]
struct RemoteService {
    #[serde(rename = "type")]
    type_id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RemoteEdge {
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Delegates classification to a remote chat-completions deployment
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
}

impl RemoteClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let (endpoint, api_key) = match (&config.endpoint, &config.api_key) {
            (Some(endpoint), Some(api_key)) => (endpoint.clone(), api_key.clone()),
            _ => return Err(ClassifierError::NotConfigured),
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }

    async fn call(&self, description: &str) -> Result<String> {
        let payload = json!({
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": format!("Architecture description: {description:?}") }
            ],
            "max_tokens": 2000,
            "temperature": 0.1,
            "top_p": 0.1
        });

        let response = self
            .client
            .post(self.request_url())
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Status(status.as_u16()));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::SchemaViolation(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ClassifierError::SchemaViolation("no choices in response".to_string()))
    }
}

#[async_trait]
impl ClassifyStrategy for RemoteClassifier {
    async fn extract(&self, description: &str) -> Result<Extraction> {
        let content = self.call(description).await?;
        let extraction = parse_remote_content(&content)?;
        log::info!(
            "Remote classification identified {} services",
            extraction.instances.len()
        );
        Ok(extraction)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Parse the model's reply into the shared extraction schema.
///
/// Models wrap JSON in Markdown fences often enough that stripping them is
/// part of the contract; anything else unexpected is a schema violation that
/// triggers fallback.
pub(crate) fn parse_remote_content(content: &str) -> Result<Extraction> {
    let stripped = strip_code_fences(content);

    let payload: RemotePayload = serde_json::from_str(stripped)
        .map_err(|e| ClassifierError::SchemaViolation(e.to_string()))?;

    let mut names = NameAllocator::default();
    let mut taken_ids: HashSet<String> = HashSet::new();
    let mut instances = Vec::with_capacity(payload.services.len());

    for service in &payload.services {
        let resolved = catalog().resolve(&service.type_id);
        let base = if service.name.trim().is_empty() {
            resolved.label.clone()
        } else {
            service.name.trim().to_string()
        };
        let display_name = names.allocate(&base);

        // Ordinal names can still slug-collide (e.g. "WebApp2" supplied next
        // to an allocated "WebApp2"); instance ids must stay unique.
        let base_id = slug(&display_name);
        let mut instance_id = base_id.clone();
        let mut ordinal = 2;
        while !taken_ids.insert(instance_id.clone()) {
            instance_id = format!("{base_id}{ordinal}");
            ordinal += 1;
        }

        instances.push(ServiceInstance::new(instance_id, resolved.type_id, display_name));
    }

    // Remote edges reference service names; map them back to instance ids.
    let mut edges = Vec::new();
    for edge in &payload.edges {
        let from = find_by_name(&instances, &edge.from);
        let to = find_by_name(&instances, &edge.to);
        match (from, to) {
            (Some(from), Some(to)) => edges.push(ServiceEdge::new(from, to)),
            _ => log::debug!(
                "Skipping remote edge {} -> {}: unmatched service name",
                edge.from,
                edge.to
            ),
        }
    }

    Ok(Extraction { instances, edges })
}

fn find_by_name<'a>(instances: &'a [ServiceInstance], name: &str) -> Option<&'a str> {
    let wanted = name.trim();
    instances
        .iter()
        .find(|i| i.display_name.eq_ignore_ascii_case(wanted))
        .map(|i| i.instance_id.as_str())
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}
