use std::env;
use std::time::Duration;

const DEFAULT_DEPLOYMENT: &str = "gpt-4o";
const DEFAULT_API_VERSION: &str = "2024-08-01-preview";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the classification strategies.
///
/// An absent endpoint or key means local-only mode; nothing else is required
/// for the pipeline to operate.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Chat-completions endpoint base URL
    pub endpoint: Option<String>,

    /// API key for the endpoint
    pub api_key: Option<String>,

    /// Model deployment name
    pub deployment: String,

    /// API version query parameter
    pub api_version: String,

    /// Upper bound on the remote call; on expiry the pipeline falls back to
    /// the local strategy instead of blocking
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClassifierConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Self {
        let timeout = env::var("ARCHDIAG_CLASSIFY_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            endpoint: non_empty_var("ARCHDIAG_OPENAI_ENDPOINT"),
            api_key: non_empty_var("ARCHDIAG_OPENAI_API_KEY"),
            deployment: non_empty_var("ARCHDIAG_OPENAI_DEPLOYMENT")
                .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
            api_version: non_empty_var("ARCHDIAG_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout,
        }
    }

    /// Capability check: can the remote strategy be constructed at all?
    pub fn remote_enabled(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local_only() {
        let config = ClassifierConfig::default();
        assert!(!config.remote_enabled());
        assert_eq!(config.deployment, "gpt-4o");
    }

    #[test]
    fn remote_requires_both_endpoint_and_key() {
        let mut config = ClassifierConfig {
            endpoint: Some("https://example.openai.azure.com".to_string()),
            ..Default::default()
        };
        assert!(!config.remote_enabled());

        config.api_key = Some("secret".to_string());
        assert!(config.remote_enabled());
    }
}
