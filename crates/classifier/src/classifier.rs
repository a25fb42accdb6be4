use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::local::LocalClassifier;
use crate::remote::RemoteClassifier;
use crate::types::Extraction;
use async_trait::async_trait;

/// A classification strategy producing the shared extraction schema
#[async_trait]
pub trait ClassifyStrategy: Send + Sync {
    async fn extract(&self, description: &str) -> Result<Extraction>;

    /// Strategy name for diagnostics
    fn name(&self) -> &'static str;
}

/// Classifier facade over the remote and local strategies.
///
/// The remote strategy exists only when the configuration passes the
/// capability check at construction time; when it fails at runtime the
/// classifier falls back to the local strategy silently, so extraction as a
/// whole is infallible.
pub struct TextClassifier {
    remote: Option<Box<dyn ClassifyStrategy>>,
    local: LocalClassifier,
}

impl TextClassifier {
    /// Construct from configuration, enabling the remote strategy when
    /// endpoint and credentials are present
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let remote: Option<Box<dyn ClassifyStrategy>> = if config.remote_enabled() {
            match RemoteClassifier::new(config) {
                Ok(remote) => {
                    log::info!("Remote classification enabled ({})", config.deployment);
                    Some(Box::new(remote))
                }
                Err(e) => {
                    log::warn!("Remote classification disabled: {e}");
                    None
                }
            }
        } else {
            log::info!("Remote classification not configured; using local strategy only");
            None
        };

        Self {
            remote,
            local: LocalClassifier::new(),
        }
    }

    /// Local-only classifier
    pub fn local_only() -> Self {
        Self {
            remote: None,
            local: LocalClassifier::new(),
        }
    }

    /// Classifier with an injected remote strategy
    pub fn with_remote(remote: Box<dyn ClassifyStrategy>) -> Self {
        Self {
            remote: Some(remote),
            local: LocalClassifier::new(),
        }
    }

    /// Extract service instances and connection hints from free text.
    ///
    /// Never fails: any remote-strategy error is logged and recovered via
    /// the local strategy.
    pub async fn extract(&self, description: &str) -> Extraction {
        if let Some(remote) = &self.remote {
            match remote.extract(description).await {
                Ok(extraction) => return extraction,
                Err(e) => {
                    log::warn!(
                        "{} classification unavailable ({e}); falling back to local strategy",
                        remote.name()
                    );
                }
            }
        }
        self.local.scan(description)
    }
}
