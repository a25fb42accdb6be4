use archdiag_renderer::{LayoutDirection, OutputFormat};
use std::env;

/// Server-level defaults applied when a request leaves them unspecified
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerConfig {
    pub default_format: OutputFormat,
    pub default_direction: LayoutDirection,
}

impl ServerConfig {
    /// Read defaults from the environment; invalid values are logged and
    /// ignored rather than failing startup
    pub fn from_env() -> Self {
        let default_format = match env::var("ARCHDIAG_DEFAULT_FORMAT") {
            Ok(raw) => match raw.parse::<OutputFormat>() {
                Ok(format) => format,
                Err(e) => {
                    log::warn!("Ignoring ARCHDIAG_DEFAULT_FORMAT: {e}");
                    OutputFormat::default()
                }
            },
            Err(_) => OutputFormat::default(),
        };

        let default_direction = match env::var("ARCHDIAG_DEFAULT_DIRECTION") {
            Ok(raw) => match raw.parse::<LayoutDirection>() {
                Ok(direction) => direction,
                Err(e) => {
                    log::warn!("Ignoring ARCHDIAG_DEFAULT_DIRECTION: {e}");
                    LayoutDirection::default()
                }
            },
            Err(_) => LayoutDirection::default(),
        };

        Self {
            default_format,
            default_direction,
        }
    }
}
