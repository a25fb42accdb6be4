//! Archdiag MCP server binary
//!
//! Generates cloud architecture diagrams from natural language over the MCP
//! protocol (stdio transport).
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "archdiag": {
//!       "command": "archdiag-mcp"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use archdiag_classifier::{ClassifierConfig, TextClassifier};
use archdiag_mcp::config::ServerConfig;
use archdiag_mcp::tools::ArchdiagService;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr only; stdout carries the MCP protocol
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting archdiag MCP server");

    let classifier = TextClassifier::from_config(&ClassifierConfig::from_env());
    let service = ArchdiagService::new(classifier, ServerConfig::from_env());
    let server = service.serve(stdio()).await?;

    server.waiting().await?;

    log::info!("Archdiag MCP server stopped");
    Ok(())
}
