//! # Archdiag MCP Server
//!
//! Generates cloud architecture diagrams from natural language (or a
//! structured service list) over the MCP protocol.
//!
//! ## Tools
//!
//! - `generate_diagram_from_text` - free-text description in, rendered
//!   diagram out
//! - `generate_diagram_from_services` - structured `{type, name}` list in,
//!   rendered diagram out (services chain in the supplied order when no
//!   edges are given)

pub mod config;
pub mod pipeline;
pub mod tools;
