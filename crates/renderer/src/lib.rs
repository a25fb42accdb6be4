//! # Diagram Assembler
//!
//! Lays an architecture graph out (direction, clustering, styling) and
//! delegates drawing to the external Graphviz backend, returning the
//! rendered bytes plus provenance metadata.
//!
//! The assembler's responsibility ends at producing a well-formed
//! node/edge/cluster description (DOT) and reading back the backend's
//! output; pixel and vector internals belong to Graphviz.

mod dot;
mod error;
mod renderer;
mod types;

pub use dot::dot_source;
pub use error::{RenderError, Result};
pub use renderer::DiagramRenderer;
pub use types::{DiagramResult, LayoutDirection, OutputFormat};
