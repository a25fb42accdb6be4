//! # Architecture Graph
//!
//! Converts an ordered list of identified service instances (plus optional
//! explicit edges) into a typed graph ready for layout.
//!
//! ## Architecture
//!
//! ```text
//! ServiceInstance[] + ServiceEdge[]
//!     │
//!     └──> Graph Builder
//!            ├─ Preserve discovery order of instances
//!            ├─ Deduplicate edges by ordered (from, to) pair
//!            ├─ Drop edges referencing unknown instances
//!            ├─ Chain instances when structured input has no edges
//!            └─ Cluster instances by resolved category
//! ```
//!
//! The resulting [`ArchitectureGraph`] is built fresh per generation request
//! and discarded after rendering; nothing persists across requests.

mod builder;
mod error;
mod types;

pub use builder::{EdgeDefault, GraphBuilder};
pub use error::{GraphError, Result};
pub use types::{ArchitectureGraph, Cluster, EdgeData};
