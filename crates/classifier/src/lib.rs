//! # Text Classifier
//!
//! Extracts typed service instances (and connection hints) from free-text
//! architecture descriptions.
//!
//! ## Architecture
//!
//! ```text
//! description
//!     │
//!     ├──> Remote strategy (when endpoint + credentials configured)
//!     │      ├─ Chat-completions call with a fixed instruction
//!     │      ├─ Fixed {services, edges} response schema
//!     │      └─ Any failure falls back silently to the local strategy
//!     │
//!     └──> Local strategy (always available)
//!            ├─ Catalog synonym scan in order of appearance
//!            ├─ One instance per first occurrence of a type
//!            └─ Adjacency of mentions becomes a directed edge
//! ```
//!
//! The strategy is chosen once at construction time by a capability check;
//! a generation request never fails because the remote strategy was
//! unavailable.

mod classifier;
mod config;
mod error;
mod local;
mod remote;
mod types;

pub use classifier::{ClassifyStrategy, TextClassifier};
pub use config::ClassifierConfig;
pub use error::{ClassifierError, Result};
pub use local::LocalClassifier;
pub use remote::RemoteClassifier;
pub use types::Extraction;
