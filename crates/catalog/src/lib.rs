//! # Service Catalog
//!
//! Static registry mapping canonical cloud service types to rendering
//! metadata, plus the core data model shared by the whole pipeline.
//!
//! ## Features
//!
//! - **Total resolution** - `resolve` never fails; unknown identifiers map to
//!   a `Generic` descriptor that keeps the original identifier visible
//! - **Synonym table** - "webapp", "app service" and "web application" all
//!   resolve to the same descriptor
//! - **Category clustering** - every service type carries the category used
//!   for visual grouping

mod catalog;
mod types;

pub use catalog::{catalog, Catalog, ResolvedType};
pub use types::{ServiceCategory, ServiceEdge, ServiceInstance, ServiceTypeDescriptor};
