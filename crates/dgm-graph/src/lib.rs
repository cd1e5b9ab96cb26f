#![deny(missing_docs)]

//! Hypergraph model behind the diagram editor.
//!
//! A diagram canvas is a set of [`Node`]s (wire endpoints, spiders, boundary
//! ports) joined by [`HyperEdge`]s with ordered source and target lists. The
//! [`HypergraphManager`] owns the registries of one document, performs every
//! structural edit, and extracts connected components as read-only
//! [`Hypergraph`] views.

mod config;
mod generators;
mod hash;
mod hyper_edge;
mod hypergraph;
mod manager;
mod node;
mod serialization;
mod shared;
mod traversal;

pub use config::{ManagerConfig, Seeding};
pub use generators::{gen_random_diagram, DiagramShape};
pub use hash::canonical_hash;
pub use hyper_edge::{EdgeMap, HyperEdge};
pub use hypergraph::Hypergraph;
pub use manager::HypergraphManager;
pub use node::{Node, NodeMap};
pub use shared::SharedHypergraphManager;

/// Re-export serialization helpers for exporters and persistence.
pub use serialization::{
    manager_from_bytes, manager_from_json, manager_to_bytes, manager_to_json, view_to_bytes,
    view_to_json, ExportedEdge, ExportedNode, ExportedView,
};
