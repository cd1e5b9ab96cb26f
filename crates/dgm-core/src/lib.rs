#![deny(missing_docs)]
#![doc = "Identifiers, id allocation and error types for the DGM diagram hypergraph model."]

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod allocator;
pub mod errors;
pub mod rng;
pub mod schema;

pub use allocator::IdAllocator;
pub use errors::{DiagramError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};
pub use schema::SchemaVersion;

/// Identifier for a vertex within a diagram canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for a hyperedge within a diagram canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for a canvas. Canvas ids live outside the node/edge namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanvasId(u64);

impl CanvasId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Tagged identifier for either kind of element in the shared id namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementId {
    /// The id denotes a node.
    Node(NodeId),
    /// The id denotes a hyperedge.
    Edge(EdgeId),
}

impl ElementId {
    /// Returns the raw shared-namespace integer.
    pub fn raw(&self) -> u64 {
        match self {
            ElementId::Node(id) => id.as_raw(),
            ElementId::Edge(id) => id.as_raw(),
        }
    }

    /// Returns a short label for the element kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ElementId::Node(_) => "node",
            ElementId::Edge(_) => "edge",
        }
    }
}

impl From<NodeId> for ElementId {
    fn from(id: NodeId) -> Self {
        ElementId::Node(id)
    }
}

impl From<EdgeId> for ElementId {
    fn from(id: EdgeId) -> Self {
        ElementId::Edge(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Node(id) => id.fmt(f),
            ElementId::Edge(id) => id.fmt(f),
        }
    }
}
