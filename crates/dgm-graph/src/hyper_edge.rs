use std::collections::BTreeMap;

use dgm_core::{CanvasId, EdgeId, NodeId};

/// Map of live hyperedges keyed by identifier.
pub type EdgeMap = BTreeMap<EdgeId, HyperEdge>;

/// A many-to-many connector between ordered source and target nodes.
///
/// Either side may be empty. The same node may appear more than once on a side
/// when it occupies several ports of the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperEdge {
    id: EdgeId,
    canvas_id: CanvasId,
    sources: Vec<NodeId>,
    targets: Vec<NodeId>,
}

impl HyperEdge {
    pub(crate) fn new(id: EdgeId, canvas_id: CanvasId) -> Self {
        Self {
            id,
            canvas_id,
            sources: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        id: EdgeId,
        canvas_id: CanvasId,
        sources: Vec<NodeId>,
        targets: Vec<NodeId>,
    ) -> Self {
        Self {
            id,
            canvas_id,
            sources,
            targets,
        }
    }

    /// Returns the edge identifier.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns the canvas the edge lives on.
    pub fn canvas_id(&self) -> CanvasId {
        self.canvas_id
    }

    /// Returns the source nodes in port order.
    pub fn sources(&self) -> &[NodeId] {
        &self.sources
    }

    /// Returns the target nodes in port order.
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Returns the combined number of source and target slots.
    pub fn arity(&self) -> usize {
        self.sources.len() + self.targets.len()
    }

    /// Returns whether the edge no longer touches any node.
    pub fn is_dangling(&self) -> bool {
        self.sources.is_empty() && self.targets.is_empty()
    }

    /// Iterates over targets then sources, the order traversal visits them in.
    pub fn endpoints(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.targets.iter().chain(self.sources.iter()).copied()
    }

    pub(crate) fn push_source(&mut self, node: NodeId) {
        self.sources.push(node);
    }

    pub(crate) fn push_target(&mut self, node: NodeId) {
        self.targets.push(node);
    }

    /// Drops every occurrence of `node` from both sides.
    pub(crate) fn forget_node(&mut self, node: NodeId) {
        self.sources.retain(|id| *id != node);
        self.targets.retain(|id| *id != node);
    }

    pub(crate) fn set_id(&mut self, id: EdgeId) {
        self.id = id;
    }
}
