use std::collections::{BTreeMap, BTreeSet};

use dgm_core::{CanvasId, EdgeId, NodeId};

use crate::hyper_edge::HyperEdge;

/// Map of live nodes keyed by identifier.
pub type NodeMap = BTreeMap<NodeId, Node>;

/// A vertex of the diagram: a wire endpoint, spider or boundary port.
///
/// `inputs` and `outputs` are ordered because their order encodes port
/// positions. A node is listed as a target of every edge in `inputs` and as a
/// source of every edge in `outputs`; the manager maintains both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    canvas_id: CanvasId,
    inputs: Vec<EdgeId>,
    outputs: Vec<EdgeId>,
    directly_connected: BTreeSet<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, canvas_id: CanvasId) -> Self {
        Self {
            id,
            canvas_id,
            inputs: Vec::new(),
            outputs: Vec::new(),
            directly_connected: BTreeSet::new(),
        }
    }

    pub(crate) fn from_parts(
        id: NodeId,
        canvas_id: CanvasId,
        inputs: Vec<EdgeId>,
        outputs: Vec<EdgeId>,
        directly_connected: BTreeSet<NodeId>,
    ) -> Self {
        Self {
            id,
            canvas_id,
            inputs,
            outputs,
            directly_connected,
        }
    }

    /// Returns the node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the canvas the node lives on.
    pub fn canvas_id(&self) -> CanvasId {
        self.canvas_id
    }

    /// Returns the incoming hyperedges in port order.
    pub fn inputs(&self) -> &[EdgeId] {
        &self.inputs
    }

    /// Returns the outgoing hyperedges in port order.
    pub fn outputs(&self) -> &[EdgeId] {
        &self.outputs
    }

    /// Returns the nodes declared identity-equivalent through a union.
    pub fn directly_connected(&self) -> &BTreeSet<NodeId> {
        &self.directly_connected
    }

    /// Returns whether the node has no edges and no union partners.
    pub fn is_isolated(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty() && self.directly_connected.is_empty()
    }

    /// Returns every incident edge, outputs first, without duplicates.
    pub fn incident_edges(&self) -> Vec<EdgeId> {
        let mut seen = BTreeSet::new();
        self.outputs
            .iter()
            .chain(self.inputs.iter())
            .copied()
            .filter(|edge| seen.insert(*edge))
            .collect()
    }

    /// Returns the nodes that are a source of some edge this node is a target of.
    ///
    /// Edges missing from `edges` are ignored, so the same call answers both for
    /// the full registry and for a [`Hypergraph`](crate::Hypergraph) view.
    pub fn parents(&self, edges: &BTreeMap<EdgeId, HyperEdge>) -> BTreeSet<NodeId> {
        self.inputs
            .iter()
            .filter_map(|edge| edges.get(edge))
            .flat_map(|edge| edge.sources().iter().copied())
            .collect()
    }

    /// Returns the nodes that are a target of some edge this node is a source of.
    pub fn children(&self, edges: &BTreeMap<EdgeId, HyperEdge>) -> BTreeSet<NodeId> {
        self.outputs
            .iter()
            .filter_map(|edge| edges.get(edge))
            .flat_map(|edge| edge.targets().iter().copied())
            .collect()
    }

    pub(crate) fn push_input(&mut self, edge: EdgeId) {
        self.inputs.push(edge);
    }

    pub(crate) fn push_output(&mut self, edge: EdgeId) {
        self.outputs.push(edge);
    }

    /// Drops every occurrence of `edge` from both port lists.
    pub(crate) fn forget_edge(&mut self, edge: EdgeId) {
        self.inputs.retain(|id| *id != edge);
        self.outputs.retain(|id| *id != edge);
    }

    /// Rewrites `old` to `new` in place so port positions survive a rename.
    pub(crate) fn replace_edge(&mut self, old: EdgeId, new: EdgeId) {
        for slot in self.inputs.iter_mut().chain(self.outputs.iter_mut()) {
            if *slot == old {
                *slot = new;
            }
        }
    }

    pub(crate) fn link(&mut self, other: NodeId) -> bool {
        self.directly_connected.insert(other)
    }

    pub(crate) fn unlink(&mut self, other: NodeId) -> bool {
        self.directly_connected.remove(&other)
    }
}
