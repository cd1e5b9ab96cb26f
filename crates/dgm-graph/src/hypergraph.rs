use std::collections::BTreeSet;

use dgm_core::{CanvasId, EdgeId, NodeId};

use crate::hyper_edge::{EdgeMap, HyperEdge};
use crate::node::{Node, NodeMap};

/// Point-in-time view of one connected component of a canvas.
///
/// Views are produced by the manager's component queries and hold copies of
/// the nodes and edges they cover, so later edits to the registry do not show
/// through. `sources` holds every node of the view without a parent node in
/// the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypergraph {
    canvas_id: CanvasId,
    nodes: NodeMap,
    edges: EdgeMap,
    sources: NodeMap,
}

impl Hypergraph {
    pub(crate) fn empty(canvas_id: CanvasId) -> Self {
        Self {
            canvas_id,
            nodes: NodeMap::new(),
            edges: EdgeMap::new(),
            sources: NodeMap::new(),
        }
    }

    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id(), node);
    }

    pub(crate) fn insert_edge(&mut self, edge: HyperEdge) {
        self.edges.insert(edge.id(), edge);
    }

    /// Recomputes `sources` from the nodes and edges currently in the view.
    pub(crate) fn classify_sources(&mut self) {
        let sources: NodeMap = self
            .nodes
            .values()
            .filter(|node| {
                node.parents(&self.edges)
                    .iter()
                    .all(|parent| !self.nodes.contains_key(parent))
            })
            .map(|node| (node.id(), node.clone()))
            .collect();
        self.sources = sources;
    }

    /// Returns the canvas this view was extracted from.
    pub fn canvas_id(&self) -> CanvasId {
        self.canvas_id
    }

    /// Returns the nodes of the view.
    pub fn nodes(&self) -> &NodeMap {
        &self.nodes
    }

    /// Returns the hyperedges of the view.
    pub fn edges(&self) -> &EdgeMap {
        &self.edges
    }

    /// Returns the nodes of the view that have no parent within it.
    pub fn sources(&self) -> &NodeMap {
        &self.sources
    }

    /// Looks up a node of the view.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a hyperedge of the view.
    pub fn edge(&self, id: EdgeId) -> Option<&HyperEdge> {
        self.edges.get(&id)
    }

    /// Returns whether the view covers the node.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns whether the view covers the hyperedge.
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Returns the sorted node identifiers of the view.
    pub fn node_ids(&self) -> BTreeSet<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Returns the sorted edge identifiers of the view.
    pub fn edge_ids(&self) -> BTreeSet<EdgeId> {
        self.edges.keys().copied().collect()
    }

    /// Returns the sorted source node identifiers of the view.
    pub fn source_ids(&self) -> BTreeSet<NodeId> {
        self.sources.keys().copied().collect()
    }

    /// Returns the number of nodes and edges in the view.
    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Returns whether the view holds neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Returns the parents of `id` restricted to nodes inside the view.
    pub fn parents_of(&self, id: NodeId) -> Option<BTreeSet<NodeId>> {
        let node = self.nodes.get(&id)?;
        Some(
            node.parents(&self.edges)
                .into_iter()
                .filter(|parent| self.nodes.contains_key(parent))
                .collect(),
        )
    }

    /// Merges several views into one.
    ///
    /// The canvas of the first view wins when views from different canvases
    /// are combined. Returns `None` for an empty input.
    pub fn combine<I>(views: I) -> Option<Hypergraph>
    where
        I: IntoIterator<Item = Hypergraph>,
    {
        let mut views = views.into_iter();
        let mut combined = views.next()?;
        for view in views {
            combined.nodes.extend(view.nodes);
            combined.edges.extend(view.edges);
        }
        combined.classify_sources();
        Some(combined)
    }
}
