use std::collections::BTreeSet;

use dgm_core::{CanvasId, DiagramError, EdgeId, ElementId, IdAllocator, NodeId};
use tracing::{debug, trace};

use crate::config::{ManagerConfig, Seeding};
use crate::hyper_edge::{EdgeMap, HyperEdge};
use crate::hypergraph::Hypergraph;
use crate::node::{Node, NodeMap};
use crate::traversal::Traversal;

/// Owner of the node and hyperedge registries of one diagram document.
///
/// Every structural edit goes through the manager, which keeps both sides of
/// each node/edge relation in step. Component queries recompute their result
/// from the registries on every call, so a view never reflects a stale
/// partition.
#[derive(Debug, Clone)]
pub struct HypergraphManager {
    config: ManagerConfig,
    allocator: IdAllocator,
    nodes: NodeMap,
    edges: EdgeMap,
}

impl HypergraphManager {
    /// Creates an empty manager with the provided configuration.
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            allocator: IdAllocator::new(),
            nodes: NodeMap::new(),
            edges: EdgeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        config: ManagerConfig,
        allocator: IdAllocator,
        nodes: NodeMap,
        edges: EdgeMap,
    ) -> Self {
        Self {
            config,
            allocator,
            nodes,
            edges,
        }
    }

    /// Returns the configuration used by this manager.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Returns the id allocator owned by this manager.
    pub fn allocator(&self) -> &IdAllocator {
        &self.allocator
    }

    /// Allocates a fresh identifier from the shared namespace.
    pub fn allocate_id(&mut self) -> Result<u64, DiagramError> {
        self.allocator.allocate()
    }

    /// Reserves an externally supplied identifier, e.g. one read from a file.
    pub fn reserve_id(&mut self, id: u64) -> bool {
        self.allocator.reserve(id)
    }

    /// Returns the live entity currently holding the raw identifier.
    pub fn holder_of(&self, raw: u64) -> Option<ElementId> {
        let node = NodeId::from_raw(raw);
        if self.nodes.contains_key(&node) {
            return Some(ElementId::Node(node));
        }
        let edge = EdgeId::from_raw(raw);
        if self.edges.contains_key(&edge) {
            return Some(ElementId::Edge(edge));
        }
        None
    }

    fn ensure_free(&self, raw: u64) -> Result<(), DiagramError> {
        match self.holder_of(raw) {
            Some(holder) => Err(DiagramError::duplicate(raw, holder)),
            None => Ok(()),
        }
    }

    /// Registers a new node under `id` on `canvas`.
    pub fn create_node(&mut self, id: NodeId, canvas: CanvasId) -> Result<&Node, DiagramError> {
        self.ensure_free(id.as_raw())?;
        self.allocator.reserve(id.as_raw());
        debug!(
            node = id.as_raw(),
            canvas = canvas.as_raw(),
            "hypergraph.node.create"
        );
        let node = self.nodes.entry(id).or_insert(Node::new(id, canvas));
        Ok(&*node)
    }

    /// Registers a new node on `canvas` under a freshly allocated id.
    pub fn create_node_auto(&mut self, canvas: CanvasId) -> Result<&Node, DiagramError> {
        let id = self.allocator.allocate_node()?;
        self.create_node(id, canvas)
    }

    /// Detaches and unregisters a node. Missing ids are ignored.
    ///
    /// The node is removed from the endpoint lists of every edge it touched
    /// and from the union set of every partner. Edges left without endpoints
    /// stay registered.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let Some(node) = self.nodes.remove(&id) else {
            trace!(node = id.as_raw(), "hypergraph.node.remove.missing");
            return None;
        };
        debug!(node = id.as_raw(), "hypergraph.node.remove");
        for edge in node.inputs().iter().chain(node.outputs().iter()) {
            if let Some(edge) = self.edges.get_mut(edge) {
                edge.forget_node(id);
            }
        }
        for partner in node.directly_connected() {
            if let Some(partner) = self.nodes.get_mut(partner) {
                partner.unlink(id);
            }
        }
        Some(node)
    }

    /// Detaches and unregisters a hyperedge. Missing ids are ignored.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<HyperEdge> {
        let Some(edge) = self.edges.remove(&id) else {
            trace!(edge = id.as_raw(), "hypergraph.edge.remove.missing");
            return None;
        };
        debug!(edge = id.as_raw(), "hypergraph.edge.remove");
        for node in edge.endpoints() {
            if let Some(node) = self.nodes.get_mut(&node) {
                node.forget_edge(id);
            }
        }
        Some(edge)
    }

    /// Moves a hyperedge from `old` to `new`, keeping its endpoint lists.
    ///
    /// A missing `old` is a no-op. Fails with `DuplicateId` when `new` already
    /// denotes a live node or edge. Every node referencing the edge has the id
    /// rewritten in place so its port order is unchanged.
    pub fn rename_edge(&mut self, old: EdgeId, new: EdgeId) -> Result<(), DiagramError> {
        if old == new || !self.edges.contains_key(&old) {
            return Ok(());
        }
        self.ensure_free(new.as_raw())?;
        let Some(mut edge) = self.edges.remove(&old) else {
            return Ok(());
        };
        debug!(old = old.as_raw(), new = new.as_raw(), "hypergraph.edge.rename");
        self.allocator.reserve(new.as_raw());
        let touched: BTreeSet<NodeId> = edge.endpoints().collect();
        for node in touched {
            if let Some(node) = self.nodes.get_mut(&node) {
                node.replace_edge(old, new);
            }
        }
        edge.set_id(new);
        self.edges.insert(new, edge);
        Ok(())
    }

    /// Declares two nodes identity-equivalent.
    ///
    /// The relation is recorded on both nodes; ids and edges are untouched.
    /// A node united with itself is left unchanged.
    pub fn union(&mut self, node: NodeId, other: NodeId) -> Result<(), DiagramError> {
        if !self.nodes.contains_key(&node) {
            return Err(DiagramError::unknown_node(node));
        }
        if !self.nodes.contains_key(&other) {
            return Err(DiagramError::unknown_node(other));
        }
        if node == other {
            return Ok(());
        }
        debug!(
            node = node.as_raw(),
            other = other.as_raw(),
            "hypergraph.node.union"
        );
        if let Some(record) = self.nodes.get_mut(&node) {
            record.link(other);
        }
        if let Some(record) = self.nodes.get_mut(&other) {
            record.link(node);
        }
        Ok(())
    }

    /// Appends `node` as a target of the edge `edge_id`, creating the edge on
    /// the node's canvas when it does not exist yet.
    pub fn connect_input(
        &mut self,
        node: NodeId,
        edge_id: EdgeId,
    ) -> Result<&HyperEdge, DiagramError> {
        self.prepare_connection(node, edge_id)?;
        debug!(
            node = node.as_raw(),
            edge = edge_id.as_raw(),
            "hypergraph.node.connect_input"
        );
        if let Some(record) = self.nodes.get_mut(&node) {
            record.push_input(edge_id);
        }
        let edge = self
            .edges
            .get_mut(&edge_id)
            .ok_or_else(|| DiagramError::unknown_edge(edge_id))?;
        edge.push_target(node);
        Ok(&*edge)
    }

    /// Appends `node` as a source of the edge `edge_id`, creating the edge on
    /// the node's canvas when it does not exist yet.
    pub fn connect_output(
        &mut self,
        node: NodeId,
        edge_id: EdgeId,
    ) -> Result<&HyperEdge, DiagramError> {
        self.prepare_connection(node, edge_id)?;
        debug!(
            node = node.as_raw(),
            edge = edge_id.as_raw(),
            "hypergraph.node.connect_output"
        );
        if let Some(record) = self.nodes.get_mut(&node) {
            record.push_output(edge_id);
        }
        let edge = self
            .edges
            .get_mut(&edge_id)
            .ok_or_else(|| DiagramError::unknown_edge(edge_id))?;
        edge.push_source(node);
        Ok(&*edge)
    }

    fn prepare_connection(&mut self, node: NodeId, edge_id: EdgeId) -> Result<(), DiagramError> {
        let canvas = self
            .nodes
            .get(&node)
            .map(|record| record.canvas_id())
            .ok_or_else(|| DiagramError::unknown_node(node))?;
        if self.edges.contains_key(&edge_id) {
            return Ok(());
        }
        self.ensure_free(edge_id.as_raw())?;
        self.allocator.reserve(edge_id.as_raw());
        debug!(
            edge = edge_id.as_raw(),
            canvas = canvas.as_raw(),
            "hypergraph.edge.create"
        );
        self.edges.insert(edge_id, HyperEdge::new(edge_id, canvas));
        Ok(())
    }

    /// Looks up a registered node.
    pub fn lookup_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a registered hyperedge.
    pub fn lookup_edge(&self, id: EdgeId) -> Option<&HyperEdge> {
        self.edges.get(&id)
    }

    /// Returns the parent nodes of a registered node.
    pub fn parents_of(&self, id: NodeId) -> Result<BTreeSet<NodeId>, DiagramError> {
        let node = self.nodes.get(&id).ok_or_else(|| DiagramError::unknown_node(id))?;
        Ok(node.parents(&self.edges))
    }

    /// Returns the child nodes of a registered node.
    pub fn children_of(&self, id: NodeId) -> Result<BTreeSet<NodeId>, DiagramError> {
        let node = self.nodes.get(&id).ok_or_else(|| DiagramError::unknown_node(id))?;
        Ok(node.children(&self.edges))
    }

    /// Iterates over all registered nodes in id order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Iterates over all registered hyperedges in id order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &HyperEdge> + '_ {
        self.edges.values()
    }

    /// Returns the number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of registered hyperedges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the ids of every node on `canvas`.
    pub fn canvas_nodes(&self, canvas: CanvasId) -> BTreeSet<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.canvas_id() == canvas)
            .map(Node::id)
            .collect()
    }

    fn traversal(&self, seeding: Seeding) -> Traversal<'_> {
        Traversal::new(
            &self.nodes,
            &self.edges,
            self.config.follows_union(seeding),
            self.config.scope_to_canvas,
        )
    }

    /// Returns the component reachable from a node.
    pub fn component_of_node(&self, id: NodeId) -> Result<Hypergraph, DiagramError> {
        let node = self.nodes.get(&id).ok_or_else(|| DiagramError::unknown_node(id))?;
        let mut visited = BTreeSet::new();
        Ok(self.traversal(Seeding::Node).collect(
            node.canvas_id(),
            [ElementId::Node(id)],
            &mut visited,
        ))
    }

    /// Returns the component reachable from a known root node.
    pub fn component_of_source_node(&self, id: NodeId) -> Result<Hypergraph, DiagramError> {
        self.component_of_node(id)
    }

    /// Returns the component reachable from a hyperedge.
    pub fn component_of_edge(&self, id: EdgeId) -> Result<Hypergraph, DiagramError> {
        let edge = self.edges.get(&id).ok_or_else(|| DiagramError::unknown_edge(id))?;
        let mut visited = BTreeSet::new();
        Ok(self.traversal(Seeding::Edge).collect(
            edge.canvas_id(),
            [ElementId::Edge(id)],
            &mut visited,
        ))
    }

    /// Partitions the nodes of `canvas` into connected components.
    ///
    /// Components follow edges and the union relation. They are returned in
    /// the order of their smallest node id; their node sets are disjoint and
    /// together cover every node on the canvas.
    pub fn components_of_canvas(&self, canvas: CanvasId) -> Vec<Hypergraph> {
        let traversal = self.traversal(Seeding::Canvas);
        let mut visited = BTreeSet::new();
        let mut components = Vec::new();
        for node in self.nodes.values() {
            if node.canvas_id() != canvas || visited.contains(&ElementId::Node(node.id())) {
                continue;
            }
            components.push(traversal.collect(canvas, [ElementId::Node(node.id())], &mut visited));
        }
        trace!(
            canvas = canvas.as_raw(),
            components = components.len(),
            "hypergraph.canvas.components"
        );
        components
    }

    /// Verifies that every node/edge reference is mirrored on the other side
    /// and that the union relation is symmetric.
    pub fn check_consistency(&self) -> Result<(), DiagramError> {
        for (id, node) in &self.nodes {
            if self.edges.contains_key(&EdgeId::from_raw(id.as_raw())) {
                return Err(DiagramError::inconsistent("id is live as both node and edge")
                    .with_context("id", id.as_raw()));
            }
            for edge_id in node.inputs().iter().chain(node.outputs().iter()) {
                let edge = self.edges.get(edge_id).ok_or_else(|| {
                    DiagramError::inconsistent("node references a missing edge")
                        .with_context("node", id.as_raw())
                        .with_context("edge", edge_id.as_raw())
                })?;
                let listed_in = count(node.inputs(), edge_id);
                let listed_out = count(node.outputs(), edge_id);
                if listed_in != count(edge.targets(), id) || listed_out != count(edge.sources(), id)
                {
                    return Err(DiagramError::inconsistent(
                        "node and edge disagree on their connection",
                    )
                    .with_context("node", id.as_raw())
                    .with_context("edge", edge_id.as_raw()));
                }
            }
            for partner in node.directly_connected() {
                if partner == id {
                    return Err(DiagramError::inconsistent("node is united with itself")
                        .with_context("node", id.as_raw()));
                }
                let mirrored = self
                    .nodes
                    .get(partner)
                    .map(|other| other.directly_connected().contains(id))
                    .unwrap_or(false);
                if !mirrored {
                    return Err(DiagramError::inconsistent("union relation is not symmetric")
                        .with_context("node", id.as_raw())
                        .with_context("partner", partner.as_raw()));
                }
            }
        }
        for (id, edge) in &self.edges {
            for node_id in edge.endpoints() {
                let node = self.nodes.get(&node_id).ok_or_else(|| {
                    DiagramError::inconsistent("edge references a missing node")
                        .with_context("edge", id.as_raw())
                        .with_context("node", node_id.as_raw())
                })?;
                if count(node.inputs(), id) != count(edge.targets(), &node_id)
                    || count(node.outputs(), id) != count(edge.sources(), &node_id)
                {
                    return Err(DiagramError::inconsistent(
                        "node and edge disagree on their connection",
                    )
                    .with_context("node", node_id.as_raw())
                    .with_context("edge", id.as_raw()));
                }
            }
        }
        Ok(())
    }
}

impl Default for HypergraphManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

fn count<T: PartialEq>(items: &[T], needle: &T) -> usize {
    items.iter().filter(|item| *item == needle).count()
}
