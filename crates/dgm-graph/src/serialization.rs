use std::collections::BTreeSet;

use dgm_core::{CanvasId, DiagramError, EdgeId, ErrorInfo, IdAllocator, NodeId, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ManagerConfig;
use crate::hyper_edge::{EdgeMap, HyperEdge};
use crate::hypergraph::Hypergraph;
use crate::manager::HypergraphManager;
use crate::node::{Node, NodeMap};

/// Serializes a component view to a JSON string for export.
pub fn view_to_json(view: &Hypergraph) -> Result<String, DiagramError> {
    serde_json::to_string_pretty(&ExportedView::from_view(view))
        .map_err(|err| DiagramError::serde("serialize-json", err.to_string()))
}

/// Serializes a component view to a compact binary representation using `bincode`.
pub fn view_to_bytes(view: &Hypergraph) -> Result<Vec<u8>, DiagramError> {
    bincode::serialize(&ExportedView::from_view(view))
        .map_err(|err| DiagramError::serde("serialize-bytes", err.to_string()))
}

/// Serializes the whole registry of a manager to a JSON string.
pub fn manager_to_json(manager: &HypergraphManager) -> Result<String, DiagramError> {
    serde_json::to_string_pretty(&RegistrySnapshot::from_manager(manager))
        .map_err(|err| DiagramError::serde("serialize-json", err.to_string()))
}

/// Restores a manager from its JSON representation.
pub fn manager_from_json(json: &str) -> Result<HypergraphManager, DiagramError> {
    let snapshot: RegistrySnapshot = serde_json::from_str(json)
        .map_err(|err| DiagramError::serde("deserialize-json", err.to_string()))?;
    snapshot.into_manager()
}

/// Serializes the whole registry of a manager using `bincode`.
pub fn manager_to_bytes(manager: &HypergraphManager) -> Result<Vec<u8>, DiagramError> {
    bincode::serialize(&RegistrySnapshot::from_manager(manager))
        .map_err(|err| DiagramError::serde("serialize-bytes", err.to_string()))
}

/// Restores a manager from its binary representation.
pub fn manager_from_bytes(bytes: &[u8]) -> Result<HypergraphManager, DiagramError> {
    let snapshot: RegistrySnapshot = bincode::deserialize(bytes)
        .map_err(|err| DiagramError::serde("deserialize-bytes", err.to_string()))?;
    snapshot.into_manager()
}

/// Read-only export of a component view. Endpoint and port lists keep the
/// order they have in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedView {
    /// Canvas the view was extracted from.
    pub canvas_id: u64,
    /// Nodes of the view in id order.
    pub nodes: Vec<ExportedNode>,
    /// Hyperedges of the view in id order.
    pub edges: Vec<ExportedEdge>,
    /// Ids of the source nodes of the view.
    pub sources: Vec<u64>,
}

impl ExportedView {
    /// Builds the export form of a view.
    pub fn from_view(view: &Hypergraph) -> Self {
        Self {
            canvas_id: view.canvas_id().as_raw(),
            nodes: view.nodes().values().map(ExportedNode::from_node).collect(),
            edges: view.edges().values().map(ExportedEdge::from_edge).collect(),
            sources: view.source_ids().iter().map(NodeId::as_raw).collect(),
        }
    }
}

/// Export form of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedNode {
    /// Node id.
    pub id: u64,
    /// Canvas id.
    pub canvas_id: u64,
    /// Incoming edge ids in port order.
    pub inputs: Vec<u64>,
    /// Outgoing edge ids in port order.
    pub outputs: Vec<u64>,
    /// Union partners in id order.
    pub directly_connected: Vec<u64>,
}

impl ExportedNode {
    fn from_node(node: &Node) -> Self {
        Self {
            id: node.id().as_raw(),
            canvas_id: node.canvas_id().as_raw(),
            inputs: node.inputs().iter().map(EdgeId::as_raw).collect(),
            outputs: node.outputs().iter().map(EdgeId::as_raw).collect(),
            directly_connected: node.directly_connected().iter().map(NodeId::as_raw).collect(),
        }
    }

    fn into_node(self) -> Node {
        Node::from_parts(
            NodeId::from_raw(self.id),
            CanvasId::from_raw(self.canvas_id),
            self.inputs.into_iter().map(EdgeId::from_raw).collect(),
            self.outputs.into_iter().map(EdgeId::from_raw).collect(),
            self.directly_connected
                .into_iter()
                .map(NodeId::from_raw)
                .collect::<BTreeSet<_>>(),
        )
    }
}

/// Export form of a hyperedge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedEdge {
    /// Edge id.
    pub id: u64,
    /// Canvas id.
    pub canvas_id: u64,
    /// Source node ids in port order.
    pub sources: Vec<u64>,
    /// Target node ids in port order.
    pub targets: Vec<u64>,
}

impl ExportedEdge {
    fn from_edge(edge: &HyperEdge) -> Self {
        Self {
            id: edge.id().as_raw(),
            canvas_id: edge.canvas_id().as_raw(),
            sources: edge.sources().iter().map(NodeId::as_raw).collect(),
            targets: edge.targets().iter().map(NodeId::as_raw).collect(),
        }
    }

    fn into_edge(self) -> HyperEdge {
        HyperEdge::from_parts(
            EdgeId::from_raw(self.id),
            CanvasId::from_raw(self.canvas_id),
            self.sources.into_iter().map(NodeId::from_raw).collect(),
            self.targets.into_iter().map(NodeId::from_raw).collect(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistrySnapshot {
    schema_version: SchemaVersion,
    follow_union_in_seeded_queries: bool,
    scope_to_canvas: bool,
    allocator: IdAllocator,
    nodes: Vec<ExportedNode>,
    edges: Vec<ExportedEdge>,
}

impl RegistrySnapshot {
    fn from_manager(manager: &HypergraphManager) -> Self {
        let config = manager.config();
        Self {
            schema_version: config.schema_version,
            follow_union_in_seeded_queries: config.follow_union_in_seeded_queries,
            scope_to_canvas: config.scope_to_canvas,
            allocator: manager.allocator().clone(),
            nodes: manager.nodes().map(ExportedNode::from_node).collect(),
            edges: manager.edges().map(ExportedEdge::from_edge).collect(),
        }
    }

    fn into_manager(self) -> Result<HypergraphManager, DiagramError> {
        let supported = ManagerConfig::default().schema_version;
        if !supported.reads(&self.schema_version) {
            return Err(DiagramError::serde(
                "unsupported-schema",
                "snapshot schema version cannot be read",
            )
            .with_context("found", self.schema_version)
            .with_context("supported", supported));
        }
        let config = ManagerConfig {
            follow_union_in_seeded_queries: self.follow_union_in_seeded_queries,
            scope_to_canvas: self.scope_to_canvas,
            schema_version: self.schema_version,
        };

        let mut allocator = self.allocator;
        if allocator.is_exhausted() {
            return Err(DiagramError::serde(
                "inconsistent-snapshot",
                "allocator cursor cannot advance",
            )
            .with_context("cursor", allocator.cursor()));
        }
        let mut nodes = NodeMap::new();
        let mut edges = EdgeMap::new();
        let mut seen = BTreeSet::new();
        for node in self.nodes {
            if !seen.insert(node.id) {
                return Err(duplicate_in_snapshot(node.id));
            }
            allocator.reserve(node.id);
            let node = node.into_node();
            nodes.insert(node.id(), node);
        }
        for edge in self.edges {
            if !seen.insert(edge.id) {
                return Err(duplicate_in_snapshot(edge.id));
            }
            allocator.reserve(edge.id);
            let edge = edge.into_edge();
            edges.insert(edge.id(), edge);
        }

        let manager = HypergraphManager::from_parts(config, allocator, nodes, edges);
        manager.check_consistency().map_err(|err| {
            let mut info = err.info().clone();
            info.code = "inconsistent-snapshot".into();
            DiagramError::Serde(info)
        })?;
        debug!(
            nodes = manager.node_count(),
            edges = manager.edge_count(),
            "hypergraph.snapshot.restore"
        );
        Ok(manager)
    }
}

fn duplicate_in_snapshot(id: u64) -> DiagramError {
    DiagramError::DuplicateId(ErrorInfo::new(
        "duplicate-id",
        "snapshot lists the same id twice",
    ))
    .with_context("id", id)
}
