use dgm_core::rng::RngHandle;
use dgm_core::{CanvasId, DiagramError, EdgeId, NodeId};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::manager::HypergraphManager;

/// Shape of a randomly generated diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramShape {
    /// Number of nodes to create.
    pub nodes: usize,
    /// Number of hyperedges to create.
    pub edges: usize,
    /// Number of union declarations between random node pairs.
    pub unions: usize,
    /// Maximum number of sources and of targets per hyperedge.
    pub max_endpoints: usize,
}

/// Populates `canvas` with a random diagram and returns the created node ids.
///
/// Node and edge ids come from the manager's allocator, so the generator can
/// be run repeatedly against the same manager and on several canvases.
pub fn gen_random_diagram(
    manager: &mut HypergraphManager,
    canvas: CanvasId,
    shape: DiagramShape,
    rng: &mut RngHandle,
) -> Result<Vec<NodeId>, DiagramError> {
    if shape.nodes == 0 {
        return Ok(Vec::new());
    }
    let max_endpoints = shape.max_endpoints.max(1);

    let mut nodes = Vec::with_capacity(shape.nodes);
    for _ in 0..shape.nodes {
        nodes.push(manager.create_node_auto(canvas)?.id());
    }

    for _ in 0..shape.edges {
        let edge = EdgeId::from_raw(manager.allocate_id()?);
        let sources = rng.gen_range(1..=max_endpoints);
        let targets = rng.gen_range(1..=max_endpoints);
        for _ in 0..sources {
            if let Some(node) = nodes.choose(rng) {
                manager.connect_output(*node, edge)?;
            }
        }
        for _ in 0..targets {
            if let Some(node) = nodes.choose(rng) {
                manager.connect_input(*node, edge)?;
            }
        }
    }

    for _ in 0..shape.unions {
        let (Some(a), Some(b)) = (nodes.choose(rng), nodes.choose(rng)) else {
            break;
        };
        manager.union(*a, *b)?;
    }

    Ok(nodes)
}
