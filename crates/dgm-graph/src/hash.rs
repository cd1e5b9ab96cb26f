use sha2::{Digest, Sha256};

use crate::hypergraph::Hypergraph;

/// Computes the canonical structural hash of a component view.
///
/// The hash covers the canvas, every node with its ordered port lists and
/// union partners, and every edge with its ordered endpoint lists. Views with
/// the same structure hash equal regardless of when they were extracted.
pub fn canonical_hash(view: &Hypergraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"canvas");
    hasher.update(view.canvas_id().as_raw().to_le_bytes());

    hasher.update(b"nodes");
    hasher.update((view.nodes().len() as u64).to_le_bytes());
    for node in view.nodes().values() {
        hasher.update(node.id().as_raw().to_le_bytes());
        hasher.update(node.canvas_id().as_raw().to_le_bytes());
        update_ids(node.inputs().iter().map(|id| id.as_raw()), &mut hasher);
        update_ids(node.outputs().iter().map(|id| id.as_raw()), &mut hasher);
        update_ids(
            node.directly_connected().iter().map(|id| id.as_raw()),
            &mut hasher,
        );
    }

    hasher.update(b"edges");
    hasher.update((view.edges().len() as u64).to_le_bytes());
    for edge in view.edges().values() {
        hasher.update(edge.id().as_raw().to_le_bytes());
        hasher.update(edge.canvas_id().as_raw().to_le_bytes());
        update_ids(edge.sources().iter().map(|id| id.as_raw()), &mut hasher);
        update_ids(edge.targets().iter().map(|id| id.as_raw()), &mut hasher);
    }

    hasher.update(b"sources");
    update_ids(view.sources().keys().map(|id| id.as_raw()), &mut hasher);

    format!("{:x}", hasher.finalize())
}

fn update_ids<I>(values: I, hasher: &mut Sha256)
where
    I: ExactSizeIterator<Item = u64>,
{
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_le_bytes());
    }
}
