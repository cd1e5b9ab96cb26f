use std::collections::BTreeSet;

use dgm_core::rng::RngHandle;
use dgm_core::{CanvasId, EdgeId, NodeId};
use dgm_graph::{canonical_hash, gen_random_diagram, DiagramShape, HypergraphManager};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Create { id: u64, canvas: u64 },
    ConnectInput { node: u64, edge: u64 },
    ConnectOutput { node: u64, edge: u64 },
    Union { node: u64, other: u64 },
    RemoveNode { id: u64 },
    RemoveEdge { id: u64 },
    Rename { old: u64, new: u64 },
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (0u64..24, 0u64..3).prop_map(|(id, canvas)| Edit::Create { id, canvas }),
        3 => (0u64..24, 0u64..24).prop_map(|(node, edge)| Edit::ConnectInput { node, edge }),
        3 => (0u64..24, 0u64..24).prop_map(|(node, edge)| Edit::ConnectOutput { node, edge }),
        2 => (0u64..24, 0u64..24).prop_map(|(node, other)| Edit::Union { node, other }),
        1 => (0u64..24).prop_map(|id| Edit::RemoveNode { id }),
        1 => (0u64..24).prop_map(|id| Edit::RemoveEdge { id }),
        1 => (0u64..24, 0u64..24).prop_map(|(old, new)| Edit::Rename { old, new }),
    ]
}

fn apply(manager: &mut HypergraphManager, edit: &Edit) {
    let _ = match *edit {
        Edit::Create { id, canvas } => manager
            .create_node(NodeId::from_raw(id), CanvasId::from_raw(canvas))
            .map(|_| ()),
        Edit::ConnectInput { node, edge } => manager
            .connect_input(NodeId::from_raw(node), EdgeId::from_raw(edge))
            .map(|_| ()),
        Edit::ConnectOutput { node, edge } => manager
            .connect_output(NodeId::from_raw(node), EdgeId::from_raw(edge))
            .map(|_| ()),
        Edit::Union { node, other } => {
            manager.union(NodeId::from_raw(node), NodeId::from_raw(other))
        }
        Edit::RemoveNode { id } => {
            manager.remove_node(NodeId::from_raw(id));
            Ok(())
        }
        Edit::RemoveEdge { id } => {
            manager.remove_edge(EdgeId::from_raw(id));
            Ok(())
        }
        Edit::Rename { old, new } => {
            manager.rename_edge(EdgeId::from_raw(old), EdgeId::from_raw(new))
        }
    };
}

fn assert_unique_ids(manager: &HypergraphManager) {
    let nodes: BTreeSet<u64> = manager.nodes().map(|node| node.id().as_raw()).collect();
    let edges: BTreeSet<u64> = manager.edges().map(|edge| edge.id().as_raw()).collect();
    assert!(nodes.is_disjoint(&edges));
}

fn assert_bidirectional(manager: &HypergraphManager) {
    for node in manager.nodes() {
        for edge_id in node.outputs() {
            let edge = manager.lookup_edge(*edge_id).unwrap();
            assert!(edge.sources().contains(&node.id()));
        }
        for edge_id in node.inputs() {
            let edge = manager.lookup_edge(*edge_id).unwrap();
            assert!(edge.targets().contains(&node.id()));
        }
        for partner in node.directly_connected() {
            let partner = manager.lookup_node(*partner).unwrap();
            assert!(partner.directly_connected().contains(&node.id()));
        }
    }
    for edge in manager.edges() {
        for source in edge.sources() {
            assert!(manager.lookup_node(*source).unwrap().outputs().contains(&edge.id()));
        }
        for target in edge.targets() {
            assert!(manager.lookup_node(*target).unwrap().inputs().contains(&edge.id()));
        }
    }
}

fn assert_canvas_partition(manager: &HypergraphManager, canvas: CanvasId) {
    let components = manager.components_of_canvas(canvas);
    let mut covered = BTreeSet::new();
    for view in &components {
        assert!(!view.nodes().is_empty());
        for id in view.node_ids() {
            assert!(covered.insert(id), "node {id} appears in two components");
        }
        for node in view.nodes().values() {
            let has_parent = view
                .parents_of(node.id())
                .map(|parents| !parents.is_empty())
                .unwrap_or(false);
            assert_eq!(view.sources().contains_key(&node.id()), !has_parent);
        }
    }
    assert_eq!(covered, manager.canvas_nodes(canvas));
}

proptest! {
    #[test]
    fn random_edit_sequences_keep_the_registry_consistent(
        edits in proptest::collection::vec(edit(), 0..80),
    ) {
        let mut manager = HypergraphManager::default();
        for edit in &edits {
            apply(&mut manager, edit);
            prop_assert!(manager.check_consistency().is_ok(), "after {:?}", edit);
        }
        assert_unique_ids(&manager);
        assert_bidirectional(&manager);
        for canvas in 0..3 {
            assert_canvas_partition(&manager, CanvasId::from_raw(canvas));
        }
        for node in manager.nodes().map(|node| node.id()).collect::<Vec<_>>() {
            let first = manager.component_of_node(node).unwrap();
            let second = manager.component_of_node(node).unwrap();
            prop_assert_eq!(first.node_ids(), second.node_ids());
            prop_assert_eq!(first.edge_ids(), second.edge_ids());
            prop_assert_eq!(canonical_hash(&first), canonical_hash(&second));
        }
    }

    #[test]
    fn generated_diagrams_partition_their_canvas(
        seed in any::<u64>(),
        nodes in 1usize..40,
        edges in 0usize..30,
        unions in 0usize..10,
    ) {
        let mut manager = HypergraphManager::default();
        let master = RngHandle::from_seed(seed);
        let shape = DiagramShape { nodes, edges, unions, max_endpoints: 3 };
        for canvas in 0..2u64 {
            let mut rng = master.substream(canvas);
            let created = gen_random_diagram(
                &mut manager,
                CanvasId::from_raw(canvas),
                shape,
                &mut rng,
            ).unwrap();
            prop_assert_eq!(created.len(), nodes);
        }
        prop_assert!(manager.check_consistency().is_ok());
        assert_unique_ids(&manager);
        for canvas in 0..2u64 {
            assert_canvas_partition(&manager, CanvasId::from_raw(canvas));
        }
    }
}
