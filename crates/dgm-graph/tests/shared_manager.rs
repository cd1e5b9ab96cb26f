use std::thread;

use dgm_core::{CanvasId, EdgeId, NodeId};
use dgm_graph::{ManagerConfig, SharedHypergraphManager};

#[test]
fn concurrent_edits_and_queries_stay_consistent() {
    let shared = SharedHypergraphManager::new(ManagerConfig::default());
    let canvas = CanvasId::from_raw(0);

    let writers: Vec<_> = (0..4u64)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                for step in 0..50u64 {
                    let base = worker * 1_000 + step * 3;
                    shared.write(|manager| {
                        manager.create_node(NodeId::from_raw(base), canvas).unwrap();
                        manager.create_node(NodeId::from_raw(base + 1), canvas).unwrap();
                        manager
                            .connect_output(NodeId::from_raw(base), EdgeId::from_raw(base + 2))
                            .unwrap();
                        manager
                            .connect_input(NodeId::from_raw(base + 1), EdgeId::from_raw(base + 2))
                            .unwrap();
                    });
                }
            })
        })
        .collect();

    let reader = {
        let shared = shared.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                let components = shared.read(|manager| manager.components_of_canvas(canvas));
                for view in components {
                    assert!(view.nodes().len() == 2 || view.nodes().len() == 1);
                }
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    let guard = shared.lock();
    assert_eq!(guard.node_count(), 400);
    assert_eq!(guard.edge_count(), 200);
    assert_eq!(guard.components_of_canvas(canvas).len(), 200);
    guard.check_consistency().unwrap();
}

#[test]
fn independent_handles_share_nothing() {
    let first = SharedHypergraphManager::default();
    let second = SharedHypergraphManager::default();
    let alias = first.clone();

    first.write(|manager| {
        manager.create_node(NodeId::from_raw(0), CanvasId::from_raw(0)).unwrap();
    });

    assert!(alias.same_registry(&first));
    assert!(!second.same_registry(&first));
    assert_eq!(alias.read(|manager| manager.node_count()), 1);
    assert_eq!(second.read(|manager| manager.node_count()), 0);
    assert_eq!(second.write(|manager| manager.allocate_id()), Ok(0));
}
