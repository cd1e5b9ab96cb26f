use std::collections::BTreeSet;

use dgm_core::IdAllocator;
use proptest::prelude::*;

#[test]
fn allocation_starts_at_zero_and_skips_reserved_ids() {
    let mut allocator = IdAllocator::new();
    allocator.reserve(1);
    allocator.reserve(2);
    allocator.reserve(4);

    assert_eq!(allocator.allocate(), Ok(0));
    assert_eq!(allocator.allocate(), Ok(3));
    assert_eq!(allocator.allocate(), Ok(5));
    assert!(allocator.is_reserved(5));
    assert_eq!(allocator.reserved_count(), 6);
}

#[test]
fn typed_allocation_shares_one_namespace() {
    let mut allocator = IdAllocator::new();
    let node = allocator.allocate_node().expect("node id");
    let edge = allocator.allocate_edge().expect("edge id");
    assert_eq!(node.as_raw(), 0);
    assert_eq!(edge.as_raw(), 1);
}

#[test]
fn allocator_state_round_trips_json() {
    let mut allocator = IdAllocator::new();
    allocator.reserve(10);
    allocator.allocate().expect("allocate");
    let json = serde_json::to_string(&allocator).expect("serialize");
    let mut restored: IdAllocator = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, allocator);
    assert_eq!(restored.allocate(), Ok(1));
}

#[test]
fn deserialized_cursor_at_the_top_reports_exhaustion() {
    let json = format!("{{\"next\":{},\"reserved\":[]}}", u64::MAX);
    let mut allocator: IdAllocator = serde_json::from_str(&json).expect("deserialize");
    assert!(allocator.is_exhausted());
    let err = allocator.allocate().unwrap_err();
    assert_eq!(err.info().code, "id-space-exhausted");
    assert_eq!(allocator.cursor(), u64::MAX);
}

proptest! {
    #[test]
    fn allocated_ids_never_repeat_or_hit_reservations(
        reservations in proptest::collection::vec(0u64..64, 0..48),
        rounds in 1usize..64,
    ) {
        let mut allocator = IdAllocator::new();
        for id in &reservations {
            allocator.reserve(*id);
        }
        let reserved: BTreeSet<u64> = reservations.iter().copied().collect();
        let mut seen = BTreeSet::new();
        for _ in 0..rounds {
            let id = allocator.allocate().expect("allocate");
            prop_assert!(!reserved.contains(&id));
            prop_assert!(seen.insert(id));
        }
    }
}
