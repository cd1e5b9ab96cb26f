//! Allocation of identifiers from the namespace shared by nodes and hyperedges.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{DiagramError, EdgeId, NodeId};

/// Generator of unique identifiers for nodes and hyperedges.
///
/// Identifiers are handed out in increasing order, skipping every value that
/// was previously reserved. Ids loaded from a persisted diagram must be passed
/// to [`IdAllocator::reserve`] before new elements are created so that
/// [`IdAllocator::allocate`] never returns them. Once returned or reserved, an
/// id is never handed out again by the same allocator. `u64::MAX` is never
/// allocated; it only marks an exhausted cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
    reserved: BTreeSet<u64>,
}

impl IdAllocator {
    /// Creates an allocator whose first id is `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused identifier and marks it reserved.
    ///
    /// Fails with an `id-space-exhausted` invariant error once the cursor has
    /// reached `u64::MAX`.
    pub fn allocate(&mut self) -> Result<u64, DiagramError> {
        loop {
            let candidate = self.next;
            self.next = candidate
                .checked_add(1)
                .ok_or_else(|| DiagramError::id_space_exhausted(candidate))?;
            if self.reserved.insert(candidate) {
                return Ok(candidate);
            }
        }
    }

    /// Allocates a fresh identifier typed as a node id.
    pub fn allocate_node(&mut self) -> Result<NodeId, DiagramError> {
        self.allocate().map(NodeId::from_raw)
    }

    /// Allocates a fresh identifier typed as an edge id.
    pub fn allocate_edge(&mut self) -> Result<EdgeId, DiagramError> {
        self.allocate().map(EdgeId::from_raw)
    }

    /// Returns whether the cursor has reached the end of the id range.
    pub fn is_exhausted(&self) -> bool {
        self.next == u64::MAX
    }

    /// Marks `id` as in use without moving the allocation cursor.
    ///
    /// Returns `false` when the id was already reserved.
    pub fn reserve(&mut self, id: u64) -> bool {
        self.reserved.insert(id)
    }

    /// Returns whether `id` has been allocated or reserved.
    pub fn is_reserved(&self, id: u64) -> bool {
        self.reserved.contains(&id)
    }

    /// Returns the number of ids allocated or reserved so far.
    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }

    /// Returns the value the next probe will start from.
    pub fn cursor(&self) -> u64 {
        self.next
    }
}
