use dgm_core::SchemaVersion;

/// Configuration options that control the behaviour of
/// [`HypergraphManager`](crate::HypergraphManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Whether node- and edge-seeded queries also expand the directly-connected
    /// relation. Canvas-wide queries always expand it.
    pub follow_union_in_seeded_queries: bool,
    /// Whether traversal stays on the canvas of its seed.
    pub scope_to_canvas: bool,
    /// Schema version stored alongside serialized payloads.
    pub schema_version: SchemaVersion,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            follow_union_in_seeded_queries: false,
            scope_to_canvas: true,
            schema_version: SchemaVersion::new(1, 0, 0),
        }
    }
}

impl ManagerConfig {
    /// Returns whether a query of the given kind expands the union relation.
    pub fn follows_union(&self, seeding: Seeding) -> bool {
        match seeding {
            Seeding::Canvas => true,
            Seeding::Node | Seeding::Edge => self.follow_union_in_seeded_queries,
        }
    }
}

/// Describes where a component query starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// A single node.
    Node,
    /// A single hyperedge.
    Edge,
    /// Every node of a canvas.
    Canvas,
}
