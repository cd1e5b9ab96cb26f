use std::collections::{BTreeSet, VecDeque};

use dgm_core::{CanvasId, ElementId};
use tracing::trace;

use crate::hyper_edge::EdgeMap;
use crate::hypergraph::Hypergraph;
use crate::node::NodeMap;

/// Breadth-first component extraction shared by every component query.
///
/// Nodes expand into their output then input edges, edges expand into their
/// targets then sources, and nodes additionally expand into their union
/// partners when `follow_union` is set. Elements are marked visited when they
/// are enqueued, so each one is materialized at most once per `visited` set.
pub(crate) struct Traversal<'a> {
    nodes: &'a NodeMap,
    edges: &'a EdgeMap,
    follow_union: bool,
    scope_to_canvas: bool,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(
        nodes: &'a NodeMap,
        edges: &'a EdgeMap,
        follow_union: bool,
        scope_to_canvas: bool,
    ) -> Self {
        Self {
            nodes,
            edges,
            follow_union,
            scope_to_canvas,
        }
    }

    /// Collects the component reachable from `seeds` into a view on `canvas`.
    ///
    /// Seeds already present in `visited` are skipped; every element reached is
    /// added to `visited` so consecutive calls produce disjoint views.
    pub(crate) fn collect<I>(
        &self,
        canvas: CanvasId,
        seeds: I,
        visited: &mut BTreeSet<ElementId>,
    ) -> Hypergraph
    where
        I: IntoIterator<Item = ElementId>,
    {
        let mut view = Hypergraph::empty(canvas);
        let mut queue = VecDeque::new();
        for seed in seeds {
            if visited.insert(seed) {
                queue.push_back(seed);
            }
        }

        while let Some(element) = queue.pop_front() {
            match element {
                ElementId::Node(id) => {
                    let Some(node) = self.nodes.get(&id) else {
                        continue;
                    };
                    for edge in node.outputs().iter().chain(node.inputs().iter()) {
                        self.enqueue(ElementId::Edge(*edge), canvas, visited, &mut queue);
                    }
                    if self.follow_union {
                        for partner in node.directly_connected() {
                            self.enqueue(ElementId::Node(*partner), canvas, visited, &mut queue);
                        }
                    }
                    view.insert_node(node.clone());
                }
                ElementId::Edge(id) => {
                    let Some(edge) = self.edges.get(&id) else {
                        continue;
                    };
                    for node in edge.endpoints() {
                        self.enqueue(ElementId::Node(node), canvas, visited, &mut queue);
                    }
                    view.insert_edge(edge.clone());
                }
            }
        }

        view.classify_sources();
        trace!(
            canvas = canvas.as_raw(),
            nodes = view.nodes().len(),
            edges = view.edges().len(),
            sources = view.sources().len(),
            "hypergraph.traversal.done"
        );
        view
    }

    fn enqueue(
        &self,
        element: ElementId,
        canvas: CanvasId,
        visited: &mut BTreeSet<ElementId>,
        queue: &mut VecDeque<ElementId>,
    ) {
        if visited.contains(&element) || !self.in_scope(element, canvas) {
            return;
        }
        visited.insert(element);
        queue.push_back(element);
    }

    fn in_scope(&self, element: ElementId, canvas: CanvasId) -> bool {
        if !self.scope_to_canvas {
            return true;
        }
        let home = match element {
            ElementId::Node(id) => self.nodes.get(&id).map(|node| node.canvas_id()),
            ElementId::Edge(id) => self.edges.get(&id).map(|edge| edge.canvas_id()),
        };
        home == Some(canvas)
    }
}
