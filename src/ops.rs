/*!
# Graph Operations

The graph contract is split into a few traits:
- [`GraphNodeOrder`]: node counts and the extent of the id space,
- [`GraphNew`]: constructing empty graphs,
- [`GraphEdgeEditing`]: inserting nodes and edges,
- [`Graph`]: presence queries and the *cancellable iteration protocol*, plus every derived
  operation (subset tests, light digresses, ingress scans, ...).

A backend only implements a handful of primitives: [`Graph::has_node`], [`Graph::weight`],
[`Graph::for_each_node`] and [`Graph::for_each_egress`]. Everything else is implemented once,
on top of them, as default methods.

## Cancellable iteration

All `for_each_*` methods hand every element to a callback returning [`ControlFlow<Node>`].
Returning [`ControlFlow::Break`] stops the iteration immediately and the break value becomes
the return value of the `for_each_*` call; if the callback always continues, the call returns
[`ControlFlow::Continue`] once the elements are exhausted. This doubles as an early-exit
search and a fold:

```
use std::ops::ControlFlow;
use wgraphs::prelude::*;

let mut graph = SparseGraph::new();
graph.add_edge(0, 1, 2.0);
graph.add_edge(0, 2, 5.0);

// find a neighbor of 0 reachable via a heavy edge
let heavy = graph.for_each_egress(0, &mut |to, weight| {
    if weight > 3.0 { ControlFlow::Break(to) } else { ControlFlow::Continue(()) }
});
assert_eq!(heavy, ControlFlow::Break(2));
```

All traits are object safe; algorithms take `&dyn Graph` so both backends share one compiled
implementation.
*/

use std::ops::ControlFlow;

use crate::{prelude::*, table::*};

/// Callback visiting nodes
pub type NodeCall<'c> = dyn FnMut(Node) -> ControlFlow<Node> + 'c;

/// Callback visiting the far endpoint and weight of an edge incident to a fixed node
pub type ProgressCall<'c> = dyn FnMut(Node, Weight) -> ControlFlow<Node> + 'c;

/// Callback visiting complete edges `(from, to, weight)`
pub type EdgeCall<'c> = dyn FnMut(Node, Node, Weight) -> ControlFlow<Node> + 'c;

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of present nodes
    fn node_count(&self) -> Node;

    /// Returns one past the largest node id the graph ever held.
    /// Node-indexed tables are sized by this value.
    fn end_node(&self) -> Node;

    /// Returns [`GraphNodeOrder::end_node`] as a table capacity
    fn end_node_index(&self) -> usize {
        node_index(self.end_node()).unwrap_or(0)
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew: Sized {
    /// Creates an empty graph
    fn new() -> Self;

    /// Creates an empty graph with storage reserved for nodes `0..nodes`
    fn with_capacity(nodes: usize) -> Self;
}

/// Provides functions to insert nodes and edges
pub trait GraphEdgeEditing {
    /// Adds `node` to the graph. A no-op if `node` is already present.
    /// ** Panics if `node < 0 || node > MAX_NODE` **
    fn add_node(&mut self, node: Node);

    /// Adds both endpoints as nodes and sets the edge `(from, to)` to `weight`,
    /// overwriting any previous edge between them.
    /// ** Panics if an endpoint is not in `0..=MAX_NODE` or `weight` is `NaN` **
    fn add_edge(&mut self, from: Node, to: Node, weight: Weight);

    /// Inserts `(from, to, weight)` and `(to, from, weight)` as two independent directed edges
    fn add_double_edge(&mut self, from: Node, to: Node, weight: Weight) {
        self.add_edge(from, to, weight);
        self.add_edge(to, from, weight);
    }

    /// Adds all edges in the collection
    fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
        Self: Sized,
    {
        for Edge(from, to, weight) in edges.into_iter().map(Into::into) {
            self.add_edge(from, to, weight);
        }
    }
}

/// A super trait for creating a graph from scratch from a set of edges
pub trait GraphFromScratch {
    /// Creates a graph holding exactly the given edges (and their endpoints)
    fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph
    }
}

/// Shared precondition of [`GraphEdgeEditing::add_edge`] implementations
#[inline]
#[track_caller]
pub(crate) fn assert_valid_edge(from: Node, to: Node, weight: Weight) {
    assert!(
        is_node(from) && is_node(to),
        "cannot add edge ({from},{to}) with a leaf endpoint"
    );
    assert!(
        from <= MAX_NODE && to <= MAX_NODE,
        "cannot add edge ({from},{to}) beyond node {MAX_NODE}"
    );
    assert!(
        is_weight(weight),
        "cannot add edge ({from},{to}) without a weight"
    );
}

/// The weighted digraph contract.
pub trait Graph: GraphNodeOrder + GraphEdgeEditing {
    /// Returns *true* if `node` is present. Leaves are never present.
    fn has_node(&self, node: Node) -> bool;

    /// Returns the weight of the edge `(from, to)` or `NaN` if there is none,
    /// including when either endpoint is a leaf, absent or out of range.
    fn weight(&self, from: Node, to: Node) -> Weight;

    /// Visits every present node in backend-defined order.
    fn for_each_node(&self, callback: &mut NodeCall<'_>) -> ControlFlow<Node>;

    /// Visits every `(to, weight)` with an edge `(from, to)` in backend-defined order.
    /// Self-loops are visited like any other edge. Absent `from` visits nothing.
    fn for_each_egress(&self, from: Node, callback: &mut ProgressCall<'_>) -> ControlFlow<Node>;

    /// Returns *true* if the edge `(from, to)` exists
    fn has_edge(&self, from: Node, to: Node) -> bool {
        is_weight(self.weight(from, to))
    }

    /// Returns *true* if the edge `(from, to)` exists with exactly this weight.
    /// A `NaN` weight never matches.
    fn has_edge_with_weight(&self, from: Node, to: Node, weight: Weight) -> bool {
        is_weight(weight) && self.weight(from, to) == weight
    }

    /// Returns *true* if there is an edge in either direction between `from` and `to`
    fn has_digress(&self, from: Node, to: Node) -> bool {
        self.has_edge(from, to) || self.has_edge(to, from)
    }

    /// Returns the weight of the lighter edge between `from` and `to` in either direction,
    /// the weight of the only edge if just one direction exists, or `NaN` if neither exists.
    fn light_digress(&self, from: Node, to: Node) -> Weight {
        lighter(self.weight(from, to), self.weight(to, from))
    }

    /// Visits every `(from, weight)` with an edge `(from, to)`.
    ///
    /// Without a reverse index this scans the egresses of *all* nodes, so each call costs `O(V)`
    /// lookups.
    fn for_each_ingress(&self, to: Node, callback: &mut ProgressCall<'_>) -> ControlFlow<Node> {
        if !self.has_node(to) {
            return ControlFlow::Continue(());
        }

        self.for_each_node(&mut |from| {
            let weight = self.weight(from, to);
            if is_weight(weight) {
                callback(from, weight)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Visits every node connected to `from` by an edge in either direction exactly once,
    /// together with the [`Graph::light_digress`] between them.
    ///
    /// Egresses come first (in egress order), followed by nodes only reachable against the
    /// direction of an edge.
    fn for_each_light_digress(
        &self,
        from: Node,
        callback: &mut ProgressCall<'_>,
    ) -> ControlFlow<Node> {
        self.for_each_egress(from, &mut |to, _| callback(to, self.light_digress(from, to)))?;

        self.for_each_ingress(from, &mut |to, weight| {
            if self.has_edge(from, to) {
                ControlFlow::Continue(())
            } else {
                callback(to, weight)
            }
        })
    }

    /// Visits every edge `(from, to, weight)` of the graph
    fn for_each_edge(&self, callback: &mut EdgeCall<'_>) -> ControlFlow<Node> {
        self.for_each_node(&mut |from| {
            self.for_each_egress(from, &mut |to, weight| callback(from, to, weight))
        })
    }

    /// Returns a copy of all edges in [`Graph::for_each_edge`] order
    fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        let _ = self.for_each_edge(&mut |from, to, weight| {
            edges.push(Edge(from, to, weight));
            ControlFlow::Continue(())
        });
        edges
    }

    /// Returns the number of edges (a full scan)
    fn edge_count(&self) -> usize {
        let mut count = 0;
        let _ = self.for_each_edge(&mut |_, _, _| {
            count += 1;
            ControlFlow::Continue(())
        });
        count
    }

    /// Returns *true* if every edge of `self` exists in `other` with the same weight.
    ///
    /// The scan stops at the first edge missing from `other`; isolated nodes are ignored.
    fn is_subset(&self, other: &dyn Graph) -> bool {
        self.for_each_edge(&mut |from, to, weight| {
            if other.has_edge_with_weight(from, to, weight) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(to)
            }
        })
        .is_continue()
    }

    /// Returns *true* if every edge of `other` exists in `self` with the same weight
    fn is_superset(&self, other: &dyn Graph) -> bool {
        other
            .for_each_edge(&mut |from, to, weight| {
                if self.has_edge_with_weight(from, to, weight) {
                    ControlFlow::Continue(())
                } else {
                    ControlFlow::Break(to)
                }
            })
            .is_continue()
    }

    /// Two graphs are equal iff their edge sets (including weights) coincide.
    /// Nodes without any edges do not take part in the comparison.
    fn equals(&self, other: &dyn Graph) -> bool {
        self.is_subset(other) && self.is_superset(other)
    }

    /// Allocates an unmarked [`NodeCheck`] for this graph
    fn blank_node_check(&self) -> NodeCheck {
        NodeCheck::new(self.end_node_index())
    }

    /// Allocates an unmarked [`NodeTally`] for this graph
    fn blank_node_tally(&self) -> NodeTally {
        NodeTally::new(self.end_node_index())
    }

    /// Allocates a [`NodeCheck`] with exactly the present nodes marked
    fn node_check(&self) -> NodeCheck {
        let mut check = self.blank_node_check();
        let _ = self.for_each_node(&mut |node| {
            check.check(node);
            ControlFlow::Continue(())
        });
        check
    }

    /// Returns all present nodes in ascending order
    fn ordered_nodes(&self) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(self.node_count().max(0) as usize);
        let _ = self.for_each_node(&mut |node| {
            nodes.push(node);
            ControlFlow::Continue(())
        });
        nodes.sort_unstable();
        nodes
    }

    /// Returns all edges ordered by `(from, to)`
    fn ordered_edges(&self) -> Vec<Edge> {
        let mut edges = self.edges();
        edges.sort_by(Edge::total_cmp);
        edges
    }
}

impl PartialEq for dyn Graph + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl std::fmt::Debug for dyn Graph + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.ordered_nodes())
            .field("edges", &self.ordered_edges())
            .finish()
    }
}
