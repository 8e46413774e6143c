/*!
# Sparse Representation

[`SparseGraph`] stores, for every present node, a hash map from its out-neighbors to the
weight of the connecting edge. Node ids need not be contiguous and memory is proportional to
`V + E`.

Iteration follows the native order of the hash maps and is therefore unspecified.
*/

use std::ops::ControlFlow;

use fxhash::{FxBuildHasher, FxHashMap};

use super::{macros::impl_graph_debug, *};

type Egresses = FxHashMap<Node, Weight>;

/// Directed weighted graph backed by nested hash maps
#[derive(Clone, Default)]
pub struct SparseGraph {
    adjacency: FxHashMap<Node, Egresses>,
    end_node: Node,
}

impl GraphNew for SparseGraph {
    fn new() -> Self {
        Self::default()
    }

    fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: FxHashMap::with_capacity_and_hasher(nodes, FxBuildHasher::default()),
            end_node: 0,
        }
    }
}

impl GraphNodeOrder for SparseGraph {
    fn node_count(&self) -> Node {
        node_from_index(self.adjacency.len())
    }

    fn end_node(&self) -> Node {
        self.end_node
    }
}

impl GraphEdgeEditing for SparseGraph {
    #[track_caller]
    fn add_node(&mut self, node: Node) {
        assert!(is_node(node), "cannot add leaf {node} as a node");
        assert!(node <= MAX_NODE, "cannot add node {node} beyond {MAX_NODE}");

        self.adjacency.entry(node).or_insert_with(|| {
            self.end_node = self.end_node.max(node + 1);
            Egresses::default()
        });
    }

    #[track_caller]
    fn add_edge(&mut self, from: Node, to: Node, weight: Weight) {
        assert_valid_edge(from, to, weight);

        self.add_node(from);
        self.add_node(to);
        if let Some(egresses) = self.adjacency.get_mut(&from) {
            egresses.insert(to, weight);
        }
    }
}

impl Graph for SparseGraph {
    fn has_node(&self, node: Node) -> bool {
        self.adjacency.contains_key(&node)
    }

    fn weight(&self, from: Node, to: Node) -> Weight {
        self.adjacency
            .get(&from)
            .and_then(|egresses| egresses.get(&to))
            .copied()
            .unwrap_or(NO_WEIGHT)
    }

    fn for_each_node(&self, callback: &mut NodeCall<'_>) -> ControlFlow<Node> {
        self.adjacency.keys().try_for_each(|&node| callback(node))
    }

    fn for_each_egress(&self, from: Node, callback: &mut ProgressCall<'_>) -> ControlFlow<Node> {
        match self.adjacency.get(&from) {
            Some(egresses) => egresses
                .iter()
                .try_for_each(|(&to, &weight)| callback(to, weight)),
            None => ControlFlow::Continue(()),
        }
    }
}

impl_graph_debug!(SparseGraph);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_is_key_presence() {
        let mut graph = SparseGraph::new();
        assert!(graph.is_empty());

        graph.add_node(5);
        assert!(graph.has_node(5));
        assert!(!graph.has_node(0));
        assert!(!graph.has_node(LEAF));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.end_node(), 6);

        graph.add_node(5);
        graph.add_node(2);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.end_node(), 6);
    }

    #[test]
    fn largest_addable_id() {
        let mut graph = SparseGraph::new();
        graph.add_node(MAX_NODE);
        assert_eq!(graph.end_node(), Node::MAX);
        assert!(graph.has_node(MAX_NODE));
    }

    #[test]
    #[should_panic(expected = "beyond")]
    fn max_id_panics() {
        SparseGraph::new().add_node(Node::MAX);
    }

    #[test]
    fn edges_overwrite() {
        let mut graph = SparseGraph::with_capacity(4);
        graph.add_edge(0, 3, 1.5);
        graph.add_edge(0, 3, 0.0);

        assert_eq!(graph.weight(0, 3), 0.0);
        assert!(graph.has_edge(0, 3));
        assert!(!graph.has_edge(3, 0));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.end_node(), 4);
    }

    #[test]
    fn sparse_ids() {
        let graph = SparseGraph::from_edges([(1000, 7, 2.0)]);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.end_node(), 1001);
        assert_eq!(graph.ordered_nodes(), vec![7, 1000]);
        assert_eq!(graph.blank_node_check().capacity(), 1001);
    }

    #[test]
    #[should_panic(expected = "leaf")]
    fn leaf_edge_panics() {
        SparseGraph::new().add_edge(0, LEAF, 1.0);
    }

    #[test]
    #[should_panic(expected = "without a weight")]
    fn nan_edge_panics() {
        SparseGraph::new().add_edge(0, 1, NO_WEIGHT);
    }
}
