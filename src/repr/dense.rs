/*!
# Dense Representation

[`DenseGraph`] stores a square weight matrix indexed `[from][to]`, with `NaN` in every cell
without an edge. The matrix grows by one row/column per new largest id (extending every
existing row), so the id space is always the contiguous range `0..end_node`.

Node presence is tracked in a separate [`NodeBitSet`]: an id below `end_node` may still be
absent, and the diagonal is free to hold genuine self-loops of any weight, `0.0` included.

Iteration visits nodes in ascending order and, for each node, its egresses in ascending order.
*/

use std::ops::ControlFlow;

use stream_bitset::prelude::*;

use super::{macros::impl_graph_debug, *};

/// Directed weighted graph backed by an adjacency matrix
#[derive(Clone)]
pub struct DenseGraph {
    matrix: Vec<Vec<Weight>>,
    present: NodeBitSet,
    node_count: Node,
}

impl Default for DenseGraph {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl DenseGraph {
    /// Current side length of the matrix
    fn dimension(&self) -> usize {
        self.matrix.len()
    }

    /// Grows the matrix (and presence bitset) to `dimension`; new cells hold no edge
    fn grow_to(&mut self, dimension: usize) {
        if dimension <= self.dimension() {
            return;
        }

        // rows are sized for the reserved capacity so growing within it never reallocates
        let reserved = self.matrix.capacity().max(dimension);
        for row in self.matrix.iter_mut() {
            row.resize(dimension, NO_WEIGHT);
        }
        while self.matrix.len() < dimension {
            let mut row = Vec::with_capacity(reserved);
            row.resize(dimension, NO_WEIGHT);
            self.matrix.push(row);
        }

        self.present = NodeBitSet::new_with_bits_set(
            dimension as NodeIndex,
            self.present.iter_set_bits().collect::<Vec<NodeIndex>>(),
        );
    }

    /// Returns the cell `[from][to]` if both indices are within the matrix
    fn cell(&self, from: Node, to: Node) -> Option<Weight> {
        let row = self.matrix.get(node_index(from)?)?;
        row.get(node_index(to)?).copied()
    }
}

impl GraphNew for DenseGraph {
    fn new() -> Self {
        Self::default()
    }

    fn with_capacity(nodes: usize) -> Self {
        Self {
            matrix: Vec::with_capacity(nodes),
            present: NodeBitSet::new(0),
            node_count: 0,
        }
    }
}

impl GraphNodeOrder for DenseGraph {
    fn node_count(&self) -> Node {
        self.node_count
    }

    fn end_node(&self) -> Node {
        node_from_index(self.dimension())
    }
}

impl GraphEdgeEditing for DenseGraph {
    #[track_caller]
    fn add_node(&mut self, node: Node) {
        let Some(index) = node_index(node) else {
            panic!("cannot add leaf {node} as a node");
        };
        assert!(node <= MAX_NODE, "cannot add node {node} beyond {MAX_NODE}");

        self.grow_to(index + 1);
        if !self.present.set_bit(index as NodeIndex) {
            self.node_count += 1;
        }
    }

    #[track_caller]
    fn add_edge(&mut self, from: Node, to: Node, weight: Weight) {
        assert_valid_edge(from, to, weight);

        self.add_node(from);
        self.add_node(to);
        self.matrix[from as usize][to as usize] = weight;
    }
}

impl Graph for DenseGraph {
    fn has_node(&self, node: Node) -> bool {
        node_index(node).is_some_and(|i| i < self.dimension() && self.present.get_bit(i as NodeIndex))
    }

    fn weight(&self, from: Node, to: Node) -> Weight {
        self.cell(from, to).unwrap_or(NO_WEIGHT)
    }

    fn for_each_node(&self, callback: &mut NodeCall<'_>) -> ControlFlow<Node> {
        self.present
            .iter_set_bits()
            .try_for_each(|i| callback(i as Node))
    }

    fn for_each_egress(&self, from: Node, callback: &mut ProgressCall<'_>) -> ControlFlow<Node> {
        let Some(row) = node_index(from).and_then(|i| self.matrix.get(i)) else {
            return ControlFlow::Continue(());
        };

        row.iter()
            .enumerate()
            .filter(|(_, weight)| is_weight(**weight))
            .try_for_each(|(to, &weight)| callback(node_from_index(to), weight))
    }
}

impl_graph_debug!(DenseGraph);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_keeps_edges() {
        let mut graph = DenseGraph::new();
        graph.add_edge(0, 1, 2.0);
        assert_eq!(graph.end_node(), 2);

        graph.add_edge(4, 0, 3.0);
        assert_eq!(graph.end_node(), 5);
        assert_eq!(graph.node_count(), 3);

        assert_eq!(graph.weight(0, 1), 2.0);
        assert_eq!(graph.weight(4, 0), 3.0);
        assert!(graph.has_node(1));
        assert!(!graph.has_node(2));
        assert!(!graph.has_node(3));
        assert_eq!(graph.ordered_nodes(), vec![0, 1, 4]);
    }

    #[test]
    fn reserved_rows_do_not_reallocate() {
        let mut graph = DenseGraph::with_capacity(8);
        graph.add_node(0);
        let row = graph.matrix[0].as_ptr();
        assert!(graph.matrix[0].capacity() >= 8);

        graph.add_edge(7, 0, 1.0);
        assert_eq!(graph.matrix[0].as_ptr(), row);
        assert!(graph.matrix.iter().all(|row| row.capacity() >= 8));
        assert_eq!(graph.weight(7, 0), 1.0);
    }

    #[test]
    #[should_panic(expected = "beyond")]
    fn max_id_panics() {
        DenseGraph::new().add_node(Node::MAX);
    }

    #[test]
    fn bounds_checked_lookups() {
        let graph = DenseGraph::from_edges([(0, 1, 1.0)]);

        assert!(graph.weight(0, 2).is_nan());
        assert!(graph.weight(2, 0).is_nan());
        assert!(graph.weight(LEAF, 0).is_nan());
        assert!(graph.weight(0, Node::MIN).is_nan());
        assert!(!graph.has_node(2));
        assert!(!graph.has_node(LEAF));
    }

    #[test]
    fn zero_weight_self_loop_is_an_edge() {
        let mut graph = DenseGraph::new();
        graph.add_node(0);
        assert!(!graph.has_edge(0, 0));
        assert!(graph.edges().is_empty());

        graph.add_edge(0, 0, 0.0);
        graph.add_node(0);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.has_edge(0, 0));
        assert_eq!(graph.edges(), vec![Edge(0, 0, 0.0)]);
    }

    #[test]
    fn ascending_iteration() {
        let graph = DenseGraph::from_edges([(2, 0, 1.0), (0, 2, 2.0), (0, 1, 3.0), (1, 1, 4.0)]);

        assert_eq!(
            graph.edges(),
            vec![
                Edge(0, 1, 3.0),
                Edge(0, 2, 2.0),
                Edge(1, 1, 4.0),
                Edge(2, 0, 1.0)
            ]
        );
    }

    #[test]
    fn early_exit() {
        let graph = DenseGraph::from_edges([(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0)]);

        let mut visited = 0;
        let flow = graph.for_each_egress(0, &mut |to, _| {
            visited += 1;
            if to == 2 {
                ControlFlow::Break(to)
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(flow, ControlFlow::Break(2));
        assert_eq!(visited, 2);
    }
}
