/*!
# Component Coloring

[`ComponentColoring`] partitions a graph into its weakly connected components, ie. the connected
components of the graph with all edge directions ignored.

Nodes are visited in the graph's node order; every node not colored yet starts an
undirected-equivalent depth-first search (see [`DigressDfs`]) that colors each node it discovers
with the next color `0, 1, 2, ...`. The total weight is the sum of the tree weights of all these
searches.

```
use wgraphs::{prelude::*, algo::*};

let graph = DenseGraph::from_edges([(0, 1, 1.0), (2, 3, 1.0)]);

let mut coloring = ComponentColoring::new();
coloring.init(&graph);
coloring.execute(0, 0);

assert_eq!(coloring.yield_node(), 2);
assert_eq!(coloring.yield_weight(), 2.0);
assert_eq!(coloring.components(), vec![vec![0, 1], vec![2, 3]]);
```
*/

use std::ops::ControlFlow;

use tracing::{debug, trace};

use super::*;

/// Colors every node with the index of its weakly connected component.
///
/// Results:
/// - [`Query::yield_node`]: the number of components,
/// - [`Query::yield_weight`]: the sum of the tree weights of all components.
///
/// `source` and `sink` passed to [`Query::execute`] are only validated; the coloring always
/// covers the whole graph.
#[derive(Debug, Default)]
pub struct ComponentColoring<'a> {
    core: QueryCore<'a, NodeTally>,
}

impl<'a> ComponentColoring<'a> {
    /// Creates an uninitialized query
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of components found by the last execution; `0` before execution
    pub fn component_count(&self) -> Node {
        self.core.node.max(0)
    }

    /// Sum of the tree weights of all components; `NaN` before execution
    pub fn total_weight(&self) -> Weight {
        self.core.weight
    }

    /// Returns the color of `node`, or [`LEAF`] if it was not colored (absent or not executed).
    /// ** Panics if `node` is outside of the table **
    pub fn color_of(&self, node: Node) -> Node {
        self.core.table().map_or(LEAF, |table| table.get(node))
    }

    /// The per-node colors of the last execution
    pub fn colors(&self) -> Option<&NodeTally> {
        self.core.table()
    }

    /// Returns the nodes of each component (indexed by color) in ascending order
    pub fn components(&self) -> Vec<Vec<Node>> {
        let Some(table) = self.core.table() else {
            return Vec::new();
        };

        let mut components = vec![Vec::new(); self.component_count() as usize];
        for (index, &color) in table.as_slice().iter().enumerate() {
            if let Some(component) = node_index(color).and_then(|c| components.get_mut(c)) {
                component.push(node_from_index(index));
            }
        }
        components
    }
}

impl<'a> Query<'a> for ComponentColoring<'a> {
    fn init(&mut self, graph: &'a dyn Graph) {
        self.core.init(graph);
    }

    #[track_caller]
    fn execute(&mut self, source: Node, sink: Node) {
        let (graph, table) = self.core.begin(source, sink);

        let mut colors: Node = 0;
        let mut total_weight = 0.0;
        let _ = graph.for_each_node(&mut |node| {
            if !table.is_marked(node) {
                let walk = Walk {
                    mark: colors,
                    sink: LEAF,
                    stop_at_sink: false,
                };
                let component = depth_first::<LightDigress, _>(graph, &mut *table, node, walk);
                trace!(color = colors, root = node, weight = component.weight, "component");

                total_weight += component.weight;
                colors += 1;
            }
            ControlFlow::Continue(())
        });

        debug!(components = colors, weight = total_weight, "colored graph");
        self.core.node = colors;
        self.core.weight = total_weight;
    }

    fn yield_node(&self) -> Node {
        self.core.node
    }

    fn yield_weight(&self) -> Weight {
        self.core.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn color(graph: &dyn Graph) -> ComponentColoring<'_> {
        let mut coloring = ComponentColoring::new();
        coloring.init(graph);
        coloring.execute(0, 0);
        coloring
    }

    #[test]
    fn two_disjoint_edges() {
        for mut graph in Backend::ALL.map(Backend::create) {
            graph.add_edge(0, 1, 1.0);
            graph.add_edge(2, 3, 1.0);

            let coloring = color(graph.as_ref());
            assert_eq!(coloring.yield_node(), 2);
            assert_eq!(coloring.yield_weight(), 2.0);
            assert_eq!(coloring.color_of(0), coloring.color_of(1));
            assert_eq!(coloring.color_of(2), coloring.color_of(3));
            assert_ne!(coloring.color_of(0), coloring.color_of(2));
        }
    }

    #[test]
    fn colors_follow_node_order() {
        let mut graph = DenseGraph::from_edges([(4, 0, 0.5), (1, 2, 2.0), (3, 3, 9.0)]);
        graph.add_node(6);

        let coloring = color(&graph);
        assert_eq!(coloring.component_count(), 4);
        assert_eq!(coloring.total_weight(), 2.5);
        assert_eq!(
            coloring.components(),
            vec![vec![0, 4], vec![1, 2], vec![3], vec![6]]
        );
        assert_eq!(
            coloring.colors().map(|tally| tally.as_slice().to_vec()),
            Some(vec![0, 1, 1, 2, 0, LEAF, 3])
        );
        assert_eq!(coloring.color_of(5), LEAF);
    }

    #[test]
    fn opposite_edges_count_once() {
        let graph = SparseGraph::from_edges([(0, 1, 3.0), (1, 0, 2.0), (1, 2, 1.0)]);

        let coloring = color(&graph);
        assert_eq!(coloring.component_count(), 1);
        assert_eq!(coloring.total_weight(), 3.0);
    }

    #[test]
    fn empty_graph() {
        let graph = SparseGraph::new();

        let coloring = color(&graph);
        assert_eq!(coloring.yield_node(), 0);
        assert_eq!(coloring.yield_weight(), 0.0);
        assert!(coloring.components().is_empty());
    }

    #[test]
    fn before_execution() {
        let coloring = ComponentColoring::new();
        assert_eq!(coloring.component_count(), 0);
        assert_eq!(coloring.yield_node(), LEAF);
        assert!(coloring.total_weight().is_nan());
        assert_eq!(coloring.color_of(3), LEAF);
        assert!(coloring.components().is_empty());
    }

    /// Number of weakly connected components via union-find with path halving
    fn count_components(nodes: &[Node], edges: &[Edge]) -> Node {
        let mut parent = (0..nodes.iter().max().map_or(0, |&u| u + 1)).collect_vec();
        fn find(parent: &mut [Node], mut u: Node) -> Node {
            while parent[u as usize] != u {
                parent[u as usize] = parent[parent[u as usize] as usize];
                u = parent[u as usize];
            }
            u
        }

        for &Edge(u, v, _) in edges {
            let (ru, rv) = (find(&mut parent, u), find(&mut parent, v));
            parent[ru as usize] = rv;
        }

        nodes
            .iter()
            .map(|&u| find(&mut parent, u))
            .sorted()
            .dedup()
            .count() as Node
    }

    #[test]
    fn random_graphs_match_union_find() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0xc0105);

        for n in [5, 20, 60] {
            for m in [n / 2, n, 2 * n] {
                let edges = (0..m)
                    .map(|_| Edge(rng.random_range(0..n), rng.random_range(0..n), 1.0))
                    .collect_vec();

                let sparse = SparseGraph::from_edges(edges.iter());
                let dense = DenseGraph::from_edges(edges.iter());
                let expected = count_components(&sparse.ordered_nodes(), &edges);

                let from_sparse = color(&sparse);
                let from_dense = color(&dense);
                assert_eq!(from_sparse.component_count(), expected);
                assert_eq!(from_dense.component_count(), expected);

                // unit weights: every tree has one edge less than nodes
                let tree_edges = (sparse.node_count() - expected) as Weight;
                assert_eq!(from_sparse.total_weight(), tree_edges);
                assert_eq!(from_dense.total_weight(), tree_edges);

                for Edge(u, v, _) in edges {
                    assert_eq!(from_sparse.color_of(u), from_sparse.color_of(v));
                    assert_eq!(from_dense.color_of(u), from_dense.color_of(v));
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "leaf endpoint")]
    fn negative_source() {
        let graph = SparseGraph::from_edges([(0, 1, 1.0)]);
        let mut coloring = ComponentColoring::new();
        coloring.init(&graph);
        coloring.execute(LEAF, 0);
    }
}
