/*!
# Queries

A query is a small state machine over a borrowed graph:

1. construct (and configure) it, eg. `ReachabilityDfs::new()`,
2. [`Query::init`] binds it to a graph and allocates a blank node table sized to the graph's
   current `end_node`,
3. [`Query::execute`] runs it exactly once for a `(source, sink)` pair,
4. [`Query::yield_node`] and [`Query::yield_weight`] report the results.

Executing again requires another call to [`Query::init`], which hands the query a fresh table.
Since a query borrows its graph for `'a`, the graph cannot be mutated while the query is alive.

All depth-first queries share one engine which walks the graph with an explicit stack of frames.
It visits nodes and accumulates weights in exactly the order a recursive search would, without
being limited by the depth of the call stack.
*/

use std::{marker::PhantomData, ops::ControlFlow};

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::*;

/// Interface shared by all queries
pub trait Query<'a> {
    /// Binds the query to `graph` and resets all results
    fn init(&mut self, graph: &'a dyn Graph);

    /// Runs the query.
    /// ** Panics if the query is not initialized, was already executed since the last
    /// [`Query::init`], or `source < 0 || sink < 0` **
    fn execute(&mut self, source: Node, sink: Node);

    /// Node result of the last execution, [`LEAF`] before execution
    fn yield_node(&self) -> Node;

    /// Weight result of the last execution, `NaN` before execution
    fn yield_weight(&self) -> Weight;
}

/// Decides which neighbors a depth-first search expands
pub trait Expansion {
    /// Visits every neighbor of `node` together with the weight of the connecting edge
    fn for_each_neighbor(
        graph: &dyn Graph,
        node: Node,
        callback: &mut ProgressCall<'_>,
    ) -> ControlFlow<Node>;
}

/// Follows edges in their direction
#[derive(Debug, Clone, Copy, Default)]
pub struct Egress;

impl Expansion for Egress {
    fn for_each_neighbor(
        graph: &dyn Graph,
        node: Node,
        callback: &mut ProgressCall<'_>,
    ) -> ControlFlow<Node> {
        graph.for_each_egress(node, callback)
    }
}

/// Follows edges in both directions; a pair of opposite edges counts once with the lighter weight
#[derive(Debug, Clone, Copy, Default)]
pub struct LightDigress;

impl Expansion for LightDigress {
    fn for_each_neighbor(
        graph: &dyn Graph,
        node: Node,
        callback: &mut ProgressCall<'_>,
    ) -> ControlFlow<Node> {
        graph.for_each_light_digress(node, callback)
    }
}

/// State common to all queries: the bound graph, its table and the results
#[derive(Debug)]
pub(crate) struct QueryCore<'a, T: Table> {
    graph: Option<&'a dyn Graph>,
    table: Option<T>,
    spent: bool,
    pub(crate) source: Node,
    pub(crate) sink: Node,
    pub(crate) node: Node,
    pub(crate) weight: Weight,
}

impl<T: Table> Default for QueryCore<'_, T> {
    fn default() -> Self {
        Self {
            graph: None,
            table: None,
            spent: false,
            source: LEAF,
            sink: LEAF,
            node: LEAF,
            weight: NO_WEIGHT,
        }
    }
}

impl<'a, T: Table> QueryCore<'a, T> {
    pub(crate) fn init(&mut self, graph: &'a dyn Graph) {
        *self = Self {
            graph: Some(graph),
            table: Some(T::new(graph.end_node_index())),
            ..Self::default()
        };
    }

    /// Validates the preconditions of [`Query::execute`] and marks the query as spent
    #[track_caller]
    pub(crate) fn begin(&mut self, source: Node, sink: Node) -> (&'a dyn Graph, &mut T) {
        assert!(
            is_node(source) && is_node(sink),
            "cannot execute query from {source} to {sink}: leaf endpoint"
        );
        assert!(!self.spent, "query was already executed; call init first");

        let (Some(graph), Some(table)) = (self.graph, self.table.as_mut()) else {
            panic!("query was executed before init");
        };

        self.spent = true;
        self.source = source;
        self.sink = sink;
        (graph, table)
    }

    pub(crate) fn table(&self) -> Option<&T> {
        self.table.as_ref()
    }
}

/// Parameters of a single depth-first walk
#[derive(Debug, Clone, Copy)]
pub(crate) struct Walk {
    /// Value written into the table for every discovered node
    pub(crate) mark: Node,
    /// Node whose discovery is reported (and optionally ends the walk)
    pub(crate) sink: Node,
    pub(crate) stop_at_sink: bool,
}

/// Outcome of a depth-first walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WalkResult {
    /// Sum of the weights of all edges that discovered a node
    pub(crate) weight: Weight,
    pub(crate) reached_sink: bool,
}

type Neighbors = SmallVec<[(Node, Weight); 8]>;

/// A node under expansion: its remaining neighbors and the weight accumulated below it
struct Frame {
    neighbors: Neighbors,
    next: usize,
    /// Weight of the edge that discovered this node
    via: Weight,
    below: Weight,
}

impl Frame {
    fn expand<X: Expansion>(graph: &dyn Graph, node: Node, via: Weight) -> Self {
        let mut neighbors = Neighbors::new();
        let _ = X::for_each_neighbor(graph, node, &mut |to, weight| {
            neighbors.push((to, weight));
            ControlFlow::Continue(())
        });

        Self {
            neighbors,
            next: 0,
            via,
            below: 0.0,
        }
    }
}

/// Folds a finished frame into its parent (or returns its weight if it was the root)
fn close(stack: &mut Vec<Frame>) -> Option<Weight> {
    let frame = stack.pop()?;
    match stack.last_mut() {
        Some(parent) => {
            parent.below += frame.via + frame.below;
            None
        }
        None => Some(frame.below),
    }
}

/// Depth-first walk from `source` marking every discovered node with `walk.mark`.
///
/// A neighbor is discovered iff it is unmarked when its turn comes; only then does the
/// connecting edge contribute its weight and the neighbor get expanded. An absent `source`
/// discovers nothing.
pub(crate) fn depth_first<X, T>(
    graph: &dyn Graph,
    table: &mut T,
    source: Node,
    walk: Walk,
) -> WalkResult
where
    X: Expansion,
    T: Table + ?Sized,
{
    if !graph.has_node(source) {
        return WalkResult {
            weight: 0.0,
            reached_sink: false,
        };
    }

    table.set(source, walk.mark);
    let mut reached_sink = source == walk.sink;
    let mut stack = vec![Frame::expand::<X>(graph, source, 0.0)];
    let mut weight = 0.0;

    if !(reached_sink && walk.stop_at_sink) {
        while let Some(frame) = stack.last_mut() {
            let Some(&(node, via)) = frame.neighbors.get(frame.next) else {
                if let Some(root) = close(&mut stack) {
                    weight = root;
                }
                continue;
            };
            frame.next += 1;

            if table.is_marked(node) {
                continue;
            }

            table.set(node, walk.mark);
            stack.push(Frame::expand::<X>(graph, node, via));

            if node == walk.sink {
                reached_sink = true;
                if walk.stop_at_sink {
                    break;
                }
            }
        }
    }

    // unwind whatever is left after an early stop
    while !stack.is_empty() {
        if let Some(root) = close(&mut stack) {
            weight = root;
        }
    }

    WalkResult {
        weight,
        reached_sink,
    }
}

/// Depth-first search from `source` following the neighbors chosen by `X`.
///
/// Results:
/// - [`Query::yield_weight`]: the total weight of the search tree, ie. the sum of the weights of
///   all edges that discovered a new node,
/// - [`Query::yield_node`]: `sink` if it was discovered, [`LEAF`] otherwise.
///
/// Use the aliases [`ReachabilityDfs`] and [`DigressDfs`].
#[derive(Debug)]
pub struct DepthFirstQuery<'a, X: Expansion> {
    core: QueryCore<'a, NodeCheck>,
    stop_at_sink: bool,
    _expansion: PhantomData<X>,
}

/// Depth-first search along edge directions
pub type ReachabilityDfs<'a> = DepthFirstQuery<'a, Egress>;

/// Depth-first search ignoring edge directions (undirected-equivalent traversal)
pub type DigressDfs<'a> = DepthFirstQuery<'a, LightDigress>;

impl<X: Expansion> Default for DepthFirstQuery<'_, X> {
    fn default() -> Self {
        Self {
            core: QueryCore::default(),
            stop_at_sink: false,
            _expansion: PhantomData,
        }
    }
}

impl<'a, X: Expansion> DepthFirstQuery<'a, X> {
    /// Creates an uninitialized query
    pub fn new() -> Self {
        Self::default()
    }

    /// If set, the search is cancelled as soon as the sink is discovered.
    /// The weight then only covers the part of the tree explored so far.
    pub fn stop_at_sink(mut self, stop: bool) -> Self {
        self.stop_at_sink = stop;
        self
    }

    /// Returns *true* if the last execution discovered `node`
    /// ** Panics if `node` is outside of the table **
    pub fn is_visited(&self, node: Node) -> bool {
        self.core.table().is_some_and(|table| table.is_checked(node))
    }

    /// All nodes discovered by the last execution in ascending order
    pub fn visited_nodes(&self) -> Vec<Node> {
        self.core
            .table()
            .map(|table| table.iter_checked().collect())
            .unwrap_or_default()
    }

    /// Returns *true* if the last execution discovered the sink
    pub fn reached_sink(&self) -> bool {
        is_node(self.core.node)
    }

    /// `(source, sink)` of the last execution, leaves before execution
    pub fn endpoints(&self) -> (Node, Node) {
        (self.core.source, self.core.sink)
    }
}

impl<'a, X: Expansion> Query<'a> for DepthFirstQuery<'a, X> {
    fn init(&mut self, graph: &'a dyn Graph) {
        self.core.init(graph);
    }

    #[track_caller]
    fn execute(&mut self, source: Node, sink: Node) {
        let stop_at_sink = self.stop_at_sink;
        let (graph, table) = self.core.begin(source, sink);

        debug!(source, sink, stop_at_sink, "depth-first search");
        let result = depth_first::<X, _>(
            graph,
            table,
            source,
            Walk {
                mark: CHECKED,
                sink,
                stop_at_sink,
            },
        );
        trace!(weight = result.weight, reached = result.reached_sink, "search finished");

        self.core.weight = result.weight;
        self.core.node = if result.reached_sink { sink } else { LEAF };
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

    fn path() -> SparseGraph {
        SparseGraph::from_edges([(0, 1, 1.0), (1, 2, 2.0), (2, 3, 4.0)])
    }

    #[test]
    fn walk_sums_tree_edges() {
        let graph = DenseGraph::from_edges([(0, 1, 1.0), (1, 0, 2.0), (0, 2, 4.0), (2, 1, 8.0)]);
        let mut table = NodeCheck::new(graph.end_node_index());

        let result = depth_first::<Egress, _>(
            &graph,
            &mut table,
            0,
            Walk {
                mark: CHECKED,
                sink: LEAF,
                stop_at_sink: false,
            },
        );

        // 1 is discovered before 2, so (2, 1) hits a marked node
        assert_eq!(result.weight, 5.0);
        assert!(!result.reached_sink);
        assert_eq!(table.cardinality(), 3);
    }

    #[test]
    fn walk_stops_at_sink() {
        let graph = path();
        let mut table = NodeCheck::new(graph.end_node_index());

        let result = depth_first::<Egress, _>(
            &graph,
            &mut table,
            0,
            Walk {
                mark: CHECKED,
                sink: 2,
                stop_at_sink: true,
            },
        );

        assert_eq!(result.weight, 3.0);
        assert!(result.reached_sink);
        assert!(!table.is_checked(3));
    }

    #[test]
    fn walk_from_absent_source() {
        let mut graph = DenseGraph::from_edges([(0, 2, 1.0)]);
        graph.add_node(4);
        let mut table = NodeTally::new(graph.end_node_index());

        let result = depth_first::<LightDigress, _>(
            &graph,
            &mut table,
            1,
            Walk {
                mark: 7,
                sink: 1,
                stop_at_sink: false,
            },
        );

        assert_eq!(result.weight, 0.0);
        assert!(!result.reached_sink);
        assert!(table.as_slice().iter().all(|&c| c == LEAF));
    }

    #[test]
    fn deep_paths_do_not_overflow() {
        let n: Node = 200_000;
        let graph = SparseGraph::from_edges((0..n - 1).map(|u| (u, u + 1, 1.0)));

        let mut dfs = ReachabilityDfs::new();
        dfs.init(&graph);
        dfs.execute(0, n - 1);

        assert_eq!(dfs.yield_weight(), (n - 1) as Weight);
        assert_eq!(dfs.yield_node(), n - 1);
    }

    #[test]
    fn results_before_execution() {
        let graph = path();
        let mut dfs = DigressDfs::new();
        assert!(dfs.yield_weight().is_nan());
        assert_eq!(dfs.yield_node(), LEAF);
        assert!(dfs.visited_nodes().is_empty());

        dfs.init(&graph);
        assert!(dfs.yield_weight().is_nan());
        assert!(!dfs.is_visited(0));
    }

    #[test]
    fn reinit_allows_another_execution() {
        let graph = path();
        let mut dfs = ReachabilityDfs::new();

        dfs.init(&graph);
        dfs.execute(2, 0);
        assert_eq!(dfs.yield_weight(), 4.0);
        assert_eq!(dfs.yield_node(), LEAF);
        assert_eq!(dfs.visited_nodes(), vec![2, 3]);

        dfs.init(&graph);
        assert_eq!(dfs.endpoints(), (LEAF, LEAF));
        dfs.execute(0, 3);
        assert_eq!(dfs.endpoints(), (0, 3));
        assert_eq!(dfs.yield_weight(), 7.0);
        assert_eq!(dfs.yield_node(), 3);
        assert!(dfs.reached_sink());
    }

    #[test]
    #[should_panic(expected = "before init")]
    fn execute_before_init() {
        ReachabilityDfs::new().execute(0, 0);
    }

    #[test]
    #[should_panic(expected = "already executed")]
    fn execute_twice() {
        let graph = path();
        let mut dfs = ReachabilityDfs::new();
        dfs.init(&graph);
        dfs.execute(0, 1);
        dfs.execute(0, 1);
    }

    #[test]
    #[should_panic(expected = "leaf endpoint")]
    fn negative_source() {
        let graph = path();
        let mut dfs = DigressDfs::new();
        dfs.init(&graph);
        dfs.execute(LEAF, 1);
    }

    #[test]
    #[should_panic(expected = "leaf endpoint")]
    fn negative_sink() {
        let graph = path();
        let mut dfs = ReachabilityDfs::new();
        dfs.init(&graph);
        dfs.execute(0, -5);
    }
}
