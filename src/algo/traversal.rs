/*!
Shorthands for running queries directly on a graph.

The [`Traversal`] trait is implemented for every [`Graph`] and returns executed queries, so their
results (and tables) can be inspected right away:

```
use wgraphs::{prelude::*, algo::*};

let graph = SparseGraph::from_edges([(0, 1, 1.0), (1, 0, 2.0), (2, 1, 4.0)]);

assert_eq!(graph.dfs(1).yield_weight(), 2.0);
assert_eq!(graph.dfs(1).visited_nodes(), vec![0, 1]);
assert_eq!(graph.digress_dfs(1).visited_nodes(), vec![0, 1, 2]);
assert!(graph.reaches(2, 0));
assert!(!graph.reaches(0, 2));
```
*/

use super::*;

/// Runs queries on the graph itself
pub trait Traversal: Graph + Sized {
    /// Returns an executed [`ReachabilityDfs`] from `source` (with `sink = source`)
    fn dfs(&self, source: Node) -> ReachabilityDfs<'_> {
        run(ReachabilityDfs::new(), self, source, source)
    }

    /// Returns an executed [`DigressDfs`] from `source` (with `sink = source`)
    fn digress_dfs(&self, source: Node) -> DigressDfs<'_> {
        run(DigressDfs::new(), self, source, source)
    }

    /// Returns an executed [`ComponentColoring`]
    fn color_components(&self) -> ComponentColoring<'_> {
        run(ComponentColoring::new(), self, 0, 0)
    }

    /// Returns *true* if there is a directed path from `source` to `sink`.
    /// The search stops as soon as `sink` is discovered.
    fn reaches(&self, source: Node, sink: Node) -> bool {
        run(ReachabilityDfs::new().stop_at_sink(true), self, source, sink).reached_sink()
    }
}

impl<G: Graph> Traversal for G {}

#[track_caller]
fn run<'a, Q: Query<'a>>(mut query: Q, graph: &'a dyn Graph, source: Node, sink: Node) -> Q {
    query.init(graph);
    query.execute(source, sink);
    query
}
