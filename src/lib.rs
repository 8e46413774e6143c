/*!
`wgraphs` is a small library for **w**eighted, directed graphs with two interchangeable storage
backends and a handful of depth-first queries on top of them.

# Representation

We represent **nodes** as `i32`: every non-negative value is a valid node id, negative values
(most prominently [`LEAF`]) denote the absence of a node. **Weights** are `f64`, where `NaN`
([`NO_WEIGHT`]) denotes the absence of an edge and every other value, `0.0` included, is a
present edge. An **edge** is the triple `Edge(from, to, weight)`; between an ordered pair of nodes
there is at most one edge and inserting again overwrites its weight.

### Available Representations

See the [`repr`] module:

- [`SparseGraph`](crate::repr::SparseGraph): nested hash maps, arbitrary ids
- [`DenseGraph`](crate::repr::DenseGraph): adjacency matrix, ids packed into `0..end_node`

Both are observably interchangeable: a graph compares equal to any other graph holding the same
edges, independent of its backend or the order in which edges were inserted.

# Design

Every backend implements four primitives; all other operations (subset tests, light digresses,
ingress scans, ...) are default methods of the [`Graph`](crate::ops::Graph) trait expressed
through a *cancellable iteration protocol* based on [`ControlFlow`](std::ops::ControlFlow).

Queries are configurable structs (see [`algo`]) that borrow a graph, own a node-indexed
[`table`] and are executed once. The most common ones are additionally available directly on
every graph via [`Traversal`](crate::algo::Traversal).

# Usage

```
use wgraphs::{prelude::*, algo::*, io::*};

let graph = SparseGraph::from_text("0 1 1\n1 0 2\n2 3\n");
assert_eq!(graph.weight(1, 0), 2.0);
assert_eq!(graph.dfs(1).yield_weight(), 2.0);
assert_eq!(graph.color_components().component_count(), 2);
```

The submodules are:
- [`prelude`] includes nodes, weights, edges, the graph traits, tables and both representations,
- [`algo`] includes the queries,
- [`io`] includes the edge-list text format.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub mod table;
pub(crate) mod testing;
pub mod weight;

pub use edge::*;
pub use node::*;
pub use weight::*;

/// `wgraphs::prelude` includes definitions for nodes, weights and edges, all basic graph operation traits, node tables as well as both representations.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*, table::*, weight::*};
}
