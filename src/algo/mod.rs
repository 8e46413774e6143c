/*!
# Graph Algorithms

This module provides the **queries** built on top of the graph contract. All of them are
re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```
and gain access to
- [`ReachabilityDfs`]: depth-first search along edge directions,
- [`DigressDfs`]: depth-first search ignoring edge directions,
- [`ComponentColoring`]: weakly connected components,
- [`Traversal`]: shorthands running these queries directly on a graph.

Queries only use the iteration protocol of [`Graph`](crate::ops::Graph) and therefore work on
every backend (and on `dyn Graph`) alike.
*/

mod coloring;
mod query;
mod traversal;

use crate::prelude::*;

pub use coloring::*;
pub use query::*;
pub use traversal::*;
