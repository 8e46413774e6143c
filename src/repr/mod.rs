/*!
# Graph Representations

Two storage backends implement the [`Graph`] contract:

- [`SparseGraph`] — hash-map adjacency; ids may be scattered, memory `O(V + E)`.
- [`DenseGraph`] — adjacency matrix with a presence bitset; ids occupy `0..end_node`, memory
  `O(end_node^2)`, `O(1)` lookups and ordered iteration.

Both are observably interchangeable: graphs holding the same edges compare equal, across
backends as well:

```
use wgraphs::prelude::*;

let sparse = SparseGraph::from_edges([(0, 1, 1.0), (1, 0, 2.0)]);
let dense = DenseGraph::from_edges([(1, 0, 2.0), (0, 1, 1.0)]);
assert!(sparse == dense);
```

[`Backend`] selects a representation at runtime.
*/

use std::str::FromStr;

use crate::{error::GraphError, prelude::*};

pub(crate) mod macros {
    /// Implements `Debug` by listing nodes and edges in ascending order, independent of backend
    macro_rules! impl_graph_debug {
        ($graph:ident) => {
            impl std::fmt::Debug for $graph {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.debug_struct(stringify!($graph))
                        .field("nodes", &self.ordered_nodes())
                        .field("edges", &self.ordered_edges())
                        .finish()
                }
            }
        };
    }

    /// Implements edge-set equality between every pair of the given graph types
    macro_rules! impl_graph_eq {
        ($($graph:ident),*) => {
            impl_graph_eq!(@outer [$($graph),*] [$($graph),*]);
        };
        (@outer [$($left:ident),*] $right:tt) => {
            $(
                impl_graph_eq!(@inner $left $right);
            )*
        };
        (@inner $left:ident [$($right:ident),*]) => {
            $(
                impl PartialEq<$right> for $left {
                    fn eq(&self, other: &$right) -> bool {
                        self.equals(other)
                    }
                }
            )*

            impl PartialEq<dyn Graph + '_> for $left {
                fn eq(&self, other: &(dyn Graph + '_)) -> bool {
                    self.equals(other)
                }
            }
        };
    }

    pub(super) use impl_graph_debug;
    pub(super) use impl_graph_eq;
}

use macros::{impl_graph_debug, impl_graph_eq};

mod dense;
mod sparse;

pub use dense::*;
pub use sparse::*;

impl_graph_eq!(SparseGraph, DenseGraph);

/// Runtime choice of representation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// [`SparseGraph`]
    #[default]
    Sparse,
    /// [`DenseGraph`]
    Dense,
}

impl Backend {
    /// Both backends, sparse first
    pub const ALL: [Backend; 2] = [Backend::Sparse, Backend::Dense];

    /// Creates an empty graph of this backend
    pub fn create(self) -> Box<dyn Graph> {
        match self {
            Backend::Sparse => Box::new(SparseGraph::new()),
            Backend::Dense => Box::new(DenseGraph::new()),
        }
    }

    /// Name accepted by [`Backend::from_str`]
    pub fn name(self) -> &'static str {
        match self {
            Backend::Sparse => "sparse",
            Backend::Dense => "dense",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sparse" | "hash" => Ok(Backend::Sparse),
            "dense" | "matrix" => Ok(Backend::Dense),
            _ => Err(GraphError::UnknownBackend(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_graph_ops;

    #[test]
    fn backend_names() {
        for backend in Backend::ALL {
            assert_eq!(backend.name().parse::<Backend>().unwrap(), backend);
        }
        assert_eq!("Matrix".parse::<Backend>().unwrap(), Backend::Dense);
        assert!(matches!(
            "list".parse::<Backend>(),
            Err(GraphError::UnknownBackend(name)) if name == "list"
        ));
    }

    #[test]
    fn boxed_graphs_compare() {
        let mut graphs = Backend::ALL.map(Backend::create);
        for graph in graphs.iter_mut() {
            graph.add_double_edge(0, 1, 0.5);
            graph.add_node(9);
        }

        assert!(*graphs[0] == *graphs[1]);
        assert_eq!(graphs[0].node_count(), 3);
        assert_eq!(graphs[1].node_count(), 3);

        graphs[1].add_edge(1, 0, 0.25);
        assert!(*graphs[0] != *graphs[1]);
    }

    #[test]
    fn cross_backend_eq() {
        let sparse = SparseGraph::from_edges([(0, 1, 1.0), (1, 0, 2.0)]);
        let dense = DenseGraph::from_edges([(1, 0, 2.0), (0, 1, 1.0)]);
        let other = DenseGraph::from_edges([(0, 1, 1.0), (1, 0, 1.0)]);

        assert_eq!(sparse, dense);
        assert_eq!(dense, sparse);
        assert_ne!(sparse, other);
        assert_ne!(other, sparse);
        assert!(sparse == *(&dense as &dyn Graph));
    }

    test_graph_ops!(test_sparse_graph, SparseGraph);
    test_graph_ops!(test_dense_graph, DenseGraph);
}
