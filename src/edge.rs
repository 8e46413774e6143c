use std::fmt::{Debug, Display};

use crate::{Node, Weight, is_node, is_weight};

/// A directed, weighted edge `Edge(from, to, weight)`.
///
/// Edges are plain values: obtaining them from a graph (see [`Graph::edges`](crate::ops::Graph::edges))
/// yields a copy that is not tied to the graph in any way.
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Edge(pub Node, pub Node, pub Weight);

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{};{})", self.0, self.1, self.2)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Tail of the edge
    pub fn from(&self) -> Node {
        self.0
    }

    /// Head of the edge
    pub fn to(&self) -> Node {
        self.1
    }

    /// Weight of the edge
    pub fn weight(&self) -> Weight {
        self.2
    }

    /// Returns both endpoints as a tuple `(from, to)`
    pub fn endpoints(&self) -> (Node, Node) {
        (self.0, self.1)
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Returns true if both endpoints are nodes and the weight is present
    pub fn is_valid(&self) -> bool {
        is_node(self.0) && is_node(self.1) && is_weight(self.2)
    }

    /// Reverses the edge by switching the endpoints, keeping the weight
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0, self.2)
    }

    /// Orders edges by `(from, to)` and then by weight (using IEEE total ordering)
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.endpoints()
            .cmp(&other.endpoints())
            .then_with(|| self.2.total_cmp(&other.2))
    }
}

impl From<(Node, Node, Weight)> for Edge {
    fn from(value: (Node, Node, Weight)) -> Self {
        Edge(value.0, value.1, value.2)
    }
}

impl From<&(Node, Node, Weight)> for Edge {
    fn from(value: &(Node, Node, Weight)) -> Self {
        Edge(value.0, value.1, value.2)
    }
}

impl From<(Node, Node)> for Edge {
    /// Unweighted pairs receive the [`DEFAULT_WEIGHT`](crate::DEFAULT_WEIGHT)
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1, crate::DEFAULT_WEIGHT)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NO_WEIGHT;

    #[test]
    fn conversions() {
        assert_eq!(<Edge as From<_>>::from((1, 2)), Edge(1, 2, 1.0));
        assert_eq!(<Edge as From<_>>::from((1, 2, 0.5)).reverse(), Edge(2, 1, 0.5));
        assert!(Edge(3, 3, 0.0).is_loop());
    }

    #[test]
    fn validity() {
        assert!(Edge(0, 1, 0.0).is_valid());
        assert!(!Edge(-1, 1, 0.0).is_valid());
        assert!(!Edge(0, 1, NO_WEIGHT).is_valid());
    }

    #[test]
    fn ordering() {
        let mut edges = vec![Edge(1, 0, 1.0), Edge(0, 2, 3.0), Edge(0, 1, 2.0)];
        edges.sort_by(Edge::total_cmp);
        assert_eq!(edges, vec![Edge(0, 1, 2.0), Edge(0, 2, 3.0), Edge(1, 0, 1.0)]);
        assert_eq!(format!("{}", Edge(0, 1, 2.5)), "(0,1;2.5)");
    }
}
