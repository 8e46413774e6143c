/*!
# Node Tables

Fixed-size, node-indexed scratch storage used by queries to remember which nodes they already
visited (or which component a node belongs to).

A table is allocated once per query execution with a capacity equal to the
[`end_node`](crate::ops::GraphNodeOrder::end_node) of the graph it is meant for and never
resizes afterwards. Accessing a node outside of `0..capacity` is a programming error and panics.

Two variants are provided:
- [`NodeCheck`]: a boolean mark per node, backed by a [`NodeBitSet`],
- [`NodeTally`]: an arbitrary integer tag per node (eg. a component color).
*/

use stream_bitset::prelude::*;

use crate::node::*;

/// Value returned by [`NodeCheck::get`] for marked nodes
pub const CHECKED: Node = 1;

/// Common interface of node-indexed tables.
///
/// `get` returns a negative value (a leaf) for nodes that were never marked.
pub trait Table {
    /// Creates a blank table with room for nodes `0..capacity`
    fn new(capacity: usize) -> Self
    where
        Self: Sized;

    /// Number of node slots
    fn capacity(&self) -> usize;

    /// Returns the value stored for `node`.
    /// ** Panics if `node < 0 || node >= capacity` **
    fn get(&self, node: Node) -> Node;

    /// Stores `value` for `node`.
    /// ** Panics if `node < 0 || node >= capacity` **
    fn set(&mut self, node: Node, value: Node);

    /// Returns *true* if a non-negative value is stored for `node`
    fn is_marked(&self, node: Node) -> bool {
        is_node(self.get(node))
    }
}

/// Resolves the slot of `node` or panics
#[inline]
#[track_caller]
fn slot(node: Node, capacity: usize) -> usize {
    match node_index(node) {
        Some(i) if i < capacity => i,
        _ => panic!("node {node} is outside of table with {capacity} slots"),
    }
}

/// Boolean mark per node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCheck {
    checked: NodeBitSet,
}

impl NodeCheck {
    /// Marks `node`. Returns *true* if it was marked before.
    #[track_caller]
    pub fn check(&mut self, node: Node) -> bool {
        let i = slot(node, self.capacity());
        self.checked.set_bit(i as NodeIndex)
    }

    /// Returns *true* if `node` is marked
    #[track_caller]
    pub fn is_checked(&self, node: Node) -> bool {
        let i = slot(node, self.capacity());
        self.checked.get_bit(i as NodeIndex)
    }

    /// Number of marked nodes
    pub fn cardinality(&self) -> usize {
        self.checked.cardinality() as usize
    }

    /// Iterator over all marked nodes in ascending order
    pub fn iter_checked(&self) -> impl Iterator<Item = Node> + '_ {
        self.checked.iter_set_bits().map(|i| i as Node)
    }
}

impl Table for NodeCheck {
    fn new(capacity: usize) -> Self {
        let bits = NodeIndex::try_from(capacity).expect("table capacity exceeds NodeIndex::MAX");
        Self {
            checked: NodeBitSet::new(bits),
        }
    }

    fn capacity(&self) -> usize {
        self.checked.number_of_bits() as usize
    }

    #[track_caller]
    fn get(&self, node: Node) -> Node {
        if self.is_checked(node) { CHECKED } else { LEAF }
    }

    /// Non-negative values mark `node`, negative values unmark it
    #[track_caller]
    fn set(&mut self, node: Node, value: Node) {
        let i = slot(node, self.capacity()) as NodeIndex;
        if is_node(value) {
            self.checked.set_bit(i);
        } else {
            self.checked.clear_bit(i);
        }
    }
}

/// Integer tag per node, initialized to [`LEAF`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTally {
    tally: Vec<Node>,
}

impl NodeTally {
    /// Returns the tags as a slice indexed by node
    pub fn as_slice(&self) -> &[Node] {
        &self.tally
    }
}

impl Table for NodeTally {
    fn new(capacity: usize) -> Self {
        Self {
            tally: vec![LEAF; capacity],
        }
    }

    fn capacity(&self) -> usize {
        self.tally.len()
    }

    #[track_caller]
    fn get(&self, node: Node) -> Node {
        self.tally[slot(node, self.tally.len())]
    }

    #[track_caller]
    fn set(&mut self, node: Node, value: Node) {
        let i = slot(node, self.tally.len());
        self.tally[i] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_check() {
        let mut check = NodeCheck::new(5);
        assert_eq!(check.capacity(), 5);
        assert!((0..5).all(|u| check.get(u) == LEAF));

        assert!(!check.check(3));
        assert!(check.check(3));
        check.set(1, 0);
        assert_eq!(check.get(1), CHECKED);
        assert!(check.is_marked(3));
        assert_eq!(check.iter_checked().collect::<Vec<_>>(), vec![1, 3]);

        check.set(3, LEAF);
        assert!(!check.is_marked(3));
        assert_eq!(check.cardinality(), 1);
    }

    #[test]
    fn node_tally() {
        let mut tally = NodeTally::new(4);
        assert_eq!(tally.as_slice(), &[LEAF; 4]);

        tally.set(2, 7);
        tally.set(0, 0);
        assert_eq!(tally.get(2), 7);
        assert!(tally.is_marked(0));
        assert!(!tally.is_marked(1));
    }

    #[test]
    #[should_panic(expected = "outside of table")]
    fn check_out_of_range() {
        NodeCheck::new(3).get(3);
    }

    #[test]
    #[should_panic(expected = "outside of table")]
    fn tally_negative() {
        NodeTally::new(3).set(LEAF, 0);
    }
}
