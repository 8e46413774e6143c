/*!
# Node Representation

Nodes are signed integers: every `node >= 0` names a node, every negative value is a *leaf*,
i.e. the absence of a node. Lookups that receive a leaf simply report "not present", which keeps
the graph contract free of `Option`-juggling for the common case of scanning id ranges.

Internally, bitsets are indexed with the unsigned [`NodeIndex`]; use [`node_index`] to convert.
*/

use stream_bitset::bitset::BitSetImpl;

/// Nodes are signed; negative values denote absence
pub type Node = i32;

/// Canonical leaf value (any negative node is a leaf)
pub const LEAF: Node = -1;

/// Largest id a graph can hold; `end_node` is exclusive and must fit into a [`Node`]
pub const MAX_NODE: Node = Node::MAX - 1;

/// Unsigned index type used for node-indexed bitsets
pub type NodeIndex = u32;

/// BitSet over node indices
pub type NodeBitSet = BitSetImpl<NodeIndex>;

/// Returns *true* if `node` names a node (ie. is non-negative)
#[inline]
pub const fn is_node(node: Node) -> bool {
    node >= 0
}

/// Returns *true* if `node` can be added to a graph, ie. `0 <= node <= MAX_NODE`
#[inline]
pub const fn is_addable(node: Node) -> bool {
    is_node(node) && node <= MAX_NODE
}

/// Returns the slot of `node` in a node-indexed container or `None` if `node` is a leaf
#[inline]
pub fn node_index(node: Node) -> Option<usize> {
    usize::try_from(node).ok()
}

/// Inverse of [`node_index`].
/// ** Panics if `index` does not fit into a `Node` **
#[inline]
pub fn node_from_index(index: usize) -> Node {
    Node::try_from(index).expect("node index exceeds Node::MAX")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_are_negative() {
        assert!(is_node(0));
        assert!(is_node(Node::MAX));
        assert!(!is_node(LEAF));
        assert!(!is_node(Node::MIN));
    }

    #[test]
    fn largest_id_is_not_addable() {
        assert!(is_addable(0));
        assert!(is_addable(MAX_NODE));
        assert!(!is_addable(Node::MAX));
        assert!(!is_addable(LEAF));
    }

    #[test]
    fn index_conversion() {
        assert_eq!(node_index(7), Some(7));
        assert_eq!(node_index(LEAF), None);
        assert_eq!(node_from_index(7), 7);
    }
}
