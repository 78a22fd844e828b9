//! Huffman tree construction.
//!
//! Every one of the 256 byte values becomes a leaf, zero-frequency ones
//! included, so any header yields a complete code over the whole alphabet.
//!
//! ## Tie-break
//! The working set is ordered by `(weight, tie byte)`. The two smallest
//! entries are merged; the one with the lower tie byte becomes child 0.
//! The merged node inherits the lower tie byte. Each tie byte is owned by
//! exactly one working-set entry, so no two keys ever compare equal.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::frequency::{ByteFrequency, SYMBOLS};

/// Index of a node inside a [`HuffmanTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf(u8),
    /// `tie` is the smallest byte value below this node. It only orders the
    /// working set during construction.
    Internal { tie: u8, children: [NodeId; 2] },
}

impl Node {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Byte of a leaf, tie-break byte of an internal node.
    #[inline]
    pub fn byte(&self) -> u8 {
        match *self {
            Node::Leaf(byte) | Node::Internal { tie: byte, .. } => byte,
        }
    }
}

/// `f32` weight with a total order.
#[derive(Clone, Copy, Debug)]
struct Weight(f32);

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Huffman tree over all 256 byte values, stored as a node arena.
#[derive(Clone, Debug)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    pub fn build(frequency: &ByteFrequency) -> Self {
        let mut nodes = Vec::with_capacity(2 * SYMBOLS - 1);
        let mut order: BTreeMap<(Weight, u8), NodeId> = BTreeMap::new();

        for byte in 0..=u8::MAX {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf(byte));
            order.insert((Weight(frequency.get(byte)), byte), id);
        }

        while order.len() >= 2 {
            let (Some(first), Some(second)) = (order.pop_first(), order.pop_first()) else {
                unreachable!("working set holds at least two entries");
            };

            let (lo, hi) = if first.0 .1 > second.0 .1 {
                (second, first)
            } else {
                (first, second)
            };
            let ((lo_weight, tie), lo_id) = lo;
            let ((hi_weight, _), hi_id) = hi;

            let id = NodeId(nodes.len());
            nodes.push(Node::Internal {
                tie,
                children: [lo_id, hi_id],
            });
            order.insert((Weight(lo_weight.0 + hi_weight.0), tie), id);
        }

        let root = order
            .into_values()
            .next()
            .unwrap_or_else(|| unreachable!("alphabet is never empty"));

        log::trace!("built huffman tree with {} nodes", nodes.len());

        Self { nodes, root }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Node {
        self.nodes[id.0]
    }

    /// Child of an internal node for a branch bit, `None` on a leaf.
    #[inline]
    pub fn child(&self, id: NodeId, bit: u8) -> Option<NodeId> {
        match self.nodes[id.0] {
            Node::Leaf(_) => None,
            Node::Internal { children, .. } => Some(children[usize::from(bit & 1)]),
        }
    }

    /// Total number of nodes (always 511).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
