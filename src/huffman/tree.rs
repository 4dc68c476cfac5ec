//! Huffman tree construction.
//!
//! Leaves are pushed onto a min-heap keyed by weight; the two lightest nodes
//! are merged until a single root remains. The first node extracted becomes
//! the left child.
//!
//! # Tie-breaking
//!
//! Every heap entry carries a sequence number. Leaves are numbered in
//! ascending symbol order starting at zero, and merged nodes continue the
//! numbering in the order they are created. The heap orders entries by
//! `(weight, sequence)`, so among equal weights:
//! - leaves come out in ascending symbol order,
//! - leaves come out before merged nodes,
//! - older merged nodes come out before newer ones.
//!
//! Building twice from the same table therefore yields the same shape and
//! the same codes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::Symbol;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a symbol and its count.
    Leaf { symbol: Symbol, weight: u64 },
    /// An internal node owns both children; its weight is their sum.
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the weight of the node.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// A built Huffman tree. Also serves as the decoding automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// The root node
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Weight of the root, equal to the number of symbols modelled
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves, one per distinct symbol
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_, _| count += 1);
        count
    }

    /// Depth of the leaf holding `symbol`, if present. The root is at depth 0.
    pub fn depth_of(&self, symbol: Symbol) -> Option<usize> {
        let mut found = None;
        self.walk(|leaf, depth| {
            if leaf == symbol {
                found = Some(depth);
            }
        });
        found
    }

    /// Depth of the deepest leaf
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        self.walk(|_, depth| deepest = deepest.max(depth));
        deepest
    }

    /// Visits every leaf left to right with its depth.
    fn walk<F: FnMut(Symbol, usize)>(&self, mut visit: F) {
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => visit(*symbol, depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
    }
}

/// Heap entry; the lightest, oldest entry has the highest priority.
#[derive(Debug)]
struct NodeWrapper {
    sequence: usize,
    node: HuffmanNode,
}

impl NodeWrapper {
    fn key(&self) -> (u64, usize) {
        (self.node.weight(), self.sequence)
    }
}

impl PartialEq for NodeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for NodeWrapper {}

impl Ord for NodeWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower (weight, sequence) should come first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for NodeWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Builds the Huffman tree for `frequencies`.
///
/// A single-symbol table yields a tree whose root is that symbol's leaf.
/// Fails with [`Error::EmptyAlphabet`] if the table has no entries.
///
/// # Example
///
/// ```
/// use huffman_text::huffman::{build_frequencies, build_tree};
///
/// let table = build_frequencies("aaabbc").unwrap();
/// let tree = build_tree(&table).unwrap();
/// assert_eq!(tree.weight(), 6);
/// assert_eq!(tree.depth_of('a'), Some(1));
/// assert_eq!(tree.depth_of('c'), Some(2));
/// ```
pub fn build_tree(frequencies: &FrequencyTable) -> Result<HuffmanTree> {
    let mut heap: BinaryHeap<NodeWrapper> = frequencies
        .iter()
        .enumerate()
        .map(|(sequence, (symbol, weight))| NodeWrapper {
            sequence,
            node: HuffmanNode::Leaf { symbol, weight },
        })
        .collect();

    let mut next_sequence = heap.len();
    // Combine nodes until only one tree remains.
    loop {
        let left = heap.pop().ok_or(Error::EmptyAlphabet)?;
        let Some(right) = heap.pop() else {
            let tree = HuffmanTree { root: left.node };
            log::debug!(
                "built huffman tree: {} symbols, weight {}, depth {}",
                frequencies.len(),
                tree.weight(),
                tree.max_depth()
            );
            return Ok(tree);
        };
        log::trace!(
            "merge #{} (w={}) + #{} (w={}) -> #{}",
            left.sequence,
            left.node.weight(),
            right.sequence,
            right.node.weight(),
            next_sequence
        );
        heap.push(NodeWrapper {
            sequence: next_sequence,
            node: HuffmanNode::merge(left.node, right.node),
        });
        next_sequence += 1;
    }
}
