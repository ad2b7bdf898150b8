//! Huffman tree construction.
//!
//! The tree lives in an arena: every node is stored in one `Vec` and internal
//! nodes refer to their children by [`NodeId`]. Leaves occupy ids `0..n` in
//! the order the frequency table listed them; every merge appends one
//! internal node, so ids grow with creation order.
//!
//! # Tie-break
//!
//! The merge queue orders entries by weight and then by node id. Two nodes of
//! equal weight are therefore taken oldest first: leaves in input order,
//! then merged nodes in the order they were created. The first node popped
//! becomes the left child. Symbol values never take part in the ordering, so
//! the same frequency list always yields the same tree.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, trace};

use crate::error::{BuildError, Result};

/// Index of a node inside a [`HuffmanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A tree node: a symbol leaf or a merge of two subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<S> {
    Leaf { symbol: S, weight: f64 },
    Internal { left: NodeId, right: NodeId, weight: f64 },
}

impl<S> Node<S> {
    pub fn weight(&self) -> f64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Entry in the merge queue.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed: the entry with
/// the lowest weight (then lowest id) compares greatest.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    weight: f64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An optimal binary prefix tree built from a frequency table.
#[derive(Debug, Clone)]
pub struct HuffmanTree<S> {
    nodes: Vec<Node<S>>,
    root: NodeId,
    leaf_count: usize,
}

impl<S> HuffmanTree<S>
where
    S: Eq + Hash + Debug,
{
    /// Build a tree from `(frequency, symbol)` pairs.
    ///
    /// A single pair produces a tree whose root is that lone leaf.
    ///
    /// # Errors
    /// - `BuildError::EmptyFrequencyTable` if no pairs are given
    /// - `BuildError::DuplicateSymbol` if a symbol appears twice
    /// - `BuildError::InvalidFrequency` for negative, NaN or infinite weights
    pub fn build<I>(frequencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, S)>,
    {
        let pairs: Vec<(f64, S)> = frequencies.into_iter().collect();
        if pairs.is_empty() {
            return Err(BuildError::EmptyFrequencyTable.into());
        }

        let mut seen = HashSet::with_capacity(pairs.len());
        for (frequency, symbol) in &pairs {
            if !frequency.is_finite() || *frequency < 0.0 {
                return Err(BuildError::InvalidFrequency {
                    symbol: format!("{symbol:?}"),
                    frequency: *frequency,
                }
                .into());
            }
            if !seen.insert(symbol) {
                return Err(BuildError::DuplicateSymbol {
                    symbol: format!("{symbol:?}"),
                }
                .into());
            }
        }

        let leaf_count = pairs.len();
        let mut nodes = Vec::with_capacity(2 * leaf_count - 1);
        let mut queue = BinaryHeap::with_capacity(leaf_count);

        for (frequency, symbol) in pairs {
            let node = NodeId(nodes.len());
            // abs() folds -0.0 into 0.0 so it cannot sort ahead of other zeros
            let weight = frequency.abs();
            nodes.push(Node::Leaf { symbol, weight });
            queue.push(QueueEntry { weight, node });
        }

        // Pop two, push their merge; the last entry standing is the root.
        let root = loop {
            let Some(left) = queue.pop() else {
                return Err(BuildError::EmptyFrequencyTable.into());
            };
            let Some(right) = queue.pop() else {
                break left.node;
            };

            let node = NodeId(nodes.len());
            let weight = left.weight + right.weight;
            trace!(
                "merge {:?} ({}) + {:?} ({}) -> {:?} ({})",
                left.node,
                left.weight,
                right.node,
                right.weight,
                node,
                weight
            );
            nodes.push(Node::Internal {
                left: left.node,
                right: right.node,
                weight,
            });
            queue.push(QueueEntry { weight, node });
        };

        let tree = Self {
            nodes,
            root,
            leaf_count,
        };
        debug!(
            "built huffman tree: {} symbols, {} nodes, depth {}",
            tree.leaf_count,
            tree.nodes.len(),
            tree.depth()
        );
        Ok(tree)
    }
}

impl<S> HuffmanTree<S> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id, or `None` if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    /// Node lookup for ids reached from this tree's own root or children.
    pub(crate) fn at(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    /// Number of symbols (leaves).
    pub fn len(&self) -> usize {
        self.leaf_count
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Total weight at the root.
    pub fn weight(&self) -> f64 {
        self.at(self.root).weight()
    }

    /// Number of edges on the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            match self.at(id) {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }

        max_depth
    }
}
