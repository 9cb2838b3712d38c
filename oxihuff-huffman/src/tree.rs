//! The Huffman code tree.
//!
//! A [`CodeTree`] owns its root [`Node`]; every other node is owned by
//! exactly one parent through a `Box`. Dropping the tree tears it down with
//! an explicit stack instead of recursing through the boxes.

use crate::frequency::FrequencyTable;
use crate::queue::{BoundedQueue, Weighted};
use oxihuff_core::error::{OxiHuffError, Result};
use std::mem;
use tracing::debug;

/// A node of the code tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// A symbol with its occurrence count.
    Leaf {
        /// The byte this leaf decodes to.
        symbol: u8,
        /// Occurrence count (zero for rebuilt trees).
        weight: u64,
    },
    /// A branch; bit 0 selects `left`, bit 1 selects `right`.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached by a 0 bit.
        left: Box<Node>,
        /// Subtree reached by a 1 bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Create a leaf.
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Join two subtrees; the weight is the sum of theirs.
    pub fn join(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The leaf's symbol, or `None` for an internal node.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Child selected by `bit`, or `None` for a leaf.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    /// Whether two trees have the same shape and the same leaf symbols.
    ///
    /// Weights are ignored, since a rebuilt tree carries none.
    pub fn same_shape(&self, other: &Node) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Node::Leaf { symbol: a, .. }, Node::Leaf { symbol: b, .. }) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    Node::Internal {
                        left: la,
                        right: ra,
                        ..
                    },
                    Node::Internal {
                        left: lb,
                        right: rb,
                        ..
                    },
                ) => {
                    pending.push((la, lb));
                    pending.push((ra, rb));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Weighted for Node {
    fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }
}

/// Release a tree without recursion, returning the number of nodes freed.
pub fn release(root: Node) -> usize {
    let mut stack = vec![root];
    let mut freed = 0;
    while let Some(node) = stack.pop() {
        if let Node::Internal { left, right, .. } = node {
            stack.push(*left);
            stack.push(*right);
        }
        freed += 1;
    }
    freed
}

/// An owned code tree.
#[derive(Debug)]
pub struct CodeTree {
    root: Node,
}

impl CodeTree {
    /// Wrap an existing root.
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Build the tree for a frequency table.
    ///
    /// Leaves are created in ascending symbol order. The two lightest
    /// nodes are repeatedly joined, the first extracted becoming the left
    /// child, until a single root remains. The table must hold at least two
    /// symbols; see [`FrequencyTable::pad`].
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        table.ensure_buildable()?;

        // Each join removes two nodes and adds one, so the leaf count bounds the queue.
        let mut queue = BoundedQueue::new(table.distinct());
        for (symbol, count) in table.iter_nonzero() {
            queue.insert(Node::leaf(symbol, count))?;
        }
        let leaves = queue.len();

        while queue.len() > 1 {
            let left = queue.extract_min()?;
            let right = queue.extract_min()?;
            queue.insert(Node::join(left, right))?;
        }

        let root = queue.extract_min()?;
        debug!(leaves, weight = root.weight(), "built code tree");
        Ok(Self { root })
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|n| n.is_leaf()).count()
    }

    /// Number of internal nodes.
    pub fn internal_count(&self) -> usize {
        self.nodes().filter(|n| !n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }

    /// Pre-order iterator over every node.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![&self.root],
        }
    }

    /// Fail unless the root is an internal node.
    pub fn ensure_internal_root(&self) -> Result<()> {
        if self.root.is_leaf() {
            return Err(OxiHuffError::malformed_tree(0, "root is a leaf"));
        }
        Ok(())
    }
}

impl Drop for CodeTree {
    fn drop(&mut self) {
        let root = mem::replace(&mut self.root, Node::leaf(0, 0));
        release(root);
    }
}

/// Pre-order iterator over the nodes of a [`CodeTree`].
#[derive(Debug)]
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Internal { left, right, .. } = node {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}
