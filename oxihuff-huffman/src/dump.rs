//! Tree serialization.
//!
//! A tree is written in post-order: a leaf is the tag byte `L` followed by
//! its symbol, an internal node is the single tag byte `I`. A tree with `n`
//! leaves therefore dumps to exactly `3n - 1` bytes.
//!
//! Rebuilding runs the dump through a stack machine. `L` pushes a leaf,
//! `I` pops the right subtree, then the left one, and pushes their parent.
//! A well-formed dump leaves exactly one node on the stack.

use crate::frequency::ALPHABET_SIZE;
use crate::stack::BoundedStack;
use crate::tree::{CodeTree, Node};
use oxihuff_core::error::{OxiHuffError, Result};
use tracing::debug;

/// Tag byte for a leaf.
pub const LEAF_TAG: u8 = b'L';

/// Tag byte for an internal node.
pub const INTERNAL_TAG: u8 = b'I';

/// Serialized size of a tree with `leaves` leaves, zero for an empty tree.
pub const fn dump_size(leaves: usize) -> usize {
    (3 * leaves).saturating_sub(1)
}

/// Largest possible dump (every symbol present).
pub const MAX_DUMP_SIZE: usize = dump_size(ALPHABET_SIZE);

/// Serialize `tree` in post-order.
pub fn dump(tree: &CodeTree) -> Vec<u8> {
    let mut out = Vec::with_capacity(dump_size(tree.leaf_count()));

    // Each entry is a node and whether its children have been emitted.
    let mut stack: Vec<(&Node, bool)> = vec![(tree.root(), false)];
    while let Some((node, expanded)) = stack.pop() {
        match node {
            Node::Leaf { symbol, .. } => {
                out.push(LEAF_TAG);
                out.push(*symbol);
            }
            Node::Internal { .. } if expanded => out.push(INTERNAL_TAG),
            Node::Internal { left, right, .. } => {
                stack.push((node, true));
                stack.push((right, false));
                stack.push((left, false));
            }
        }
    }

    debug!(bytes = out.len(), "dumped tree");
    out
}

/// Rebuild a tree from its dump.
///
/// Every structural problem is reported as a malformed-tree error carrying
/// the offset of the offending byte. The rebuilt root must be internal.
pub fn rebuild(bytes: &[u8]) -> Result<CodeTree> {
    // A valid dump never holds more pending subtrees than there are symbols.
    let mut stack = BoundedStack::new(ALPHABET_SIZE);
    let mut offset = 0;

    while offset < bytes.len() {
        match bytes[offset] {
            LEAF_TAG => {
                let symbol = *bytes.get(offset + 1).ok_or_else(|| {
                    OxiHuffError::malformed_tree(offset, "leaf tag without a symbol byte")
                })?;
                stack
                    .push(Node::leaf(symbol, 0))
                    .map_err(|_| OxiHuffError::malformed_tree(offset, "too many pending subtrees"))?;
                offset += 2;
            }
            INTERNAL_TAG => {
                let right = stack.pop().ok_or_else(|| {
                    OxiHuffError::malformed_tree(offset, "internal node without a right child")
                })?;
                let left = stack.pop().ok_or_else(|| {
                    OxiHuffError::malformed_tree(offset, "internal node without a left child")
                })?;
                // Two entries were just popped, so this push cannot overflow.
                stack.push(Node::join(left, right))?;
                offset += 1;
            }
            tag => {
                return Err(OxiHuffError::malformed_tree(
                    offset,
                    format!("unknown tag byte {tag:#04x}"),
                ));
            }
        }
    }

    let root = stack
        .pop()
        .ok_or_else(|| OxiHuffError::malformed_tree(offset, "empty tree dump"))?;
    if !stack.is_empty() {
        return Err(OxiHuffError::malformed_tree(
            offset,
            format!("{} subtrees left after the dump ended", stack.len() + 1),
        ));
    }

    let tree = CodeTree::new(root);
    tree.ensure_internal_root()?;
    debug!(bytes = bytes.len(), leaves = tree.leaf_count(), "rebuilt tree");
    Ok(tree)
}
