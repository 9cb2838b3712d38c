//! Bit codes and the symbol to code table.

use crate::frequency::{ALPHABET_SIZE, FrequencyTable};
use crate::tree::{CodeTree, Node};
use oxihuff_core::error::{OxiHuffError, Result};
use std::fmt;

/// Longest code that can be stored. A full 256-symbol tree is at most 255 deep.
pub const MAX_CODE_BITS: usize = 256;

/// A root-to-leaf path, one bit per edge (0 = left, 1 = right).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Code {
    bits: [u8; MAX_CODE_BITS / 8],
    len: usize,
}

impl Code {
    /// Longest code that can be stored.
    pub const MAX_BITS: usize = MAX_CODE_BITS;

    /// An empty code.
    pub const fn new() -> Self {
        Self {
            bits: [0; MAX_CODE_BITS / 8],
            len: 0,
        }
    }

    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (index % 8)) != 0)
    }

    /// Append a bit, failing once the code is full.
    pub fn push_bit(&mut self, bit: bool) -> Result<()> {
        if self.len == Self::MAX_BITS {
            return Err(OxiHuffError::code_too_long(Self::MAX_BITS));
        }
        let mask = 1 << (self.len % 8);
        if bit {
            self.bits[self.len / 8] |= mask;
        } else {
            self.bits[self.len / 8] &= !mask;
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last bit.
    pub fn pop_bit(&mut self) -> Option<bool> {
        let bit = self.get(self.len.checked_sub(1)?)?;
        self.len -= 1;
        Some(bit)
    }

    /// Iterate the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(|i| self.get(i))
    }

    /// Whether `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (0..self.len).all(|i| self.get(i) == other.get(i))
    }
}

impl Default for Code {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code(\"{self}\")")
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code for every symbol present in a tree.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Generate the code of every leaf of `tree`.
    ///
    /// A tree whose root is a leaf has no codes and is rejected.
    pub fn generate(tree: &CodeTree) -> Result<Self> {
        tree.ensure_internal_root()?;

        let mut table = Self {
            codes: vec![None; ALPHABET_SIZE],
        };
        let mut path = Code::new();
        table.visit(tree.root(), &mut path)?;
        Ok(table)
    }

    fn visit(&mut self, node: &Node, path: &mut Code) -> Result<()> {
        match node {
            Node::Leaf { symbol, .. } => {
                self.codes[*symbol as usize] = Some(*path);
            }
            Node::Internal { left, right, .. } => {
                path.push_bit(false)?;
                self.visit(left, path)?;
                path.pop_bit();

                path.push_bit(true)?;
                self.visit(right, path)?;
                path.pop_bit();
            }
        }
        Ok(())
    }

    /// Code for `symbol`, if it occurs in the tree.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols with their codes, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        (0..=u8::MAX)
            .zip(self.codes.iter())
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol, c)))
    }

    /// Total body length in bits for the given counts.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| table.get(symbol) * code.len() as u64)
            .sum()
    }
}
