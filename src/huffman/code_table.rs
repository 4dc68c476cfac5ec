//! Code table generation.
//!
//! Walking the tree from the root and appending `0` for every left turn and
//! `1` for every right turn gives each leaf's code. Since codes are exactly
//! the root-to-leaf paths of a full binary tree, the table is prefix-free and
//! a symbol's code length equals its leaf depth.
//!
//! A tree made of a single leaf would produce an empty code, which cannot be
//! decoded. That symbol receives the one-bit code `0` instead.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::error::{Error, Result};
use crate::huffman::bitstream::Bitstream;
use crate::huffman::codec;
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::tree::{build_tree, HuffmanNode, HuffmanTree};
use crate::huffman::Symbol;

/// The bit sequence assigned to one symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(BitVec<u8, Msb0>);

impl Code {
    /// Number of bits in the code
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty code, which a generated table never contains
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The code's bits, first bit first
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        self.0.as_bitslice()
    }

    /// Whether `self` is a prefix of `other`
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(self.0.as_bitslice())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_bits(s).map(Code)
    }
}

/// Parses a string of `0` and `1` characters into bits.
pub(crate) fn parse_bits(s: &str) -> Result<BitVec<u8, Msb0>> {
    s.chars()
        .map(|ch| match ch {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(Error::InvalidInput(format!(
                "expected '0' or '1', found {other:?}"
            ))),
        })
        .collect()
}

/// Maps every symbol of a tree to its code, and every code back to its symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
    inverse: HashMap<Code, Symbol>,
}

impl CodeTable {
    fn from_codes(codes: BTreeMap<Symbol, Code>) -> Self {
        let inverse = codes
            .iter()
            .map(|(&symbol, code)| (code.clone(), symbol))
            .collect();
        CodeTable { codes, inverse }
    }

    /// Code for `symbol`
    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Symbol whose code is exactly `code`
    pub fn symbol_for(&self, code: &Code) -> Option<Symbol> {
        self.inverse.get(code).copied()
    }

    /// Number of symbols with a code
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when the table has no codes
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Length of the longest code
    pub fn max_code_length(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Kraft sum `Σ 2^-len`. A full code tree sums to exactly one.
    pub fn kraft_sum(&self) -> f64 {
        self.codes
            .values()
            .map(|code| 2f64.powi(-(code.len() as i32)))
            .sum()
    }

    /// Checks pairwise that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Total encoded size of a text with the given counts, in bits.
    /// Symbols without a code contribute nothing.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}

/// Produces the code table for `tree`.
///
/// # Example
///
/// ```
/// use huffman_text::huffman::{build_frequencies, build_tree, generate_codes};
///
/// let tree = build_tree(&build_frequencies("aaabbc").unwrap()).unwrap();
/// let table = generate_codes(&tree);
/// assert_eq!(table.get('a').unwrap().to_string(), "0");
/// assert_eq!(table.get('c').unwrap().to_string(), "10");
/// assert_eq!(table.get('b').unwrap().to_string(), "11");
/// ```
pub fn generate_codes(tree: &HuffmanTree) -> CodeTable {
    let mut codes = BTreeMap::new();
    match tree.root() {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code(bitvec![u8, Msb0; 0]));
        }
        root => {
            let mut prefix = BitVec::new();
            assign_codes(root, &mut prefix, &mut codes);
        }
    }
    CodeTable::from_codes(codes)
}

fn assign_codes(
    node: &HuffmanNode,
    prefix: &mut BitVec<u8, Msb0>,
    codes: &mut BTreeMap<Symbol, Code>,
) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code(prefix.clone()));
        }
        HuffmanNode::Internal { left, right, .. } => {
            prefix.push(false);
            assign_codes(left, prefix, codes);
            prefix.pop();
            prefix.push(true);
            assign_codes(right, prefix, codes);
            prefix.pop();
        }
    }
}

/// A tree together with its code table.
///
/// The tree decodes and the table encodes; both stay fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    tree: HuffmanTree,
    table: CodeTable,
}

impl Codebook {
    /// Derives the code table for `tree` and keeps both.
    pub fn new(tree: HuffmanTree) -> Self {
        let table = generate_codes(&tree);
        Codebook { tree, table }
    }

    /// Builds the tree for `frequencies` and derives its codes.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        build_tree(frequencies).map(Self::new)
    }

    /// The decoding tree
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The encoding table
    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Encodes `text` with this codebook's table.
    pub fn encode(&self, text: &str) -> Result<Bitstream> {
        codec::encode(text, &self.table)
    }

    /// Decodes `bits` with this codebook's tree.
    pub fn decode(&self, bits: &Bitstream) -> Result<String> {
        codec::decode(bits, &self.tree)
    }

    /// Splits the codebook back into its tree and table
    pub fn into_parts(self) -> (HuffmanTree, CodeTable) {
        (self.tree, self.table)
    }
}
