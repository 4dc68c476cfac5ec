//! Encoding text to a bitstream and decoding it back.

use bitvec::prelude::*;

use crate::error::{Error, Result};
use crate::huffman::bitstream::Bitstream;
use crate::huffman::code_table::CodeTable;
use crate::huffman::tree::{HuffmanNode, HuffmanTree};
use crate::huffman::Symbol;

/// Encodes `text` by concatenating the code of each symbol in order.
///
/// Fails with [`Error::UnknownSymbol`] if `text` contains a symbol the table
/// does not cover, which happens when the table was built from another text.
///
/// # Example
///
/// ```
/// use huffman_text::huffman::{build_frequencies, build_tree, decode, encode, generate_codes};
///
/// let text = "aaabbc";
/// let tree = build_tree(&build_frequencies(text).unwrap()).unwrap();
/// let bits = encode(text, &generate_codes(&tree)).unwrap();
/// assert_eq!(bits.to_string(), "000111110");
/// assert_eq!(decode(&bits, &tree).unwrap(), text);
/// ```
pub fn encode(text: &str, table: &CodeTable) -> Result<Bitstream> {
    let mut bits = Bitstream::new();
    for (position, symbol) in text.chars().enumerate() {
        let code = table
            .get(symbol)
            .ok_or(Error::UnknownSymbol { symbol, position })?;
        bits.push_code(code);
    }
    Ok(bits)
}

/// Decodes `bits` by walking `tree` from the root, going left on `0` and
/// right on `1`, and emitting a symbol at every leaf.
///
/// Fails with [`Error::TruncatedStream`] if the bits run out between the
/// root and a leaf. Against a single-leaf tree every `0` decodes to that
/// leaf's symbol and a `1` fails with [`Error::UnassignedCode`].
pub fn decode(bits: &Bitstream, tree: &HuffmanTree) -> Result<String> {
    let root = tree.root();
    if let HuffmanNode::Leaf { symbol, .. } = root {
        return decode_single(bits.bits(), *symbol);
    }

    let mut result = String::new();
    let mut current = root;
    let mut pending = 0usize;
    let mut decoded = 0usize;
    for bit in bits.bits().iter().by_vals() {
        if let HuffmanNode::Internal { left, right, .. } = current {
            current = if bit { right } else { left };
            pending += 1;
        }
        if let HuffmanNode::Leaf { symbol, .. } = current {
            result.push(*symbol);
            decoded += 1;
            pending = 0;
            current = root;
        }
    }

    if pending > 0 {
        return Err(Error::TruncatedStream {
            bit_len: bits.len(),
            symbols_decoded: decoded,
        });
    }
    Ok(result)
}

fn decode_single(bits: &BitSlice<u8, Msb0>, symbol: Symbol) -> Result<String> {
    match bits.first_one() {
        Some(offset) => Err(Error::UnassignedCode { offset }),
        None => Ok(std::iter::repeat(symbol).take(bits.len()).collect()),
    }
}
