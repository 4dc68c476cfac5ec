//! Huffman text compression.
//!
//! This module provides the full pipeline from raw text to a packed bitstream and back:
//! - Frequency modelling and probabilities
//! - Shannon entropy of the symbol distribution
//! - Deterministic Huffman tree construction
//! - Code table generation and the decode-side tree
//! - Bit-exact encoding and decoding
//! - An aggregate compression report
//!
//! # Examples
//!
//! ```rust
//! use huffman_text::huffman::{build_report, decode, encode};
//!
//! let report = build_report("aaabbc").unwrap();
//! assert_eq!(report.ascii_bits(), 48);
//! assert_eq!(report.huffman_bits(), 9);
//!
//! let bits = encode("abc", report.code_table()).unwrap();
//! let text = decode(&bits, report.tree()).unwrap();
//! assert_eq!(text, "abc");
//! ```

/// A single input symbol
pub type Symbol = char;

pub mod bitstream;
pub mod code_table;
pub mod codec;
pub mod entropy;
pub mod frequency;
pub mod report;
pub mod text;
pub mod tree;

pub use bitstream::Bitstream;
pub use code_table::{generate_codes, Code, CodeTable, Codebook};
pub use codec::{decode, encode};
pub use entropy::{entropy, max_entropy};
pub use frequency::{
    build_frequencies, build_frequencies_with, to_probabilities, FrequencyTable, ProbabilityTable,
};
pub use report::{build_report, build_report_with, CompressionResult, SymbolRow};
pub use text::{preprocess, TextOptions};
pub use tree::{build_tree, HuffmanNode, HuffmanTree};
