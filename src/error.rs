//! Error types shared by every stage of the compression pipeline.
//!
//! All failures are local precondition violations detected synchronously.
//! Nothing here is transient, so callers should surface them rather than retry.

use thiserror::Error;

use crate::huffman::Symbol;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while modelling, coding or reporting on a text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text contained no symbols, so there is nothing to model
    #[error("input text is empty")]
    EmptyInput,

    /// A frequency table with no entries was handed to the tree builder
    #[error("frequency table has no symbols")]
    EmptyAlphabet,

    /// Encoding met a symbol that the code table does not cover
    #[error("symbol {symbol:?} at position {position} has no code")]
    UnknownSymbol {
        /// The offending symbol
        symbol: Symbol,
        /// Index of the symbol within the text, counted in chars
        position: usize,
    },

    /// The bitstream ended part-way down a root-to-leaf path
    #[error("bitstream truncated after {bit_len} bits ({symbols_decoded} symbols decoded)")]
    TruncatedStream {
        /// Total number of bits in the stream
        bit_len: usize,
        /// Symbols successfully decoded before the stream ran out
        symbols_decoded: usize,
    },

    /// A bit selected a branch that carries no symbol
    #[error("bit {offset} selects a branch with no symbol")]
    UnassignedCode {
        /// Offset of the bit in the stream
        offset: usize,
    },

    /// The decoded text differs from the text that was encoded
    #[error("round trip diverged at symbol {position}")]
    RoundTripMismatch {
        /// First position where the decoded text differs
        position: usize,
    },

    /// Malformed caller input such as a bad bit string or configuration value
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
