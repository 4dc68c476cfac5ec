//! Huffman text compression engine.
//!
//! Given a text, the crate derives a symbol-frequency model, computes its
//! entropy, builds a deterministic Huffman tree, generates the prefix code
//! for every symbol and encodes the text into a packed bitstream that
//! decodes back to the original.
//!
//! ```rust
//! use huffman_text::build_report;
//!
//! let report = build_report("aaabbc").unwrap();
//! assert!(report.entropy() <= report.average_code_length());
//! for row in report.rows() {
//!     println!("{:?} x{} -> {}", row.symbol, row.count, row.code);
//! }
//! ```

pub mod config;
pub mod error;
pub mod huffman;

pub use config::Config;
pub use error::{Error, Result};
pub use huffman::{build_report, build_report_with, decode, encode, CompressionResult};
