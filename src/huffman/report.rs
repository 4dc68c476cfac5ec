//! Compression report.
//!
//! [`build_report`] runs the whole pipeline over a text and freezes the
//! results: how often each symbol occurs, the entropy of that distribution,
//! the Huffman code for every symbol and the size of the encoded text
//! compared with fixed 8-bit ASCII.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::huffman::code_table::{Code, CodeTable, Codebook};
use crate::huffman::entropy::{entropy, max_entropy};
use crate::huffman::frequency::{
    build_frequencies_with, to_probabilities, FrequencyTable, ProbabilityTable,
};
use crate::huffman::text::preprocess;
use crate::huffman::tree::HuffmanTree;
use crate::huffman::Symbol;

/// Bits per symbol in the uncompressed baseline
pub const ASCII_BITS_PER_SYMBOL: u64 = 8;

/// Statistics for one symbol of a report
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolRow<'a> {
    /// The symbol this row describes
    pub symbol: Symbol,
    /// Occurrences of the symbol in the text
    pub count: u64,
    /// `count` divided by the total number of symbols
    pub probability: f64,
    /// Prefix code assigned to the symbol
    pub code: &'a Code,
}

impl SymbolRow<'_> {
    /// Length of the symbol's code in bits
    pub fn code_length(&self) -> usize {
        self.code.len()
    }
}

/// Immutable result of analysing and compressing one text
#[derive(Debug, Clone)]
pub struct CompressionResult {
    frequencies: FrequencyTable,
    probabilities: ProbabilityTable,
    entropy: f64,
    codebook: Codebook,
    ascii_bits: u64,
    huffman_bits: u64,
    average_code_length: f64,
    compression_ratio: f64,
}

impl CompressionResult {
    /// Symbol counts of the modelled text
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Symbol probabilities of the modelled text
    pub fn probabilities(&self) -> &ProbabilityTable {
        &self.probabilities
    }

    /// Number of symbols in the modelled text
    pub fn symbol_count(&self) -> u64 {
        self.frequencies.total()
    }

    /// Number of distinct symbols
    pub fn distinct_symbols(&self) -> usize {
        self.frequencies.len()
    }

    /// Shannon entropy in bits per symbol
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Entropy of a uniform distribution over the same alphabet
    pub fn max_entropy(&self) -> f64 {
        max_entropy(self.distinct_symbols())
    }

    /// Average Huffman code length in bits per symbol
    pub fn average_code_length(&self) -> f64 {
        self.average_code_length
    }

    /// Bits per symbol spent above the entropy bound
    pub fn redundancy(&self) -> f64 {
        self.average_code_length - self.entropy
    }

    /// Entropy divided by average code length, 1.0 for an ideal code
    pub fn efficiency(&self) -> f64 {
        self.entropy / self.average_code_length
    }

    /// Size of the text at 8 bits per symbol
    pub fn ascii_bits(&self) -> u64 {
        self.ascii_bits
    }

    /// Size of the Huffman-encoded text in bits
    pub fn huffman_bits(&self) -> u64 {
        self.huffman_bits
    }

    /// `1 - huffman_bits / ascii_bits`
    pub fn compression_ratio(&self) -> f64 {
        self.compression_ratio
    }

    /// Compression ratio as a percentage
    pub fn compression_percentage(&self) -> f64 {
        self.compression_ratio * 100.0
    }

    /// Symbol to code mapping
    pub fn code_table(&self) -> &CodeTable {
        self.codebook.table()
    }

    /// The tree that decodes this report's bitstreams
    pub fn tree(&self) -> &HuffmanTree {
        self.codebook.tree()
    }

    /// Tree and code table together
    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// One row per symbol in ascending symbol order
    pub fn rows(&self) -> Vec<SymbolRow<'_>> {
        self.frequencies
            .symbols()
            .filter_map(|&symbol| self.row(symbol))
            .collect()
    }

    /// Rows for the requested symbols, in request order. Symbols that do not
    /// occur in the text are skipped.
    pub fn subset(&self, symbols: &[Symbol]) -> Vec<SymbolRow<'_>> {
        symbols.iter().filter_map(|&symbol| self.row(symbol)).collect()
    }

    fn row(&self, symbol: Symbol) -> Option<SymbolRow<'_>> {
        let code = self.code_table().get(symbol)?;
        Some(SymbolRow {
            symbol,
            count: self.frequencies.count(symbol),
            probability: self.probabilities.probability(symbol),
            code,
        })
    }
}

/// Analyses and compresses `text` with the default configuration.
///
/// # Example
///
/// ```
/// use huffman_text::huffman::build_report;
///
/// let report = build_report("aaaa").unwrap();
/// assert_eq!(report.huffman_bits(), 4);
/// assert_eq!(report.ascii_bits(), 32);
/// assert!((report.compression_ratio() - 0.875).abs() < 1e-12);
/// ```
pub fn build_report(text: &str) -> Result<CompressionResult> {
    build_report_with(text, &Config::default())
}

/// Analyses and compresses `text` after applying `config`.
pub fn build_report_with(text: &str, config: &Config) -> Result<CompressionResult> {
    config.validate()?;
    let text = preprocess(text, &config.text);

    let frequencies = build_frequencies_with(&text, config)?;
    let probabilities = to_probabilities(&frequencies);
    let entropy_bits = entropy(&probabilities);
    let codebook = Codebook::from_frequencies(&frequencies)?;

    let bits = codebook.encode(&text)?;
    if config.verify_round_trip {
        let decoded = codebook.decode(&bits)?;
        if let Some(position) = first_difference(&text, &decoded) {
            return Err(Error::RoundTripMismatch { position });
        }
    }

    let symbol_count = frequencies.total();
    let huffman_bits = bits.len() as u64;
    debug_assert_eq!(huffman_bits, codebook.table().encoded_bits(&frequencies));
    let ascii_bits = ASCII_BITS_PER_SYMBOL * symbol_count;
    let average_code_length = huffman_bits as f64 / symbol_count as f64;
    let compression_ratio = 1.0 - huffman_bits as f64 / ascii_bits as f64;

    log::debug!(
        "report: {} symbols, {} distinct, entropy {:.6}, avg {:.6}, {} -> {} bits",
        symbol_count,
        frequencies.len(),
        entropy_bits,
        average_code_length,
        ascii_bits,
        huffman_bits
    );

    Ok(CompressionResult {
        frequencies,
        probabilities,
        entropy: entropy_bits,
        codebook,
        ascii_bits,
        huffman_bits,
        average_code_length,
        compression_ratio,
    })
}

/// Index, in chars, of the first position where `a` and `b` differ
fn first_difference(a: &str, b: &str) -> Option<usize> {
    let mut left = a.chars();
    let mut right = b.chars();
    let mut position = 0;
    loop {
        match (left.next(), right.next()) {
            (None, None) => return None,
            (x, y) if x != y => return Some(position),
            _ => position += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::text::TextOptions;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_symbol_report() {
        let report = build_report("aaaa").unwrap();
        assert_eq!(report.code_table().get('a').unwrap().len(), 1);
        assert_eq!(report.huffman_bits(), 4);
        assert_eq!(report.ascii_bits(), 32);
        assert_abs_diff_eq!(report.compression_ratio(), 0.875, epsilon = 1e-12);
        assert_abs_diff_eq!(report.compression_percentage(), 87.5, epsilon = 1e-9);
        assert_abs_diff_eq!(report.entropy(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.average_code_length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_symbol_report() {
        let report = build_report("abab").unwrap();
        assert_eq!(report.code_table().get('a').unwrap().len(), 1);
        assert_eq!(report.code_table().get('b').unwrap().len(), 1);
        assert_eq!(report.huffman_bits(), 4);
        assert_eq!(report.entropy(), 1.0);
        assert_eq!(report.average_code_length(), 1.0);
        assert_abs_diff_eq!(report.efficiency(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.redundancy(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aaabbc_report() {
        let report = build_report("aaabbc").unwrap();
        let len = |symbol| report.code_table().get(symbol).unwrap().len() as u64;
        assert_eq!(report.tree().weight(), 6);
        assert!(len('a') <= len('b') && len('b') <= len('c'));
        assert_eq!(
            report.huffman_bits(),
            3 * len('a') + 2 * len('b') + len('c')
        );
        assert_eq!(report.huffman_bits(), 9);
        assert_eq!(report.ascii_bits(), 48);
        assert_abs_diff_eq!(report.compression_ratio(), 1.0 - 9.0 / 48.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.average_code_length(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_bounds_average_length() {
        let report = build_report("this is an example for huffman encoding").unwrap();
        assert!(report.entropy() <= report.average_code_length());
        assert!(report.average_code_length() <= report.entropy() + 1.0);
        assert!(report.entropy() <= report.max_entropy());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(build_report(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_rows_sorted_by_symbol() {
        let report = build_report("cabbage").unwrap();
        let symbols: Vec<Symbol> = report.rows().iter().map(|row| row.symbol).collect();
        assert_eq!(symbols, vec!['a', 'b', 'c', 'e', 'g']);
        let total: u64 = report.rows().iter().map(|row| row.count).sum();
        assert_eq!(total, report.symbol_count());
        for row in report.rows() {
            assert_eq!(row.code_length(), row.code.len());
            assert_abs_diff_eq!(row.probability, row.count as f64 / 7.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_subset_keeps_request_order_and_skips_missing() {
        let report = build_report("a fire. to build a fire.").unwrap();
        let rows = report.subset(&['f', 'z', ' ', '.', 'a']);
        let symbols: Vec<Symbol> = rows.iter().map(|row| row.symbol).collect();
        assert_eq!(symbols, vec!['f', ' ', '.', 'a']);
        assert_eq!(rows[2].count, 2);
    }

    #[test]
    fn test_preprocessing_applies() {
        let config = Config::default().with_text_options(TextOptions::normalized());
        let report = build_report_with("AbA\nb\n", &config).unwrap();
        assert_eq!(report.symbol_count(), 4);
        assert_eq!(report.distinct_symbols(), 2);
        assert_eq!(report.frequencies().count('a'), 2);
        assert!(!report.frequencies().contains('\n'));
    }

    #[test]
    fn test_without_round_trip_check() {
        let config = Config::default().with_round_trip_check(false);
        let with = build_report("mississippi").unwrap();
        let without = build_report_with("mississippi", &config).unwrap();
        assert_eq!(with.huffman_bits(), without.huffman_bits());
        assert_eq!(with.code_table(), without.code_table());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config::default().with_parallel_threshold(0);
        assert!(matches!(
            build_report_with("abc", &config),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("abc", "abc"), None);
        assert_eq!(first_difference("abc", "abd"), Some(2));
        assert_eq!(first_difference("abc", "ab"), Some(2));
        assert_eq!(first_difference("", "x"), Some(0));
    }
}
