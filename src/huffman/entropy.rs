//! Shannon entropy of a symbol distribution.
//!
//! The entropy `H = -Σ p·log2(p)` is the lower bound, in bits per symbol, for
//! any prefix code over the distribution. It depends only on the probability
//! table, so it can be computed before (or without) building a tree.

use crate::huffman::frequency::ProbabilityTable;

/// Computes the Shannon entropy of `probabilities` in bits per symbol.
///
/// Non-positive probabilities contribute nothing.
///
/// # Example
///
/// ```
/// use huffman_text::huffman::{build_frequencies, entropy, to_probabilities};
///
/// let table = build_frequencies("abab").unwrap();
/// let h = entropy(&to_probabilities(&table));
/// assert!((h - 1.0).abs() < 1e-12);
/// ```
pub fn entropy(probabilities: &ProbabilityTable) -> f64 {
    -probabilities
        .values()
        .filter(|&p| p > 0.0)
        .map(|p| p * p.log2())
        .sum::<f64>()
}

/// Entropy of a uniform distribution over `distinct` symbols, `log2(distinct)`.
///
/// Returns zero for an alphabet of zero or one symbols.
pub fn max_entropy(distinct: usize) -> f64 {
    if distinct <= 1 {
        0.0
    } else {
        (distinct as f64).log2()
    }
}
