//! Symbol frequency model.
//!
//! A [`FrequencyTable`] records how often each distinct symbol occurs in a
//! text. Its keys are exactly the symbols present and its counts sum to the
//! text length. A [`ProbabilityTable`] divides every count by that total.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::huffman::Symbol;

/// Occurrence counts for every distinct symbol of a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Builds a table from explicit `(symbol, count)` pairs.
    ///
    /// Zero counts are dropped and repeated symbols are summed. Fails with
    /// [`Error::EmptyAlphabet`] when no positive count remains and with
    /// [`Error::InvalidInput`] when the counts add up past `u64::MAX`.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, u64)>,
    {
        let overflow = || Error::InvalidInput("frequency total overflows u64".to_string());

        let mut table = BTreeMap::new();
        let mut total: u64 = 0;
        for (symbol, count) in counts {
            if count > 0 {
                total = total.checked_add(count).ok_or_else(overflow)?;
                let entry = table.entry(symbol).or_insert(0u64);
                *entry = entry.checked_add(count).ok_or_else(overflow)?;
            }
        }
        if table.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        Ok(FrequencyTable {
            counts: table,
            total,
        })
    }

    fn from_map(counts: BTreeMap<Symbol, u64>) -> Self {
        let total = counts.values().sum();
        FrequencyTable { counts, total }
    }

    /// Count for `symbol`, zero when it does not occur
    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Total number of symbols counted
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false for tables built through this module
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Whether `symbol` occurs at least once
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.counts.contains_key(&symbol)
    }

    /// `(symbol, count)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Distinct symbols in ascending order
    pub fn symbols(&self) -> btree_map::Keys<'_, Symbol, u64> {
        self.counts.keys()
    }
}

/// Relative frequency of every symbol, each in (0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    probabilities: BTreeMap<Symbol, f64>,
}

impl ProbabilityTable {
    /// Probability of `symbol`, zero when it does not occur
    pub fn probability(&self, symbol: Symbol) -> f64 {
        self.probabilities.get(&symbol).copied().unwrap_or(0.0)
    }

    /// Number of symbols with a probability
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// True when the table holds no symbols
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// `(symbol, probability)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, f64)> + '_ {
        self.probabilities.iter().map(|(&symbol, &p)| (symbol, p))
    }

    /// Probabilities only, in ascending symbol order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.probabilities.values().copied()
    }
}

/// Counts every symbol of `text` in a single pass.
///
/// # Example
///
/// ```
/// use huffman_text::huffman::build_frequencies;
///
/// let table = build_frequencies("aabccc").unwrap();
/// assert_eq!(table.count('a'), 2);
/// assert_eq!(table.count('b'), 1);
/// assert_eq!(table.count('c'), 3);
/// assert_eq!(table.total(), 6);
/// ```
pub fn build_frequencies(text: &str) -> Result<FrequencyTable> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(FrequencyTable::from_map(count_sequential(text)))
}

/// Like [`build_frequencies`], but large texts are counted in parallel
/// once they reach `config.parallel_threshold` bytes.
pub fn build_frequencies_with(text: &str, config: &Config) -> Result<FrequencyTable> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }
    let counts = if text.len() >= config.parallel_threshold {
        count_parallel(text)
    } else {
        count_sequential(text)
    };
    Ok(FrequencyTable::from_map(counts))
}

/// Divides each count by the table total.
pub fn to_probabilities(table: &FrequencyTable) -> ProbabilityTable {
    let total = table.total() as f64;
    let probabilities = table
        .iter()
        .map(|(symbol, count)| (symbol, count as f64 / total))
        .collect();
    ProbabilityTable { probabilities }
}

fn count_sequential(text: &str) -> BTreeMap<Symbol, u64> {
    let mut counts = BTreeMap::new();
    for ch in text.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

#[cfg(feature = "parallel")]
fn count_parallel(text: &str) -> BTreeMap<Symbol, u64> {
    use rayon::prelude::*;
    use std::collections::HashMap;

    let merged = text
        .par_chars()
        .fold(HashMap::new, |mut acc: HashMap<Symbol, u64>, ch| {
            *acc.entry(ch).or_insert(0) += 1;
            acc
        })
        .reduce(HashMap::new, |mut left, right| {
            for (symbol, count) in right {
                *left.entry(symbol).or_insert(0) += count;
            }
            left
        });
    log::trace!("parallel count over {} bytes", text.len());
    merged.into_iter().collect()
}

#[cfg(not(feature = "parallel"))]
fn count_parallel(text: &str) -> BTreeMap<Symbol, u64> {
    count_sequential(text)
}
