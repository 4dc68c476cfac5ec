//! Packed bit sequence produced by the encoder.
//!
//! Bits are stored most-significant-first in bytes. The final byte is padded
//! with zeros, so the bit length travels alongside the raw bytes.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::error::{Error, Result};
use crate::huffman::code_table::{parse_bits, Code};

/// An encoded text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitstream {
    bits: BitVec<u8, Msb0>,
}

impl Bitstream {
    /// An empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a stream from packed bytes and its length in bits.
    ///
    /// Fails if `bit_len` needs more bits than `bytes` holds.
    pub fn from_raw_parts(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        let capacity = bytes.len() * 8;
        if bit_len > capacity {
            return Err(Error::InvalidInput(format!(
                "{bit_len} bits requested from {} bytes",
                bytes.len()
            )));
        }
        let mut bits = BitVec::from_vec(bytes);
        bits.truncate(bit_len);
        Ok(Bitstream { bits })
    }

    /// Splits the stream into packed bytes and its length in bits
    pub fn into_raw_parts(self) -> (Vec<u8>, usize) {
        let bit_len = self.bits.len();
        (self.bits.into_vec(), bit_len)
    }

    /// Packed bytes, padding included
    pub fn as_raw_slice(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Length in bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when the stream holds no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Length in whole bytes once packed
    pub fn byte_len(&self) -> usize {
        self.bits.len().div_ceil(8)
    }

    /// The stream's bits in order
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        self.bits.as_bitslice()
    }

    pub(crate) fn push_code(&mut self, code: &Code) {
        self.bits.extend_from_bitslice(code.bits());
    }
}

impl fmt::Display for Bitstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Bitstream {
    type Err = Error;

    /// Parses a string of `0` and `1` characters.
    fn from_str(s: &str) -> Result<Self> {
        parse_bits(s).map(|bits| Bitstream { bits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let stream: Bitstream = "1011001".parse().unwrap();
        assert_eq!(stream.len(), 7);
        assert_eq!(stream.byte_len(), 1);
        assert_eq!(stream.to_string(), "1011001");
        assert_eq!(stream.as_raw_slice(), &[0b1011_0010]);
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        assert!(matches!(
            "10 1".parse::<Bitstream>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_raw_parts() {
        let stream = Bitstream::from_raw_parts(vec![0b1100_0000, 0b1000_0000], 9).unwrap();
        assert_eq!(stream.to_string(), "110000001");
        let (bytes, bit_len) = stream.into_raw_parts();
        assert_eq!(bit_len, 9);
        assert_eq!(bytes, vec![0b1100_0000, 0b1000_0000]);
    }

    #[test]
    fn test_raw_parts_too_short() {
        assert!(matches!(
            Bitstream::from_raw_parts(vec![0xff], 9),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_push_code() {
        let mut stream = Bitstream::new();
        assert!(stream.is_empty());
        stream.push_code(&"10".parse().unwrap());
        stream.push_code(&"011".parse().unwrap());
        assert_eq!(stream.to_string(), "10011");
        assert_eq!(stream.byte_len(), 1);
    }
}
