//! A single Huffman code: a short, ordered bit string.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::error::{BitIoError, Error};

/// Bit string assigned to one symbol, stored MSB-first.
///
/// Codes compare bit by bit, shorter codes first on a shared prefix, and
/// print as a string of `0` and `1`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Code(BitVec<u8, Msb0>);

impl Code {
    /// An empty code. Only meaningful as a prefix under construction.
    pub fn new() -> Self {
        Self(BitVec::new())
    }

    /// Build a code from a sequence of bits.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        Self(bits.into_iter().collect())
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    /// A copy of this code extended by one bit.
    pub fn with_bit(&self, bit: bool) -> Self {
        let mut code = self.clone();
        code.push(bit);
        code
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    /// Bit at `index`, if any.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).map(|bit| *bit)
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() <= other.len() && other.0[..self.len()] == self.0[..]
    }
}

impl Ord for Code {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().by_vals().cmp(other.0.iter().by_vals())
    }
}

impl PartialOrd for Code {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
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

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code(\"{self}\")")
    }
}

impl FromStr for Code {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut code = Code::new();
        for (index, ch) in s.chars().enumerate() {
            match ch {
                '0' => code.push(false),
                '1' => code.push(true),
                _ => return Err(BitIoError::InvalidBitChar { ch, index }.into()),
            }
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let c = code("001011011");
        assert_eq!(c.len(), 9);
        assert_eq!(c.to_string(), "001011011");
        assert_eq!(c.get(2), Some(true));
        assert_eq!(c.get(9), None);
        assert_eq!(format!("{c:?}"), "Code(\"001011011\")");
    }

    #[test]
    fn test_parse_rejects_other_chars() {
        let err = "01x1".parse::<Code>().unwrap_err();
        assert!(matches!(
            err,
            Error::BitIo(BitIoError::InvalidBitChar { ch: 'x', index: 2 })
        ));
    }

    #[test]
    fn test_prefix() {
        assert!(code("01").is_prefix_of(&code("0110")));
        assert!(code("01").is_prefix_of(&code("01")));
        assert!(!code("0110").is_prefix_of(&code("01")));
        assert!(!code("10").is_prefix_of(&code("0110")));
        assert!(Code::new().is_prefix_of(&code("1")));
    }

    #[test]
    fn test_with_bit_leaves_original() {
        let base = code("10");
        let left = base.with_bit(false);
        let right = base.with_bit(true);

        assert_eq!(base.to_string(), "10");
        assert_eq!(left.to_string(), "100");
        assert_eq!(right.to_string(), "101");
    }

    #[test]
    fn test_ordering() {
        let mut codes = vec![code("1"), code("011"), code("01"), code("000")];
        codes.sort();
        let sorted: Vec<String> = codes.iter().map(ToString::to_string).collect();
        assert_eq!(sorted, vec!["000", "01", "011", "1"]);
    }

    #[test]
    fn test_equality_is_bit_exact() {
        assert_eq!(code("0"), Code::from_bits([false]));
        assert_ne!(code("0"), code("00"));
    }
}
