//! Bit-level I/O for packed Huffman streams.
//!
//! `BitWriter` and `BitReader` both work MSB-first: the first bit written
//! lands in the most significant bit of the first byte. This is the bit
//! order of the packed stream payload.
//!
//! # Padding Rules
//! - `BitWriter` pads the final partial byte with zero bits and reports how
//!   many it added via [`BitWriter::padding`].
//! - `BitReader` can be limited to an exact bit length so the padding bits
//!   are never seen by the decoder.
//!
//! # Example
//! ```
//! use huffcode_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_code(&"101".parse().unwrap());
//! writer.write_bit(true);
//! assert_eq!(writer.padding(), 4);
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_0000]);
//!
//! let reader = BitReader::with_bit_len(&bytes, 4).unwrap();
//! assert_eq!(reader.collect::<Vec<_>>(), vec![true, false, true, true]);
//! ```

use crate::code::Code;
use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - unused low bits of `bit_buffer` are zero
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer with room for `bytes` completed bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append one bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append every bit of a Huffman code in order.
    pub fn write_code(&mut self, code: &Code) {
        for bit in code.bits() {
            self.write_bit(*bit);
        }
    }

    /// Number of zero bits `finish` will append to reach a byte boundary.
    pub fn padding(&self) -> u8 {
        (8 - self.bit_count) % 8
    }

    /// Finish writing and return the output bytes.
    ///
    /// A trailing partial byte is completed with zero bits.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer, up to a bit limit.
///
/// # Invariants
/// - `bit_position <= bit_len <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
    /// Number of readable bits; anything past this is padding
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader that stops after `bit_len` bits.
    ///
    /// # Errors
    /// `BitIoError::BitLenOutOfRange` if `data` holds fewer than `bit_len` bits.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Result<Self> {
        let available = data.len() * 8;
        if bit_len > available {
            return Err(BitIoError::BitLenOutOfRange { bit_len, available }.into());
        }
        Ok(Self {
            data,
            bit_position: 0,
            bit_len,
        })
    }

    /// Read a single bit, or `None` once the limit is reached.
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.bit_position >= self.bit_len {
            return None;
        }
        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Some(bit)
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if the limit has been reached.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.next_bit()
    }
}
