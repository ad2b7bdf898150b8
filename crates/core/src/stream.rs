//! The packed stream container.
//!
//! # Format
//!
//! ```text
//! +------------------+
//! | padding (1 byte) |  number of zero bits appended to the last byte, 0-7
//! +------------------+
//! | payload          |  concatenated codes, MSB-first, then `padding`
//! | (variable)       |  zero bits to reach a byte boundary
//! +------------------+
//! ```
//!
//! An empty symbol sequence packs to the single byte `0x00`.

use crate::error::{DecodeError, Result};

/// Size of the padding header in bytes
pub const HEADER_SIZE: usize = 1;

/// Largest legal padding value
pub const MAX_PADDING: u8 = 7;

/// A byte-aligned encoded symbol sequence with its padding header.
///
/// Values of this type always carry a valid header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedStream {
    bytes: Vec<u8>,
}

impl PackedStream {
    /// Assemble a stream from a padding count and already padded payload.
    pub(crate) fn from_parts(padding: u8, payload: Vec<u8>) -> Self {
        debug_assert!(padding <= MAX_PADDING);
        debug_assert!(padding == 0 || !payload.is_empty());

        let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
        bytes.push(padding);
        bytes.extend_from_slice(&payload);
        Self { bytes }
    }

    /// Wrap raw bytes, validating the header.
    ///
    /// # Errors
    /// - `DecodeError::MissingHeader` for an empty buffer
    /// - `DecodeError::InvalidPadding` if the header exceeds 7, or is
    ///   non-zero with no payload to pad
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        check_header(&bytes)?;
        Ok(Self { bytes })
    }

    /// Number of zero bits at the end of the payload.
    pub fn padding(&self) -> u8 {
        self.bytes[0]
    }

    /// Number of meaningful payload bits.
    pub fn bit_len(&self) -> usize {
        payload_bit_len(&self.bytes)
    }

    /// Payload bytes, padding included.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    /// The whole stream, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total size in bytes, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A stream is never empty; it always has a header.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<[u8]> for PackedStream {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for PackedStream {
    type Error = crate::error::Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

/// Validate the header of a raw stream and return its padding count.
pub(crate) fn check_header(bytes: &[u8]) -> Result<u8> {
    let Some(&padding) = bytes.first() else {
        return Err(DecodeError::MissingHeader.into());
    };
    if padding > MAX_PADDING || (padding > 0 && bytes.len() == HEADER_SIZE) {
        return Err(DecodeError::InvalidPadding(padding).into());
    }
    Ok(padding)
}

/// Payload bits of a stream whose header has been validated.
pub(crate) fn payload_bit_len(bytes: &[u8]) -> usize {
    let total = (bytes.len() - HEADER_SIZE) * 8;
    match bytes[0] {
        0 => total,
        padding => total - padding as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_parts() {
        let stream = PackedStream::from_parts(2, vec![0x0A, 0xB4]);
        assert_eq!(stream.as_bytes(), &[0x02, 0x0A, 0xB4]);
        assert_eq!(stream.padding(), 2);
        assert_eq!(stream.bit_len(), 14);
        assert_eq!(stream.payload(), &[0x0A, 0xB4]);
        assert_eq!(stream.len(), 3);
    }

    #[test]
    fn test_zero_padding_keeps_all_bits() {
        let stream = PackedStream::from_bytes(vec![0, 0xFF, 0x00]).unwrap();
        assert_eq!(stream.bit_len(), 16);
    }

    #[test]
    fn test_empty_payload() {
        let stream = PackedStream::from_bytes(vec![0]).unwrap();
        assert_eq!(stream.bit_len(), 0);
        assert!(stream.payload().is_empty());
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            PackedStream::from_bytes(Vec::new()),
            Err(Error::Decode(DecodeError::MissingHeader))
        ));
    }

    #[test]
    fn test_padding_out_of_range() {
        assert!(matches!(
            PackedStream::try_from(vec![8, 0x00]),
            Err(Error::Decode(DecodeError::InvalidPadding(8)))
        ));
    }

    #[test]
    fn test_padding_without_payload() {
        assert!(matches!(
            PackedStream::from_bytes(vec![3]),
            Err(Error::Decode(DecodeError::InvalidPadding(3)))
        ));
    }
}
