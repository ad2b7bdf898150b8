//! Packed stream -> symbol sequence.

use std::io::Read;

use log::debug;

use crate::bitio::BitReader;
use crate::error::{DecodeError, Result};
use crate::stream::{check_header, payload_bit_len, HEADER_SIZE};
use crate::table::{CodeTable, TrieStep, TRIE_ROOT};

/// Decode a packed stream produced with `table`.
///
/// The first byte is the padding count; that many bits are dropped from the
/// end of the payload (none when it is zero). The remaining bits are matched
/// left to right against the table's codes, one symbol per code. Since the
/// code is prefix-free, at most one code can match at any position and no
/// backtracking is needed.
///
/// # Errors
/// - `DecodeError::MissingHeader` / `InvalidPadding` for a bad header
/// - `DecodeError::UnknownCode` if the bits at some position start no code
/// - `DecodeError::TruncatedStream` if the payload ends inside a code
pub fn decode<S, B>(stream: B, table: &CodeTable<S>) -> Result<Vec<S>>
where
    S: Clone,
    B: AsRef<[u8]>,
{
    let bytes = stream.as_ref();
    check_header(bytes)?;
    let bit_len = payload_bit_len(bytes);
    let mut reader = BitReader::with_bit_len(&bytes[HEADER_SIZE..], bit_len)?;

    let mut symbols = Vec::new();
    let mut at = TRIE_ROOT;
    let mut code_start = 0;

    while let Some(bit) = reader.next_bit() {
        match table.step(at, bit) {
            Some(TrieStep::Branch(next)) => at = next,
            Some(TrieStep::Symbol(index)) => {
                symbols.push(table.entry_symbol(index).clone());
                at = TRIE_ROOT;
                code_start = reader.position();
            }
            None => {
                return Err(DecodeError::UnknownCode {
                    position: code_start,
                }
                .into())
            }
        }
    }

    if at != TRIE_ROOT {
        return Err(DecodeError::TruncatedStream {
            position: code_start,
            leftover: bit_len - code_start,
        }
        .into());
    }

    debug!("decoded {} symbols from {} bits", symbols.len(), bit_len);
    Ok(symbols)
}

/// Read a whole packed stream from `source` and decode it.
pub fn decode_from<S, R>(source: &mut R, table: &CodeTable<S>) -> Result<Vec<S>>
where
    S: Clone,
    R: Read + ?Sized,
{
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    decode(&bytes, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::error::Error;

    fn abcd() -> CodeTable<char> {
        // a=00 b=010 c=011 d=1
        CodeTable::from_frequencies(vec![(2.0, 'a'), (1.0, 'b'), (1.0, 'c'), (5.0, 'd')]).unwrap()
    }

    #[test]
    fn test_decode_known_bytes() {
        let table = abcd();
        let symbols = decode([7u8, 0b1000_1001, 0b1000_0000], &table).unwrap();
        assert_eq!(symbols, vec!['d', 'a', 'b', 'c']);
    }

    #[test]
    fn test_round_trip() {
        let table = abcd();
        let input: Vec<char> = "abacabadabacaba dddd".chars().filter(|c| *c != ' ').collect();
        let stream = encode(&input, &table).unwrap();
        assert_eq!(decode(&stream, &table).unwrap(), input);
    }

    #[test]
    fn test_zero_padding_uses_every_bit() {
        let table = abcd();
        // eight d's fill the byte exactly
        assert_eq!(decode([0u8, 0xFF], &table).unwrap(), vec!['d'; 8]);
    }

    #[test]
    fn test_padding_bits_are_dropped() {
        let table = abcd();
        // "1" + 7 zero bits of padding; the zeros would otherwise read as a, a, a + half a code
        assert_eq!(decode([7u8, 0b1000_0000], &table).unwrap(), vec!['d']);
    }

    #[test]
    fn test_empty_payload() {
        let table = abcd();
        assert!(decode([0u8], &table).unwrap().is_empty());
    }

    #[test]
    fn test_missing_header() {
        let table = abcd();
        assert!(matches!(
            decode([0u8; 0], &table),
            Err(Error::Decode(DecodeError::MissingHeader))
        ));
    }

    #[test]
    fn test_invalid_padding() {
        let table = abcd();
        assert!(matches!(
            decode([9u8, 0x00], &table),
            Err(Error::Decode(DecodeError::InvalidPadding(9)))
        ));
    }

    #[test]
    fn test_truncated_stream() {
        let table = abcd();
        // "1" "01": a b/c code cut after two bits, then 5 padding bits
        let result = decode([5u8, 0b1010_0000], &table);
        match result {
            Err(Error::Decode(DecodeError::TruncatedStream { position, leftover })) => {
                assert_eq!(position, 1);
                assert_eq!(leftover, 2);
            }
            other => panic!("expected truncated stream, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_code_with_incomplete_table() {
        let table = CodeTable::from_codes(vec![('x', "0".parse().unwrap())]).unwrap();
        // "0" "0" "1"
        let result = decode([5u8, 0b0010_0000], &table);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::UnknownCode { position: 2 }))
        ));
    }

    #[test]
    fn test_decode_from_reader() {
        let table = abcd();
        let mut source = std::io::Cursor::new(vec![7u8, 0b1000_1001, 0b1000_0000]);
        assert_eq!(decode_from(&mut source, &table).unwrap(), vec!['d', 'a', 'b', 'c']);
    }
}
