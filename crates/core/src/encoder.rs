//! Symbol sequence -> packed stream.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::io::Write;

use log::debug;

use crate::bitio::BitWriter;
use crate::error::{EncodeError, Result};
use crate::stream::PackedStream;
use crate::table::CodeTable;

/// Encode `symbols` with `table`.
///
/// Codes are concatenated in input order, zero bits are appended up to the
/// next byte boundary, and a one-byte header holding that padding count is
/// placed in front. Accepts owned symbols or references.
///
/// # Errors
/// `EncodeError::UnknownSymbol` for the first symbol without a code. Nothing
/// is returned in that case.
pub fn encode<S, I>(symbols: I, table: &CodeTable<S>) -> Result<PackedStream>
where
    S: Clone + Eq + Hash + Debug,
    I: IntoIterator,
    I::Item: Borrow<S>,
{
    let symbols = symbols.into_iter();
    let mut writer = BitWriter::with_capacity(symbols.size_hint().0 * table.max_code_len() / 8);
    let mut count = 0usize;

    for (index, symbol) in symbols.enumerate() {
        let symbol = symbol.borrow();
        let code = table.code(symbol).ok_or_else(|| EncodeError::UnknownSymbol {
            symbol: format!("{symbol:?}"),
            index,
        })?;
        writer.write_code(code);
        count += 1;
    }

    let bit_len = writer.bit_len();
    let padding = writer.padding();
    let stream = PackedStream::from_parts(padding, writer.finish());

    debug!(
        "encoded {} symbols into {} bits (+{} padding), {} bytes with header",
        count,
        bit_len,
        padding,
        stream.len()
    );
    Ok(stream)
}

/// Encode `symbols` and write the packed stream to `sink`.
///
/// The whole stream is built before the first write, so an unknown symbol
/// leaves the sink untouched. Returns the number of bytes written.
pub fn encode_to<S, I, W>(symbols: I, table: &CodeTable<S>, sink: &mut W) -> Result<usize>
where
    S: Clone + Eq + Hash + Debug,
    I: IntoIterator,
    I::Item: Borrow<S>,
    W: Write + ?Sized,
{
    let stream = encode(symbols, table)?;
    sink.write_all(stream.as_bytes())?;
    sink.flush()?;
    Ok(stream.len())
}
