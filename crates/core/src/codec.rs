//! One-stop codec: a code table plus encode, decode and persistence.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::decoder;
use crate::encoder;
use crate::error::Result;
use crate::frequency;
use crate::store;
use crate::stream::PackedStream;
use crate::table::CodeTable;

/// Huffman codec over symbols of type `S`.
///
/// Create one from frequency data or a saved table; either way only the code
/// table is kept.
///
/// # Example
/// ```
/// use huffcode_core::HuffmanCodec;
///
/// let codec = HuffmanCodec::from_sample("mississippi".chars()).unwrap();
/// let packed = codec.encode("sip".chars()).unwrap();
/// assert_eq!(codec.decode_string(&packed).unwrap(), "sip");
/// ```
#[derive(Debug, Clone)]
pub struct HuffmanCodec<S> {
    table: CodeTable<S>,
}

impl<S> HuffmanCodec<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// Build from `(frequency, symbol)` pairs.
    pub fn from_frequencies<I>(frequencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, S)>,
    {
        Ok(Self::from_table(CodeTable::from_frequencies(frequencies)?))
    }

    /// Build from the symbol frequencies observed in `sample`.
    pub fn from_sample<I>(sample: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        Self::from_frequencies(frequency::frequencies_of(sample))
    }

    pub fn from_table(table: CodeTable<S>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CodeTable<S> {
        &self.table
    }

    pub fn into_table(self) -> CodeTable<S> {
        self.table
    }

    pub fn encode<I>(&self, symbols: I) -> Result<PackedStream>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        encoder::encode(symbols, &self.table)
    }

    pub fn encode_to<I, W>(&self, symbols: I, sink: &mut W) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        W: Write + ?Sized,
    {
        encoder::encode_to(symbols, &self.table, sink)
    }

    /// Encode into a new file at `path`.
    ///
    /// The file is only created once encoding has succeeded.
    pub fn encode_to_path<I, P>(&self, symbols: I, path: P) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        P: AsRef<Path>,
    {
        let stream = self.encode(symbols)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(stream.as_bytes())?;
        writer.flush()?;
        Ok(stream.len())
    }

    pub fn decode<B: AsRef<[u8]>>(&self, stream: B) -> Result<Vec<S>> {
        decoder::decode(stream, &self.table)
    }

    pub fn decode_from<R: Read + ?Sized>(&self, source: &mut R) -> Result<Vec<S>> {
        decoder::decode_from(source, &self.table)
    }

    pub fn decode_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<S>> {
        let mut reader = BufReader::new(File::open(path)?);
        self.decode_from(&mut reader)
    }
}

impl<S> HuffmanCodec<S>
where
    S: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned,
{
    /// Load a codec from a table saved with [`HuffmanCodec::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_table(store::load_table(path)?))
    }

    /// Save the code table to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        store::save_table(&self.table, path)
    }
}

impl HuffmanCodec<char> {
    /// Decode a stream of `char` symbols straight into a `String`.
    pub fn decode_string<B: AsRef<[u8]>>(&self, stream: B) -> Result<String> {
        Ok(self.decode(stream)?.into_iter().collect())
    }
}
