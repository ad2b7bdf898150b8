//! Error types for huffcode.
//!
//! All operations return structured errors rather than panicking. Encode and
//! decode are all-or-nothing: an error means no output was produced.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits, parsing code strings
/// - Build: the frequency table cannot produce a tree
/// - Code table: a symbol/code mapping is not a valid prefix code
/// - Encode / Decode: stream-level failures
/// - Store: persisted table container is malformed
/// - I/O: the caller's sink or source failed
/// - Round trip: a verification pass found decoded output that differs
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., bit limit beyond the buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Frequency table rejected by the tree builder
    #[error("invalid input: {0}")]
    Build(#[from] BuildError),

    /// Symbol/code mapping is not a bijective prefix code
    #[error("invalid code table: {0}")]
    CodeTable(#[from] CodeTableError),

    /// Encoding failed before any output was produced
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Packed stream could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Stored code table container is malformed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// Sink/source I/O error, passed through untouched
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoded symbols differ from the ones that were encoded
    #[error("round trip mismatch at symbol {position}")]
    RoundTripMismatch { position: usize },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Bit limit larger than the backing buffer
    #[error("bit length {bit_len} exceeds buffer of {available} bits")]
    BitLenOutOfRange { bit_len: usize, available: usize },

    /// Character other than '0' or '1' in a textual code
    #[error("invalid bit character {ch:?} at index {index}")]
    InvalidBitChar { ch: char, index: usize },
}

/// Tree construction errors (the `InvalidInput` family).
#[derive(Debug, Error)]
pub enum BuildError {
    /// No (frequency, symbol) pairs supplied
    #[error("empty frequency table: cannot build a tree")]
    EmptyFrequencyTable,

    /// The same symbol appears twice
    #[error("duplicate symbol {symbol} in frequency table")]
    DuplicateSymbol { symbol: String },

    /// Negative, NaN or infinite weight
    #[error("invalid frequency {frequency} for symbol {symbol}")]
    InvalidFrequency { symbol: String, frequency: f64 },
}

/// Code table validation errors (the `InvalidCodeTable` family).
#[derive(Debug, Error)]
pub enum CodeTableError {
    /// No entries at all
    #[error("code table has no entries")]
    Empty,

    /// A symbol mapped to a zero-length code
    #[error("symbol {symbol} has an empty code")]
    EmptyCode { symbol: String },

    /// A symbol listed more than once
    #[error("symbol {symbol} appears more than once")]
    DuplicateSymbol { symbol: String },

    /// Two symbols share one code
    #[error("code {code} is assigned to more than one symbol")]
    DuplicateCode { code: String },

    /// One code is a proper prefix of another
    #[error("code {prefix} is a prefix of code {code}")]
    PrefixConflict { prefix: String, code: String },
}

/// Encoder errors.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Input contains a symbol with no code in the table
    #[error("unknown symbol {symbol} at index {index}")]
    UnknownSymbol { symbol: String, index: usize },
}

/// Decoder errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Stream is empty, so not even the padding header is present
    #[error("packed stream is missing its padding header")]
    MissingHeader,

    /// Padding header outside 0..=7, or padding without payload
    #[error("invalid padding header {0}")]
    InvalidPadding(u8),

    /// Payload ended in the middle of a code
    #[error("truncated stream: {leftover} trailing bits at bit {position} match no code")]
    TruncatedStream { position: usize, leftover: usize },

    /// A bit sequence that no code in the table starts with
    #[error("no code matches the bits at bit position {position}")]
    UnknownCode { position: usize },
}

/// Stored table container errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Format version this build does not understand
    #[error("unsupported table format version {0}")]
    UnsupportedVersion(u8),

    /// Buffer is too short to contain a valid header
    #[error("table file too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Payload length doesn't match the length in the header
    #[error("payload length mismatch: header says {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Entry count doesn't match the decoded payload
    #[error("entry count mismatch: header says {expected}, got {actual}")]
    EntryCountMismatch { expected: usize, actual: usize },

    /// Payload could not be (de)serialized
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
