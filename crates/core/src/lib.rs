//! huffcode-core: Huffman prefix codes with bit-exact packing
//!
//! This library turns a table of symbol frequencies into an optimal
//! prefix-free code and uses it to pack symbol sequences into bytes and back.
//!
//! # Architecture
//!
//! Leaves first:
//! - `bitio`: MSB-first bit reading/writing
//! - `code`: a single code (bit string)
//! - `tree`: Huffman tree construction with a fixed tie-break
//! - `table`: symbol <-> code table derived from a tree, with a decode trie
//! - `stream`: the packed stream container (padding header + payload)
//! - `encoder` / `decoder`: symbols <-> packed stream
//! - `store`: code table persistence
//! - `frequency`: frequency tables from sample data
//! - `codec`: `HuffmanCodec`, bundling the above
//! - `metrics`: compression statistics
//!
//! # Example
//!
//! ```
//! use huffcode_core::{decode, encode, CodeTable};
//!
//! let table = CodeTable::from_frequencies(vec![(0.5, 'a'), (0.25, 'b'), (0.25, 'c')]).unwrap();
//! let packed = encode("abcab".chars(), &table).unwrap();
//! assert_eq!(packed.padding(), 0);
//! assert_eq!(decode(&packed, &table).unwrap(), vec!['a', 'b', 'c', 'a', 'b']);
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **All or nothing**: a failed encode or decode produces no output
//! - **Deterministic**: the same frequency list always gives the same codes
//! - **Read-only tables**: a `CodeTable` never changes after construction

pub mod bitio;
pub mod code;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod store;
pub mod stream;
pub mod table;
pub mod tree;

// Re-export commonly used types
pub use code::Code;
pub use codec::HuffmanCodec;
pub use decoder::{decode, decode_from};
pub use encoder::{encode, encode_to};
pub use error::{Error, Result};
pub use store::{load_table, save_table};
pub use stream::PackedStream;
pub use table::CodeTable;
pub use tree::HuffmanTree;
