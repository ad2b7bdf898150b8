//! Code table persistence.
//!
//! Only the symbol -> code mapping is stored. Frequencies and the tree are
//! not needed to encode or decode once the table exists, so they are left
//! out. Loading rebuilds the reverse mapping and re-validates the codes.
//!
//! # File Format
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  0x48 0x46 0x43 0x54 ("HFCT")
//! +------------------+
//! | version (1)      |  format version, currently 1
//! +------------------+
//! | entry_count (4)  |  u32 little-endian, number of symbols
//! +------------------+
//! | payload_len (4)  |  u32 little-endian, payload size in bytes
//! +------------------+
//! | crc32 (4)        |  u32 checksum of everything below the magic
//! +------------------+
//! | payload          |  bincode Vec<(symbol, "0101" code string)>,
//! | (variable)       |  sorted by code
//! +------------------+
//! ```

use std::fmt::Debug;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::code::Code;
use crate::error::{Error, Result, StoreError};
use crate::table::CodeTable;

/// Magic number for stored tables: "HFCT" (Huffman Code Table)
const MAGIC: [u8; 4] = [0x48, 0x46, 0x43, 0x54];

/// Current format version
const VERSION: u8 = 1;

/// Size of the header in bytes
const HEADER_SIZE: usize = 17;

/// Serialize a table into the stored byte format.
pub fn serialize_table<S>(table: &CodeTable<S>) -> Result<Vec<u8>>
where
    S: Serialize,
{
    let entries: Vec<(&S, String)> = table
        .iter()
        .map(|(symbol, code)| (symbol, code.to_string()))
        .collect();
    let payload = bincode::serialize(&entries).map_err(StoreError::from)?;

    let entry_count = entries.len() as u32;
    let payload_len = payload.len() as u32;
    let crc32 = compute_crc(VERSION, entry_count, payload_len, &payload);

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&entry_count.to_le_bytes());
    bytes.extend_from_slice(&payload_len.to_le_bytes());
    bytes.extend_from_slice(&crc32.to_le_bytes());
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Parse a stored table and rebuild it.
///
/// # Errors
/// - `StoreError` for a bad magic, version, size or payload
/// - `Error::Crc` if the checksum does not match
/// - `Error::BitIo` if a stored code contains characters other than 0/1
/// - `Error::CodeTable` if the stored codes are not a valid prefix code
pub fn parse_table<S>(bytes: &[u8]) -> Result<CodeTable<S>>
where
    S: Clone + Eq + Hash + Debug + DeserializeOwned,
{
    if bytes.len() < HEADER_SIZE {
        return Err(StoreError::TooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != MAGIC {
        return Err(StoreError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let version = bytes[4];
    if version != VERSION {
        return Err(StoreError::UnsupportedVersion(version).into());
    }

    let entry_count = read_u32(&bytes[5..9]);
    let payload_len = read_u32(&bytes[9..13]);
    let crc32 = read_u32(&bytes[13..17]);

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != payload_len as usize {
        return Err(StoreError::LengthMismatch {
            expected: payload_len as usize,
            actual: payload.len(),
        }
        .into());
    }

    let computed_crc = compute_crc(version, entry_count, payload_len, payload);
    if computed_crc != crc32 {
        warn!("stored code table failed its checksum");
        return Err(Error::Crc {
            expected: crc32,
            actual: computed_crc,
        });
    }

    let entries: Vec<(S, String)> = bincode::deserialize(payload).map_err(StoreError::from)?;
    if entries.len() != entry_count as usize {
        return Err(StoreError::EntryCountMismatch {
            expected: entry_count as usize,
            actual: entries.len(),
        }
        .into());
    }

    let codes = entries
        .into_iter()
        .map(|(symbol, code)| Ok((symbol, code.parse::<Code>()?)))
        .collect::<Result<Vec<_>>>()?;

    CodeTable::from_codes(codes).map_err(|e| {
        warn!("stored code table is not a valid prefix code: {e}");
        e
    })
}

/// Write a table to any sink.
pub fn write_table<S, W>(table: &CodeTable<S>, sink: &mut W) -> Result<()>
where
    S: Serialize,
    W: Write + ?Sized,
{
    let bytes = serialize_table(table)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}

/// Read a whole table from any source.
pub fn read_table<S, R>(source: &mut R) -> Result<CodeTable<S>>
where
    S: Clone + Eq + Hash + Debug + DeserializeOwned,
    R: Read + ?Sized,
{
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    parse_table(&bytes)
}

/// Save a table to `path`, replacing any existing file.
///
/// The table is serialized before the file is opened, so a symbol that fails
/// to serialize leaves an existing file untouched.
pub fn save_table<S, P>(table: &CodeTable<S>, path: P) -> Result<()>
where
    S: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = serialize_table(table)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    debug!("saved code table ({} symbols) to {}", table.len(), path.display());
    Ok(())
}

/// Load a table saved by [`save_table`].
pub fn load_table<S, P>(path: P) -> Result<CodeTable<S>>
where
    S: Clone + Eq + Hash + Debug + DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let table = read_table(&mut File::open(path)?)?;
    debug!("loaded code table ({} symbols) from {}", table.len(), path.display());
    Ok(table)
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Compute CRC32 over the protected fields.
fn compute_crc(version: u8, entry_count: u32, payload_len: u32, payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[version]);
    hasher.update(&entry_count.to_le_bytes());
    hasher.update(&payload_len.to_le_bytes());
    hasher.update(payload);
    hasher.finalize()
}
