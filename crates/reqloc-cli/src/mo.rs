//! Minimal reader for the GNU gettext binary catalog index.
//!
//! Reads only the original-string table: enough to count messages and list
//! their ids for inspection. Runtime translation always goes through the
//! `gettext` crate's full parser; this reader exists because that parser does
//! not expose its entries.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

const MAGIC: u32 = 0x9504_12de;
const MAGIC_SWAPPED: u32 = 0xde12_0495;

/// Errors from reading a catalog index.
#[derive(Debug, Error)]
pub enum MoError {
    /// File could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not start with the gettext magic number.
    #[error("'{path}' is not a gettext binary catalog")]
    BadMagic { path: PathBuf },

    /// An offset in the index points past the end of the file.
    #[error("'{path}' is truncated")]
    Truncated { path: PathBuf },
}

/// The original-string side of a catalog index.
#[derive(Debug)]
pub struct MoIndex {
    /// Message ids, metadata entry excluded. Context-qualified ids render as
    /// `context | id`, plural ids as their singular form.
    pub msgids: Vec<String>,
}

/// Read the message-id index of a compiled catalog.
pub fn read_index(path: &Path) -> Result<MoIndex, MoError> {
    let bytes = fs::read(path).map_err(|source| MoError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let magic = read_u32(&bytes, 0, false).ok_or_else(|| truncated(path))?;
    let big_endian = match magic {
        MAGIC => false,
        MAGIC_SWAPPED => true,
        _ => {
            return Err(MoError::BadMagic {
                path: path.to_path_buf(),
            });
        }
    };

    let count = read_u32(&bytes, 8, big_endian).ok_or_else(|| truncated(path))? as usize;
    let table = read_u32(&bytes, 12, big_endian).ok_or_else(|| truncated(path))? as usize;

    let mut msgids = Vec::with_capacity(count);
    for entry in 0..count {
        let length =
            read_u32(&bytes, table + entry * 8, big_endian).ok_or_else(|| truncated(path))?
                as usize;
        let offset =
            read_u32(&bytes, table + entry * 8 + 4, big_endian).ok_or_else(|| truncated(path))?
                as usize;
        let raw = bytes
            .get(offset..offset + length)
            .ok_or_else(|| truncated(path))?;

        let id = String::from_utf8_lossy(raw);
        if id.is_empty() {
            // Metadata entry.
            continue;
        }

        // Plural entries store "singular\0plural"; context entries store
        // "context\x04id".
        let singular = id.split('\0').next().unwrap_or_default();
        msgids.push(singular.replace('\u{4}', " | "));
    }

    Ok(MoIndex { msgids })
}

fn truncated(path: &Path) -> MoError {
    MoError::Truncated {
        path: path.to_path_buf(),
    }
}

fn read_u32(bytes: &[u8], offset: usize, big_endian: bool) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
    Some(if big_endian {
        u32::from_be_bytes(raw)
    } else {
        u32::from_le_bytes(raw)
    })
}
