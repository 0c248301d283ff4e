use serde::{Deserialize, Serialize};
use trimstruct_nbt::{ByteOrder, Compression, NbtOptions};

use crate::error::PersistError;

/// Wire settings for reading and writing structure files.
///
/// The defaults (little-endian, uncompressed) match files written by the
/// game. `Compression::Auto` sniffs the gzip magic on read and writes plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub byte_order: ByteOrder,
    pub compression: Compression,
}

impl CodecOptions {
    /// Parse options from RON text, e.g. `(compression: Gzip)`.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, PersistError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| PersistError::ConfigParse(e.to_string()))
    }

    pub(crate) fn nbt(self) -> NbtOptions {
        NbtOptions::new(self.byte_order, self.compression)
    }
}
