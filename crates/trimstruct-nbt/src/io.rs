use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use crate::error::NbtError;

/// First two bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Byte order of multi-byte numbers on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Bedrock edition files.
    #[default]
    Little,
    /// Java edition files.
    Big,
}

/// Outer framing around the tag stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    /// Reading: sniff the gzip magic. Writing: same as `None`.
    Auto,
}

/// How a tag tree is framed and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NbtOptions {
    pub byte_order: ByteOrder,
    pub compression: Compression,
}

impl NbtOptions {
    pub fn new(byte_order: ByteOrder, compression: Compression) -> Self {
        Self {
            byte_order,
            compression,
        }
    }
}

pub fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[..2] == GZIP_MAGIC
}

/// Read the whole input and strip gzip framing if requested or detected.
pub(crate) fn read_payload<R: Read>(
    mut reader: R,
    compression: Compression,
) -> Result<Vec<u8>, NbtError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    let gzipped = match compression {
        Compression::None => false,
        Compression::Gzip => true,
        Compression::Auto => is_gzip(&raw),
    };
    if !gzipped {
        return Ok(raw);
    }

    let mut decoder = GzDecoder::new(raw.as_slice());
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| NbtError::Gzip(e.to_string()))?;
    log::trace!(
        "gunzipped tag stream: {} -> {} bytes",
        raw.len(),
        decompressed.len()
    );
    Ok(decompressed)
}

/// Write an encoded tag stream, adding gzip framing if requested.
pub(crate) fn write_payload<W: Write>(
    mut writer: W,
    payload: &[u8],
    compression: Compression,
) -> Result<(), NbtError> {
    match compression {
        Compression::None | Compression::Auto => writer.write_all(payload)?,
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(writer, flate2::Compression::default());
            encoder.write_all(payload)?;
            encoder
                .finish()
                .map_err(|e| NbtError::Gzip(e.to_string()))?;
        }
    }
    Ok(())
}
