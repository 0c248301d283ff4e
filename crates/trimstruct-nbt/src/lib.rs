//! Named binary tag trees: typed tags, ordered compounds, homogeneous lists,
//! and a reader/writer with selectable byte order and optional gzip framing.

pub mod error;
pub mod io;
mod read;
pub mod tag;
mod write;

use std::io::{Read, Write};

pub use error::NbtError;
pub use io::{ByteOrder, Compression, NbtOptions};
pub use read::MAX_DEPTH;
pub use tag::{Compound, List, Tag, TagKind};

/// Decode a root compound and its name from raw bytes.
pub fn from_bytes(bytes: &[u8], options: NbtOptions) -> Result<(String, Compound), NbtError> {
    from_reader(bytes, options)
}

/// Decode a root compound and its name from a reader.
pub fn from_reader<R: Read>(
    reader: R,
    options: NbtOptions,
) -> Result<(String, Compound), NbtError> {
    let payload = io::read_payload(reader, options.compression)?;
    let mut decoder = read::Decoder::new(&payload, options.byte_order);
    let root = decoder.read_root()?;
    if decoder.position() != payload.len() {
        log::debug!(
            "ignoring {} trailing bytes after root compound",
            payload.len() - decoder.position()
        );
    }
    Ok(root)
}

/// Encode a named root compound to bytes.
pub fn to_bytes(name: &str, root: &Compound, options: NbtOptions) -> Result<Vec<u8>, NbtError> {
    let mut out = Vec::new();
    to_writer(&mut out, name, root, options)?;
    Ok(out)
}

/// Encode a named root compound into a writer.
pub fn to_writer<W: Write>(
    writer: W,
    name: &str,
    root: &Compound,
    options: NbtOptions,
) -> Result<(), NbtError> {
    let mut encoder = write::Encoder::new(options.byte_order);
    encoder.write_root(name, root)?;
    io::write_payload(writer, &encoder.into_bytes(), options.compression)
}
