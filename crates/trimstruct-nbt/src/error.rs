use crate::tag::TagKind;

/// Errors that can occur while reading or writing a tag tree.
#[derive(Debug, thiserror::Error)]
pub enum NbtError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of data at byte {0}")]
    Truncated(usize),

    #[error("unknown tag type id {0}")]
    UnknownTagKind(u8),

    #[error("root tag must be a compound, found {0}")]
    RootNotCompound(TagKind),

    #[error("negative length {0} in array or list")]
    NegativeLength(i32),

    #[error("array or list of {0} elements exceeds the i32 length limit")]
    LengthOverflow(usize),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("string of {0} bytes exceeds the 65535-byte limit")]
    StringTooLong(usize),

    #[error("list of {expected} cannot hold {found}")]
    ListKindMismatch { expected: TagKind, found: TagKind },

    #[error("compound holds the name `{0}` more than once")]
    DuplicateKey(String),

    #[error("tag tree nested deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("gzip stream error: {0}")]
    Gzip(String),
}
