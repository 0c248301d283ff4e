use trimstruct_core::StructureError;
use trimstruct_nbt::NbtError;

/// Errors that can occur while loading or dumping a structure file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("malformed structure file: {0}")]
    MalformedContainer(String),

    #[error(transparent)]
    Nbt(#[from] NbtError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse codec options: {0}")]
    ConfigParse(String),
}

impl PersistError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        PersistError::MalformedContainer(msg.into())
    }
}
