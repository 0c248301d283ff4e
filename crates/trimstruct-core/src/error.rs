use glam::IVec3;
use thiserror::Error;

/// Errors raised by block descriptors and the volume store.
///
/// Every mutator that returns one of these leaves the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("invalid mirror axis '{0}' (expected X or Z, or Y when enabled)")]
    InvalidAxis(String),

    #[error("invalid rotation of {0} degrees (expected 90, 180 or 270)")]
    InvalidRotation(i32),

    #[error("invalid block identifier '{0}': name is empty")]
    InvalidIdentifier(String),

    #[error("coordinate {pos} is outside a structure of size {size}")]
    CoordinateOutOfRange { pos: IVec3, size: IVec3 },

    #[error("invalid structure size {0}: every extent must be non-negative and the cell count must fit in memory")]
    InvalidSize(IVec3),

    #[error("inconsistent structure data: {0}")]
    InconsistentData(String),

    #[error("failed to parse structure config RON: {0}")]
    ConfigParse(String),
}
