//! Shared types for reading and editing block structures: the block
//! descriptor, the native value model, coordinates, axes and configuration.

pub mod axis;
pub mod block;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod naming;
pub mod types;
pub mod value;

pub use axis::{Axis, Rotation};
pub use block::{Block, BlockStates, StateValue};
pub use config::{OverlayPolicy, StructureConfig};
pub use error::StructureError;
pub use naming::is_valid_structure_name;
pub use types::{BlockPos, FlatIndex, StructureSize};
pub use value::{Map, Value};
