//! Field names and fixed values of the `.mcstructure` container.

/// Only known container revision.
pub const FORMAT_VERSION: i32 = 1;

/// Number of index layers in `block_indices`: primary and secondary
/// (waterlogged) content.
pub const LAYER_COUNT: usize = 2;

/// Palette written and read under `structure.palette`.
pub const DEFAULT_PALETTE: &str = "default";

pub const FORMAT_VERSION_KEY: &str = "format_version";
pub const SIZE_KEY: &str = "size";
pub const STRUCTURE_KEY: &str = "structure";
pub const BLOCK_INDICES_KEY: &str = "block_indices";
pub const ENTITIES_KEY: &str = "entities";
pub const PALETTE_KEY: &str = "palette";
pub const BLOCK_PALETTE_KEY: &str = "block_palette";
pub const BLOCK_POSITION_DATA_KEY: &str = "block_position_data";
pub const WORLD_ORIGIN_KEY: &str = "structure_world_origin";

pub const NAME_KEY: &str = "name";
pub const STATES_KEY: &str = "states";
pub const VERSION_KEY: &str = "version";
