//! Single source of truth for shared constants.
//! Used by the volume store when resolving void cells and by the codec
//! when writing palette entries.

/// Namespace assumed for identifiers written without a `namespace:` prefix.
pub const BASE_NAMESPACE: &str = "minecraft";

/// Name of the sentinel block returned for void cells.
pub const STRUCTURE_VOID: &str = "structure_void";

/// Block compatibility version written with every palette entry (1.19).
pub const COMPATIBILITY_VERSION: i32 = 17959425;

/// Index-array value marking a void cell.
pub const VOID_INDEX: i32 = -1;
