//! In-memory block volume: dense palette indices, a deduplicating palette and
//! a sparse per-cell extra-data overlay, with editing and whole-volume
//! mirror/rotate.

pub mod overlay;
pub mod palette;
pub mod structure;
pub mod transform;

pub use overlay::Overlay;
pub use palette::Palette;
pub use structure::Structure;
