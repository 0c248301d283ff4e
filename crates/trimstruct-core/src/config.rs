use serde::{Deserialize, Serialize};

use crate::constants::COMPATIBILITY_VERSION;
use crate::error::StructureError;

/// How the extra-data overlay reacts to writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlayPolicy {
    /// Overlay writes cover exactly the cells written to the index array, and
    /// overwriting a cell with plain content or void drops its extra data.
    #[default]
    Consistent,
    /// Reproduce the historical tool: a fill attaches extra data over
    /// `[from, to)` per axis without normalising descending ranges, and writes
    /// without extra data leave any existing overlay entry in place.
    Legacy,
}

/// Store-level settings, usually parsed from a `structure.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Version stamped on void sentinels returned by the store.
    #[serde(default = "default_compatibility_version")]
    pub compatibility_version: i32,
    /// Permit `mirror(Axis::Y)`.
    #[serde(default)]
    pub allow_y_mirror: bool,
    #[serde(default)]
    pub overlay_policy: OverlayPolicy,
}

fn default_compatibility_version() -> i32 {
    COMPATIBILITY_VERSION
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            compatibility_version: COMPATIBILITY_VERSION,
            allow_y_mirror: false,
            overlay_policy: OverlayPolicy::Consistent,
        }
    }
}

impl StructureConfig {
    /// Parse a config from RON text. Missing fields take their defaults.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, StructureError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| StructureError::ConfigParse(e.to_string()))
    }
}
