use trimstruct_nbt::{Compound, Tag};

use crate::format::*;

/// Inspect the parts of a container the store does not model and return a
/// warning for each one that will be lost or looks unexpected.
///
/// `root` is the top-level compound and `structure` its `structure` child.
/// Nothing here is fatal; shape errors are reported by the loader.
pub fn container_warnings(root: &Compound, structure: &Compound) -> Vec<String> {
    let mut warnings = Vec::new();

    match root.get_i32(FORMAT_VERSION_KEY) {
        Some(FORMAT_VERSION) => {}
        Some(other) => warnings.push(format!(
            "unexpected format_version {other} (expected {FORMAT_VERSION}); reading anyway"
        )),
        None => warnings.push("format_version is missing".to_owned()),
    }

    if let Some(origin) = root.get_list(WORLD_ORIGIN_KEY) {
        if origin.iter().any(|t| t.as_i64() != Some(0)) {
            warnings.push("structure_world_origin is not (0, 0, 0) and will be reset".to_owned());
        }
    }

    if let Some(secondary) = structure
        .get_list(BLOCK_INDICES_KEY)
        .and_then(|layers| layers.get(1))
    {
        let filled = match secondary {
            Tag::List(list) => list.iter().filter(|t| t.as_i64() != Some(-1)).count(),
            Tag::IntArray(items) => items.iter().filter(|&&i| i != -1).count(),
            _ => 0,
        };
        if filled > 0 {
            warnings.push(format!(
                "secondary block layer has {filled} non-void cells; they are discarded"
            ));
        }
    }

    if let Some(entities) = structure.get_list(ENTITIES_KEY) {
        if !entities.is_empty() {
            warnings.push(format!(
                "{} entities are not supported and are discarded",
                entities.len()
            ));
        }
    }

    warnings
}
