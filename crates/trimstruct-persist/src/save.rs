use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use trimstruct_nbt::{Compound, List, Tag, TagKind};
use trimstruct_world::Structure;

use crate::bridge;
use crate::error::PersistError;
use crate::format::*;
use crate::options::CodecOptions;

/// Serialize a structure to little-endian, uncompressed bytes.
pub fn dump(structure: &Structure) -> Result<Vec<u8>, PersistError> {
    dump_with(structure, CodecOptions::default())
}

pub fn dump_with(structure: &Structure, options: CodecOptions) -> Result<Vec<u8>, PersistError> {
    let mut out = Vec::new();
    dump_to_writer(structure, &mut out, options)?;
    Ok(out)
}

pub fn dump_to_writer<W: Write>(
    structure: &Structure,
    writer: W,
    options: CodecOptions,
) -> Result<(), PersistError> {
    let root = to_compound(structure)?;
    trimstruct_nbt::to_writer(writer, "", &root, options.nbt())?;
    log::debug!(
        "encoded {} structure: {} palette entries, {} extra data entries",
        structure.size(),
        structure.palette().len(),
        structure.overlay_len()
    );
    Ok(())
}

/// Write a structure file, replacing any existing file at `path`.
pub fn dump_to_path(structure: &Structure, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    dump_to_writer(structure, &mut writer, CodecOptions::default())?;
    writer.flush()?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Build the full container tree.
///
/// Layout: `format_version`, `size`, `structure { block_indices, entities,
/// palette { default { block_palette, block_position_data } } }`,
/// `structure_world_origin`. The secondary index layer is all void and
/// extra data is keyed by the decimal cell index in ascending order.
pub fn to_compound(structure: &Structure) -> Result<Compound, PersistError> {
    let size = structure.size();
    let volume = structure.volume();

    let layers = List::from_tags(
        TagKind::List,
        vec![
            Tag::List(List::from_ints(structure.indices().iter().copied())),
            Tag::List(List::from_ints(std::iter::repeat(-1).take(volume))),
        ],
    )?;

    let palette_entries = structure
        .palette()
        .iter()
        .map(|block| bridge::value_to_tag(&block.to_palette_value()))
        .collect::<Result<Vec<_>, _>>()?;
    let block_palette = List::from_tags(TagKind::Compound, palette_entries)?;

    let mut position_data = Compound::new();
    for (index, extra) in structure.overlay().sorted() {
        position_data.insert(
            index.to_string(),
            Tag::Compound(bridge::map_to_compound(extra.iter())?),
        );
    }

    let mut default = Compound::new();
    default.insert(BLOCK_PALETTE_KEY, Tag::List(block_palette));
    default.insert(BLOCK_POSITION_DATA_KEY, Tag::Compound(position_data));

    let mut palette = Compound::new();
    palette.insert(DEFAULT_PALETTE, Tag::Compound(default));

    let mut body = Compound::new();
    body.insert(BLOCK_INDICES_KEY, Tag::List(layers));
    body.insert(ENTITIES_KEY, Tag::List(List::new(TagKind::Compound)));
    body.insert(PALETTE_KEY, Tag::Compound(palette));

    let mut root = Compound::new();
    root.insert(FORMAT_VERSION_KEY, Tag::Int(FORMAT_VERSION));
    root.insert(SIZE_KEY, Tag::List(List::from_ints([size.x, size.y, size.z])));
    root.insert(STRUCTURE_KEY, Tag::Compound(body));
    root.insert(WORLD_ORIGIN_KEY, Tag::List(List::from_ints([0, 0, 0])));
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use trimstruct_core::Block;
    use trimstruct_nbt::NbtOptions;

    fn block(id: &str) -> Block {
        Block::from_identifier(id).expect("valid identifier")
    }

    fn ints(tag: Option<&Tag>) -> Vec<i32> {
        tag.and_then(Tag::as_list)
            .expect("int list")
            .iter()
            .filter_map(Tag::as_i32)
            .collect()
    }

    #[test]
    fn test_field_layout() {
        let mut s = Structure::new(IVec3::new(1, 2, 3), None).expect("valid size");
        let wool = block("wool").with_state("color", "red").with_state("lit", true);
        s.set_block(IVec3::new(0, 1, 2), Some(&wool)).expect("in range");

        let root = to_compound(&s).expect("dump");
        let names: Vec<_> = root.iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            vec![FORMAT_VERSION_KEY, SIZE_KEY, STRUCTURE_KEY, WORLD_ORIGIN_KEY]
        );
        assert_eq!(root.get_i32(FORMAT_VERSION_KEY), Some(1));
        assert_eq!(ints(root.get(SIZE_KEY)), vec![1, 2, 3]);
        assert_eq!(ints(root.get(WORLD_ORIGIN_KEY)), vec![0, 0, 0]);

        let body = root.get_compound(STRUCTURE_KEY).expect("structure");
        let layers = body.get_list(BLOCK_INDICES_KEY).expect("layers");
        assert_eq!(layers.len(), 2);
        assert_eq!(ints(layers.get(0)), vec![-1, -1, -1, -1, -1, 0]);
        assert_eq!(ints(layers.get(1)), vec![-1; 6]);
        assert!(body.get_list(ENTITIES_KEY).expect("entities").is_empty());

        let default = body
            .get_compound(PALETTE_KEY)
            .and_then(|p| p.get_compound(DEFAULT_PALETTE))
            .expect("default palette");
        let entry = default
            .get_list(BLOCK_PALETTE_KEY)
            .and_then(|l| l.get(0))
            .and_then(Tag::as_compound)
            .expect("palette entry");
        assert_eq!(entry.get_str(NAME_KEY), Some("minecraft:wool"));
        assert_eq!(entry.get_i32(VERSION_KEY), Some(wool.version()));
        let states = entry.get_compound(STATES_KEY).expect("states");
        assert_eq!(states.get_str("color"), Some("red"));
        assert_eq!(states.get("lit"), Some(&Tag::Byte(1)));
    }

    #[test]
    fn test_palette_never_carries_extra_data() {
        let mut s = Structure::new(IVec3::ONE, None).expect("valid size");
        let sign = block("oak_sign").with_extra("Text", "hi");
        s.set_block(IVec3::ZERO, Some(&sign)).expect("in range");

        let root = to_compound(&s).expect("dump");
        let default = root
            .get_compound(STRUCTURE_KEY)
            .and_then(|b| b.get_compound(PALETTE_KEY))
            .and_then(|p| p.get_compound(DEFAULT_PALETTE))
            .expect("default palette");
        let entry = default
            .get_list(BLOCK_PALETTE_KEY)
            .and_then(|l| l.get(0))
            .and_then(Tag::as_compound)
            .expect("palette entry");
        assert_eq!(entry.len(), 3);

        let data = default.get_compound(BLOCK_POSITION_DATA_KEY).expect("position data");
        let extra = data.get_compound("0").expect("cell 0");
        assert_eq!(extra.get_str("Text"), Some("hi"));
    }

    #[test]
    fn test_position_data_in_ascending_index_order() {
        let mut s = Structure::new(IVec3::new(12, 1, 1), None).expect("valid size");
        for x in [11, 2, 10, 0] {
            let sign = block("oak_sign").with_extra("Text", x);
            s.set_block(IVec3::new(x, 0, 0), Some(&sign)).expect("in range");
        }
        let root = to_compound(&s).expect("dump");
        let data = root
            .get_compound(STRUCTURE_KEY)
            .and_then(|b| b.get_compound(PALETTE_KEY))
            .and_then(|p| p.get_compound(DEFAULT_PALETTE))
            .and_then(|d| d.get_compound(BLOCK_POSITION_DATA_KEY))
            .expect("position data");
        let keys: Vec<_> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "2", "10", "11"]);
    }

    #[test]
    fn test_dump_is_little_endian_by_default() {
        let s = Structure::new(IVec3::ONE, None).expect("valid size");
        let bytes = dump(&s).expect("dump");
        // Root compound with an empty name.
        assert_eq!(&bytes[..3], &[10, 0, 0]);
        let (name, root) =
            trimstruct_nbt::from_bytes(&bytes, NbtOptions::default()).expect("decode");
        assert_eq!(name, "");
        assert_eq!(root, to_compound(&s).expect("dump"));
    }

    #[test]
    fn test_gzip_option() {
        let s = Structure::new(IVec3::ONE, None).expect("valid size");
        let options = CodecOptions::from_ron_str("(compression: Gzip)").expect("options");
        let bytes = dump_with(&s, options).expect("dump");
        assert!(trimstruct_nbt::io::is_gzip(&bytes));
    }
}
