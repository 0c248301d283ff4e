use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use glam::IVec3;
use trimstruct_core::constants::VOID_INDEX;
use trimstruct_core::{Block, FlatIndex, Map, StateValue, StructureConfig, StructureSize};
use trimstruct_nbt::{Compound, Tag};
use trimstruct_world::Structure;

use crate::bridge;
use crate::compat;
use crate::error::PersistError;
use crate::format::*;
use crate::options::CodecOptions;

/// A loaded structure plus everything in the file it could not represent.
#[derive(Debug)]
pub struct LoadReport {
    pub structure: Structure,
    pub warnings: Vec<String>,
}

/// Load a structure from raw little-endian, uncompressed bytes.
pub fn load(bytes: &[u8]) -> Result<Structure, PersistError> {
    load_with_report(bytes, CodecOptions::default(), StructureConfig::default())
        .map(|report| report.structure)
}

/// Load a structure and collect compatibility warnings.
pub fn load_with_report(
    bytes: &[u8],
    options: CodecOptions,
    config: StructureConfig,
) -> Result<LoadReport, PersistError> {
    let (_, root) = trimstruct_nbt::from_bytes(bytes, options.nbt())?;
    decode(&root, config)
}

pub fn load_from_reader<R: Read>(
    reader: R,
    options: CodecOptions,
    config: StructureConfig,
) -> Result<LoadReport, PersistError> {
    let (_, root) = trimstruct_nbt::from_reader(reader, options.nbt())?;
    decode(&root, config)
}

/// Load a structure file, accepting either plain or gzipped content.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Structure, PersistError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let options = CodecOptions {
        compression: trimstruct_nbt::Compression::Auto,
        ..CodecOptions::default()
    };
    let report = load_from_reader(BufReader::new(file), options, StructureConfig::default())?;
    log::debug!("loaded {}", path.display());
    Ok(report.structure)
}

fn decode(root: &Compound, config: StructureConfig) -> Result<LoadReport, PersistError> {
    let body = compound(root, STRUCTURE_KEY)?;
    let mut warnings = compat::container_warnings(root, body);

    let size = read_size(root)?;
    let indices = read_primary_layer(body)?;
    let palette = compound(compound(body, PALETTE_KEY)?, DEFAULT_PALETTE)?;
    let blocks = read_block_palette(palette)?;
    let overlay = read_position_data(palette, &indices, &mut warnings)?;

    let overlay_count = overlay.len();
    let structure = Structure::from_parts(size, indices, blocks, overlay, config)
        .map_err(|e| PersistError::malformed(e.to_string()))?;

    for warning in &warnings {
        log::warn!("{warning}");
    }
    log::debug!(
        "decoded {} structure: {} palette entries, {} extra data entries",
        structure.size(),
        structure.palette().len(),
        overlay_count
    );
    Ok(LoadReport {
        structure,
        warnings,
    })
}

fn field<'a>(parent: &'a Compound, name: &str) -> Result<&'a Tag, PersistError> {
    parent
        .get(name)
        .ok_or_else(|| PersistError::malformed(format!("missing field `{name}`")))
}

fn compound<'a>(parent: &'a Compound, name: &str) -> Result<&'a Compound, PersistError> {
    field(parent, name)?
        .as_compound()
        .ok_or_else(|| PersistError::malformed(format!("`{name}` is not a compound")))
}

/// Integers from a `TAG_List` of integral tags or a `TAG_Int_Array`.
fn int_values(tag: &Tag, what: &str) -> Result<Vec<i32>, PersistError> {
    match tag {
        Tag::IntArray(items) => Ok(items.clone()),
        Tag::List(list) => list
            .iter()
            .map(|t| {
                t.as_i32().ok_or_else(|| {
                    PersistError::malformed(format!("`{what}` holds a non-integer {}", t.kind()))
                })
            })
            .collect(),
        other => Err(PersistError::malformed(format!(
            "`{what}` is a {}, expected a list of integers",
            other.kind()
        ))),
    }
}

fn read_size(root: &Compound) -> Result<StructureSize, PersistError> {
    let values = int_values(field(root, SIZE_KEY)?, SIZE_KEY)?;
    match values.as_slice() {
        &[x, y, z] => Ok(IVec3::new(x, y, z)),
        other => Err(PersistError::malformed(format!(
            "`size` has {} components, expected 3",
            other.len()
        ))),
    }
}

fn read_primary_layer(structure: &Compound) -> Result<Vec<i32>, PersistError> {
    let layers = structure.get_list(BLOCK_INDICES_KEY).ok_or_else(|| {
        PersistError::malformed(format!("`{BLOCK_INDICES_KEY}` is missing or not a list"))
    })?;
    let primary = layers
        .get(0)
        .ok_or_else(|| PersistError::malformed("`block_indices` has no layers"))?;
    int_values(primary, BLOCK_INDICES_KEY)
}

fn read_block_palette(palette: &Compound) -> Result<Vec<Block>, PersistError> {
    let entries = palette.get_list(BLOCK_PALETTE_KEY).ok_or_else(|| {
        PersistError::malformed(format!("`{BLOCK_PALETTE_KEY}` is missing or not a list"))
    })?;
    entries
        .iter()
        .enumerate()
        .map(|(slot, tag)| {
            let entry = tag.as_compound().ok_or_else(|| {
                PersistError::malformed(format!("palette entry {slot} is not a compound"))
            })?;
            read_block(entry, slot)
        })
        .collect()
}

fn read_block(entry: &Compound, slot: usize) -> Result<Block, PersistError> {
    let name = entry
        .get_str(NAME_KEY)
        .ok_or_else(|| PersistError::malformed(format!("palette entry {slot} has no name")))?;
    let version = entry
        .get_i32(VERSION_KEY)
        .ok_or_else(|| PersistError::malformed(format!("palette entry {slot} has no version")))?;

    let mut block = Block::from_identifier(name)?.with_version(version);
    if let Some(states) = entry.get_compound(STATES_KEY) {
        for (key, tag) in states.iter() {
            let value = StateValue::from_value(&bridge::tag_to_value(tag)).ok_or_else(|| {
                PersistError::malformed(format!(
                    "state `{key}` of `{name}` is a {}, expected a byte, int or string",
                    tag.kind()
                ))
            })?;
            block.add_states([(key, value)]);
        }
    }
    Ok(block)
}

/// Decode `block_position_data`. Entries on void cells are dropped with a
/// warning; entries outside the volume are an error.
fn read_position_data(
    palette: &Compound,
    indices: &[i32],
    warnings: &mut Vec<String>,
) -> Result<Vec<(FlatIndex, Map)>, PersistError> {
    let Some(data) = palette.get(BLOCK_POSITION_DATA_KEY) else {
        return Ok(Vec::new());
    };
    let data = data.as_compound().ok_or_else(|| {
        PersistError::malformed(format!("`{BLOCK_POSITION_DATA_KEY}` is not a compound"))
    })?;

    let mut overlay = Vec::with_capacity(data.len());
    for (key, tag) in data.iter() {
        let index: FlatIndex = key.parse().map_err(|_| {
            PersistError::malformed(format!("extra data key `{key}` is not a cell index"))
        })?;
        let extra = tag.as_compound().ok_or_else(|| {
            PersistError::malformed(format!("extra data for cell {key} is not a compound"))
        })?;
        match indices.get(index) {
            None => {
                return Err(PersistError::malformed(format!(
                    "extra data key {index} outside volume of {}",
                    indices.len()
                )))
            }
            Some(&VOID_INDEX) => {
                warnings.push(format!("dropping extra data attached to void cell {index}"));
            }
            Some(_) => overlay.push((index, bridge::compound_to_map_lossless(extra))),
        }
    }
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trimstruct_core::{StructureError, Value};
    use trimstruct_nbt::{List, NbtOptions, TagKind};

    use crate::save;

    fn stone() -> Block {
        Block::from_identifier("stone").expect("valid identifier")
    }

    fn sample() -> Structure {
        let mut s = Structure::new(IVec3::new(2, 2, 2), None).expect("valid size");
        s.set_block(IVec3::new(0, 0, 0), Some(&stone())).expect("in range");
        let sign = Block::from_identifier("oak_sign")
            .expect("valid identifier")
            .with_state("ground_sign_direction", 4)
            .with_extra("Text", "hi");
        s.set_block(IVec3::new(1, 1, 0), Some(&sign)).expect("in range");
        s
    }

    fn encode(root: &Compound) -> Vec<u8> {
        trimstruct_nbt::to_bytes("", root, NbtOptions::default()).expect("encode")
    }

    fn sample_root() -> Compound {
        save::to_compound(&sample()).expect("dump")
    }

    fn take_structure(root: &mut Compound) -> Compound {
        root.remove(STRUCTURE_KEY)
            .and_then(|t| match t {
                Tag::Compound(c) => Some(c),
                _ => None,
            })
            .expect("structure compound")
    }

    #[test]
    fn test_load_sample() {
        let loaded = load(&encode(&sample_root())).expect("load");
        assert_eq!(loaded.size(), IVec3::new(2, 2, 2));
        assert_eq!(loaded.get_block(IVec3::ZERO).expect("in range"), stone());
        let sign = loaded.get_block(IVec3::new(1, 1, 0)).expect("in range");
        assert_eq!(sign.name(), "oak_sign");
        assert_eq!(
            sign.states().get("ground_sign_direction"),
            Some(&StateValue::Int(4))
        );
        assert_eq!(sign.extra_data().get("Text"), Some(&Value::from("hi")));
        assert!(loaded.get_block(IVec3::ONE).expect("in range").is_void());
    }

    #[test]
    fn test_missing_size_is_malformed() {
        let mut root = sample_root();
        root.remove(SIZE_KEY);
        let result = load(&encode(&root));
        assert!(matches!(result, Err(PersistError::MalformedContainer(_))));
    }

    #[test]
    fn test_wrong_index_count_is_malformed() {
        let mut root = sample_root();
        root.insert(SIZE_KEY, Tag::List(List::from_ints([3, 2, 2])));
        let result = load(&encode(&root));
        assert!(matches!(result, Err(PersistError::MalformedContainer(_))));
    }

    #[test]
    fn test_overflowing_size_is_malformed() {
        let mut root = sample_root();
        root.insert(SIZE_KEY, Tag::List(List::from_ints([1 << 22, 1 << 21, 1 << 21])));
        let result = load(&encode(&root));
        assert!(matches!(result, Err(PersistError::MalformedContainer(_))));

        root.insert(SIZE_KEY, Tag::List(List::from_ints([i32::MAX; 3])));
        let result = load(&encode(&root));
        assert!(matches!(result, Err(PersistError::MalformedContainer(_))));
    }

    #[test]
    fn test_bad_position_key_is_malformed() {
        let mut root = sample_root();
        let mut structure = take_structure(&mut root);
        let mut data = Compound::new();
        data.insert("not-a-number", Tag::Compound(Compound::new()));
        let mut default = Compound::new();
        default.insert(BLOCK_PALETTE_KEY, Tag::List(List::new(TagKind::Compound)));
        default.insert(BLOCK_POSITION_DATA_KEY, Tag::Compound(data));
        let mut palette = Compound::new();
        palette.insert(DEFAULT_PALETTE, Tag::Compound(default));
        structure.insert(PALETTE_KEY, Tag::Compound(palette));
        root.insert(STRUCTURE_KEY, Tag::Compound(structure));

        let result = load(&encode(&root));
        assert!(matches!(result, Err(PersistError::MalformedContainer(_))));
    }

    #[test]
    fn test_typed_extra_data_survives_reload() {
        let mut item = Compound::new();
        item.insert("Count", Tag::Byte(64));
        item.insert("Damage", Tag::Short(3));
        item.insert("Name", Tag::String("minecraft:apple".into()));
        let mut entity = Compound::new();
        entity.insert("id", Tag::String("Chest".into()));
        entity.insert(
            "Items",
            Tag::List(List::from_tags(TagKind::Compound, vec![Tag::Compound(item)]).expect("items")),
        );
        entity.insert("LootTable", Tag::List(List::new(TagKind::Compound)));
        entity.insert("Ticks", Tag::Long(12));
        entity.insert("Scale", Tag::Float(0.5));
        entity.insert("Mask", Tag::ByteArray(vec![1, -1]));
        let mut cell = Compound::new();
        cell.insert("block_entity_data", Tag::Compound(entity));
        let mut data = Compound::new();
        data.insert("6", Tag::Compound(cell));

        let mut root = sample_root();
        let mut structure = take_structure(&mut root);
        let mut palette = match structure.remove(PALETTE_KEY) {
            Some(Tag::Compound(c)) => c,
            _ => panic!("palette compound"),
        };
        let mut default = match palette.remove(DEFAULT_PALETTE) {
            Some(Tag::Compound(c)) => c,
            _ => panic!("default palette"),
        };
        default.insert(BLOCK_POSITION_DATA_KEY, Tag::Compound(data.clone()));
        palette.insert(DEFAULT_PALETTE, Tag::Compound(default));
        structure.insert(PALETTE_KEY, Tag::Compound(palette));
        let origin = root.remove(WORLD_ORIGIN_KEY).expect("origin");
        root.insert(STRUCTURE_KEY, Tag::Compound(structure));
        root.insert(WORLD_ORIGIN_KEY, origin);

        let bytes = encode(&root);
        let loaded = load(&bytes).expect("load");
        let written = save::to_compound(&loaded).expect("dump");
        let position_data = written
            .get_compound(STRUCTURE_KEY)
            .and_then(|b| b.get_compound(PALETTE_KEY))
            .and_then(|p| p.get_compound(DEFAULT_PALETTE))
            .and_then(|d| d.get_compound(BLOCK_POSITION_DATA_KEY))
            .expect("position data");
        assert_eq!(position_data, &data);
        assert_eq!(encode(&written), bytes);
    }

    #[test]
    fn test_float_state_is_malformed() {
        let mut entry = Compound::new();
        entry.insert(NAME_KEY, Tag::String("minecraft:stone".into()));
        let mut states = Compound::new();
        states.insert("weight", Tag::Float(0.5));
        entry.insert(STATES_KEY, Tag::Compound(states));
        entry.insert(VERSION_KEY, Tag::Int(1));
        let result = read_block(&entry, 0);
        assert!(matches!(result, Err(PersistError::MalformedContainer(_))));
    }

    #[test]
    fn test_byte_state_reads_as_bool() {
        let mut entry = Compound::new();
        entry.insert(NAME_KEY, Tag::String("minecraft:lever".into()));
        let mut states = Compound::new();
        states.insert("open_bit", Tag::Byte(1));
        entry.insert(STATES_KEY, Tag::Compound(states));
        entry.insert(VERSION_KEY, Tag::Int(1));
        let block = read_block(&entry, 0).expect("valid entry");
        assert_eq!(block.states().get("open_bit"), Some(&StateValue::Bool(true)));
    }

    #[test]
    fn test_empty_block_name_rejected() {
        let mut entry = Compound::new();
        entry.insert(NAME_KEY, Tag::String("minecraft:".into()));
        entry.insert(VERSION_KEY, Tag::Int(1));
        let result = read_block(&entry, 0);
        assert!(matches!(
            result,
            Err(PersistError::Structure(StructureError::InvalidIdentifier(_)))
        ));
    }

    #[test]
    fn test_void_position_data_dropped_with_warning() {
        let mut warnings = Vec::new();
        let mut data = Compound::new();
        data.insert("1", Tag::Compound(Compound::new()));
        data.insert("0", Tag::Compound(Compound::new()));
        let mut palette = Compound::new();
        palette.insert(BLOCK_POSITION_DATA_KEY, Tag::Compound(data));

        let overlay = read_position_data(&palette, &[0, -1], &mut warnings).expect("decode");
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay[0].0, 0);
        assert_eq!(warnings.len(), 1);

        let result = read_position_data(&palette, &[0], &mut warnings);
        assert!(matches!(result, Err(PersistError::MalformedContainer(_))));
    }

    #[test]
    fn test_report_carries_warnings() {
        let mut root = sample_root();
        root.insert(FORMAT_VERSION_KEY, Tag::Int(9));
        let report = load_with_report(
            &encode(&root),
            CodecOptions::default(),
            StructureConfig::default(),
        )
        .expect("load");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.structure.size(), IVec3::new(2, 2, 2));
    }

    #[test]
    fn test_truncated_input_is_nbt_error() {
        let bytes = encode(&sample_root());
        let result = load(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(PersistError::Nbt(_))));
    }
}
