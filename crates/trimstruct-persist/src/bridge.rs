//! Conversion between tag trees and the native [`Value`] model.
//!
//! The mapping is lossy in both directions. Reading widens every integral
//! tag to `Int`, both float widths to `Float`, and turns `TAG_Byte` into a
//! bool. Writing emits bools as `TAG_Byte`, integers as `TAG_Int` (or
//! `TAG_Long` when they do not fit in 32 bits) and floats as `TAG_Double`.
//! A `TAG_Short` therefore comes back as a `TAG_Int`, and a byte holding
//! anything other than 0 or 1 comes back as 1.
//!
//! [`tag_to_value_lossless`] avoids that loss: any tag whose native form
//! would not write back identically is kept as [`Value::Tag`], which
//! [`value_to_tag`] emits unchanged.

use std::cmp::Ordering;

use trimstruct_core::{Map, Value};
use trimstruct_nbt::{Compound, List, NbtError, Tag, TagKind};

/// Convert a tag tree to native values, keeping compound key order.
pub fn tag_to_value(tag: &Tag) -> Value {
    match tag {
        Tag::Byte(b) => Value::Bool(*b != 0),
        Tag::Short(v) => Value::Int(*v as i64),
        Tag::Int(v) => Value::Int(*v as i64),
        Tag::Long(v) => Value::Int(*v),
        Tag::Float(v) => Value::Float(*v as f64),
        Tag::Double(v) => Value::Float(*v),
        Tag::String(s) => Value::String(s.clone()),
        Tag::ByteArray(items) => Value::List(items.iter().map(|&b| Value::Int(b as i64)).collect()),
        Tag::IntArray(items) => Value::List(items.iter().map(|&i| Value::Int(i as i64)).collect()),
        Tag::LongArray(items) => Value::List(items.iter().map(|&i| Value::Int(i)).collect()),
        Tag::List(list) => Value::List(list.iter().map(tag_to_value).collect()),
        Tag::Compound(compound) => Value::Map(compound_to_map(compound)),
    }
}

pub fn compound_to_map(compound: &Compound) -> Map {
    compound
        .iter()
        .map(|(name, tag)| (name, tag_to_value(tag)))
        .collect()
}

/// Convert a tag tree so that [`value_to_tag`] reproduces it exactly.
///
/// Compounds become maps with their children converted the same way. Any
/// other tag becomes its native value when that writes back to the same
/// tag, and is wrapped as [`Value::Tag`] otherwise.
pub fn tag_to_value_lossless(tag: &Tag) -> Value {
    if let Tag::Compound(compound) = tag {
        return Value::Map(compound_to_map_lossless(compound));
    }
    let native = tag_to_value(tag);
    match value_to_tag(&native) {
        Ok(back) if back == *tag => native,
        _ => Value::Tag(tag.clone()),
    }
}

pub fn compound_to_map_lossless(compound: &Compound) -> Map {
    compound
        .iter()
        .map(|(name, tag)| (name, tag_to_value_lossless(tag)))
        .collect()
}

/// Convert a native value to a tag tree.
///
/// A list takes its element kind from its first element; an empty list is
/// written as a list of `TAG_String`. Mixed lists fail with
/// [`NbtError::ListKindMismatch`].
pub fn value_to_tag(value: &Value) -> Result<Tag, NbtError> {
    Ok(match value {
        Value::Bool(b) => Tag::Byte(*b as i8),
        Value::Int(i) => int_tag(*i),
        Value::Float(f) => Tag::Double(*f),
        Value::String(s) => Tag::String(s.clone()),
        Value::List(items) => Tag::List(list_from_values(items.iter())?),
        Value::Map(map) => Tag::Compound(map_to_compound(map.iter())?),
        Value::Tag(tag) => tag.clone(),
    })
}

/// Like [`value_to_tag`], but the top level of a map is emitted in key
/// order and the top level of a list in [`Value::sort_cmp`] order.
/// Nested containers keep their own order.
pub fn value_to_tag_sorted(value: &Value, reverse: bool) -> Result<Tag, NbtError> {
    let directed = |ord: Ordering| if reverse { ord.reverse() } else { ord };
    match value {
        Value::Map(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| directed(a.cmp(b)));
            Ok(Tag::Compound(map_to_compound(entries.into_iter())?))
        }
        Value::List(items) => {
            let mut sorted: Vec<_> = items.iter().collect();
            sorted.sort_by(|a, b| directed(a.sort_cmp(b)));
            Ok(Tag::List(list_from_values(sorted.into_iter())?))
        }
        other => value_to_tag(other),
    }
}

pub fn map_to_compound<'a>(
    entries: impl Iterator<Item = (&'a str, &'a Value)>,
) -> Result<Compound, NbtError> {
    let mut compound = Compound::new();
    for (name, value) in entries {
        compound.insert(name, value_to_tag(value)?);
    }
    Ok(compound)
}

fn int_tag(i: i64) -> Tag {
    match i32::try_from(i) {
        Ok(v) => Tag::Int(v),
        Err(_) => Tag::Long(i),
    }
}

fn list_from_values<'a>(items: impl Iterator<Item = &'a Value>) -> Result<List, NbtError> {
    let tags = items.map(value_to_tag).collect::<Result<Vec<_>, _>>()?;
    let Some(first) = tags.first() else {
        return Ok(List::new(TagKind::String));
    };
    let kind = first.kind();

    // An int list with any 64-bit member is widened as a whole.
    if kind == TagKind::Int || kind == TagKind::Long {
        if let Some(widest) = widest_int_kind(&tags) {
            let widened = tags
                .into_iter()
                .map(|t| match (widest, t) {
                    (TagKind::Long, Tag::Int(v)) => Tag::Long(v as i64),
                    (_, t) => t,
                })
                .collect();
            return List::from_tags(widest, widened);
        }
    }
    List::from_tags(kind, tags)
}

/// `Long` if every tag is integral and at least one is a `Long`, `Int` if all
/// are `Int`, `None` when non-integer tags are mixed in.
fn widest_int_kind(tags: &[Tag]) -> Option<TagKind> {
    let mut widest = TagKind::Int;
    for tag in tags {
        match tag.kind() {
            TagKind::Int => {}
            TagKind::Long => widest = TagKind::Long,
            _ => return None,
        }
    }
    Some(widest)
}
