use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::NbtError;

/// Wire identifier of a tag type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagKind {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Result<Self, NbtError> {
        Ok(match id {
            0 => TagKind::End,
            1 => TagKind::Byte,
            2 => TagKind::Short,
            3 => TagKind::Int,
            4 => TagKind::Long,
            5 => TagKind::Float,
            6 => TagKind::Double,
            7 => TagKind::ByteArray,
            8 => TagKind::String,
            9 => TagKind::List,
            10 => TagKind::Compound,
            11 => TagKind::IntArray,
            12 => TagKind::LongArray,
            other => return Err(NbtError::UnknownTagKind(other)),
        })
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagKind::End => "TAG_End",
            TagKind::Byte => "TAG_Byte",
            TagKind::Short => "TAG_Short",
            TagKind::Int => "TAG_Int",
            TagKind::Long => "TAG_Long",
            TagKind::Float => "TAG_Float",
            TagKind::Double => "TAG_Double",
            TagKind::ByteArray => "TAG_Byte_Array",
            TagKind::String => "TAG_String",
            TagKind::List => "TAG_List",
            TagKind::Compound => "TAG_Compound",
            TagKind::IntArray => "TAG_Int_Array",
            TagKind::LongArray => "TAG_Long_Array",
        };
        f.write_str(name)
    }
}

/// A single node of a tag tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::String(_) => TagKind::String,
            Tag::List(_) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
            Tag::IntArray(_) => TagKind::IntArray,
            Tag::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Integer value of any integral scalar tag, widened to 64 bits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Byte(v) => Some(*v as i64),
            Tag::Short(v) => Some(*v as i64),
            Tag::Int(v) => Some(*v as i64),
            Tag::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer value that fits in 32 bits, from any integral scalar tag.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Tag::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Total order over tags: by kind id first, then by payload.
    ///
    /// Floats compare with `total_cmp`, arrays and lists element by element
    /// and compounds entry by entry in key order. A shorter sequence that is
    /// a prefix of a longer one sorts first.
    pub fn total_cmp(&self, other: &Tag) -> Ordering {
        match (self, other) {
            (Tag::Byte(a), Tag::Byte(b)) => a.cmp(b),
            (Tag::Short(a), Tag::Short(b)) => a.cmp(b),
            (Tag::Int(a), Tag::Int(b)) => a.cmp(b),
            (Tag::Long(a), Tag::Long(b)) => a.cmp(b),
            (Tag::Float(a), Tag::Float(b)) => a.total_cmp(b),
            (Tag::Double(a), Tag::Double(b)) => a.total_cmp(b),
            (Tag::ByteArray(a), Tag::ByteArray(b)) => a.cmp(b),
            (Tag::String(a), Tag::String(b)) => a.cmp(b),
            (Tag::List(a), Tag::List(b)) => a
                .kind
                .id()
                .cmp(&b.kind.id())
                .then_with(|| cmp_seq(a.iter(), b.iter(), |x, y| x.total_cmp(y))),
            (Tag::Compound(a), Tag::Compound(b)) => cmp_seq(
                a.sorted_entries().into_iter(),
                b.sorted_entries().into_iter(),
                |(ka, ta), (kb, tb)| ka.cmp(kb).then_with(|| ta.total_cmp(tb)),
            ),
            (Tag::IntArray(a), Tag::IntArray(b)) => a.cmp(b),
            (Tag::LongArray(a), Tag::LongArray(b)) => a.cmp(b),
            _ => self.kind().id().cmp(&other.kind().id()),
        }
    }
}

/// Lexicographic comparison with a custom element order.
fn cmp_seq<T>(
    mut a: impl Iterator<Item = T>,
    mut b: impl Iterator<Item = T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => match cmp(&x, &y) {
                Ordering::Equal => {}
                ord => return ord,
            },
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
        }
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tag::Byte(v) => serializer.serialize_i8(*v),
            Tag::Short(v) => serializer.serialize_i16(*v),
            Tag::Int(v) => serializer.serialize_i32(*v),
            Tag::Long(v) => serializer.serialize_i64(*v),
            Tag::Float(v) => serializer.serialize_f32(*v),
            Tag::Double(v) => serializer.serialize_f64(*v),
            Tag::ByteArray(items) => serializer.collect_seq(items),
            Tag::String(s) => serializer.serialize_str(s),
            Tag::List(list) => serializer.collect_seq(list.iter()),
            Tag::Compound(compound) => serializer.collect_map(compound.iter()),
            Tag::IntArray(items) => serializer.collect_seq(items),
            Tag::LongArray(items) => serializer.collect_seq(items),
        }
    }
}

/// Homogeneous list of tags.
///
/// The element kind is fixed at construction and enforced on every push.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    kind: TagKind,
    items: Vec<Tag>,
}

impl List {
    /// An empty list of the given element kind.
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Build a list from tags that must all be of `kind`.
    pub fn from_tags(kind: TagKind, items: Vec<Tag>) -> Result<Self, NbtError> {
        if let Some(bad) = items.iter().find(|t| t.kind() != kind) {
            return Err(NbtError::ListKindMismatch {
                expected: kind,
                found: bad.kind(),
            });
        }
        Ok(Self { kind, items })
    }

    /// A list of `TAG_Int`.
    pub fn from_ints(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            kind: TagKind::Int,
            items: values.into_iter().map(Tag::Int).collect(),
        }
    }

    pub fn push(&mut self, tag: Tag) -> Result<(), NbtError> {
        if tag.kind() != self.kind {
            return Err(NbtError::ListKindMismatch {
                expected: self.kind,
                found: tag.kind(),
            });
        }
        self.items.push(tag);
        Ok(())
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn into_inner(self) -> Vec<Tag> {
        self.items
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Named tags in insertion order.
///
/// Lookups go through a name index, so building a compound of `n` entries
/// is linear in `n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: Vec<(String, Tag)>,
    index: HashMap<String, usize>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace; a replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, tag: Tag) -> Option<Tag> {
        let name = name.into();
        if let Some(&pos) = self.index.get(&name) {
            return Some(std::mem::replace(&mut self.entries[pos].1, tag));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, tag));
        None
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.index.get(name).map(|&pos| &self.entries[pos].1)
    }

    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        let pos = self.index.remove(name)?;
        let (_, tag) = self.entries.remove(pos);
        for (key, _) in &self.entries[pos..] {
            if let Some(slot) = self.index.get_mut(key) {
                *slot -= 1;
            }
        }
        Some(tag)
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(Tag::as_i32)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Tag::as_str)
    }

    pub fn get_list(&self, name: &str) -> Option<&List> {
        self.get(name).and_then(Tag::as_list)
    }

    pub fn get_compound(&self, name: &str) -> Option<&Compound> {
        self.get(name).and_then(Tag::as_compound)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), t))
    }

    fn sorted_entries(&self) -> Vec<(&str, &Tag)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<I: IntoIterator<Item = (String, Tag)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (name, tag) in iter {
            compound.insert(name, tag);
        }
        compound
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = std::vec::IntoIter<(String, Tag)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
