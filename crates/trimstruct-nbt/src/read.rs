use crate::error::NbtError;
use crate::io::ByteOrder;
use crate::tag::{Compound, List, Tag, TagKind};

/// Maximum nesting of lists and compounds accepted from a stream.
pub const MAX_DEPTH: usize = 512;

/// Cursor over an in-memory tag stream.
pub(crate) struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

macro_rules! read_number {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self) -> Result<$ty, NbtError> {
            const N: usize = std::mem::size_of::<$ty>();
            let bytes: [u8; N] = self.take(N)?.try_into().map_err(|_| NbtError::Truncated(self.pos))?;
            Ok(match self.order {
                ByteOrder::Little => <$ty>::from_le_bytes(bytes),
                ByteOrder::Big => <$ty>::from_be_bytes(bytes),
            })
        }
    };
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            pos: 0,
            order,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Read the root: kind byte, name, compound payload.
    pub(crate) fn read_root(&mut self) -> Result<(String, Compound), NbtError> {
        let kind = TagKind::from_id(self.read_u8()?)?;
        if kind != TagKind::Compound {
            return Err(NbtError::RootNotCompound(kind));
        }
        let name = self.read_string()?;
        let root = self.read_compound(0)?;
        Ok((name, root))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], NbtError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(NbtError::Truncated(self.pos))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Result<u8, NbtError> {
        Ok(self.take(1)?[0])
    }

    read_number!(read_i16, i16);
    read_number!(read_u16, u16);
    read_number!(read_i32, i32);
    read_number!(read_i64, i64);
    read_number!(read_f32, f32);
    read_number!(read_f64, f64);

    fn read_len(&mut self, element_size: usize) -> Result<usize, NbtError> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(NbtError::NegativeLength(len));
        }
        let len = len as usize;
        // Reject counts the remaining input cannot possibly hold before allocating.
        if len.saturating_mul(element_size) > self.remaining() {
            return Err(NbtError::Truncated(self.pos));
        }
        Ok(len)
    }

    fn read_string(&mut self) -> Result<String, NbtError> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| NbtError::InvalidUtf8)
    }

    fn read_payload(&mut self, kind: TagKind, depth: usize) -> Result<Tag, NbtError> {
        if depth > MAX_DEPTH {
            return Err(NbtError::DepthExceeded(MAX_DEPTH));
        }
        Ok(match kind {
            TagKind::End => return Err(NbtError::UnknownTagKind(TagKind::End.id())),
            TagKind::Byte => Tag::Byte(self.read_u8()? as i8),
            TagKind::Short => Tag::Short(self.read_i16()?),
            TagKind::Int => Tag::Int(self.read_i32()?),
            TagKind::Long => Tag::Long(self.read_i64()?),
            TagKind::Float => Tag::Float(self.read_f32()?),
            TagKind::Double => Tag::Double(self.read_f64()?),
            TagKind::ByteArray => {
                let len = self.read_len(1)?;
                Tag::ByteArray(self.take(len)?.iter().map(|&b| b as i8).collect())
            }
            TagKind::String => Tag::String(self.read_string()?),
            TagKind::List => Tag::List(self.read_list(depth)?),
            TagKind::Compound => Tag::Compound(self.read_compound(depth)?),
            TagKind::IntArray => {
                let len = self.read_len(4)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.read_i32()?);
                }
                Tag::IntArray(values)
            }
            TagKind::LongArray => {
                let len = self.read_len(8)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.read_i64()?);
                }
                Tag::LongArray(values)
            }
        })
    }

    fn read_list(&mut self, depth: usize) -> Result<List, NbtError> {
        let kind = TagKind::from_id(self.read_u8()?)?;
        let len = self.read_len(if kind == TagKind::End { 0 } else { 1 })?;
        if kind == TagKind::End {
            // Writers emit End-typed lists only when empty; any count is ignored.
            return Ok(List::new(TagKind::End));
        }
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.read_payload(kind, depth + 1)?);
        }
        List::from_tags(kind, items)
    }

    fn read_compound(&mut self, depth: usize) -> Result<Compound, NbtError> {
        let mut compound = Compound::new();
        loop {
            let kind = TagKind::from_id(self.read_u8()?)?;
            if kind == TagKind::End {
                return Ok(compound);
            }
            let name = self.read_string()?;
            if compound.contains_key(&name) {
                return Err(NbtError::DuplicateKey(name));
            }
            let tag = self.read_payload(kind, depth + 1)?;
            compound.insert(name, tag);
        }
    }
}
