use crate::error::NbtError;
use crate::io::ByteOrder;
use crate::read::MAX_DEPTH;
use crate::tag::{Compound, List, Tag, TagKind};

/// Appends an encoded tag stream to an in-memory buffer.
pub(crate) struct Encoder {
    buf: Vec<u8>,
    order: ByteOrder,
}

macro_rules! write_number {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self, value: $ty) {
            match self.order {
                ByteOrder::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
                ByteOrder::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
            }
        }
    };
}

impl Encoder {
    pub(crate) fn new(order: ByteOrder) -> Self {
        Self {
            buf: Vec::new(),
            order,
        }
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write the root: compound kind byte, name, payload.
    pub(crate) fn write_root(&mut self, name: &str, root: &Compound) -> Result<(), NbtError> {
        self.buf.push(TagKind::Compound.id());
        self.write_string(name)?;
        self.write_compound(root, 0)
    }

    write_number!(write_i16, i16);
    write_number!(write_u16, u16);
    write_number!(write_i32, i32);
    write_number!(write_i64, i64);
    write_number!(write_f32, f32);
    write_number!(write_f64, f64);

    fn write_len(&mut self, len: usize) -> Result<(), NbtError> {
        let len = i32::try_from(len).map_err(|_| NbtError::LengthOverflow(len))?;
        self.write_i32(len);
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<(), NbtError> {
        let len = u16::try_from(s.len()).map_err(|_| NbtError::StringTooLong(s.len()))?;
        self.write_u16(len);
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn write_payload(&mut self, tag: &Tag, depth: usize) -> Result<(), NbtError> {
        if depth > MAX_DEPTH {
            return Err(NbtError::DepthExceeded(MAX_DEPTH));
        }
        match tag {
            Tag::Byte(v) => self.buf.push(*v as u8),
            Tag::Short(v) => self.write_i16(*v),
            Tag::Int(v) => self.write_i32(*v),
            Tag::Long(v) => self.write_i64(*v),
            Tag::Float(v) => self.write_f32(*v),
            Tag::Double(v) => self.write_f64(*v),
            Tag::ByteArray(values) => {
                self.write_len(values.len())?;
                self.buf.extend(values.iter().map(|&b| b as u8));
            }
            Tag::String(s) => self.write_string(s)?,
            Tag::List(list) => self.write_list(list, depth)?,
            Tag::Compound(c) => self.write_compound(c, depth)?,
            Tag::IntArray(values) => {
                self.write_len(values.len())?;
                for &v in values {
                    self.write_i32(v);
                }
            }
            Tag::LongArray(values) => {
                self.write_len(values.len())?;
                for &v in values {
                    self.write_i64(v);
                }
            }
        }
        Ok(())
    }

    fn write_list(&mut self, list: &List, depth: usize) -> Result<(), NbtError> {
        self.buf.push(list.kind().id());
        self.write_len(list.len())?;
        for item in list {
            self.write_payload(item, depth + 1)?;
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound, depth: usize) -> Result<(), NbtError> {
        for (name, tag) in compound.iter() {
            self.buf.push(tag.kind().id());
            self.write_string(name)?;
            self.write_payload(tag, depth + 1)?;
        }
        self.buf.push(TagKind::End.id());
        Ok(())
    }
}
