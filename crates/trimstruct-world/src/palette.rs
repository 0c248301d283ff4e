use std::collections::HashMap;

use trimstruct_core::constants::VOID_INDEX;
use trimstruct_core::Block;

/// Append-only list of distinct blocks referenced by slot number.
///
/// Entries are stored without extra data. Slots are never removed or
/// renumbered, so indices already written to the volume stay valid.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    blocks: Vec<Block>,
    /// Block to the first slot holding it.
    lookup: HashMap<Block, usize>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt entries read from a file in their stored order.
    ///
    /// Duplicate entries keep their own slots; lookups resolve to the first.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut palette = Self::new();
        for block in blocks {
            palette.push(block.without_extra_data());
        }
        palette
    }

    fn push(&mut self, block: Block) -> usize {
        let slot = self.blocks.len();
        self.lookup.entry(block.clone()).or_insert(slot);
        self.blocks.push(block);
        slot
    }

    /// Slot for `block`, appending it if no equal entry exists.
    /// `None` (void) maps to [`VOID_INDEX`] and never touches the palette.
    pub fn slot_for(&mut self, block: Option<&Block>) -> i32 {
        let Some(block) = block else {
            return VOID_INDEX;
        };
        if let Some(&slot) = self.lookup.get(block) {
            return slot as i32;
        }
        let slot = self.push(block.without_extra_data());
        log::trace!("palette slot {} -> {}", slot, block.identifier());
        slot as i32
    }

    /// Slot of an equal entry, without inserting.
    pub fn find(&self, block: &Block) -> Option<usize> {
        self.lookup.get(block).copied()
    }

    pub fn get(&self, slot: usize) -> Option<&Block> {
        self.blocks.get(slot)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }
}
