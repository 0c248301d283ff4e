use glam::IVec3;
use trimstruct_core::constants::VOID_INDEX;
use trimstruct_core::math;
use trimstruct_core::{
    Block, BlockPos, FlatIndex, Map, OverlayPolicy, StructureConfig, StructureError,
    StructureSize,
};

use crate::overlay::Overlay;
use crate::palette::Palette;

/// A rectangular volume of blocks.
///
/// Holds a dense index array (one `i32` per cell, `-1` = void), the palette the
/// indices point into, and a sparse overlay of per-cell extra data keyed by
/// flattened index. Every mutator validates its arguments before writing, so a
/// failed call leaves all three untouched.
#[derive(Debug, Clone)]
pub struct Structure {
    pub(crate) size: StructureSize,
    pub(crate) indices: Vec<i32>,
    pub(crate) palette: Palette,
    pub(crate) overlay: Overlay,
    pub(crate) config: StructureConfig,
}

impl Structure {
    /// Create a structure filled with void, or with `fill` if given.
    ///
    /// Extra data on `fill` is not applied to the cells.
    pub fn new(size: StructureSize, fill: Option<&Block>) -> Result<Self, StructureError> {
        Self::with_config(size, fill, StructureConfig::default())
    }

    pub fn with_config(
        size: StructureSize,
        fill: Option<&Block>,
        config: StructureConfig,
    ) -> Result<Self, StructureError> {
        let volume = check_size(size)?;
        let mut indices = Vec::new();
        indices
            .try_reserve_exact(volume)
            .map_err(|_| StructureError::InvalidSize(size))?;
        let mut palette = Palette::new();
        let slot = palette.slot_for(fill);
        indices.resize(volume, slot);
        Ok(Self {
            size,
            indices,
            palette,
            overlay: Overlay::new(),
            config,
        })
    }

    /// Assemble a structure from decoded parts, checking every invariant:
    /// index count matches the volume, every index is void or a valid slot,
    /// and every overlay key addresses a non-void cell.
    pub fn from_parts(
        size: StructureSize,
        indices: Vec<i32>,
        palette: Vec<Block>,
        overlay: Vec<(FlatIndex, Map)>,
        config: StructureConfig,
    ) -> Result<Self, StructureError> {
        let volume = check_size(size)?;
        if indices.len() != volume {
            return Err(StructureError::InconsistentData(format!(
                "{} block indices for a volume of {}",
                indices.len(),
                volume
            )));
        }
        let palette = Palette::from_blocks(palette);
        if let Some(&bad) = indices
            .iter()
            .find(|&&i| i < VOID_INDEX || i >= palette.len() as i32)
        {
            return Err(StructureError::InconsistentData(format!(
                "block index {} outside palette of {} entries",
                bad,
                palette.len()
            )));
        }
        for (index, _) in &overlay {
            match indices.get(*index) {
                None => {
                    return Err(StructureError::InconsistentData(format!(
                        "extra data at index {index} outside volume of {volume}"
                    )))
                }
                Some(&VOID_INDEX) => {
                    return Err(StructureError::InconsistentData(format!(
                        "extra data attached to void cell {index}"
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(Self {
            size,
            indices,
            palette,
            overlay: overlay.into_iter().collect(),
            config,
        })
    }

    pub fn size(&self) -> StructureSize {
        self.size
    }

    /// Number of cells.
    pub fn volume(&self) -> usize {
        self.indices.len()
    }

    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Number of cells carrying extra data.
    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }

    /// The dense index array in flattened (X-major, then Y, then Z) order.
    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    /// Raw palette slot at `pos` (`-1` for void).
    pub fn index_at(&self, pos: BlockPos) -> Result<i32, StructureError> {
        let index = self.flat_index(pos)?;
        Ok(self.indices[index])
    }

    /// Resolve the block at `pos`.
    ///
    /// Void cells yield the `structure_void` sentinel. The returned block is a
    /// copy with the cell's extra data merged in; editing it never affects the
    /// structure.
    pub fn get_block(&self, pos: BlockPos) -> Result<Block, StructureError> {
        let index = self.flat_index(pos)?;
        Ok(self.resolve(index))
    }

    /// Place `block` at `pos`, or void when `None`.
    pub fn set_block(&mut self, pos: BlockPos, block: Option<&Block>) -> Result<(), StructureError> {
        let index = self.flat_index(pos)?;
        let slot = self.palette.slot_for(block);
        self.indices[index] = slot;
        self.write_overlay(index, block);
        Ok(())
    }

    /// Fill the cuboid spanned by `from` and `to`, both corners inclusive.
    ///
    /// The corners may be given in any order on any axis.
    pub fn fill_blocks(
        &mut self,
        from: BlockPos,
        to: BlockPos,
        block: Option<&Block>,
    ) -> Result<(), StructureError> {
        self.check_pos(from)?;
        self.check_pos(to)?;

        let slot = self.palette.slot_for(block);
        let min = from.min(to);
        let max = from.max(to);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let index = math::flatten(self.size, IVec3::new(x, y, z));
                    self.indices[index] = slot;
                    if self.config.overlay_policy == OverlayPolicy::Consistent {
                        self.write_overlay(index, block);
                    }
                }
            }
        }

        if self.config.overlay_policy == OverlayPolicy::Legacy {
            self.legacy_fill_overlay(from, to, block);
        }
        Ok(())
    }

    /// Every cell with its resolved block, in flattened order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (BlockPos, Block)> + '_ {
        (0..self.indices.len()).map(move |index| (math::unflatten(self.size, index), self.resolve(index)))
    }

    /// Readable name of every cell, in flattened order.
    pub fn render_names(&self, with_namespace: bool, with_states: bool) -> Vec<String> {
        self.iter_blocks()
            .map(|(_, block)| block.render(with_namespace, with_states))
            .collect()
    }

    pub(crate) fn check_pos(&self, pos: BlockPos) -> Result<(), StructureError> {
        if math::contains(self.size, pos) {
            Ok(())
        } else {
            Err(StructureError::CoordinateOutOfRange {
                pos,
                size: self.size,
            })
        }
    }

    fn flat_index(&self, pos: BlockPos) -> Result<FlatIndex, StructureError> {
        self.check_pos(pos)?;
        Ok(math::flatten(self.size, pos))
    }

    fn resolve(&self, index: FlatIndex) -> Block {
        let slot = self.indices[index];
        let Some(entry) = usize::try_from(slot).ok().and_then(|s| self.palette.get(s)) else {
            return Block::void(self.config.compatibility_version);
        };
        let mut block = entry.clone();
        if let Some(extra) = self.overlay.get(index) {
            block.add_extra_data(extra);
        }
        block
    }

    fn write_overlay(&mut self, index: FlatIndex, block: Option<&Block>) {
        match block {
            Some(b) if !b.extra_data().is_empty() => {
                self.overlay.insert(index, b.extra_data().clone());
            }
            _ => {
                if self.config.overlay_policy == OverlayPolicy::Consistent {
                    self.overlay.remove(index);
                }
            }
        }
    }

    /// Historical overlay loop: half-open `[from, to)` per axis, not
    /// normalised, so descending or single-cell spans attach nothing.
    fn legacy_fill_overlay(&mut self, from: BlockPos, to: BlockPos, block: Option<&Block>) {
        let Some(extra) = block.map(Block::extra_data).filter(|e| !e.is_empty()) else {
            return;
        };
        for x in from.x..to.x {
            for y in from.y..to.y {
                for z in from.z..to.z {
                    let index = math::flatten(self.size, IVec3::new(x, y, z));
                    self.overlay.insert(index, extra.clone());
                }
            }
        }
    }
}

/// Cell count of `size`, rejecting negative extents and overflowing products.
fn check_size(size: StructureSize) -> Result<usize, StructureError> {
    math::volume(size).ok_or(StructureError::InvalidSize(size))
}
