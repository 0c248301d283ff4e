//! Whole-structure mirror and rotation.
//!
//! Both operations rebuild the index array into a fresh buffer and move every
//! overlay entry along with its cell. The palette is untouched.

use trimstruct_core::math;
use trimstruct_core::{Axis, BlockPos, Rotation, StructureError, StructureSize};

use crate::structure::Structure;

impl Structure {
    /// Reflect the structure along `axis`.
    ///
    /// Y is rejected with [`StructureError::InvalidAxis`] unless
    /// `allow_y_mirror` is set in the structure's config.
    pub fn mirror(&mut self, axis: Axis) -> Result<(), StructureError> {
        if !axis.is_horizontal() && !self.config.allow_y_mirror {
            return Err(StructureError::InvalidAxis(axis.to_string()));
        }
        let size = self.size;
        self.remap_cells(size, |pos| axis.mirror(pos, size));
        log::debug!("mirrored {size} structure along {axis}");
        Ok(())
    }

    /// Rotate clockwise (seen from above) by 90, 180 or 270 degrees.
    pub fn rotate(&mut self, degrees: i32) -> Result<(), StructureError> {
        self.rotate_by(Rotation::from_degrees(degrees)?);
        Ok(())
    }

    pub fn rotate_by(&mut self, rotation: Rotation) {
        let size = self.size;
        let new_size = rotation.rotated_size(size);
        self.remap_cells(new_size, |pos| rotation.apply(pos, size));
        log::debug!(
            "rotated {size} structure by {} degrees, now {new_size}",
            rotation.degrees()
        );
    }

    fn remap_cells(&mut self, new_size: StructureSize, f: impl Fn(BlockPos) -> BlockPos) {
        let old_size = self.size;
        let mut indices = vec![0; self.indices.len()];
        for (old, &slot) in self.indices.iter().enumerate() {
            let pos = f(math::unflatten(old_size, old));
            indices[math::flatten(new_size, pos)] = slot;
        }
        self.indices = indices;
        self.overlay
            .remap(|old| math::flatten(new_size, f(math::unflatten(old_size, old))));
        self.size = new_size;
    }
}
