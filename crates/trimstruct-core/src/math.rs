use crate::types::{BlockPos, StructureSize};

/// Number of cells in a structure of the given size.
///
/// `None` when an extent is negative or the product does not fit in `usize`.
pub fn volume(size: StructureSize) -> Option<usize> {
    let x = usize::try_from(size.x).ok()?;
    let y = usize::try_from(size.y).ok()?;
    let z = usize::try_from(size.z).ok()?;
    x.checked_mul(y)?.checked_mul(z)
}

/// Whether `pos` lies inside `[0, size)` on every axis.
pub fn contains(size: StructureSize, pos: BlockPos) -> bool {
    pos.x >= 0
        && pos.x < size.x
        && pos.y >= 0
        && pos.y < size.y
        && pos.z >= 0
        && pos.z < size.z
}

/// Flatten a coordinate into its linear index.
///
/// X-major, then Y, then Z: `x * size_z * size_y + y * size_z + z`.
/// This is the order of `block_indices` in the file and the key space of the
/// extra-data overlay. Callers must check `contains` first.
pub fn flatten(size: StructureSize, pos: BlockPos) -> usize {
    let sy = size.y as usize;
    let sz = size.z as usize;
    pos.x as usize * sz * sy + pos.y as usize * sz + pos.z as usize
}

/// Inverse of [`flatten`].
pub fn unflatten(size: StructureSize, index: usize) -> BlockPos {
    let sy = size.y.max(1) as usize;
    let sz = size.z.max(1) as usize;
    let plane = sy * sz;
    BlockPos::new(
        (index / plane) as i32,
        ((index % plane) / sz) as i32,
        (index % sz) as i32,
    )
}
