use glam::IVec3;

/// Cell coordinate relative to the structure's origin corner.
pub type BlockPos = IVec3;

/// Structure extent along X, Y and Z.
pub type StructureSize = IVec3;

/// Linear index of a cell (see [`crate::math::flatten`]).
pub type FlatIndex = usize;
