use std::fmt;
use std::str::FromStr;

use glam::IVec3;

use crate::error::StructureError;
use crate::types::{BlockPos, StructureSize};

/// One of the three structure axes. Y is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// Component index into an `IVec3`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_horizontal(self) -> bool {
        self != Axis::Y
    }

    /// Reflect `pos` across the middle plane of `size` along this axis.
    pub fn mirror(self, pos: BlockPos, size: StructureSize) -> BlockPos {
        let mut out = pos;
        let i = self.index();
        out[i] = size[i] - 1 - pos[i];
        out
    }
}

impl FromStr for Axis {
    type Err = StructureError;

    /// Accepts `x`, `y`, `z` in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(Axis::X),
            "Y" | "y" => Ok(Axis::Y),
            "Z" | "z" => Ok(Axis::Z),
            other => Err(StructureError::InvalidAxis(other.to_owned())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// Quarter-turn rotation about the vertical (Y) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    /// Only 90, 180 and 270 are accepted.
    pub fn from_degrees(degrees: i32) -> Result<Self, StructureError> {
        match degrees {
            90 => Ok(Rotation::Quarter),
            180 => Ok(Rotation::Half),
            270 => Ok(Rotation::ThreeQuarter),
            other => Err(StructureError::InvalidRotation(other)),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }

    /// Size after rotation: odd quarter turns swap X and Z.
    pub fn rotated_size(self, size: StructureSize) -> StructureSize {
        match self {
            Rotation::Half => size,
            Rotation::Quarter | Rotation::ThreeQuarter => IVec3::new(size.z, size.y, size.x),
        }
    }

    /// Map a coordinate in a structure of `size` to its rotated position.
    ///
    /// A quarter turn sends `(x, y, z)` to `(size.z - 1 - z, y, x)`.
    pub fn apply(self, pos: BlockPos, size: StructureSize) -> BlockPos {
        match self {
            Rotation::Quarter => IVec3::new(size.z - 1 - pos.z, pos.y, pos.x),
            Rotation::Half => IVec3::new(size.x - 1 - pos.x, pos.y, size.z - 1 - pos.z),
            Rotation::ThreeQuarter => IVec3::new(pos.z, pos.y, size.x - 1 - pos.x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_parse() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("Z".parse::<Axis>(), Ok(Axis::Z));
        assert_eq!("y".parse::<Axis>(), Ok(Axis::Y));
        assert!(matches!(
            "".parse::<Axis>(),
            Err(StructureError::InvalidAxis(_))
        ));
        assert!(matches!(
            "xz".parse::<Axis>(),
            Err(StructureError::InvalidAxis(_))
        ));
    }

    #[test]
    fn test_mirror_is_involution() {
        let size = IVec3::new(4, 2, 3);
        let pos = IVec3::new(1, 1, 0);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let once = axis.mirror(pos, size);
            assert_eq!(axis.mirror(once, size), pos);
        }
        assert_eq!(Axis::X.mirror(pos, size), IVec3::new(2, 1, 0));
        assert_eq!(Axis::Z.mirror(pos, size), IVec3::new(1, 1, 2));
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(Rotation::from_degrees(90), Ok(Rotation::Quarter));
        assert_eq!(Rotation::from_degrees(270).map(Rotation::degrees), Ok(270));
        assert_eq!(
            Rotation::from_degrees(45),
            Err(StructureError::InvalidRotation(45))
        );
        assert_eq!(
            Rotation::from_degrees(360),
            Err(StructureError::InvalidRotation(360))
        );
    }

    #[test]
    fn test_quarter_turns_compose() {
        let size = IVec3::new(4, 2, 3);
        let pos = IVec3::new(3, 1, 0);

        let mut p = pos;
        let mut s = size;
        for _ in 0..4 {
            p = Rotation::Quarter.apply(p, s);
            s = Rotation::Quarter.rotated_size(s);
        }
        assert_eq!((p, s), (pos, size));

        let half = Rotation::Half.apply(pos, size);
        let mirrored = Axis::Z.mirror(Axis::X.mirror(pos, size), size);
        assert_eq!(half, mirrored);

        let three = Rotation::ThreeQuarter.apply(pos, size);
        let mut p = pos;
        let mut s = size;
        for _ in 0..3 {
            p = Rotation::Quarter.apply(p, s);
            s = Rotation::Quarter.rotated_size(s);
        }
        assert_eq!(three, p);
    }

    #[test]
    fn test_rotated_position_in_bounds() {
        let size = IVec3::new(5, 1, 2);
        let rotated = Rotation::Quarter.rotated_size(size);
        assert_eq!(rotated, IVec3::new(2, 1, 5));
        for x in 0..size.x {
            for z in 0..size.z {
                let p = Rotation::Quarter.apply(IVec3::new(x, 0, z), size);
                assert!(crate::math::contains(rotated, p));
            }
        }
    }
}
