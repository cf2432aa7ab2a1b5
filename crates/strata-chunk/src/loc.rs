use strata_geom::IVec3;

use crate::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z};

const X_BITS: u16 = 4;
const Y_BITS: u16 = 6;
const Z_BITS: u16 = 4;
const X_SHIFT: u16 = 0;
const Y_SHIFT: u16 = X_SHIFT + X_BITS;
const Z_SHIFT: u16 = Y_SHIFT + Y_BITS;
const X_MASK: u16 = (1 << X_BITS) - 1;
const Y_MASK: u16 = (1 << Y_BITS) - 1;
const Z_MASK: u16 = (1 << Z_BITS) - 1;
const USED_MASK: u16 = (1 << (X_BITS + Y_BITS + Z_BITS)) - 1;

/// Chunk-local voxel position packed into 16 bits: `x:4 | y:6 | z:4`, two high bits unused.
///
/// The packed value doubles as the index into a chunk's dense voxel store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelLoc(u16);

impl VoxelLoc {
    /// Packs a position; components wider than their field are masked.
    #[inline]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        VoxelLoc(
            ((x as u16 & X_MASK) << X_SHIFT)
                | ((y as u16 & Y_MASK) << Y_SHIFT)
                | ((z as u16 & Z_MASK) << Z_SHIFT),
        )
    }

    /// Packs a position, or `None` when any component is outside the chunk.
    #[inline]
    pub fn try_new(x: i32, y: i32, z: i32) -> Option<Self> {
        let in_range = (0..CHUNK_SIZE_X as i32).contains(&x)
            && (0..CHUNK_SIZE_Y as i32).contains(&y)
            && (0..CHUNK_SIZE_Z as i32).contains(&z);
        in_range.then(|| Self::new(x as u8, y as u8, z as u8))
    }

    #[inline]
    pub fn from_ivec3(p: IVec3) -> Option<Self> {
        Self::try_new(p.x, p.y, p.z)
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        VoxelLoc(raw & USED_MASK)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn x(self) -> u8 {
        ((self.0 >> X_SHIFT) & X_MASK) as u8
    }

    #[inline]
    pub const fn y(self) -> u8 {
        ((self.0 >> Y_SHIFT) & Y_MASK) as u8
    }

    #[inline]
    pub const fn z(self) -> u8 {
        ((self.0 >> Z_SHIFT) & Z_MASK) as u8
    }

    #[inline]
    pub fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x() as i32, self.y() as i32, self.z() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_pack_into_fourteen_bits() {
        assert_eq!(VoxelLoc::new(0, 0, 0).raw(), 0);
        let max = VoxelLoc::new(15, 63, 15);
        assert_eq!(max.raw(), USED_MASK);
        assert_eq!((max.x(), max.y(), max.z()), (15, 63, 15));
    }

    #[test]
    fn try_new_rejects_out_of_chunk() {
        assert!(VoxelLoc::try_new(16, 0, 0).is_none());
        assert!(VoxelLoc::try_new(0, 64, 0).is_none());
        assert!(VoxelLoc::try_new(0, 0, -1).is_none());
        assert_eq!(VoxelLoc::try_new(3, 40, 9), Some(VoxelLoc::new(3, 40, 9)));
    }

    #[test]
    fn from_raw_drops_unused_bits() {
        assert_eq!(VoxelLoc::from_raw(0xC000), VoxelLoc::new(0, 0, 0));
    }
}
