//! Conversions between world voxel coordinates, sector keys and chunk keys.
//!
//! All divisions floor towards negative infinity so that
//! `local * size + offset == world` holds for negative inputs.

use strata_chunk::{CHUNK_DIMS, CHUNK_SIZE_X, CHUNK_SIZE_Z};
use strata_geom::IVec3;

use crate::loc::{ChunkLoc, SectorLoc};

/// Chunks per sector along X and Z.
pub const SECTOR_CHUNKS: i32 = 32;
/// Sector edge length in voxels along X and Z.
pub const SECTOR_SIZE: i32 = SECTOR_CHUNKS * CHUNK_SIZE_X as i32;

const _: () = assert!(CHUNK_SIZE_X == CHUNK_SIZE_Z);

/// Sector (x, z) containing a world voxel position.
#[inline]
pub fn sector_coords_of(world: IVec3) -> (i32, i32) {
    (
        world.x.div_euclid(SECTOR_SIZE),
        world.z.div_euclid(SECTOR_SIZE),
    )
}

/// World position relative to the minimum corner of its sector. Y is untouched.
#[inline]
pub fn world_to_sector_relative(world: IVec3) -> IVec3 {
    IVec3::new(
        world.x.rem_euclid(SECTOR_SIZE),
        world.y,
        world.z.rem_euclid(SECTOR_SIZE),
    )
}

/// Minimum world corner of sector (sx, sz).
#[inline]
pub fn sector_origin(sx: i32, sz: i32) -> IVec3 {
    IVec3::new(sx * SECTOR_SIZE, 0, sz * SECTOR_SIZE)
}

/// Global chunk-grid coordinate of a world voxel position.
#[inline]
pub fn chunk_coord_of(world: IVec3) -> IVec3 {
    world.div_euclid(CHUNK_DIMS)
}

/// Sector key plus in-sector chunk key for one chunk of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkAddr {
    pub sector: SectorLoc,
    pub chunk: ChunkLoc,
}

impl ChunkAddr {
    #[inline]
    pub fn new(sector: SectorLoc, chunk: ChunkLoc) -> Self {
        Self { sector, chunk }
    }

    /// Address of the chunk at global chunk-grid coordinate `c`, or `None`
    /// outside the representable sector and chunk-Y ranges.
    pub fn from_chunk_coord(c: IVec3) -> Option<Self> {
        let sector = SectorLoc::new(c.x.div_euclid(SECTOR_CHUNKS), c.z.div_euclid(SECTOR_CHUNKS))?;
        let chunk = ChunkLoc::new(
            c.x.rem_euclid(SECTOR_CHUNKS),
            c.y,
            c.z.rem_euclid(SECTOR_CHUNKS),
        )?;
        Some(Self { sector, chunk })
    }

    #[inline]
    pub fn from_world(world: IVec3) -> Option<Self> {
        Self::from_chunk_coord(chunk_coord_of(world))
    }

    /// Global chunk-grid coordinate.
    #[inline]
    pub fn chunk_coord(self) -> IVec3 {
        IVec3::new(
            self.sector.x() * SECTOR_CHUNKS + self.chunk.x(),
            self.chunk.y(),
            self.sector.z() * SECTOR_CHUNKS + self.chunk.z(),
        )
    }

    /// Minimum world corner of the chunk.
    #[inline]
    pub fn world_origin(self) -> IVec3 {
        self.chunk_coord().mul_elem(CHUNK_DIMS)
    }

    /// Minimum corner of the chunk relative to its sector.
    #[inline]
    pub fn sector_origin(self) -> IVec3 {
        IVec3::new(self.chunk.x(), self.chunk.y(), self.chunk.z()).mul_elem(CHUNK_DIMS)
    }

    /// The chunk `(dx, dy, dz)` chunk steps away, crossing sectors as needed.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Self::from_chunk_coord(self.chunk_coord().offset(dx, dy, dz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_world_positions_floor() {
        assert_eq!(sector_coords_of(IVec3::new(-1, 0, -512)), (-1, -1));
        assert_eq!(sector_coords_of(IVec3::new(-513, 0, 511)), (-2, 0));
        assert_eq!(
            world_to_sector_relative(IVec3::new(-1, -5, -512)),
            IVec3::new(511, -5, 0)
        );
        assert_eq!(chunk_coord_of(IVec3::new(-1, -1, -17)), IVec3::new(-1, -1, -2));
    }

    #[test]
    fn chunk_addr_crosses_sector_edges() {
        let a = ChunkAddr::from_chunk_coord(IVec3::new(-1, 0, 0)).unwrap();
        assert_eq!((a.sector.x(), a.sector.z()), (-1, 0));
        assert_eq!(a.chunk.x(), 31);
        let b = a.offset(1, 0, 0).unwrap();
        assert_eq!((b.sector.x(), b.chunk.x()), (0, 0));
        assert_eq!(a.world_origin(), IVec3::new(-16, 0, 0));
        assert_eq!(a.sector_origin(), IVec3::new(496, 0, 0));
    }

    #[test]
    fn chunk_addr_rejects_y_out_of_range() {
        assert!(ChunkAddr::from_chunk_coord(IVec3::new(0, 32, 0)).is_none());
        assert!(ChunkAddr::from_chunk_coord(IVec3::new(0, -31, 0)).is_some());
        assert!(ChunkAddr::from_world(IVec3::new(0, 32 * 64, 0)).is_none());
    }
}
