use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use strata_chunk::{CHUNK_DIMS, Chunk, Frame};
use strata_geom::IVec3;

use crate::coords::{SECTOR_CHUNKS, sector_coords_of, sector_origin, world_to_sector_relative};
use crate::loc::{ChunkLoc, SectorLoc};

/// A 32x32 column of chunks, unbounded (within `ChunkLoc` range) on Y.
#[derive(Debug)]
pub struct Sector {
    loc: SectorLoc,
    chunks: BTreeMap<ChunkLoc, Chunk>,
}

impl Sector {
    pub fn new(loc: SectorLoc) -> Self {
        Self {
            loc,
            chunks: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn loc(&self) -> SectorLoc {
        self.loc
    }

    /// Minimum world corner.
    #[inline]
    pub fn origin(&self) -> IVec3 {
        sector_origin(self.loc.x(), self.loc.z())
    }

    /// Chunk key for `pos`.
    ///
    /// `Frame::Chunk` takes a chunk-grid index inside this sector; `Frame::Sector`
    /// a voxel position relative to the sector corner; `Frame::World` an absolute
    /// voxel position, which must fall inside this sector.
    pub fn chunk_loc_for(&self, pos: IVec3, frame: Frame) -> Option<ChunkLoc> {
        let grid = match frame {
            Frame::Chunk => pos,
            Frame::Sector => pos.div_euclid(CHUNK_DIMS),
            Frame::World => {
                if sector_coords_of(pos) != (self.loc.x(), self.loc.z()) {
                    return None;
                }
                world_to_sector_relative(pos).div_euclid(CHUNK_DIMS)
            }
        };
        ChunkLoc::new(grid.x, grid.y, grid.z)
    }

    /// Returns the chunk at `loc`, creating an empty one first if needed.
    pub fn create_chunk(&mut self, loc: ChunkLoc) -> &mut Chunk {
        match self.chunks.entry(loc) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let local = IVec3::new(loc.x(), loc.y(), loc.z()).mul_elem(CHUNK_DIMS);
                let world = sector_origin(self.loc.x(), self.loc.z()) + local;
                log::trace!(
                    "sector ({}, {}) new chunk ({}, {}, {})",
                    self.loc.x(),
                    self.loc.z(),
                    loc.x(),
                    loc.y(),
                    loc.z()
                );
                e.insert(Chunk::new(local, world))
            }
        }
    }

    pub fn create_chunk_at(&mut self, pos: IVec3, frame: Frame) -> Option<&mut Chunk> {
        let loc = self.chunk_loc_for(pos, frame)?;
        Some(self.create_chunk(loc))
    }

    /// Inserts a chunk built elsewhere (e.g. loaded from disk), replacing and
    /// returning any chunk already at `loc`.
    pub fn insert_chunk(&mut self, loc: ChunkLoc, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(loc, chunk)
    }

    #[inline]
    pub fn get_chunk(&self, loc: ChunkLoc) -> Option<&Chunk> {
        self.chunks.get(&loc)
    }

    #[inline]
    pub fn get_chunk_mut(&mut self, loc: ChunkLoc) -> Option<&mut Chunk> {
        self.chunks.get_mut(&loc)
    }

    pub fn get_chunk_at(&self, pos: IVec3, frame: Frame) -> Option<&Chunk> {
        self.chunk_loc_for(pos, frame).and_then(|l| self.chunks.get(&l))
    }

    pub fn get_chunk_at_mut(&mut self, pos: IVec3, frame: Frame) -> Option<&mut Chunk> {
        let loc = self.chunk_loc_for(pos, frame)?;
        self.chunks.get_mut(&loc)
    }

    pub fn remove_chunk(&mut self, loc: ChunkLoc) -> Option<Chunk> {
        self.chunks.remove(&loc)
    }

    pub fn remove_chunk_at(&mut self, pos: IVec3, frame: Frame) -> Option<Chunk> {
        let loc = self.chunk_loc_for(pos, frame)?;
        self.chunks.remove(&loc)
    }

    #[inline]
    pub fn contains(&self, loc: ChunkLoc) -> bool {
        self.chunks.contains_key(&loc)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunks in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkLoc, &Chunk)> {
        self.chunks.iter().map(|(l, c)| (*l, c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ChunkLoc, &mut Chunk)> {
        self.chunks.iter_mut().map(|(l, c)| (*l, c))
    }
}

const _: () = assert!(SECTOR_CHUNKS - 1 == ChunkLoc::MAX_XZ);

#[cfg(test)]
mod tests {
    use super::*;
    use strata_blocks::Voxel;

    #[test]
    fn create_chunk_is_idempotent() {
        let mut s = Sector::new(SectorLoc::encode(0, 0));
        let loc = ChunkLoc::encode(1, 2, 3);
        s.create_chunk(loc)
            .create_voxel(IVec3::ZERO, Frame::Chunk, Voxel::solid(1, 3, 3, 3));
        s.create_chunk(loc);
        assert_eq!(s.len(), 1);
        assert_eq!(s.get_chunk(loc).map(Chunk::solid_count), Some(1));
    }

    #[test]
    fn sector_relative_negative_y_floors() {
        let s = Sector::new(SectorLoc::encode(0, 0));
        let l = s.chunk_loc_for(IVec3::new(17, -1, 511), Frame::Sector).unwrap();
        assert_eq!((l.x(), l.y(), l.z()), (1, -1, 31));
    }

    #[test]
    fn world_frame_must_hit_this_sector() {
        let s = Sector::new(SectorLoc::encode(-1, 0));
        assert!(s.chunk_loc_for(IVec3::new(0, 0, 0), Frame::World).is_none());
        let l = s.chunk_loc_for(IVec3::new(-1, 0, 0), Frame::World).unwrap();
        assert_eq!(l.x(), 31);
    }

    #[test]
    fn positional_ops_resolve_negative_relative_y() {
        let mut s = Sector::new(SectorLoc::encode(0, 0));
        let pos = IVec3::new(17, -1, 40);
        let c = s.create_chunk_at(pos, Frame::Sector).unwrap();
        assert_eq!(c.sector_origin(), IVec3::new(16, -64, 32));
        assert!(s.contains(ChunkLoc::encode(1, -1, 2)));

        let c = s.get_chunk_at(pos, Frame::Sector).unwrap();
        assert_eq!(c.sector_origin(), IVec3::new(16, -64, 32));
        assert!(s.get_chunk_at(IVec3::new(17, 0, 40), Frame::Sector).is_none());

        assert!(s.remove_chunk_at(pos, Frame::Sector).is_some());
        assert!(s.get_chunk_at(pos, Frame::Sector).is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn positional_ops_miss_outside_this_sector() {
        let mut s = Sector::new(SectorLoc::encode(-1, 0));
        let outside = IVec3::new(0, 0, 0);
        assert!(s.create_chunk_at(outside, Frame::World).is_none());
        assert!(s.is_empty());
        s.create_chunk(ChunkLoc::encode(0, 0, 0));
        assert!(s.get_chunk_at(outside, Frame::World).is_none());
        assert!(s.get_chunk_at_mut(outside, Frame::World).is_none());
        assert!(s.remove_chunk_at(outside, Frame::World).is_none());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn chunk_origins_follow_sector() {
        let mut s = Sector::new(SectorLoc::encode(-1, 2));
        let c = s.create_chunk(ChunkLoc::encode(31, -1, 0));
        assert_eq!(c.sector_origin(), IVec3::new(496, -64, 0));
        assert_eq!(c.world_origin(), IVec3::new(-16, -64, 1024));
    }
}
