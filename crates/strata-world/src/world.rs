use std::collections::BTreeMap;

use strata_blocks::Voxel;
use strata_chunk::{Chunk, Frame};
use strata_geom::IVec3;

use crate::coords::{ChunkAddr, sector_coords_of};
use crate::loc::SectorLoc;
use crate::sector::Sector;

/// Sparse world index: sectors keyed by their (X, Z) location.
#[derive(Debug, Default)]
pub struct World {
    sectors: BTreeMap<SectorLoc, Sector>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sector at (x, z), creating it if absent. `None` outside the
    /// representable sector range.
    pub fn create_sector(&mut self, x: i32, z: i32) -> Option<&mut Sector> {
        let loc = SectorLoc::new(x, z)?;
        Some(self.create_sector_loc(loc))
    }

    pub fn create_sector_loc(&mut self, loc: SectorLoc) -> &mut Sector {
        self.sectors.entry(loc).or_insert_with(|| {
            log::debug!("world: new sector ({}, {})", loc.x(), loc.z());
            Sector::new(loc)
        })
    }

    #[inline]
    pub fn get_sector(&self, loc: SectorLoc) -> Option<&Sector> {
        self.sectors.get(&loc)
    }

    #[inline]
    pub fn get_sector_mut(&mut self, loc: SectorLoc) -> Option<&mut Sector> {
        self.sectors.get_mut(&loc)
    }

    /// Sector containing the world voxel position `pos`.
    pub fn get_sector_w(&self, pos: IVec3) -> Option<&Sector> {
        let (sx, sz) = sector_coords_of(pos);
        SectorLoc::new(sx, sz).and_then(|l| self.sectors.get(&l))
    }

    /// Removes a sector and every chunk in it.
    pub fn remove_sector(&mut self, loc: SectorLoc) -> Option<Sector> {
        self.sectors.remove(&loc)
    }

    /// Drops every sector that holds no chunks. Returns how many went.
    pub fn prune_empty_sectors(&mut self) -> usize {
        let before = self.sectors.len();
        self.sectors.retain(|_, s| !s.is_empty());
        before - self.sectors.len()
    }

    /// Returns the chunk at `addr`, creating its sector and the chunk as needed.
    pub fn create_chunk(&mut self, addr: ChunkAddr) -> &mut Chunk {
        self.create_sector_loc(addr.sector).create_chunk(addr.chunk)
    }

    /// Places a prebuilt chunk at `addr`, returning whatever it replaced.
    pub fn insert_chunk(&mut self, addr: ChunkAddr, chunk: Chunk) -> Option<Chunk> {
        self.create_sector_loc(addr.sector)
            .insert_chunk(addr.chunk, chunk)
    }

    #[inline]
    pub fn get_chunk(&self, addr: ChunkAddr) -> Option<&Chunk> {
        self.sectors.get(&addr.sector)?.get_chunk(addr.chunk)
    }

    #[inline]
    pub fn get_chunk_mut(&mut self, addr: ChunkAddr) -> Option<&mut Chunk> {
        self.sectors.get_mut(&addr.sector)?.get_chunk_mut(addr.chunk)
    }

    /// Chunk containing the world voxel position `pos`.
    pub fn get_chunk_w(&self, pos: IVec3) -> Option<&Chunk> {
        self.get_chunk(ChunkAddr::from_world(pos)?)
    }

    #[inline]
    pub fn contains_chunk(&self, addr: ChunkAddr) -> bool {
        self.get_chunk(addr).is_some()
    }

    /// Removes one chunk. The sector stays even if it becomes empty.
    pub fn remove_chunk(&mut self, addr: ChunkAddr) -> Option<Chunk> {
        self.sectors.get_mut(&addr.sector)?.remove_chunk(addr.chunk)
    }

    /// Voxel at a world position.
    ///
    /// `Voxel::INVALID` when no sector covers `pos` (unindexed), AIR when the
    /// sector exists but the chunk or cell is empty (known empty).
    pub fn get_voxel(&self, pos: IVec3) -> Voxel {
        let Some(sector) = self.get_sector_w(pos) else {
            return Voxel::INVALID;
        };
        sector
            .get_chunk_at(pos, Frame::World)
            .map_or(Voxel::AIR, |c| c.get_voxel(pos, Frame::World))
    }

    /// Writes a voxel at a world position, creating the sector and chunk on
    /// demand. False when `pos` is outside the addressable range.
    pub fn set_voxel(&mut self, pos: IVec3, voxel: Voxel) -> bool {
        match ChunkAddr::from_world(pos) {
            Some(addr) => self.create_chunk(addr).create_voxel(pos, Frame::World, voxel),
            None => false,
        }
    }

    /// Overwrites a voxel with AIR. Never creates sectors or chunks.
    pub fn remove_voxel(&mut self, pos: IVec3) -> bool {
        let Some(addr) = ChunkAddr::from_world(pos) else {
            return false;
        };
        match self.get_chunk_mut(addr) {
            Some(c) => c.remove_voxel(pos, Frame::World),
            None => false,
        }
    }

    #[inline]
    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn chunk_count(&self) -> usize {
        self.sectors.values().map(Sector::len).sum()
    }

    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.values()
    }

    /// Every chunk in (sector, chunk) key order.
    pub fn iter_chunks(&self) -> impl Iterator<Item = (ChunkAddr, &Chunk)> {
        self.sectors.iter().flat_map(|(sl, s)| {
            s.iter()
                .map(move |(cl, c)| (ChunkAddr::new(*sl, cl), c))
        })
    }

    pub fn iter_chunks_mut(&mut self) -> impl Iterator<Item = (ChunkAddr, &mut Chunk)> {
        self.sectors.iter_mut().flat_map(|(sl, s)| {
            let sl = *sl;
            s.iter_mut().map(move |(cl, c)| (ChunkAddr::new(sl, cl), c))
        })
    }

    pub fn chunk_addrs(&self) -> Vec<ChunkAddr> {
        self.iter_chunks().map(|(a, _)| a).collect()
    }
}
