use strata_chunk::Chunk;
use strata_world::{ChunkAddr, ChunkLoc, SECTOR_CHUNKS, World};

use crate::face::Face;

/// The six axis-adjacent chunks of one chunk, indexed by [`Face`].
///
/// Built once per mesh build. Every slot holds a real chunk: where the world
/// has none, the caller's generic chunk stands in, so the meshers never branch
/// on a missing neighbour.
#[derive(Clone, Copy)]
pub struct NeighborChunks<'a> {
    table: [&'a Chunk; 6],
}

impl<'a> NeighborChunks<'a> {
    /// Every side resolves to `generic`.
    pub fn uniform(generic: &'a Chunk) -> Self {
        Self {
            table: [generic; 6],
        }
    }

    pub fn from_table(table: [&'a Chunk; 6]) -> Self {
        Self { table }
    }

    pub fn resolve(world: &'a World, addr: ChunkAddr, generic: &'a Chunk) -> Self {
        let mut table = [generic; 6];
        for face in Face::ALL {
            if let Some(n) = neighbor_addr(addr, face).and_then(|a| world.get_chunk(a)) {
                table[face.index()] = n;
            }
        }
        Self { table }
    }

    #[inline]
    pub fn get(&self, face: Face) -> &'a Chunk {
        self.table[face.index()]
    }

    /// Current LOD of the neighbour across `face`.
    #[inline]
    pub fn lod(&self, face: Face) -> u8 {
        self.table[face.index()].data.lod
    }
}

/// Address of the chunk across `face`, or `None` when it lies outside the
/// world's addressable range.
///
/// X and Z stay inside the sector except at chunk index 0 or 31, where they
/// step into the adjacent sector's opposite edge chunk. Y never leaves the sector.
pub fn neighbor_addr(addr: ChunkAddr, face: Face) -> Option<ChunkAddr> {
    let c = addr.chunk;
    let edge = SECTOR_CHUNKS - 1;
    let (x, y, z) = (c.x(), c.y(), c.z());
    let (sector, chunk) = match face {
        Face::PosY => (Some(addr.sector), ChunkLoc::new(x, y + 1, z)),
        Face::NegY => (Some(addr.sector), ChunkLoc::new(x, y - 1, z)),
        Face::PosX if x == edge => (addr.sector.offset(1, 0), ChunkLoc::new(0, y, z)),
        Face::PosX => (Some(addr.sector), ChunkLoc::new(x + 1, y, z)),
        Face::NegX if x == 0 => (addr.sector.offset(-1, 0), ChunkLoc::new(edge, y, z)),
        Face::NegX => (Some(addr.sector), ChunkLoc::new(x - 1, y, z)),
        Face::PosZ if z == edge => (addr.sector.offset(0, 1), ChunkLoc::new(x, y, 0)),
        Face::PosZ => (Some(addr.sector), ChunkLoc::new(x, y, z + 1)),
        Face::NegZ if z == 0 => (addr.sector.offset(0, -1), ChunkLoc::new(x, y, edge)),
        Face::NegZ => (Some(addr.sector), ChunkLoc::new(x, y, z - 1)),
    };
    Some(ChunkAddr::new(sector?, chunk?))
}
