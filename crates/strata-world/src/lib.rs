//! Sparse World -> Sector -> Chunk index and the codecs that key it.
#![forbid(unsafe_code)]

pub mod coords;
pub mod loc;
mod sector;
pub mod sign_mag;
mod world;

pub use coords::{
    ChunkAddr, SECTOR_CHUNKS, SECTOR_SIZE, chunk_coord_of, sector_coords_of, sector_origin,
    world_to_sector_relative,
};
pub use loc::{ChunkLoc, SectorLoc};
pub use sector::Sector;
pub use world::World;

pub use strata_chunk::{CHUNK_DIMS, Chunk, ChunkData, Frame, VoxelLoc};
