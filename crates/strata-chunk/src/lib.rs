//! Chunk voxel store, chunk-local location codec and the mesh sink contract.
#![forbid(unsafe_code)]

mod chunk;
mod loc;
mod mesh;

pub use chunk::{Chunk, ChunkData, Frame};
pub use loc::VoxelLoc;
pub use mesh::{ElementType, MeshSink};

use strata_geom::IVec3;

pub const CHUNK_SIZE_X: usize = 16;
pub const CHUNK_SIZE_Y: usize = 64;
pub const CHUNK_SIZE_Z: usize = 16;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Chunk extent as a vector, for per-axis floor division.
pub const CHUNK_DIMS: IVec3 = IVec3::new(
    CHUNK_SIZE_X as i32,
    CHUNK_SIZE_Y as i32,
    CHUNK_SIZE_Z as i32,
);

/// Block sizes the LOD mesher understands, finest first.
pub const LOD_LEVELS: [u8; 5] = [1, 2, 4, 8, 16];
