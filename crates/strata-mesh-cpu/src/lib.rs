//! CPU meshing: neighbour resolution, exact and coarsened chunk meshers, and
//! the hand-off of finished buffers to a mesh sink.
#![forbid(unsafe_code)]

mod build;
mod face;
mod lod;
mod mesh_build;
mod neighbors;
mod upload;

pub use build::{build_chunk_mesh, build_chunk_mesh_into, face_mask, sample};
pub use face::{ALL_FACES, Face};
pub use lod::{LodStats, build_chunk_mesh_lod, build_chunk_mesh_lod_into};
pub use mesh_build::{COLOR_OFFSET, MeshBuild, NORMAL_OFFSET, POSITION_OFFSET, VERTEX_STRIDE};
pub use neighbors::{NeighborChunks, neighbor_addr};
pub use upload::upload_mesh;
