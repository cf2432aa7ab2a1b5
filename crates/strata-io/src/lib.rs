//! On-disk persistence for chunks, whole worlds and fixed-layout records.
//!
//! Layout under a world directory:
//!
//! ```text
//! <world>/settings.bin
//! <world>/<SectorLoc raw, decimal>/<ChunkLoc raw, decimal>.dat
//! ```
//!
//! Chunk files and records are written in native byte order and `#[repr(C)]`
//! layout. They are not portable between platforms of differing endianness.
#![forbid(unsafe_code)]

mod chunk_file;
mod error;
mod record;
mod world_dir;

pub use chunk_file::{
    CHUNK_EXT, VoxelRecord, chunk_exists, chunk_path, decode_chunk, delete_chunk, encode_chunk,
    load_chunk, save_chunk, sector_dir,
};
pub use error::{PersistError, Result};
pub use record::{read_record, write_record};
pub use world_dir::{load_world, save_world};
