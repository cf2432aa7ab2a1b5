use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use strata_blocks::Voxel;
use strata_chunk::{Chunk, VoxelLoc};
use strata_world::{ChunkAddr, SectorLoc};

use crate::error::{PersistError, Result};

pub const CHUNK_EXT: &str = "dat";

const COUNT_BYTES: usize = size_of::<u64>();
const RECORD_BYTES: usize = size_of::<VoxelRecord>();

/// One stored voxel: chunk-local position and the packed voxel word.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct VoxelRecord {
    pub pos: [i32; 3],
    pub voxel: u32,
}

const _: () = assert!(RECORD_BYTES == 16);

pub fn sector_dir(world_dir: &Path, sector: SectorLoc) -> PathBuf {
    world_dir.join(sector.raw().to_string())
}

/// `<world>/<sector raw>/<chunk raw>.dat`
pub fn chunk_path(world_dir: &Path, addr: ChunkAddr) -> PathBuf {
    sector_dir(world_dir, addr.sector).join(format!("{}.{CHUNK_EXT}", addr.chunk.raw()))
}

/// Serialises every non-AIR cell: a native `u64` count, then that many records.
pub fn encode_chunk(chunk: &Chunk) -> Vec<u8> {
    let count = chunk.solid_count();
    let mut out = Vec::with_capacity(COUNT_BYTES + count * RECORD_BYTES);
    out.extend_from_slice(&(count as u64).to_ne_bytes());
    for (loc, voxel) in chunk.iter_solid() {
        let rec = VoxelRecord {
            pos: [loc.x() as i32, loc.y() as i32, loc.z() as i32],
            voxel: voxel.bits(),
        };
        out.extend_from_slice(bytemuck::bytes_of(&rec));
    }
    out
}

/// Rebuilds the chunk at `addr` from [`encode_chunk`] output. `path` only labels errors.
pub fn decode_chunk(bytes: &[u8], addr: ChunkAddr, path: &Path) -> Result<Chunk> {
    let truncated = |expected: u64| PersistError::Truncated {
        path: path.to_path_buf(),
        expected,
        found: bytes.len() as u64,
    };
    let Some((head, body)) = bytes.split_first_chunk::<COUNT_BYTES>() else {
        return Err(truncated(COUNT_BYTES as u64));
    };
    let count = u64::from_ne_bytes(*head);
    let expected = count
        .checked_mul(RECORD_BYTES as u64)
        .and_then(|b| b.checked_add(COUNT_BYTES as u64))
        .unwrap_or(u64::MAX);
    if expected != bytes.len() as u64 {
        return Err(truncated(expected));
    }

    let mut chunk = Chunk::new(addr.sector_origin(), addr.world_origin());
    for raw in body.chunks_exact(RECORD_BYTES) {
        let rec: VoxelRecord = bytemuck::pod_read_unaligned(raw);
        let [x, y, z] = rec.pos;
        let loc = VoxelLoc::try_new(x, y, z).ok_or_else(|| PersistError::VoxelOutOfRange {
            path: path.to_path_buf(),
            x,
            y,
            z,
        })?;
        chunk.set_local(loc, Voxel::from_bits(rec.voxel));
    }
    Ok(chunk)
}

/// Writes the chunk file, creating the sector directory. Returns the number of voxels stored.
pub fn save_chunk(world_dir: &Path, addr: ChunkAddr, chunk: &Chunk) -> Result<usize> {
    let path = chunk_path(world_dir, addr);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, encode_chunk(chunk))?;
    log::debug!("stored {} voxels to {}", chunk.solid_count(), path.display());
    Ok(chunk.solid_count())
}

/// Loads the chunk at `addr`. `Ok(None)` when no file exists.
pub fn load_chunk(world_dir: &Path, addr: ChunkAddr) -> Result<Option<Chunk>> {
    let path = chunk_path(world_dir, addr);
    let bytes = match fs::read(&path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    decode_chunk(&bytes, addr, &path).map(Some)
}

pub fn delete_chunk(world_dir: &Path, addr: ChunkAddr) -> Result<()> {
    match fs::remove_file(chunk_path(world_dir, addr)) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

pub fn chunk_exists(world_dir: &Path, addr: ChunkAddr) -> bool {
    chunk_path(world_dir, addr).is_file()
}
