use std::fs;
use std::path::Path;

use strata_world::{ChunkAddr, ChunkLoc, SectorLoc, World};

use crate::chunk_file::{CHUNK_EXT, decode_chunk, save_chunk};
use crate::error::{PersistError, Result};

/// Stores every chunk of `world`. Returns how many chunk files were written.
pub fn save_world(world_dir: &Path, world: &World) -> Result<usize> {
    let mut written = 0;
    for (addr, chunk) in world.iter_chunks() {
        save_chunk(world_dir, addr, chunk)?;
        written += 1;
    }
    log::info!("saved {written} chunks to {}", world_dir.display());
    Ok(written)
}

/// Loads every chunk file under `world_dir` into `world`, replacing resident
/// chunks with the same address. Entries whose names are not decimal keys are
/// skipped with a warning; unreadable chunk files are skipped the same way.
/// Returns how many chunks were loaded.
pub fn load_world(world_dir: &Path, world: &mut World) -> Result<usize> {
    let mut loaded = 0;
    for sector_entry in fs::read_dir(world_dir)? {
        let sector_entry = sector_entry?;
        let sector_path = sector_entry.path();
        if !sector_path.is_dir() {
            continue;
        }
        let Some(raw) = sector_entry
            .file_name()
            .to_str()
            .and_then(|n| n.parse::<u32>().ok())
        else {
            log::warn!("skipping non-sector directory {}", sector_path.display());
            continue;
        };
        let Some(sector) = SectorLoc::try_from_raw(raw) else {
            log::warn!("skipping out-of-range sector directory {}", sector_path.display());
            continue;
        };
        for chunk_entry in fs::read_dir(&sector_path)? {
            let path = chunk_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(CHUNK_EXT) {
                log::warn!("skipping non-chunk file {}", path.display());
                continue;
            }
            let Some(chunk_loc) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u16>().ok())
                .map(ChunkLoc::from_raw)
            else {
                log::warn!("skipping non-numeric chunk file {}", path.display());
                continue;
            };
            let addr = ChunkAddr::new(sector, chunk_loc);
            match fs::read(&path)
                .map_err(PersistError::from)
                .and_then(|bytes| decode_chunk(&bytes, addr, &path))
            {
                Ok(chunk) => {
                    world.insert_chunk(addr, chunk);
                    loaded += 1;
                }
                Err(e) => log::warn!("skipping chunk file: {e}"),
            }
        }
    }
    log::info!("loaded {loaded} chunks from {}", world_dir.display());
    Ok(loaded)
}
