use strata_chunk::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, Chunk, LOD_LEVELS};
use strata_geom::Vec3;

use crate::build::sample;
use crate::face::Face;
use crate::mesh_build::MeshBuild;
use crate::neighbors::NeighborChunks;

const SX: i32 = CHUNK_SIZE_X as i32;
const SY: i32 = CHUNK_SIZE_Y as i32;
const SZ: i32 = CHUNK_SIZE_Z as i32;

/// Counters from one coarsened build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LodStats {
    /// N-sized blocks the chunk was partitioned into.
    pub blocks: usize,
    /// Blocks made entirely of non-blocking voxels.
    pub skipped: usize,
    pub quads: usize,
}

impl LodStats {
    /// Blocks that were turned into a cube.
    #[inline]
    pub fn retained(&self) -> usize {
        self.blocks - self.skipped
    }
}

/// Meshes `chunk` with every `lod`-sized block collapsed into one cube.
///
/// A block is dropped iff none of its voxels block. A kept block takes the mean
/// colour of its blocking voxels. One of its faces is hidden when the region
/// across it is at least as coarse as this build and holds a blocking voxel;
/// otherwise the face shows if any voxel row reaching that face looks out onto
/// a non-blocking cell.
pub fn build_chunk_mesh_lod(chunk: &Chunk, nb: &NeighborChunks<'_>, lod: u8) -> (MeshBuild, LodStats) {
    let mut mb = MeshBuild::default();
    let stats = build_chunk_mesh_lod_into(chunk, nb, lod, &mut mb);
    (mb, stats)
}

/// [`build_chunk_mesh_lod`] into a caller-owned buffer, cleared first.
pub fn build_chunk_mesh_lod_into(
    chunk: &Chunk,
    nb: &NeighborChunks<'_>,
    lod: u8,
    mb: &mut MeshBuild,
) -> LodStats {
    mb.clear_keep_capacity();
    let lod = if LOD_LEVELS.contains(&lod) {
        lod
    } else {
        log::warn!("unsupported lod {lod}, meshing at 1");
        1
    };
    let n = lod as i32;
    let dims = (SX / n, SY / n, SZ / n);
    let block_index = |bx: i32, by: i32, bz: i32| ((by * dims.2 + bz) * dims.0 + bx) as usize;

    let mut stats = LodStats {
        blocks: (dims.0 * dims.1 * dims.2) as usize,
        ..LodStats::default()
    };
    if chunk.is_empty() {
        stats.skipped = stats.blocks;
        return stats;
    }

    // Mean colour of each kept block; None for skipped ones.
    let mut colors: Vec<Option<[f32; 3]>> = vec![None; stats.blocks];
    for by in 0..dims.1 {
        for bz in 0..dims.2 {
            for bx in 0..dims.0 {
                let mut sum = [0.0f32; 3];
                let mut solid = 0u32;
                for y in by * n..(by + 1) * n {
                    for z in bz * n..(bz + 1) * n {
                        for x in bx * n..(bx + 1) * n {
                            let v = chunk.voxel_at(x, y, z);
                            if v.is_blocking() {
                                let c = v.rgb_f32();
                                sum[0] += c[0];
                                sum[1] += c[1];
                                sum[2] += c[2];
                                solid += 1;
                            }
                        }
                    }
                }
                if solid == 0 {
                    stats.skipped += 1;
                } else {
                    let k = solid as f32;
                    colors[block_index(bx, by, bz)] = Some([sum[0] / k, sum[1] / k, sum[2] / k]);
                }
            }
        }
    }

    mb.reserve_quads(stats.retained());
    let origin = chunk.world_origin().as_vec3();
    let half = n as f32 * 0.5;
    let recenter = (n - 1) as f32 * 0.5;
    for by in 0..dims.1 {
        for bz in 0..dims.2 {
            for bx in 0..dims.0 {
                let Some(rgb) = colors[block_index(bx, by, bz)] else {
                    continue;
                };
                let min = (bx * n, by * n, bz * n);
                let center = origin
                    + Vec3::new(min.0 as f32, min.1 as f32, min.2 as f32)
                    + Vec3::splat(recenter);
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    let (ax, ay, az) = (bx + dx, by + dy, bz + dz);
                    let interior = (0..dims.0).contains(&ax)
                        && (0..dims.1).contains(&ay)
                        && (0..dims.2).contains(&az);
                    let hidden = if interior {
                        colors[block_index(ax, ay, az)].is_some()
                    } else {
                        nb.lod(face) >= lod && region_blocks(chunk, nb, min, face, n)
                    };
                    if !hidden && rows_visible(chunk, nb, min, face, n) {
                        mb.add_cube_face(face, center, half, rgb);
                        stats.quads += 1;
                    }
                }
            }
        }
    }
    stats
}

/// Cells of the `n`-thick slab across `face` of the block whose minimum corner is `min`.
fn across(min: (i32, i32, i32), face: Face, n: i32, depth: i32) -> impl Iterator<Item = (i32, i32, i32)> {
    let (dx, dy, dz) = face.delta();
    let start = |m: i32, d: i32| match d {
        1 => m + n,
        -1 => m - depth,
        _ => m,
    };
    let len = |d: i32| if d == 0 { n } else { depth };
    let (x0, y0, z0) = (start(min.0, dx), start(min.1, dy), start(min.2, dz));
    let (lx, ly, lz) = (len(dx), len(dy), len(dz));
    (0..ly).flat_map(move |y| {
        (0..lz).flat_map(move |z| (0..lx).map(move |x| (x0 + x, y0 + y, z0 + z)))
    })
}

/// True when the `n`-cube across `face` holds a blocking voxel.
fn region_blocks(chunk: &Chunk, nb: &NeighborChunks<'_>, min: (i32, i32, i32), face: Face, n: i32) -> bool {
    across(min, face, n, n).any(|(x, y, z)| sample(chunk, nb, x, y, z).is_blocking())
}

/// OR of per-row visibility: any cell directly across `face` that does not block.
fn rows_visible(chunk: &Chunk, nb: &NeighborChunks<'_>, min: (i32, i32, i32), face: Face, n: i32) -> bool {
    across(min, face, n, 1).any(|(x, y, z)| !sample(chunk, nb, x, y, z).is_blocking())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_covers_expected_cells() {
        let cells: Vec<_> = across((4, 8, 0), Face::NegX, 4, 1).collect();
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().all(|&(x, y, z)| x == 3 && (8..12).contains(&y) && (0..4).contains(&z)));

        let cube: Vec<_> = across((0, 0, 12), Face::PosZ, 4, 4).collect();
        assert_eq!(cube.len(), 64);
        assert!(cube.iter().all(|&(_, _, z)| (16..20).contains(&z)));
    }
}
