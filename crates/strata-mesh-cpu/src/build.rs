use strata_blocks::Voxel;
use strata_chunk::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, Chunk};
use strata_geom::Vec3;

use crate::face::Face;
use crate::mesh_build::MeshBuild;
use crate::neighbors::NeighborChunks;

const SX: i32 = CHUNK_SIZE_X as i32;
const SY: i32 = CHUNK_SIZE_Y as i32;
const SZ: i32 = CHUNK_SIZE_Z as i32;

/// Voxel at chunk-local `(x, y, z)`, reaching one step into the neighbour
/// table when the position has left the chunk on a single axis.
#[inline]
pub fn sample(chunk: &Chunk, nb: &NeighborChunks<'_>, x: i32, y: i32, z: i32) -> Voxel {
    let face = if x >= SX {
        Face::PosX
    } else if x < 0 {
        Face::NegX
    } else if y >= SY {
        Face::PosY
    } else if y < 0 {
        Face::NegY
    } else if z >= SZ {
        Face::PosZ
    } else if z < 0 {
        Face::NegZ
    } else {
        return chunk.voxel_at(x, y, z);
    };
    nb.get(face)
        .voxel_at(x.rem_euclid(SX), y.rem_euclid(SY), z.rem_euclid(SZ))
}

/// 6-bit mask of the faces of the voxel at `(x, y, z)` whose neighbour does not block.
#[inline]
pub fn face_mask(chunk: &Chunk, nb: &NeighborChunks<'_>, x: i32, y: i32, z: i32) -> u8 {
    let mut mask = 0u8;
    for face in Face::ALL {
        let (dx, dy, dz) = face.delta();
        if !sample(chunk, nb, x + dx, y + dy, z + dz).is_blocking() {
            mask |= face.bit();
        }
    }
    mask
}

/// Exact one-quad-per-visible-face mesh of a chunk, in world space.
pub fn build_chunk_mesh(chunk: &Chunk, nb: &NeighborChunks<'_>) -> MeshBuild {
    let mut mb = MeshBuild::default();
    build_chunk_mesh_into(chunk, nb, &mut mb);
    mb
}

/// [`build_chunk_mesh`] into a caller-owned buffer, which is cleared first but
/// keeps its capacity.
pub fn build_chunk_mesh_into(chunk: &Chunk, nb: &NeighborChunks<'_>, mb: &mut MeshBuild) {
    mb.clear_keep_capacity();
    if chunk.is_empty() {
        return;
    }
    let origin = chunk.world_origin().as_vec3();
    for (loc, voxel) in chunk.iter_solid() {
        if !voxel.is_blocking() {
            continue;
        }
        let (x, y, z) = (loc.x() as i32, loc.y() as i32, loc.z() as i32);
        let mask = face_mask(chunk, nb, x, y, z);
        if mask == 0 {
            continue;
        }
        mb.reserve_quads(mask.count_ones() as usize);
        let center = origin + Vec3::new(x as f32, y as f32, z as f32);
        let rgb = voxel.rgb_f32();
        for face in Face::ALL {
            if mask & face.bit() != 0 {
                mb.add_cube_face(face, center, 0.5, rgb);
            }
        }
    }
}
