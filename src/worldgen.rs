use fastnoise_lite::{FastNoiseLite, NoiseType};
use strata_blocks::{Voxel, VoxelType};
use strata_chunk::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, Chunk, Frame};
use strata_geom::IVec3;
use strata_runtime::ChunkGenerator;
use strata_world::ChunkAddr;

pub const STONE: VoxelType = 1;
pub const DIRT: VoxelType = 2;
pub const GRASS: VoxelType = 3;
pub const SAND: VoxelType = 4;
pub const SNOW: VoxelType = 5;

/// Heightmap terrain from 2D OpenSimplex noise.
pub struct NoiseTerrain {
    noise: FastNoiseLite,
    min_h: i32,
    max_h: i32,
}

impl NoiseTerrain {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(0.01));
        Self {
            noise,
            min_h: 8,
            max_h: 112,
        }
    }

    /// Surface height (exclusive) of the column at world (x, z).
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let h = self.noise.get_noise_2d(x as f32, z as f32);
        // map [-1,1] -> [min_h, max_h]
        let hh = ((h + 1.0) * 0.5 * (self.max_h - self.min_h) as f32) as i32 + self.min_h;
        hh.clamp(self.min_h, self.max_h)
    }

    fn voxel_for(&self, y: i32, height: i32) -> Voxel {
        if y == height - 1 {
            if height >= 90 {
                Voxel::solid(SNOW, 15, 15, 15)
            } else if height <= 20 {
                Voxel::solid(SAND, 13, 12, 8)
            } else {
                Voxel::solid(GRASS, 4, 11, 3)
            }
        } else if y + 4 >= height {
            Voxel::solid(DIRT, 8, 5, 3)
        } else {
            Voxel::solid(STONE, 7, 7, 7)
        }
    }
}

impl ChunkGenerator for NoiseTerrain {
    fn generate(&mut self, _addr: ChunkAddr, chunk: &mut Chunk) {
        let origin = chunk.world_origin();
        if origin.y >= self.max_h {
            return;
        }
        for z in 0..CHUNK_SIZE_Z as i32 {
            for x in 0..CHUNK_SIZE_X as i32 {
                let height = self.height_at(origin.x + x, origin.z + z);
                let top = (height - origin.y).min(CHUNK_SIZE_Y as i32);
                for y in 0..top {
                    let v = self.voxel_for(origin.y + y, height);
                    chunk.create_voxel(IVec3::new(x, y, z), Frame::Chunk, v);
                }
            }
        }
    }
}
