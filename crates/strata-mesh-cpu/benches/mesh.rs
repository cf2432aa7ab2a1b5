use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use strata_blocks::Voxel;
use strata_chunk::{Chunk, Frame};
use strata_geom::IVec3;
use strata_mesh_cpu::{NeighborChunks, build_chunk_mesh, build_chunk_mesh_lod};

// Rolling hills between y = 16 and y = 40 with a coloured top layer.
fn terrain_chunk() -> Chunk {
    let mut c = Chunk::new(IVec3::ZERO, IVec3::ZERO);
    for z in 0..16 {
        for x in 0..16 {
            let h = 28.0 + 8.0 * ((x as f32 * 0.4).sin() + (z as f32 * 0.3).cos()) * 0.75;
            let top = h as i32;
            for y in 0..=top {
                let v = if y == top {
                    Voxel::solid(2, 3, 12, 3)
                } else {
                    Voxel::solid(1, 8, 8, 8)
                };
                c.create_voxel(IVec3::new(x, y, z), Frame::Chunk, v);
            }
        }
    }
    c
}

fn bench_lod1(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk_mesh");
    let chunk = terrain_chunk();
    let air = Chunk::generic_air();
    let nb = NeighborChunks::uniform(&air);
    group.bench_function("terrain_16x64x16", |b| {
        b.iter(|| black_box(build_chunk_mesh(black_box(&chunk), &nb)))
    });
    group.finish();
}

fn bench_lod_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk_mesh_lod");
    let chunk = terrain_chunk();
    let air = Chunk::generic_air();
    let nb = NeighborChunks::uniform(&air);
    for lod in [2u8, 4, 8, 16] {
        group.bench_function(format!("terrain_lod{lod}"), |b| {
            b.iter(|| black_box(build_chunk_mesh_lod(black_box(&chunk), &nb, lod)))
        });
    }
    group.finish();
}

fn short_config() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2))
        .sample_size(20)
}

criterion_group! {
    name = benches;
    config = short_config();
    targets = bench_lod1, bench_lod_n
}
criterion_main!(benches);
