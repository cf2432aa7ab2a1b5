use proptest::prelude::*;
use strata_blocks::Voxel;
use strata_chunk::{Chunk, Frame, VoxelLoc, CHUNK_VOLUME};
use strata_geom::IVec3;

proptest! {
    // decode(encode(v)) == v over the whole declared range
    #[test]
    fn voxel_loc_roundtrip(x in 0u8..16, y in 0u8..64, z in 0u8..16) {
        let loc = VoxelLoc::new(x, y, z);
        prop_assert_eq!((loc.x(), loc.y(), loc.z()), (x, y, z));
        prop_assert_eq!(VoxelLoc::from_raw(loc.raw()), loc);
        prop_assert!(loc.index() < CHUNK_VOLUME);
    }

    // a write in any frame is visible through every other frame
    #[test]
    fn write_read_across_frames(x in 0i32..16, y in 0i32..64, z in 0i32..16,
                                ox in -1000i32..1000, oy in -31i32..31, oz in -1000i32..1000) {
        let sector_origin = IVec3::new(x.rem_euclid(32) * 16, oy * 64, z.rem_euclid(32) * 16);
        let world_origin = IVec3::new(ox * 16, oy * 64, oz * 16);
        let mut c = Chunk::new(sector_origin, world_origin);
        let v = Voxel::solid(7, 1, 2, 3);
        let local = IVec3::new(x, y, z);
        prop_assert!(c.create_voxel(world_origin + local, Frame::World, v));
        prop_assert_eq!(c.get_voxel(local, Frame::Chunk), v);
        prop_assert_eq!(c.get_voxel(sector_origin + local, Frame::Sector), v);
        prop_assert_eq!(c.solid_count(), 1);
    }
}

#[test]
fn every_index_is_reached_exactly_once() {
    let mut seen = vec![false; CHUNK_VOLUME];
    for z in 0..16u8 {
        for y in 0..64u8 {
            for x in 0..16u8 {
                let i = VoxelLoc::new(x, y, z).index();
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
    }
    assert!(seen.into_iter().all(|b| b));
}
