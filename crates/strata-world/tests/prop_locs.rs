use proptest::prelude::*;
use strata_geom::IVec3;
use strata_world::{
    ChunkAddr, ChunkLoc, SECTOR_SIZE, SectorLoc, sector_coords_of, world_to_sector_relative,
};

proptest! {
    #[test]
    fn chunk_loc_round_trip(x in 0i32..=31, y in -31i32..=31, z in 0i32..=31) {
        let loc = ChunkLoc::new(x, y, z).unwrap();
        prop_assert_eq!((loc.x(), loc.y(), loc.z()), (x, y, z));
        prop_assert_eq!(ChunkLoc::from_raw(loc.raw()), loc);
    }

    #[test]
    fn sector_loc_round_trip(x in SectorLoc::MIN..=SectorLoc::MAX, z in SectorLoc::MIN..=SectorLoc::MAX) {
        let loc = SectorLoc::new(x, z).unwrap();
        prop_assert_eq!((loc.x(), loc.z()), (x, z));
        prop_assert_eq!(SectorLoc::from_raw(loc.raw()), loc);
    }

    #[test]
    fn from_raw_is_canonical(raw in any::<u16>()) {
        let loc = ChunkLoc::from_raw(raw);
        prop_assert_eq!(ChunkLoc::new(loc.x(), loc.y(), loc.z()), Some(loc));
    }

    #[test]
    fn sector_from_raw_is_canonical(raw in any::<u32>()) {
        let loc = SectorLoc::from_raw(raw);
        prop_assert_eq!(SectorLoc::encode(loc.x(), loc.z()), loc);
    }

    #[test]
    fn sector_conversion_identity(x in -8_000_000i32..8_000_000, z in -8_000_000i32..8_000_000) {
        let world = IVec3::new(x, 0, z);
        let (sx, sz) = sector_coords_of(world);
        let rel = world_to_sector_relative(world);
        prop_assert_eq!(sx * SECTOR_SIZE + rel.x, x);
        prop_assert_eq!(sz * SECTOR_SIZE + rel.z, z);
        prop_assert!((0..SECTOR_SIZE).contains(&rel.x));
        prop_assert!((0..SECTOR_SIZE).contains(&rel.z));
    }

    #[test]
    fn chunk_addr_contains_its_positions(
        x in -100_000i32..100_000,
        y in -1984i32..2048,
        z in -100_000i32..100_000,
    ) {
        let world = IVec3::new(x, y, z);
        let addr = ChunkAddr::from_world(world).unwrap();
        let local = world - addr.world_origin();
        prop_assert!((0..16).contains(&local.x));
        prop_assert!((0..64).contains(&local.y));
        prop_assert!((0..16).contains(&local.z));
        prop_assert_eq!(ChunkAddr::from_chunk_coord(addr.chunk_coord()), Some(addr));
    }
}
