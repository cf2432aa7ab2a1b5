use proptest::prelude::*;
use strata_geom::IVec3;

fn coord() -> impl Strategy<Value = i32> {
    -10_000_000i32..=10_000_000
}

fn divisor() -> impl Strategy<Value = i32> {
    1i32..=1024
}

proptest! {
    // floor division and true modulo recompose the original value on every axis
    #[test]
    fn div_rem_recompose(x in coord(), y in coord(), z in coord(), dx in divisor(), dy in divisor(), dz in divisor()) {
        let p = IVec3::new(x, y, z);
        let d = IVec3::new(dx, dy, dz);
        let q = p.div_euclid(d);
        let r = p.rem_euclid(d);
        prop_assert_eq!(q.mul_elem(d) + r, p);
        prop_assert!(r.x >= 0 && r.x < dx);
        prop_assert!(r.y >= 0 && r.y < dy);
        prop_assert!(r.z >= 0 && r.z < dz);
    }

    // negative coordinates land in the cell below zero, never in cell 0
    #[test]
    fn negative_coords_floor(x in -10_000i32..0, d in divisor()) {
        let q = IVec3::new(x, x, x).div_euclid(IVec3::new(d, d, d));
        prop_assert!(q.x < 0);
        prop_assert!(q.x * d <= x && x < (q.x + 1) * d);
    }
}

#[test]
fn chunk_sized_examples() {
    let d = IVec3::new(16, 64, 16);
    assert_eq!(IVec3::new(-1, -1, -1).div_euclid(d), IVec3::new(-1, -1, -1));
    assert_eq!(IVec3::new(-1, -1, -1).rem_euclid(d), IVec3::new(15, 63, 15));
    assert_eq!(IVec3::new(16, 64, -16).div_euclid(d), IVec3::new(1, 1, -1));
    assert_eq!(IVec3::new(16, 64, -16).rem_euclid(d), IVec3::ZERO);
}
