use crate::sign_mag;

const CHUNK_XZ_BITS: u32 = 5;
const CHUNK_Y_MAG_BITS: u32 = 5;
const CHUNK_XZ_MASK: u16 = (1 << CHUNK_XZ_BITS) - 1;
const CHUNK_X_SHIFT: u32 = 0;
const CHUNK_Z_SHIFT: u32 = CHUNK_XZ_BITS;
const CHUNK_Y_SHIFT: u32 = 2 * CHUNK_XZ_BITS;

const SECTOR_MAG_BITS: u32 = 15;
const SECTOR_FIELD_MASK: u32 = 0xFFFF;
const SECTOR_Z_SHIFT: u32 = 16;

/// Chunk position inside a sector packed into 16 bits.
///
/// Layout, low bit first: `x:5 | z:5 | |y|:5 | sign(y):1`. `x` and `z` cover
/// `[0, 31]`, `y` covers `[-31, 31]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkLoc(u16);

impl ChunkLoc {
    pub const MAX_XZ: i32 = CHUNK_XZ_MASK as i32;
    pub const MIN_Y: i32 = -((1 << CHUNK_Y_MAG_BITS) - 1);
    pub const MAX_Y: i32 = (1 << CHUNK_Y_MAG_BITS) - 1;

    /// Packs without range checks; out-of-range components are masked.
    #[inline]
    pub const fn encode(x: i32, y: i32, z: i32) -> Self {
        let y_raw = sign_mag::encode(y, CHUNK_Y_MAG_BITS) as u16;
        ChunkLoc(
            ((x as u16 & CHUNK_XZ_MASK) << CHUNK_X_SHIFT)
                | ((z as u16 & CHUNK_XZ_MASK) << CHUNK_Z_SHIFT)
                | (y_raw << CHUNK_Y_SHIFT),
        )
    }

    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Option<Self> {
        let in_range = (0..=Self::MAX_XZ).contains(&x)
            && (0..=Self::MAX_XZ).contains(&z)
            && (Self::MIN_Y..=Self::MAX_Y).contains(&y);
        in_range.then(|| Self::encode(x, y, z))
    }

    /// Rebuilds a key from its packed form, normalising a `-0` y to `+0`.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        let xz = raw & ((1 << CHUNK_Y_SHIFT) - 1);
        let y = sign_mag::canonical((raw >> CHUNK_Y_SHIFT) as u32, CHUNK_Y_MAG_BITS) as u16;
        ChunkLoc(xz | (y << CHUNK_Y_SHIFT))
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn x(self) -> i32 {
        ((self.0 >> CHUNK_X_SHIFT) & CHUNK_XZ_MASK) as i32
    }

    #[inline]
    pub const fn z(self) -> i32 {
        ((self.0 >> CHUNK_Z_SHIFT) & CHUNK_XZ_MASK) as i32
    }

    #[inline]
    pub const fn y(self) -> i32 {
        sign_mag::decode((self.0 >> CHUNK_Y_SHIFT) as u32, CHUNK_Y_MAG_BITS)
    }
}

/// Sector position packed into 32 bits: x in the low half, z in the high half,
/// each as `|v|:15 | sign:1`. The declared range is `[-16384, 16383]` per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectorLoc(u32);

impl SectorLoc {
    pub const MIN: i32 = -16384;
    pub const MAX: i32 = 16383;

    #[inline]
    pub const fn encode(x: i32, z: i32) -> Self {
        SectorLoc(
            sign_mag::encode(x, SECTOR_MAG_BITS)
                | (sign_mag::encode(z, SECTOR_MAG_BITS) << SECTOR_Z_SHIFT),
        )
    }

    #[inline]
    pub fn new(x: i32, z: i32) -> Option<Self> {
        let in_range = (Self::MIN..=Self::MAX).contains(&x) && (Self::MIN..=Self::MAX).contains(&z);
        in_range.then(|| Self::encode(x, z))
    }

    /// Rebuilds a key from its packed form, normalising `-0` halves to `+0`.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        let x = sign_mag::canonical(raw & SECTOR_FIELD_MASK, SECTOR_MAG_BITS);
        let z = sign_mag::canonical(raw >> SECTOR_Z_SHIFT, SECTOR_MAG_BITS);
        SectorLoc(x | (z << SECTOR_Z_SHIFT))
    }

    /// Like [`SectorLoc::from_raw`], but `None` when either half decodes
    /// outside `[MIN, MAX]`. Use this for keys read from untrusted input.
    #[inline]
    pub fn try_from_raw(raw: u32) -> Option<Self> {
        let loc = Self::from_raw(raw);
        Self::new(loc.x(), loc.z())
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn x(self) -> i32 {
        sign_mag::decode(self.0 & SECTOR_FIELD_MASK, SECTOR_MAG_BITS)
    }

    #[inline]
    pub const fn z(self) -> i32 {
        sign_mag::decode(self.0 >> SECTOR_Z_SHIFT, SECTOR_MAG_BITS)
    }

    /// The sector `dx`/`dz` steps away, if still inside the declared range.
    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Option<Self> {
        Self::new(self.x() + dx, self.z() + dz)
    }
}
