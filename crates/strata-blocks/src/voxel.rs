use bytemuck::{Pod, Zeroable};

/// 17-bit voxel type id.
pub type VoxelType = u32;

const SOLID_BIT: u32 = 1 << 0;
const TRANSPARENT_BIT: u32 = 1 << 1;
const R_SHIFT: u32 = 2;
const G_SHIFT: u32 = 6;
const B_SHIFT: u32 = 10;
const CHANNEL_MASK: u32 = 0xF;
const TYPE_SHIFT: u32 = 14;
const TYPE_MASK: u32 = 0x1_FFFF;

/// One voxel packed into a 32-bit word.
///
/// Layout, low bit first: `solid:1 | transparent:1 | r:4 | g:4 | b:4 | type:17 | unused:1`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Voxel(u32);

impl Voxel {
    pub const TYPE_AIR: VoxelType = 0;
    /// Reserved for [`Voxel::INVALID`]; never a user type.
    pub const TYPE_INVALID: VoxelType = TYPE_MASK;
    /// Largest type id a real voxel may carry.
    pub const TYPE_MAX: VoxelType = TYPE_MASK - 1;

    /// Empty cell. Also the value handed back for any unset or out-of-range lookup.
    pub const AIR: Voxel = Voxel(0);
    /// Returned by world lookups that land outside every indexed sector.
    pub const INVALID: Voxel = Voxel(TYPE_MASK << TYPE_SHIFT);

    /// Solid, opaque voxel of the given type and 4-bit colour.
    #[inline]
    pub const fn solid(ty: VoxelType, r: u8, g: u8, b: u8) -> Self {
        Voxel(
            SOLID_BIT
                | ((r as u32 & CHANNEL_MASK) << R_SHIFT)
                | ((g as u32 & CHANNEL_MASK) << G_SHIFT)
                | ((b as u32 & CHANNEL_MASK) << B_SHIFT)
                | ((ty & TYPE_MASK) << TYPE_SHIFT),
        )
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Voxel(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        self.0 & SOLID_BIT != 0
    }

    #[inline]
    pub fn set_solid(&mut self, v: bool) {
        self.set_flag(SOLID_BIT, v);
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.0 & TRANSPARENT_BIT != 0
    }

    #[inline]
    pub fn set_transparent(&mut self, v: bool) {
        self.set_flag(TRANSPARENT_BIT, v);
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> R_SHIFT) & CHANNEL_MASK) as u8
    }

    #[inline]
    pub fn set_r(&mut self, v: u8) {
        self.set_field(R_SHIFT, CHANNEL_MASK, v as u32);
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> G_SHIFT) & CHANNEL_MASK) as u8
    }

    #[inline]
    pub fn set_g(&mut self, v: u8) {
        self.set_field(G_SHIFT, CHANNEL_MASK, v as u32);
    }

    #[inline]
    pub const fn b(self) -> u8 {
        ((self.0 >> B_SHIFT) & CHANNEL_MASK) as u8
    }

    #[inline]
    pub fn set_b(&mut self, v: u8) {
        self.set_field(B_SHIFT, CHANNEL_MASK, v as u32);
    }

    #[inline]
    pub const fn ty(self) -> VoxelType {
        (self.0 >> TYPE_SHIFT) & TYPE_MASK
    }

    /// Values wider than 17 bits are truncated.
    #[inline]
    pub fn set_ty(&mut self, v: VoxelType) {
        self.set_field(TYPE_SHIFT, TYPE_MASK, v);
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        self.ty() == Self::TYPE_AIR
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.ty() == Self::TYPE_INVALID
    }

    /// The blocking test every face-culling path uses: solid and not air.
    #[inline]
    pub const fn is_blocking(self) -> bool {
        self.is_solid() && !self.is_air()
    }

    /// Colour channels normalised to `[0, 1)` (each 4-bit channel divided by 16).
    #[inline]
    pub fn rgb_f32(self) -> [f32; 3] {
        [
            self.r() as f32 / 16.0,
            self.g() as f32 / 16.0,
            self.b() as f32 / 16.0,
        ]
    }

    #[inline]
    fn set_flag(&mut self, bit: u32, v: bool) {
        if v {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    #[inline]
    fn set_field(&mut self, shift: u32, mask: u32, v: u32) {
        self.0 = (self.0 & !(mask << shift)) | ((v & mask) << shift);
    }
}

impl core::fmt::Debug for Voxel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Voxel")
            .field("ty", &self.ty())
            .field("solid", &self.is_solid())
            .field("transparent", &self.is_transparent())
            .field("rgb", &(self.r(), self.g(), self.b()))
            .finish()
    }
}
