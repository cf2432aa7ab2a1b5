use strata_blocks::Voxel;
use strata_geom::IVec3;

use crate::loc::VoxelLoc;
use crate::mesh::MeshSink;
use crate::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, CHUNK_VOLUME};

/// Coordinate frame of a position handed to a lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Absolute voxel coordinates.
    World,
    /// Voxel coordinates relative to the owning sector's minimum corner.
    Sector,
    /// Voxel coordinates relative to the chunk's minimum corner.
    Chunk,
}

/// Mesh bookkeeping carried by every chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkData {
    /// Block size the chunk is (or will next be) meshed at.
    pub lod: u8,
    /// Set when voxels, neighbours or `lod` changed since the last mesh build.
    pub updated: bool,
}

impl Default for ChunkData {
    fn default() -> Self {
        Self {
            lod: 1,
            updated: true,
        }
    }
}

/// Fixed 16x64x16 voxel store with its mesh handle.
pub struct Chunk {
    sector_origin: IVec3,
    world_origin: IVec3,
    voxels: Box<[Voxel]>,
    non_air: usize,
    pub data: ChunkData,
    mesh: Option<Box<dyn MeshSink>>,
}

impl Chunk {
    /// Empty chunk whose minimum corner sits at `sector_origin` inside its
    /// sector and at `world_origin` in absolute coordinates.
    pub fn new(sector_origin: IVec3, world_origin: IVec3) -> Self {
        Self {
            sector_origin,
            world_origin,
            voxels: vec![Voxel::AIR; CHUNK_VOLUME].into_boxed_slice(),
            non_air: 0,
            data: ChunkData::default(),
            mesh: None,
        }
    }

    /// A chunk not attached to any sector, filled with `fill`. Used as the
    /// stand-in neighbour at world edges.
    pub fn generic(fill: Voxel, lod: u8) -> Self {
        let mut c = Self::new(IVec3::ZERO, IVec3::ZERO);
        c.fill(fill);
        c.data = ChunkData {
            lod,
            updated: false,
        };
        c
    }

    pub fn generic_air() -> Self {
        Self::generic(Voxel::AIR, crate::LOD_LEVELS[0])
    }

    pub fn generic_solid(fill: Voxel) -> Self {
        Self::generic(fill, crate::LOD_LEVELS[crate::LOD_LEVELS.len() - 1])
    }

    #[inline]
    pub fn sector_origin(&self) -> IVec3 {
        self.sector_origin
    }

    #[inline]
    pub fn world_origin(&self) -> IVec3 {
        self.world_origin
    }

    /// Converts `pos` in `frame` to a chunk-local location, or `None` if it falls outside this chunk.
    #[inline]
    pub fn to_local(&self, pos: IVec3, frame: Frame) -> Option<VoxelLoc> {
        let local = match frame {
            Frame::World => checked_offset(pos, self.world_origin)?,
            Frame::Sector => checked_offset(pos, self.sector_origin)?,
            Frame::Chunk => pos,
        };
        VoxelLoc::from_ivec3(local)
    }

    /// Voxel at `pos`; AIR for anything unset or outside the chunk.
    ///
    /// Returned by value, so the shared AIR sentinel can never be modified through it.
    #[inline]
    pub fn get_voxel(&self, pos: IVec3, frame: Frame) -> Voxel {
        match self.to_local(pos, frame) {
            Some(loc) => self.voxels[loc.index()],
            None => Voxel::AIR,
        }
    }

    /// Chunk-local read used by the meshers; out-of-range reads yield AIR.
    #[inline]
    pub fn voxel_at(&self, x: i32, y: i32, z: i32) -> Voxel {
        match VoxelLoc::try_new(x, y, z) {
            Some(loc) => self.voxels[loc.index()],
            None => Voxel::AIR,
        }
    }

    /// Inserts or overwrites the voxel at `pos`. Returns false when `pos` is outside the chunk.
    pub fn create_voxel(&mut self, pos: IVec3, frame: Frame, voxel: Voxel) -> bool {
        match self.to_local(pos, frame) {
            Some(loc) => {
                self.set_local(loc, voxel);
                true
            }
            None => false,
        }
    }

    /// Overwrites the voxel at `pos` with AIR. The cell stays in the store.
    pub fn remove_voxel(&mut self, pos: IVec3, frame: Frame) -> bool {
        self.create_voxel(pos, frame, Voxel::AIR)
    }

    pub fn set_local(&mut self, loc: VoxelLoc, voxel: Voxel) {
        let slot = &mut self.voxels[loc.index()];
        match (slot.is_air(), voxel.is_air()) {
            (true, false) => self.non_air += 1,
            (false, true) => self.non_air -= 1,
            _ => {}
        }
        *slot = voxel;
        self.data.updated = true;
    }

    pub fn fill(&mut self, voxel: Voxel) {
        self.voxels.fill(voxel);
        self.non_air = if voxel.is_air() { 0 } else { CHUNK_VOLUME };
        self.data.updated = true;
    }

    /// Number of cells holding something other than AIR.
    #[inline]
    pub fn solid_count(&self) -> usize {
        self.non_air
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_air == 0
    }

    /// Every non-AIR cell in store order.
    pub fn iter_solid(&self) -> impl Iterator<Item = (VoxelLoc, Voxel)> + '_ {
        self.voxels
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_air())
            .map(|(i, v)| (VoxelLoc::from_raw(i as u16), *v))
    }

    /// True when both chunks hold the same voxel at every cell.
    pub fn same_voxels(&self, other: &Chunk) -> bool {
        self.voxels == other.voxels
    }

    #[inline]
    pub fn mesh_mut(&mut self) -> Option<&mut (dyn MeshSink + 'static)> {
        self.mesh.as_deref_mut()
    }

    #[inline]
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// Clears and drops the current mesh handle, then installs `mesh`.
    pub fn install_mesh(&mut self, mesh: Option<Box<dyn MeshSink>>) {
        if let Some(mut old) = self.mesh.take() {
            old.clear();
        }
        self.mesh = mesh;
    }

    pub fn release_mesh(&mut self) {
        self.install_mesh(None);
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        self.release_mesh();
    }
}

impl core::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Chunk")
            .field("world_origin", &self.world_origin)
            .field("non_air", &self.non_air)
            .field("data", &self.data)
            .field("mesh", &self.mesh.as_ref().map(|_| "<mesh>"))
            .finish()
    }
}

/// `pos - origin`, or `None` if any axis overflows.
#[inline]
fn checked_offset(pos: IVec3, origin: IVec3) -> Option<IVec3> {
    Some(IVec3::new(
        pos.x.checked_sub(origin.x)?,
        pos.y.checked_sub(origin.y)?,
        pos.z.checked_sub(origin.z)?,
    ))
}

const _: () = assert!(CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z == 1 << 14);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::mesh::ElementType;

    struct CountingSink {
        clears: Rc<Cell<u32>>,
    }

    impl MeshSink for CountingSink {
        fn configure_mesh(&mut self, _: &[f32], _: usize, _: usize, _: ElementType) {}
        fn configure_index_buffer(&mut self, _: &[u32], _: usize, _: ElementType) {}
        fn add_vertex_attribute(&mut self, _: u32, _: u32, _: usize) {}
        fn draw(&mut self) {}
        fn clear(&mut self) {
            self.clears.set(self.clears.get() + 1);
        }
    }

    fn stone() -> Voxel {
        Voxel::solid(1, 8, 8, 8)
    }

    #[test]
    fn frames_resolve_to_the_same_cell() {
        let mut c = Chunk::new(IVec3::new(32, 64, 48), IVec3::new(-480, 64, 560));
        assert!(c.create_voxel(IVec3::new(3, 5, 7), Frame::Chunk, stone()));
        assert_eq!(c.get_voxel(IVec3::new(35, 69, 55), Frame::Sector), stone());
        assert_eq!(c.get_voxel(IVec3::new(-477, 69, 567), Frame::World), stone());
    }

    #[test]
    fn out_of_range_reads_air_and_writes_fail() {
        let mut c = Chunk::new(IVec3::ZERO, IVec3::ZERO);
        c.fill(stone());
        assert_eq!(c.get_voxel(IVec3::new(16, 0, 0), Frame::Chunk), Voxel::AIR);
        assert_eq!(c.get_voxel(IVec3::new(0, -1, 0), Frame::World), Voxel::AIR);
        assert!(!c.create_voxel(IVec3::new(0, 64, 0), Frame::Chunk, stone()));
        assert_eq!(c.voxel_at(-1, 0, 0), Voxel::AIR);
    }

    #[test]
    fn extreme_positions_read_air_in_every_frame() {
        let mut c = Chunk::new(IVec3::new(-32, -64, 16), IVec3::new(16, 0, -16));
        c.fill(stone());
        for frame in [Frame::World, Frame::Sector, Frame::Chunk] {
            for v in [i32::MIN, i32::MAX] {
                for p in [IVec3::new(v, 0, 0), IVec3::new(0, v, 0), IVec3::new(0, 0, v), IVec3::new(v, v, v)] {
                    assert_eq!(c.get_voxel(p, frame), Voxel::AIR, "{p:?} {frame:?}");
                    assert!(!c.create_voxel(p, frame, stone()));
                    assert!(!c.remove_voxel(p, frame));
                }
            }
        }
        assert_eq!(c.solid_count(), CHUNK_VOLUME);
    }

    #[test]
    fn remove_overwrites_with_air_and_tracks_count() {
        let mut c = Chunk::new(IVec3::ZERO, IVec3::ZERO);
        c.create_voxel(IVec3::new(1, 1, 1), Frame::Chunk, stone());
        c.create_voxel(IVec3::new(2, 1, 1), Frame::Chunk, stone());
        c.create_voxel(IVec3::new(2, 1, 1), Frame::Chunk, stone());
        assert_eq!(c.solid_count(), 2);
        assert!(c.remove_voxel(IVec3::new(1, 1, 1), Frame::Chunk));
        assert_eq!(c.get_voxel(IVec3::new(1, 1, 1), Frame::Chunk), Voxel::AIR);
        assert_eq!(c.solid_count(), 1);
        assert_eq!(c.iter_solid().count(), 1);
    }

    #[test]
    fn edits_mark_chunk_updated() {
        let mut c = Chunk::generic_air();
        assert!(!c.data.updated);
        c.create_voxel(IVec3::ZERO, Frame::Chunk, stone());
        assert!(c.data.updated);
    }

    #[test]
    fn installing_a_mesh_clears_the_previous_one() {
        let clears = Rc::new(Cell::new(0));
        let mut c = Chunk::new(IVec3::ZERO, IVec3::ZERO);
        c.install_mesh(Some(Box::new(CountingSink { clears: clears.clone() })));
        assert_eq!(clears.get(), 0);
        c.install_mesh(Some(Box::new(CountingSink { clears: clears.clone() })));
        assert_eq!(clears.get(), 1);
        drop(c);
        assert_eq!(clears.get(), 2);
    }
}
