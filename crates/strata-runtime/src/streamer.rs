use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use strata_blocks::Voxel;
use strata_chunk::{CHUNK_DIMS, CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, Chunk};
use strata_geom::{Aabb, IVec3, Vec3};
use strata_io::{PersistError, load_chunk, save_chunk, save_world};
use strata_mesh_cpu::{
    Face, MeshBuild, NeighborChunks, build_chunk_mesh_into, build_chunk_mesh_lod_into,
    neighbor_addr, upload_mesh,
};
use strata_world::{ChunkAddr, World, chunk_coord_of};

use crate::hooks::{ChunkGenerator, MeshBackend};
use crate::settings::StreamSettings;

/// What one call to [`Streamer::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The update interval had not elapsed; nothing ran.
    pub skipped: bool,
    /// The viewer entered a different chunk since the last update.
    pub moved: bool,
    pub loaded: usize,
    pub generated: usize,
    pub unloaded: usize,
    pub stored: usize,
    pub remeshed: usize,
    pub lod_changes: usize,
}

/// Keeps the chunks around a viewer resident and meshed.
///
/// Single-threaded: every call does its I/O and meshing on the caller's thread.
pub struct Streamer<G, B> {
    world: World,
    world_dir: Option<PathBuf>,
    settings: StreamSettings,
    generator: G,
    backend: B,
    generic: Chunk,
    scratch: MeshBuild,
    last_center: Option<IVec3>,
    last_viewer: Option<Vec3>,
    accum_ms: u32,
}

impl<G: ChunkGenerator, B: MeshBackend> Streamer<G, B> {
    /// In-memory streamer; nothing is read from or written to disk.
    pub fn new(settings: StreamSettings, generator: G, backend: B) -> Self {
        Self {
            world: World::new(),
            world_dir: None,
            settings: settings.normalized(),
            generator,
            backend,
            generic: Chunk::generic_air(),
            scratch: MeshBuild::default(),
            last_center: None,
            last_viewer: None,
            accum_ms: 0,
        }
    }

    /// Streamer persisting under `world_dir`. Settings stored in the world's
    /// `settings.bin` take precedence over `fallback`.
    pub fn open(
        world_dir: impl Into<PathBuf>,
        fallback: StreamSettings,
        generator: G,
        backend: B,
    ) -> Result<Self, PersistError> {
        let dir = world_dir.into();
        let settings = match StreamSettings::load(&dir)? {
            Some(s) => {
                log::info!("using stored settings from {}", dir.display());
                s
            }
            None => fallback,
        };
        Ok(Self::new(settings, generator, backend).with_world_dir(dir))
    }

    pub fn with_world_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.world_dir = Some(dir.into());
        self
    }

    /// Replaces the stand-in neighbour used where no real chunk exists.
    pub fn with_generic_chunk(mut self, generic: Chunk) -> Self {
        self.generic = generic;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }

    pub fn world_dir(&self) -> Option<&Path> {
        self.world_dir.as_deref()
    }

    /// Chunk-grid coordinate of the viewer at the last update.
    pub fn center(&self) -> Option<IVec3> {
        self.last_center
    }

    pub fn mesh_count(&self) -> usize {
        self.world.iter_chunks().filter(|(_, c)| c.has_mesh()).count()
    }

    /// Advances the streamer by `dt_ms` with the viewer at `viewer`.
    ///
    /// Runs at most once per `update_interval_ms` of accumulated time (the
    /// first call always runs). Load, unload and LOD work only happen when the
    /// viewer has entered a new chunk; chunks already marked dirty are
    /// re-meshed on every run.
    pub fn tick(&mut self, viewer: Vec3, dt_ms: u32) -> TickReport {
        let mut report = TickReport::default();
        self.accum_ms = self.accum_ms.saturating_add(dt_ms);
        if self.last_center.is_some() && self.accum_ms < self.settings.update_interval_ms {
            report.skipped = true;
            return report;
        }
        self.accum_ms = 0;
        self.last_viewer = Some(viewer);

        let center = chunk_coord_of(viewer.floor_to_ivec3());
        if self.last_center != Some(center) {
            report.moved = true;
            self.last_center = Some(center);
            if self.settings.unload_enabled {
                self.unload_far(center, &mut report);
            }
            self.load_near(center, &mut report);
            if self.settings.lod_enabled {
                self.update_lods(viewer, &mut report);
            }
        }
        self.regenerate(&mut report);

        if report.moved || report.remeshed > 0 {
            log::info!(
                "stream tick center=({}, {}, {}) loaded={} generated={} unloaded={} stored={} lod={} remeshed={} resident={}",
                center.x,
                center.y,
                center.z,
                report.loaded,
                report.generated,
                report.unloaded,
                report.stored,
                report.lod_changes,
                report.remeshed,
                self.world.chunk_count()
            );
        }
        report
    }

    fn unload_far(&mut self, center: IVec3, report: &mut TickReport) {
        let r = self.settings.unload_radius;
        let vr = self.settings.vertical_unload_radius;
        let far: Vec<ChunkAddr> = self
            .world
            .iter_chunks()
            .filter(|(a, _)| {
                let d = a.chunk_coord() - center;
                d.x.abs() > r || d.z.abs() > r || d.y.abs() > vr
            })
            .map(|(a, _)| a)
            .collect();

        for addr in far {
            if self.settings.store_on_unload {
                if let (Some(dir), Some(chunk)) = (self.world_dir.as_deref(), self.world.get_chunk(addr)) {
                    match save_chunk(dir, addr, chunk) {
                        Ok(_) => report.stored += 1,
                        Err(e) => {
                            log::error!("keeping chunk {:?} resident, store failed: {e}", addr.chunk_coord());
                            continue;
                        }
                    }
                }
            }
            self.world.remove_chunk(addr);
            report.unloaded += 1;
            self.mark_neighbors_dirty(addr);
            log::debug!("unloaded chunk {:?}", addr.chunk_coord());
        }
    }

    fn load_near(&mut self, center: IVec3, report: &mut TickReport) {
        let r = self.settings.chunk_radius;
        let vr = self.settings.vertical_radius;
        let mut desired: HashSet<ChunkAddr> = HashSet::new();
        for dy in -vr..=vr {
            for dz in -r..=r {
                for dx in -r..=r {
                    if let Some(a) = ChunkAddr::from_chunk_coord(center.offset(dx, dy, dz)) {
                        desired.insert(a);
                    }
                }
            }
        }
        let mut missing: Vec<ChunkAddr> = desired
            .into_iter()
            .filter(|a| !self.world.contains_chunk(*a))
            .collect();
        // Nearest first, then key order for a stable sequence.
        missing.sort_by_key(|a| {
            let d = a.chunk_coord() - center;
            (d.x * d.x + d.y * d.y + d.z * d.z, *a)
        });

        for addr in missing {
            if let Some(chunk) = self.read_chunk(addr) {
                self.world.insert_chunk(addr, chunk);
                report.loaded += 1;
                log::debug!("loaded chunk {:?} from disk", addr.chunk_coord());
            } else if self.settings.generate {
                let chunk = self.world.create_chunk(addr);
                self.generator.generate(addr, chunk);
                chunk.data.updated = true;
                report.generated += 1;
                log::debug!("generated chunk {:?}", addr.chunk_coord());
            } else {
                continue;
            }
            self.mark_neighbors_dirty(addr);
        }
    }

    fn read_chunk(&self, addr: ChunkAddr) -> Option<Chunk> {
        if !self.settings.load_from_disk {
            return None;
        }
        let dir = self.world_dir.as_deref()?;
        match load_chunk(dir, addr) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("ignoring stored chunk {:?}: {e}", addr.chunk_coord());
                None
            }
        }
    }

    fn update_lods(&mut self, viewer: Vec3, report: &mut TickReport) {
        let mut changed = Vec::new();
        for (addr, chunk) in self.world.iter_chunks_mut() {
            let c = chunk_bounds(chunk).center();
            let lod = self.settings.lod.lod_for((c - viewer).length_squared());
            if chunk.data.lod != lod {
                chunk.data.lod = lod;
                chunk.data.updated = true;
                changed.push(addr);
            }
        }
        report.lod_changes = changed.len();
        for addr in changed {
            self.mark_neighbors_dirty(addr);
        }
    }

    fn regenerate(&mut self, report: &mut TickReport) {
        let dirty: Vec<ChunkAddr> = self
            .world
            .iter_chunks()
            .filter(|(_, c)| c.data.updated)
            .map(|(a, _)| a)
            .collect();

        for addr in dirty {
            {
                let Some(chunk) = self.world.get_chunk(addr) else {
                    continue;
                };
                let nb = NeighborChunks::resolve(&self.world, addr, &self.generic);
                match chunk.data.lod {
                    0 | 1 => build_chunk_mesh_into(chunk, &nb, &mut self.scratch),
                    lod => {
                        build_chunk_mesh_lod_into(chunk, &nb, lod, &mut self.scratch);
                    }
                }
            }
            let Some(chunk) = self.world.get_chunk_mut(addr) else {
                continue;
            };
            chunk.release_mesh();
            if !self.scratch.is_empty() {
                let mut sink = self.backend.create_mesh();
                upload_mesh(&self.scratch, sink.as_mut());
                chunk.install_mesh(Some(sink));
            }
            chunk.data.updated = false;
            report.remeshed += 1;
        }
    }

    fn mark_dirty(&mut self, addr: ChunkAddr) {
        if let Some(c) = self.world.get_chunk_mut(addr) {
            c.data.updated = true;
        }
    }

    fn mark_neighbors_dirty(&mut self, addr: ChunkAddr) {
        for face in Face::ALL {
            if let Some(n) = neighbor_addr(addr, face) {
                self.mark_dirty(n);
            }
        }
    }

    /// Writes a voxel in world coordinates, creating its chunk if needed. The
    /// chunk and every chunk sharing a face with the edited cell re-mesh on the
    /// next update.
    ///
    /// A chunk created by the edit takes its LOD from the viewer position of the
    /// last update, and its face neighbours are marked dirty as on a load.
    pub fn set_voxel(&mut self, pos: IVec3, voxel: Voxel) -> bool {
        let created = ChunkAddr::from_world(pos).filter(|a| !self.world.contains_chunk(*a));
        if !self.world.set_voxel(pos, voxel) {
            return false;
        }
        if let Some(addr) = created {
            self.resolve_new_chunk(addr);
        }
        self.mark_edit_neighbors(pos);
        true
    }

    fn resolve_new_chunk(&mut self, addr: ChunkAddr) {
        if self.settings.lod_enabled {
            let viewer = self.last_viewer;
            if let (Some(viewer), Some(chunk)) = (viewer, self.world.get_chunk_mut(addr)) {
                let c = chunk_bounds(chunk).center();
                chunk.data.lod = self.settings.lod.lod_for((c - viewer).length_squared());
            }
        }
        self.mark_neighbors_dirty(addr);
    }

    /// Overwrites a voxel with AIR; see [`Streamer::set_voxel`].
    pub fn remove_voxel(&mut self, pos: IVec3) -> bool {
        if !self.world.remove_voxel(pos) {
            return false;
        }
        self.mark_edit_neighbors(pos);
        true
    }

    fn mark_edit_neighbors(&mut self, pos: IVec3) {
        let Some(addr) = ChunkAddr::from_world(pos) else {
            return;
        };
        let local = pos - addr.world_origin();
        let max = IVec3::new(
            CHUNK_SIZE_X as i32 - 1,
            CHUNK_SIZE_Y as i32 - 1,
            CHUNK_SIZE_Z as i32 - 1,
        );
        let touching = [
            (Face::NegX, local.x == 0),
            (Face::PosX, local.x == max.x),
            (Face::NegY, local.y == 0),
            (Face::PosY, local.y == max.y),
            (Face::NegZ, local.z == 0),
            (Face::PosZ, local.z == max.z),
        ];
        for (face, on_edge) in touching {
            if !on_edge {
                continue;
            }
            if let Some(n) = neighbor_addr(addr, face) {
                self.mark_dirty(n);
            }
        }
    }

    /// Draws every resident mesh. With a view direction, chunks entirely behind
    /// the viewer are skipped. Returns the number of meshes drawn.
    pub fn draw(&mut self, viewer: Vec3, view_dir: Option<Vec3>) -> usize {
        let dir = view_dir
            .map(Vec3::normalized)
            .filter(|d| d.length_squared() > 0.0);
        let mut drawn = 0;
        for (_, chunk) in self.world.iter_chunks_mut() {
            if let Some(d) = dir {
                let bounds = chunk_bounds(chunk);
                if (bounds.center() - viewer).dot(d) < -bounds.radius() {
                    continue;
                }
            }
            if let Some(mesh) = chunk.mesh_mut() {
                mesh.draw();
                drawn += 1;
            }
        }
        drawn
    }

    /// Stores `settings.bin` and every resident chunk. Returns the number of
    /// chunks written; 0 without a world directory.
    pub fn flush(&mut self) -> Result<usize, PersistError> {
        let Some(dir) = self.world_dir.as_deref() else {
            return Ok(0);
        };
        self.settings.save(dir)?;
        save_world(dir, &self.world)
    }

    /// Releases every mesh handle, then flushes if `store_on_unload` is set.
    pub fn shutdown(&mut self) -> Result<usize, PersistError> {
        for (_, chunk) in self.world.iter_chunks_mut() {
            chunk.release_mesh();
        }
        if self.settings.store_on_unload {
            self.flush()
        } else {
            Ok(0)
        }
    }
}

fn chunk_bounds(chunk: &Chunk) -> Aabb {
    let min = chunk.world_origin().as_vec3();
    Aabb::new(min, min + CHUNK_DIMS.as_vec3())
}
