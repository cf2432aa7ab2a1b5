use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use strata_io::{PersistError, read_record, write_record};

pub const SETTINGS_FILE: &str = "settings.bin";

/// Distance bands, in voxels, from the viewer to a chunk centre. Compared squared.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LodThresholds {
    /// Full detail inside this distance.
    pub normal: f32,
    pub lod2: f32,
    pub lod4: f32,
    /// Beyond this, block size 16.
    pub lod8: f32,
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self {
            normal: 64.0,
            lod2: 128.0,
            lod4: 256.0,
            lod8: 512.0,
        }
    }
}

impl LodThresholds {
    /// Block size for a chunk whose centre is `dist_sq` (squared voxels) away.
    pub fn lod_for(&self, dist_sq: f32) -> u8 {
        let bands = [(self.normal, 1), (self.lod2, 2), (self.lod4, 4), (self.lod8, 8)];
        bands
            .into_iter()
            .find(|(d, _)| dist_sq < d * d)
            .map_or(16, |(_, lod)| lod)
    }

    /// Raises each band to at least the one before it, starting from zero.
    pub fn normalized(self) -> Self {
        let normal = self.normal.max(0.0);
        let lod2 = self.lod2.max(normal);
        let lod4 = self.lod4.max(lod2);
        let lod8 = self.lod8.max(lod4);
        Self {
            normal,
            lod2,
            lod4,
            lod8,
        }
    }
}

/// Streamer configuration.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StreamSettings {
    pub load_from_disk: bool,
    pub store_on_unload: bool,
    pub generate: bool,
    pub unload_enabled: bool,
    pub lod_enabled: bool,
    /// Half-width, in chunks, of the square XZ area kept resident.
    pub chunk_radius: i32,
    /// Chunks kept above and below the viewer's chunk.
    pub vertical_radius: i32,
    pub unload_radius: i32,
    pub vertical_unload_radius: i32,
    pub update_interval_ms: u32,
    pub lod: LodThresholds,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            load_from_disk: true,
            store_on_unload: true,
            generate: true,
            unload_enabled: true,
            lod_enabled: true,
            chunk_radius: 8,
            vertical_radius: 2,
            unload_radius: 10,
            vertical_unload_radius: 3,
            update_interval_ms: 100,
            lod: LodThresholds::default(),
        }
    }
}

impl StreamSettings {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: StreamSettings = toml::from_str(s)?;
        Ok(cfg.normalized())
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Clamps radii to be non-negative and keeps unload radii at or beyond the load radii,
    /// so a freshly loaded chunk is never immediately unloaded. LOD bands are kept ascending.
    pub fn normalized(mut self) -> Self {
        self.chunk_radius = self.chunk_radius.max(0);
        self.vertical_radius = self.vertical_radius.max(0);
        self.unload_radius = self.unload_radius.max(self.chunk_radius);
        self.vertical_unload_radius = self.vertical_unload_radius.max(self.vertical_radius);
        self.lod = self.lod.normalized();
        self
    }

    pub fn settings_path(world_dir: &Path) -> PathBuf {
        world_dir.join(SETTINGS_FILE)
    }

    /// Reads `<world>/settings.bin`, if present.
    pub fn load(world_dir: &Path) -> Result<Option<Self>, PersistError> {
        let rec = read_record::<SettingsRecord>(&Self::settings_path(world_dir))?;
        Ok(rec.map(|r| Self::from(r).normalized()))
    }

    pub fn save(&self, world_dir: &Path) -> Result<(), PersistError> {
        write_record(&Self::settings_path(world_dir), &SettingsRecord::from(self))
    }
}

const FLAG_LOAD_FROM_DISK: u32 = 1 << 0;
const FLAG_STORE_ON_UNLOAD: u32 = 1 << 1;
const FLAG_GENERATE: u32 = 1 << 2;
const FLAG_UNLOAD: u32 = 1 << 3;
const FLAG_LOD: u32 = 1 << 4;

/// Fixed-layout image of [`StreamSettings`] as stored in `settings.bin`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SettingsRecord {
    pub flags: u32,
    pub chunk_radius: i32,
    pub vertical_radius: i32,
    pub unload_radius: i32,
    pub vertical_unload_radius: i32,
    pub update_interval_ms: u32,
    pub lod_normal: f32,
    pub lod2: f32,
    pub lod4: f32,
    pub lod8: f32,
}

impl From<&StreamSettings> for SettingsRecord {
    fn from(s: &StreamSettings) -> Self {
        let flag = |on: bool, bit: u32| if on { bit } else { 0 };
        Self {
            flags: flag(s.load_from_disk, FLAG_LOAD_FROM_DISK)
                | flag(s.store_on_unload, FLAG_STORE_ON_UNLOAD)
                | flag(s.generate, FLAG_GENERATE)
                | flag(s.unload_enabled, FLAG_UNLOAD)
                | flag(s.lod_enabled, FLAG_LOD),
            chunk_radius: s.chunk_radius,
            vertical_radius: s.vertical_radius,
            unload_radius: s.unload_radius,
            vertical_unload_radius: s.vertical_unload_radius,
            update_interval_ms: s.update_interval_ms,
            lod_normal: s.lod.normal,
            lod2: s.lod.lod2,
            lod4: s.lod.lod4,
            lod8: s.lod.lod8,
        }
    }
}

impl From<SettingsRecord> for StreamSettings {
    fn from(r: SettingsRecord) -> Self {
        Self {
            load_from_disk: r.flags & FLAG_LOAD_FROM_DISK != 0,
            store_on_unload: r.flags & FLAG_STORE_ON_UNLOAD != 0,
            generate: r.flags & FLAG_GENERATE != 0,
            unload_enabled: r.flags & FLAG_UNLOAD != 0,
            lod_enabled: r.flags & FLAG_LOD != 0,
            chunk_radius: r.chunk_radius,
            vertical_radius: r.vertical_radius,
            unload_radius: r.unload_radius,
            vertical_unload_radius: r.vertical_unload_radius,
            update_interval_ms: r.update_interval_ms,
            lod: LodThresholds {
                normal: r.lod_normal,
                lod2: r.lod2,
                lod4: r.lod4,
                lod8: r.lod8,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lod_bands_are_ordered() {
        let t = LodThresholds::default();
        assert_eq!(t.lod_for(0.0), 1);
        assert_eq!(t.lod_for(63.9 * 63.9), 1);
        assert_eq!(t.lod_for(64.0 * 64.0), 2);
        assert_eq!(t.lod_for(200.0 * 200.0), 4);
        assert_eq!(t.lod_for(300.0 * 300.0), 8);
        assert_eq!(t.lod_for(1.0e9), 16);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = StreamSettings::from_toml_str(
            r#"
            chunk_radius = 3
            generate = false
            [lod]
            normal = 32.0
            "#,
        )
        .unwrap();
        assert_eq!(s.chunk_radius, 3);
        assert!(!s.generate);
        assert!(s.load_from_disk);
        assert_eq!(s.lod.normal, 32.0);
        assert_eq!(s.lod.lod2, 128.0);
    }

    #[test]
    fn unload_radius_never_below_load_radius() {
        let s = StreamSettings::from_toml_str("chunk_radius = 12\nunload_radius = 4").unwrap();
        assert_eq!(s.unload_radius, 12);
    }

    #[test]
    fn lod_bands_never_descend() {
        let s = StreamSettings::from_toml_str("[lod]\nnormal = 100.0\nlod2 = 50.0").unwrap();
        assert_eq!(s.lod.normal, 100.0);
        assert_eq!(s.lod.lod2, 100.0);
        assert_eq!(s.lod.lod4, 256.0);
        assert_eq!(s.lod.lod8, 512.0);

        let mut prev = 0;
        for d in [0.0f32, 60.0, 99.0, 100.0, 150.0, 300.0, 600.0] {
            let lod = s.lod.lod_for(d * d);
            assert!(lod >= prev, "lod {lod} at {d} after {prev}");
            prev = lod;
        }
        assert_eq!(s.lod.lod_for(99.0 * 99.0), 1);
        assert_eq!(s.lod.lod_for(150.0 * 150.0), 4);

        let t = LodThresholds {
            normal: -5.0,
            lod2: 40.0,
            lod4: 10.0,
            lod8: 20.0,
        }
        .normalized();
        assert_eq!((t.normal, t.lod2, t.lod4, t.lod8), (0.0, 40.0, 40.0, 40.0));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(StreamSettings::from_toml_str("chunk_radius = \"wide\"").is_err());
    }

    #[test]
    fn record_conversion_keeps_every_field() {
        let s = StreamSettings {
            load_from_disk: false,
            store_on_unload: true,
            generate: false,
            unload_enabled: true,
            lod_enabled: false,
            chunk_radius: 5,
            vertical_radius: 1,
            unload_radius: 7,
            vertical_unload_radius: 2,
            update_interval_ms: 250,
            lod: LodThresholds {
                normal: 10.0,
                lod2: 20.0,
                lod4: 30.0,
                lod8: 40.0,
            },
        };
        assert_eq!(StreamSettings::from(SettingsRecord::from(&s)), s);
        assert_eq!(size_of::<SettingsRecord>(), 40);
    }
}
