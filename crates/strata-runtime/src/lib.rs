//! Viewer-driven chunk streaming: load, generate, store, unload and re-mesh
//! the chunks around a moving viewer.
#![forbid(unsafe_code)]

mod hooks;
mod settings;
mod streamer;

pub use hooks::{ChunkGenerator, EmptyGenerator, MeshBackend};
pub use settings::{LodThresholds, SETTINGS_FILE, SettingsRecord, StreamSettings};
pub use streamer::{Streamer, TickReport};
