//! Packed voxel record and voxel type ids.
#![forbid(unsafe_code)]

pub mod voxel;

pub use voxel::{Voxel, VoxelType};
