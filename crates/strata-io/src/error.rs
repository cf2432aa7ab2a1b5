use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: truncated, expected {expected} bytes, found {found}", path.display())]
    Truncated {
        path: PathBuf,
        expected: u64,
        found: u64,
    },

    #[error("{}: voxel position ({x}, {y}, {z}) outside the chunk", path.display())]
    VoxelOutOfRange { path: PathBuf, x: i32, y: i32, z: i32 },

    #[error("{}: record is {found} bytes, expected {expected}", path.display())]
    RecordSize {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, PersistError>;
