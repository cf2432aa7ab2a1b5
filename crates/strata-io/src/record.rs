use std::fs;
use std::io;
use std::path::Path;

use bytemuck::Pod;

use crate::error::{PersistError, Result};

/// Dumps `value` as its raw in-memory bytes, creating parent directories.
pub fn write_record<T: Pod>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytemuck::bytes_of(value))?;
    Ok(())
}

/// Reads a record written by [`write_record`]. `Ok(None)` when the file is absent;
/// a size mismatch is an error rather than a partial read.
pub fn read_record<T: Pod>(path: &Path) -> Result<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if bytes.len() != size_of::<T>() {
        return Err(PersistError::RecordSize {
            path: path.to_path_buf(),
            expected: size_of::<T>(),
            found: bytes.len(),
        });
    }
    Ok(Some(bytemuck::pod_read_unaligned(&bytes)))
}
