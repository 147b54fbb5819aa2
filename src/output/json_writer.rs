use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::atomic::AtomicFile;
use crate::error::Result;

/// Serialize `value` to `path`, compact unless `pretty` is set.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<PathBuf> {
    let mut file = AtomicFile::create(path)?;
    if pretty {
        serde_json::to_writer_pretty(&mut file, value)?;
    } else {
        serde_json::to_writer(&mut file, value)?;
    }
    let written = file.commit()?;
    info!(path = %written.display(), "wrote json");
    Ok(written)
}
