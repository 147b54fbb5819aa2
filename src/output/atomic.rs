use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

use crate::error::Result;

/// Buffered writer over a temp file next to `final_path`.
///
/// Nothing appears at `final_path` until [`AtomicFile::commit`]; dropping the
/// writer uncommitted deletes the temp file.
pub struct AtomicFile {
    inner: BufWriter<NamedTempFile>,
    final_path: PathBuf,
}

impl AtomicFile {
    pub fn create(final_path: impl AsRef<Path>) -> Result<Self> {
        let final_path = final_path.as_ref().to_path_buf();
        let dir = match final_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let tmp = NamedTempFile::new_in(&dir)?;
        Ok(Self {
            inner: BufWriter::new(tmp),
            final_path,
        })
    }

    /// Flush and rename over the destination.
    pub fn commit(self) -> Result<PathBuf> {
        let tmp = self.inner.into_inner().map_err(|e| e.into_error())?;
        tmp.persist(&self.final_path).map_err(|e| e.error)?;
        Ok(self.final_path)
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn commit_moves_content_into_place() -> Result<()> {
        let dir = TempDir::new()?;
        let dest = dir.path().join("out.txt");
        fs::write(&dest, "OLD")?;

        let mut f = AtomicFile::create(&dest)?;
        f.write_all(b"NEW")?;
        let written = f.commit()?;

        assert_eq!(written, dest);
        assert_eq!(fs::read_to_string(&dest)?, "NEW");
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn drop_without_commit_leaves_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        let dest = dir.path().join("nested").join("out.csv");
        {
            let mut f = AtomicFile::create(&dest)?;
            f.write_all(b"partial")?;
        }
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(dir.path().join("nested"))?.count(), 0);
        Ok(())
    }
}
