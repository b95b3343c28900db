use memoira_core::MemoiraResult;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Replaces whole files through a temp file and a rename, so readers never
/// observe a partially written store.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write `data` to `path`, creating missing parent directories.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> MemoiraResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Temp file must share the target's filesystem for the rename
        let temp_path = tempfile::NamedTempFile::new_in(parent)?.into_temp_path();
        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, path).await?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Read a whole file, or None if it does not exist.
    pub async fn read_optional(path: &Path) -> MemoiraResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
