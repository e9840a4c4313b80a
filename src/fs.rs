//! Filesystem primitives used by resolution and materialization.
//!
//! The trait keeps the I/O surface narrow (stat, read, mkdir, copy) so hosts
//! can substitute virtual filesystems and tests can count calls.

use std::io::{self, ErrorKind};
use std::path::Path;

use async_trait::async_trait;
use same_file::is_same_file;

/// Asynchronous file operations needed by the asset pipeline.
#[async_trait]
pub trait AssetFs: Send + Sync {
  /// Size of the file in bytes.
  async fn file_size(&self, path: &Path) -> io::Result<u64>;

  /// Full file contents.
  async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  /// Create `path` and all missing parents.
  async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  /// Copy `source` to `destination`, replacing any existing file.
  async fn copy(&self, source: &Path, destination: &Path) -> io::Result<()>;
}

/// Real filesystem backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl AssetFs for TokioFs {
  async fn file_size(&self, path: &Path) -> io::Result<u64> {
    Ok(tokio::fs::metadata(path).await?.len())
  }

  async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    tokio::fs::read(path).await
  }

  async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    tokio::fs::create_dir_all(path).await
  }

  async fn copy(&self, source: &Path, destination: &Path) -> io::Result<()> {
    match is_same_file(source, destination) {
      Ok(true) => return Ok(()),
      Ok(false) => {}
      Err(err) if err.kind() == ErrorKind::NotFound => {}
      Err(err) => return Err(err),
    }

    tokio::fs::copy(source, destination).await.map(|_| ())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  #[tokio::test]
  async fn copy_overwrites_existing_destination() -> io::Result<()> {
    let temp = tempdir()?;
    let source = temp.path().join("logo.png");
    let destination = temp.path().join("out/logo.png");
    fs::write(&source, b"new")?;

    TokioFs.create_dir_all(destination.parent().unwrap()).await?;
    fs::write(&destination, b"stale")?;

    TokioFs.copy(&source, &destination).await?;
    assert_eq!(fs::read(&destination)?, b"new");
    Ok(())
  }

  #[tokio::test]
  async fn copy_onto_itself_is_a_no_op() -> io::Result<()> {
    let temp = tempdir()?;
    let source = temp.path().join("logo.png");
    fs::write(&source, b"content")?;

    TokioFs.copy(&source, &source).await?;
    assert_eq!(fs::read(&source)?, b"content");
    Ok(())
  }

  #[tokio::test]
  async fn reports_file_size() -> io::Result<()> {
    let temp = tempdir()?;
    let path = temp.path().join("note.txt");
    fs::write(&path, b"text")?;

    assert_eq!(TokioFs.file_size(&path).await?, 4);
    assert_eq!(TokioFs.read(&path).await?, b"text");
    Ok(())
  }
}
