//! In-memory collaborators shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::HashOptions;
use crate::error::AssetResult;
use crate::fs::AssetFs;
use crate::hashing::ContentHasher;

/// Filesystem fake that serves files from memory and records every call.
#[derive(Default)]
pub struct RecordingFs {
  files: Mutex<HashMap<PathBuf, Vec<u8>>>,
  failing_copies: Mutex<HashSet<PathBuf>>,
  fail_mkdir: Mutex<bool>,
  pub created_dirs: Mutex<Vec<PathBuf>>,
  pub copies: Mutex<Vec<(PathBuf, PathBuf)>>,
  pub stats: AtomicUsize,
}

impl RecordingFs {
  pub fn with_file(self, path: &str, content: &[u8]) -> Self {
    self.files.lock().insert(PathBuf::from(path), content.to_vec());
    self
  }

  pub fn failing_copy(self, source: &str) -> Self {
    self.failing_copies.lock().insert(PathBuf::from(source));
    self
  }

  pub fn failing_mkdir(self) -> Self {
    *self.fail_mkdir.lock() = true;
    self
  }

  pub fn copy_calls(&self) -> Vec<(PathBuf, PathBuf)> {
    self.copies.lock().clone()
  }

  pub fn mkdir_calls(&self) -> Vec<PathBuf> {
    self.created_dirs.lock().clone()
  }
}

fn not_found(path: &Path) -> io::Error {
  io::Error::new(ErrorKind::NotFound, format!("{} not found", path.display()))
}

#[async_trait]
impl AssetFs for RecordingFs {
  async fn file_size(&self, path: &Path) -> io::Result<u64> {
    self.stats.fetch_add(1, Ordering::SeqCst);
    self
      .files
      .lock()
      .get(path)
      .map(|content| content.len() as u64)
      .ok_or_else(|| not_found(path))
  }

  async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    self.files.lock().get(path).cloned().ok_or_else(|| not_found(path))
  }

  async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    self.created_dirs.lock().push(path.to_path_buf());
    if *self.fail_mkdir.lock() {
      return Err(io::Error::new(ErrorKind::PermissionDenied, "read-only"));
    }
    Ok(())
  }

  async fn copy(&self, source: &Path, destination: &Path) -> io::Result<()> {
    self
      .copies
      .lock()
      .push((source.to_path_buf(), destination.to_path_buf()));
    if self.failing_copies.lock().contains(source) {
      return Err(io::Error::new(ErrorKind::Other, "disk full"));
    }
    Ok(())
  }
}

/// Hasher fake returning a fixed tag and counting invocations.
pub struct FixedHasher {
  tag: String,
  pub calls: AtomicUsize,
}

impl FixedHasher {
  pub fn new(tag: &str) -> Self {
    Self {
      tag: tag.into(),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ContentHasher for FixedHasher {
  async fn hash(&self, _path: &Path, _options: &HashOptions) -> AssetResult<String> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.tag.clone())
  }
}
