//! Copies queued assets into the bundle output when it is written.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AssetOptions;
use crate::fs::AssetFs;
use crate::models::{MaterializeReport, OutputTarget};
use crate::queue::CopyQueue;
use crate::warnings::WarningSink;

/// Drains the copy queue into the output directory.
#[derive(Clone)]
pub struct Materializer {
  options: Arc<AssetOptions>,
  fs: Arc<dyn AssetFs>,
  warnings: Arc<dyn WarningSink>,
  queue: CopyQueue,
}

impl Materializer {
  /// Create a materializer draining `queue`.
  pub fn new(
    options: Arc<AssetOptions>,
    fs: Arc<dyn AssetFs>,
    warnings: Arc<dyn WarningSink>,
    queue: CopyQueue,
  ) -> Self {
    Self {
      options,
      fs,
      warnings,
      queue,
    }
  }

  /// Directory copied assets are written into for this output.
  pub fn assets_root(&self, output: &OutputTarget) -> PathBuf {
    let output_dir = self
      .options
      .output_dir
      .as_deref()
      .unwrap_or_else(|| output.directory());
    match self.options.assets_path.as_deref() {
      Some(assets_path) => output_dir.join(assets_path),
      None => output_dir.to_path_buf(),
    }
  }

  /// Copy every queued asset, then leave the queue empty.
  ///
  /// Does nothing when `is_write` is false or nothing is queued. Failures to
  /// create the destination directory or to copy a file are reported as
  /// warnings and the remaining assets are still attempted. The directory is
  /// created at most once per call.
  pub async fn generate_bundle(&self, output: &OutputTarget, is_write: bool) -> MaterializeReport {
    let mut report = MaterializeReport::default();
    if !is_write || self.queue.is_empty() {
      return report;
    }

    let assets_root = self.assets_root(output);
    let jobs = self.queue.take();
    let mut dir_initialized = false;

    for job in jobs {
      let destination = assets_root.join(&job.asset_name);
      let directory = destination.parent().unwrap_or(Path::new(""));

      if !dir_initialized {
        match self.fs.create_dir_all(directory).await {
          Ok(()) => dir_initialized = true,
          Err(err) => {
            tracing::debug!(directory = %directory.display(), %err, "create_dir_all failed");
            self
              .warnings
              .warn(format!("Unable to create directory: {}", directory.display()));
          }
        }
      }

      match self.fs.copy(&job.source, &destination).await {
        Ok(()) => report.copied.push(destination),
        Err(err) => {
          tracing::debug!(source = %job.source.display(), %err, "copy failed");
          self
            .warnings
            .warn(format!("Unable to copy asset: {}", job.source.display()));
          report.failed.push(job.source);
        }
      }
    }

    tracing::info!(
      root = %assets_root.display(),
      copied = report.copied.len(),
      failed = report.failed.len(),
      "materialized assets"
    );
    report
  }
}
