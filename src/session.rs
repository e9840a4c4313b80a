//! Build-session facade exposing the hooks a bundler host drives.

use std::sync::Arc;

use crate::config::AssetOptions;
use crate::error::AssetResult;
use crate::fs::{AssetFs, TokioFs};
use crate::hashing::{ContentHasher, DigestHasher};
use crate::materialize::Materializer;
use crate::models::{MaterializeReport, ModuleOutput, OutputTarget, PendingCopyJob, ResolvedModule};
use crate::pipeline::AssetPipeline;
use crate::queue::CopyQueue;
use crate::warnings::{TracingWarnings, WarningSink};

/// Plugin name reported to hosts.
pub const PLUGIN_NAME: &str = "smart-asset";

/// One build's worth of asset handling.
///
/// The session owns its copy queue; separate sessions never share pending
/// copies. Hooks may be invoked concurrently for different modules.
#[derive(Clone)]
pub struct AssetSession {
  options: Arc<AssetOptions>,
  pipeline: AssetPipeline,
  materializer: Materializer,
  queue: CopyQueue,
}

impl AssetSession {
  /// Session on the real filesystem with warnings sent to `tracing`.
  pub fn new(options: AssetOptions) -> AssetResult<Self> {
    Self::builder(options).build()
  }

  /// Start configuring a session with custom collaborators.
  pub fn builder(options: AssetOptions) -> AssetSessionBuilder {
    AssetSessionBuilder {
      options,
      fs: None,
      hasher: None,
      warnings: None,
    }
  }

  /// Plugin name.
  pub fn name(&self) -> &'static str {
    PLUGIN_NAME
  }

  /// Options this session was built with.
  pub fn options(&self) -> &AssetOptions {
    &self.options
  }

  /// Resolution hook: replacement module for `id`, or `None` when not handled.
  pub async fn load(&self, id: &str) -> AssetResult<Option<ResolvedModule>> {
    self.pipeline.load(id).await
  }

  /// Transform hook: replaces content not already produced by [`Self::load`].
  pub async fn transform(&self, code: &str, id: &str) -> AssetResult<Option<ModuleOutput>> {
    self.pipeline.transform(code, id).await
  }

  /// Finalization hook: copies queued assets when the bundle is written.
  pub async fn generate_bundle(&self, output: &OutputTarget, is_write: bool) -> MaterializeReport {
    self.materializer.generate_bundle(output, is_write).await
  }

  /// Copy jobs waiting for the next bundle write.
  pub fn pending_jobs(&self) -> Vec<PendingCopyJob> {
    self.queue.snapshot()
  }
}

/// Builder for [`AssetSession`].
pub struct AssetSessionBuilder {
  options: AssetOptions,
  fs: Option<Arc<dyn AssetFs>>,
  hasher: Option<Arc<dyn ContentHasher>>,
  warnings: Option<Arc<dyn WarningSink>>,
}

impl AssetSessionBuilder {
  /// Use a custom filesystem.
  pub fn fs(mut self, fs: Arc<dyn AssetFs>) -> Self {
    self.fs = Some(fs);
    self
  }

  /// Use a custom content hasher.
  pub fn hasher(mut self, hasher: Arc<dyn ContentHasher>) -> Self {
    self.hasher = Some(hasher);
    self
  }

  /// Send warnings to a custom sink.
  pub fn warnings(mut self, warnings: Arc<dyn WarningSink>) -> Self {
    self.warnings = Some(warnings);
    self
  }

  /// Validate hash settings and assemble the session.
  ///
  /// Fails with a configuration error when the naming needs a hash and the
  /// algorithm or encoding is unsupported.
  pub fn build(self) -> AssetResult<AssetSession> {
    if self.options.needs_hash() {
      self.options.hash.validate()?;
    }

    let options = Arc::new(self.options);
    let fs: Arc<dyn AssetFs> = match self.fs {
      Some(fs) => fs,
      None => Arc::new(TokioFs),
    };
    let hasher: Arc<dyn ContentHasher> = match self.hasher {
      Some(hasher) => hasher,
      None => Arc::new(DigestHasher::new(fs.clone())),
    };
    let warnings: Arc<dyn WarningSink> = match self.warnings {
      Some(warnings) => warnings,
      None => Arc::new(TracingWarnings),
    };
    let queue = CopyQueue::new();

    let pipeline = AssetPipeline::new(
      options.clone(),
      fs.clone(),
      hasher,
      warnings.clone(),
      queue.clone(),
    );
    let materializer = Materializer::new(options.clone(), fs, warnings, queue.clone());

    Ok(AssetSession {
      options,
      pipeline,
      materializer,
      queue,
    })
  }
}
