//! Per-module resolution: decides how an asset is referenced and emits its
//! replacement module.
//!
//! ```text
//! id ─► filter ─► mode ─► name (copy only) ─► reference ─► code (+ queued copy)
//! ```
//!
//! Replacement code always starts with [`MARKER_COMMENT`]. `transform`
//! refuses to re-resolve content carrying the marker, so a module loaded by
//! this pipeline is never resolved twice regardless of hook order.

use std::path::Path;
use std::sync::Arc;

use crate::asset_paths::ModuleFilter;
use crate::config::AssetOptions;
use crate::error::AssetResult;
use crate::fs::AssetFs;
use crate::hashing::ContentHasher;
use crate::mode::resolve_mode;
use crate::models::{AssetMode, ModuleOutput, PendingCopyJob, ResolvedModule};
use crate::naming::format_asset_name;
use crate::queue::CopyQueue;
use crate::reference::build_reference;
use crate::sourcemap::{ModuleMap, SourceMap};
use crate::warnings::WarningSink;

/// Leading comment flagging code produced by this pipeline.
pub const MARKER_COMMENT: &str = "/* loaded by smart-asset */";

/// Resolves matched asset modules into replacement code.
#[derive(Clone)]
pub struct AssetPipeline {
  options: Arc<AssetOptions>,
  filter: ModuleFilter,
  fs: Arc<dyn AssetFs>,
  hasher: Arc<dyn ContentHasher>,
  warnings: Arc<dyn WarningSink>,
  queue: CopyQueue,
}

impl AssetPipeline {
  /// Create a pipeline enqueuing copy jobs into `queue`.
  pub fn new(
    options: Arc<AssetOptions>,
    fs: Arc<dyn AssetFs>,
    hasher: Arc<dyn ContentHasher>,
    warnings: Arc<dyn WarningSink>,
    queue: CopyQueue,
  ) -> Self {
    let filter = ModuleFilter::new(&options);
    Self {
      options,
      filter,
      fs,
      hasher,
      warnings,
      queue,
    }
  }

  /// Whether the module id is handled by this pipeline.
  pub fn matches(&self, id: &str) -> bool {
    self.filter.matches(id)
  }

  /// Resolve a module by id.
  ///
  /// Returns `Ok(None)` when the id is not matched or the configured mode is
  /// unrecognized (the latter is reported through the warning channel).
  pub async fn load(&self, id: &str) -> AssetResult<Option<ResolvedModule>> {
    if !self.matches(id) {
      return Ok(None);
    }

    let source = Path::new(id);
    let options = self.options.as_ref();
    let mode = resolve_mode(source, options, self.fs.as_ref()).await?;

    let asset_name = match mode {
      AssetMode::Copy => format_asset_name(source, options, self.hasher.as_ref()).await?,
      _ => String::new(),
    };

    let Some(reference) =
      build_reference(&mode, source, &asset_name, options, self.fs.as_ref()).await?
    else {
      self.warnings.warn(format!("Invalid mode: {mode}"));
      return Ok(None);
    };

    if mode == AssetMode::Copy {
      self.queue.push(PendingCopyJob {
        asset_name,
        source: source.to_path_buf(),
      });
    }

    let as_import = options.keep_import && matches!(mode, AssetMode::Copy | AssetMode::Rebase);
    let code = render_module(&reference, as_import);
    tracing::debug!(%id, %mode, %reference, "resolved asset module");

    Ok(Some(ResolvedModule {
      mode,
      reference,
      code,
    }))
  }

  /// Replace already-loaded module content with the resolved asset module.
  ///
  /// Content that starts with [`MARKER_COMMENT`] is left untouched.
  pub async fn transform(&self, code: &str, id: &str) -> AssetResult<Option<ModuleOutput>> {
    if code.starts_with(MARKER_COMMENT) {
      return Ok(None);
    }

    let Some(resolved) = self.load(id).await? else {
      return Ok(None);
    };

    let map = if self.options.source_map {
      ModuleMap::Full(SourceMap::overwrite(id, code, &resolved.code))
    } else {
      ModuleMap::Empty
    };

    Ok(Some(ModuleOutput {
      code: resolved.code,
      map,
    }))
  }
}

/// Marker comment followed by a single default export.
fn render_module(reference: &str, as_import: bool) -> String {
  let literal = serde_json::Value::String(reference.to_string()).to_string();
  if as_import {
    format!("{MARKER_COMMENT}\nexport default require({literal})")
  } else {
    format!("{MARKER_COMMENT}\nexport default {literal}")
  }
}
