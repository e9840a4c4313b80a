//! Per-asset mode detection.

use std::path::Path;

use crate::config::AssetOptions;
use crate::error::{AssetError, AssetResult};
use crate::fs::AssetFs;
use crate::models::AssetMode;

/// Determine the mode applied to `source`.
///
/// Inline mode with a size threshold stats the file and degrades to copy mode
/// when it is larger than `max_inline_size_kib * 1024` bytes. A threshold of
/// zero disables the check, like a missing one. Every other
/// configured mode, unrecognized ones included, is returned unchanged.
pub async fn resolve_mode(
  source: &Path,
  options: &AssetOptions,
  fs: &dyn AssetFs,
) -> AssetResult<AssetMode> {
  match (&options.mode, options.max_inline_size_kib) {
    (AssetMode::Inline, Some(max_kib)) if max_kib > 0 => {
      let size = fs
        .file_size(source)
        .await
        .map_err(|err| AssetError::io(source, err))?;
      let limit = max_kib.saturating_mul(1024);
      if size <= limit {
        Ok(AssetMode::Inline)
      } else {
        tracing::debug!(source = %source.display(), size, limit, "asset too large to inline");
        Ok(AssetMode::Copy)
      }
    }
    (mode, _) => Ok(mode.clone()),
  }
}
