//! Builds the value an asset's default export evaluates to.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::asset_paths::{import_path_prefix, public_path_prefix, relative_slash_path};
use crate::config::AssetOptions;
use crate::error::{AssetError, AssetResult};
use crate::fs::AssetFs;
use crate::mime;
use crate::models::AssetMode;

/// Build the reference for `source` in the given mode.
///
/// `asset_name` is the published file name and is only read in copy mode.
/// Returns `Ok(None)` for an unrecognized mode so the caller can report it.
pub async fn build_reference(
  mode: &AssetMode,
  source: &Path,
  asset_name: &str,
  options: &AssetOptions,
  fs: &dyn AssetFs,
) -> AssetResult<Option<String>> {
  let reference = match mode {
    AssetMode::Inline => read_data_uri(source, fs).await?,
    AssetMode::Copy => copy_reference(asset_name, options),
    AssetMode::Rebase => rebase_reference(source, options),
    AssetMode::Unrecognized(_) => return Ok(None),
  };
  Ok(Some(reference))
}

/// `data:<mime>;base64,<payload>` for the file content.
pub async fn read_data_uri(source: &Path, fs: &dyn AssetFs) -> AssetResult<String> {
  let content = fs
    .read(source)
    .await
    .map_err(|err| AssetError::io(source, err))?;
  Ok(data_uri(mime::from_path(source), &content))
}

/// Encode bytes as a base64 data URI.
pub fn data_uri(mime: &str, content: &[u8]) -> String {
  format!(
    "data:{mime};base64,{}",
    general_purpose::STANDARD.encode(content)
  )
}

/// Reference to a copied asset: an import path or a public URL.
pub fn copy_reference(asset_name: &str, options: &AssetOptions) -> String {
  if options.keep_import {
    format!(
      "{}{asset_name}",
      import_path_prefix(options.assets_path.as_deref())
    )
  } else {
    format!(
      "{}{asset_name}",
      public_path_prefix(options.public_path.as_deref())
    )
  }
}

/// Reference to the original file, relative to the rebase root.
pub fn rebase_reference(source: &Path, options: &AssetOptions) -> String {
  let relative = relative_slash_path(&options.rebase_path, source);
  if options.keep_import {
    format!("./{relative}")
  } else {
    format!(
      "{}{relative}",
      public_path_prefix(options.public_path.as_deref())
    )
  }
}
