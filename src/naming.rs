//! Computes the file name a copied asset is published under.

use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::config::AssetOptions;
use crate::error::AssetResult;
use crate::hashing::ContentHasher;

/// Separator between the original name and the hash when `keep_name` is set.
pub const KEEP_NAME_SEPARATOR: char = '~';

fn placeholder_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"\[(name|ext|hash)\]").expect("invalid placeholder regex"))
}

/// Base name without extension, and extension with its leading dot.
fn split_file_name(source: &Path) -> (String, String) {
  let name = source
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_default();
  let ext = source
    .extension()
    .map(|ext| format!(".{}", ext.to_string_lossy()))
    .unwrap_or_default();
  (name, ext)
}

/// Produce the published asset name for `source`.
///
/// The hasher is only consulted when the chosen naming actually embeds a hash.
pub async fn format_asset_name(
  source: &Path,
  options: &AssetOptions,
  hasher: &dyn ContentHasher,
) -> AssetResult<String> {
  let (name, ext) = split_file_name(source);
  let hash = if options.needs_hash() {
    hasher.hash(source, &options.hash).await?
  } else {
    String::new()
  };

  let asset_name = match &options.name_format {
    Some(format) => render_name_format(format, &name, &ext, &hash),
    None if options.use_hash && options.keep_name => {
      format!("{name}{KEEP_NAME_SEPARATOR}{hash}{ext}")
    }
    None if options.use_hash => format!("{hash}{ext}"),
    None => format!("{name}{ext}"),
  };

  tracing::debug!(source = %source.display(), %asset_name, "formatted asset name");
  Ok(asset_name)
}

/// Replace every `[name]`, `[ext]` and `[hash]` placeholder in one pass.
pub fn render_name_format(format: &str, name: &str, ext: &str, hash: &str) -> String {
  placeholder_pattern()
    .replace_all(format, |caps: &Captures<'_>| match &caps[1] {
      "name" => name.to_string(),
      "ext" => ext.to_string(),
      _ => hash.to_string(),
    })
    .into_owned()
}
