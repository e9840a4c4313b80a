//! Data structures exchanged between the resolution stages and the host.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sourcemap::ModuleMap;

/// Handling strategy for a matched asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum AssetMode {
  /// Reference the original file relative to the rebase root.
  Rebase,
  /// Embed the file content as a base64 data URI.
  Inline,
  /// Copy the file to the output directory under its computed name.
  Copy,
  /// Any other configured value; reported as a warning and left unprocessed.
  Unrecognized(String),
}

impl AssetMode {
  /// Configuration keyword for this mode.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Rebase => "rebase",
      Self::Inline => "inline",
      Self::Copy => "copy",
      Self::Unrecognized(value) => value,
    }
  }
}

impl From<String> for AssetMode {
  fn from(value: String) -> Self {
    match value.as_str() {
      "rebase" => Self::Rebase,
      "inline" => Self::Inline,
      "copy" => Self::Copy,
      _ => Self::Unrecognized(value),
    }
  }
}

impl From<&str> for AssetMode {
  fn from(value: &str) -> Self {
    Self::from(value.to_string())
  }
}

impl From<AssetMode> for String {
  fn from(mode: AssetMode) -> Self {
    mode.as_str().to_string()
  }
}

impl fmt::Display for AssetMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Copy-mode asset waiting for the next bundle write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCopyJob {
  /// File name the asset is materialized under, relative to the assets root.
  pub asset_name: String,
  /// Source file the asset is copied from.
  pub source: PathBuf,
}

/// Result of the `load` hook for a matched module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
  /// Mode that was applied after the size check.
  pub mode: AssetMode,
  /// Value the default export evaluates to (data URI, URL or import path).
  pub reference: String,
  /// Complete replacement module source, marker comment included.
  pub code: String,
}

/// Result of the `transform` hook: replacement code plus its source map.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleOutput {
  /// Replacement module source.
  pub code: String,
  /// Either a full overwrite map or the empty marker.
  pub map: ModuleMap,
}

/// Output location supplied by the host when a bundle is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
  /// Bundle is written into a directory.
  Dir(PathBuf),
  /// Bundle is written to a single file; assets go next to it.
  File(PathBuf),
}

impl OutputTarget {
  /// Directory the bundle lands in.
  pub fn directory(&self) -> &Path {
    match self {
      Self::Dir(dir) => dir,
      Self::File(file) => file.parent().unwrap_or_else(|| Path::new("")),
    }
  }
}

/// Summary of one materialization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
  /// Destination paths that were written.
  pub copied: Vec<PathBuf>,
  /// Source files that could not be copied.
  pub failed: Vec<PathBuf>,
}
