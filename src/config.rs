//! Plugin options and the loader that merges user configuration over defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::{AssetError, AssetResult};
use crate::models::AssetMode;

const CONFIG_FILE_CANDIDATES: [&str; 3] = [
  "smart-asset.config.json",
  "smart-asset.config.yaml",
  "smart-asset.config.yml",
];

/// Digest settings used when an asset name embeds a content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashOptions {
  /// Digest algorithm (`sha1`, `md5`, `sha256`, `sha512`, `blake3`, `xxhash32`, `xxhash64`).
  pub algorithm: String,
  /// Digest encoding (`hex`, `base64`, `base52`, ...).
  pub encoding: String,
  /// Truncate the encoded digest to this many characters.
  pub max_length: Option<usize>,
}

impl Default for HashOptions {
  fn default() -> Self {
    Self {
      algorithm: "sha1".into(),
      encoding: "base52".into(),
      max_length: Some(8),
    }
  }
}

/// Resolved plugin configuration. Built once per session and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetOptions {
  /// Handling strategy applied to matched assets.
  pub mode: AssetMode,
  /// Root that rebased references are made relative to.
  pub rebase_path: PathBuf,
  /// Inline threshold in KiB; larger files fall back to copy mode. `None` and
  /// `Some(0)` inline every file.
  pub max_inline_size_kib: Option<u64>,
  /// Prefix for public URLs, relative to the page referencing the asset.
  pub public_path: Option<String>,
  /// Sub-directory of the bundle output that copied assets land in.
  pub assets_path: Option<String>,
  /// Overrides the output directory reported by the host.
  pub output_dir: Option<PathBuf>,
  /// Name template using `[name]`, `[ext]` and `[hash]`.
  pub name_format: Option<String>,
  /// Name copied assets by their content hash.
  pub use_hash: bool,
  /// Keep the original base name in front of the hash.
  pub keep_name: bool,
  /// Digest settings.
  pub hash: HashOptions,
  /// Export an import expression so a downstream bundler resolves the asset.
  pub keep_import: bool,
  /// Emit a full source map from the transform hook.
  pub source_map: bool,
  /// Extensions (with leading dot) handled by the plugin.
  pub extensions: Vec<String>,
  /// Path fragments a module must contain to be handled, when non-empty.
  pub include: Vec<String>,
  /// Path fragments that exclude a module from handling.
  pub exclude: Vec<String>,
}

impl Default for AssetOptions {
  fn default() -> Self {
    Self {
      mode: AssetMode::Rebase,
      rebase_path: PathBuf::from("."),
      max_inline_size_kib: Some(14),
      public_path: None,
      assets_path: None,
      output_dir: None,
      name_format: None,
      use_hash: false,
      keep_name: false,
      hash: HashOptions::default(),
      keep_import: false,
      source_map: false,
      extensions: [".svg", ".gif", ".png", ".jpg"]
        .into_iter()
        .map(String::from)
        .collect(),
      include: Vec::new(),
      exclude: Vec::new(),
    }
  }
}

/// User-supplied hash settings; missing fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialHashOptions {
  /// Digest algorithm override.
  #[serde(alias = "hash")]
  pub algorithm: Option<String>,
  /// Digest encoding override.
  pub encoding: Option<String>,
  /// Truncation override.
  pub max_length: Option<usize>,
}

/// User-supplied options as read from a config file or built by a host.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialAssetOptions {
  /// Mode override.
  #[serde(alias = "url")]
  pub mode: Option<AssetMode>,
  /// Rebase root override.
  pub rebase_path: Option<PathBuf>,
  /// Inline threshold override; an explicit `null` removes the threshold.
  #[serde(default, alias = "maxSize", deserialize_with = "present_or_null")]
  pub max_inline_size_kib: Option<Option<u64>>,
  /// Public path override.
  pub public_path: Option<String>,
  /// Assets sub-directory override.
  pub assets_path: Option<String>,
  /// Output directory override.
  pub output_dir: Option<PathBuf>,
  /// Name template override.
  pub name_format: Option<String>,
  /// Hash naming override.
  pub use_hash: Option<bool>,
  /// Keep-name override.
  pub keep_name: Option<bool>,
  /// Nested hash settings, merged field by field.
  pub hash_options: Option<PartialHashOptions>,
  /// Keep-import override.
  pub keep_import: Option<bool>,
  /// Source map override.
  pub source_map: Option<bool>,
  /// Extension list override (replaces the defaults).
  pub extensions: Option<Vec<String>>,
  /// Include patterns override.
  pub include: Option<Vec<String>>,
  /// Exclude patterns override.
  pub exclude: Option<Vec<String>>,
}

/// Keeps a present `null` apart from an absent key.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

impl PartialAssetOptions {
  /// Read options from a JSON or YAML file, chosen by extension.
  pub fn from_path(path: &Path) -> AssetResult<Self> {
    let content = fs::read_to_string(path).map_err(|err| AssetError::io(path, err))?;
    let is_yaml = matches!(
      path.extension().and_then(|ext| ext.to_str()),
      Some("yaml" | "yml")
    );

    let parsed = if is_yaml {
      serde_yaml::from_str(&content).map_err(|err| err.to_string())
    } else {
      serde_json::from_str(&content).map_err(|err| err.to_string())
    };

    parsed.map_err(|message| AssetError::Config {
      path: path.to_path_buf(),
      message,
    })
  }
}

impl AssetOptions {
  /// Overlay user options on top of the defaults.
  pub fn from_partial(partial: PartialAssetOptions) -> Self {
    Self::default().merge(partial)
  }

  /// Overlay every field present in `partial`, merging hash settings field by field.
  pub fn merge(mut self, partial: PartialAssetOptions) -> Self {
    let PartialAssetOptions {
      mode,
      rebase_path,
      max_inline_size_kib,
      public_path,
      assets_path,
      output_dir,
      name_format,
      use_hash,
      keep_name,
      hash_options,
      keep_import,
      source_map,
      extensions,
      include,
      exclude,
    } = partial;

    if let Some(mode) = mode {
      self.mode = mode;
    }
    if let Some(rebase_path) = rebase_path {
      self.rebase_path = rebase_path;
    }
    if let Some(max_inline_size_kib) = max_inline_size_kib {
      self.max_inline_size_kib = max_inline_size_kib;
    }
    if public_path.is_some() {
      self.public_path = public_path;
    }
    if assets_path.is_some() {
      self.assets_path = assets_path;
    }
    if output_dir.is_some() {
      self.output_dir = output_dir;
    }
    if name_format.is_some() {
      self.name_format = name_format;
    }
    if let Some(use_hash) = use_hash {
      self.use_hash = use_hash;
    }
    if let Some(keep_name) = keep_name {
      self.keep_name = keep_name;
    }
    if let Some(hash) = hash_options {
      if let Some(algorithm) = hash.algorithm {
        self.hash.algorithm = algorithm;
      }
      if let Some(encoding) = hash.encoding {
        self.hash.encoding = encoding;
      }
      if hash.max_length.is_some() {
        self.hash.max_length = hash.max_length;
      }
    }
    if let Some(keep_import) = keep_import {
      self.keep_import = keep_import;
    }
    if let Some(source_map) = source_map {
      self.source_map = source_map;
    }
    if let Some(extensions) = extensions {
      self.extensions = extensions;
    }
    if let Some(include) = include {
      self.include = include;
    }
    if let Some(exclude) = exclude {
      self.exclude = exclude;
    }

    self
  }

  /// Look for a config file in `dir`, falling back to defaults when none exists.
  ///
  /// Unlike a missing file, a config file that exists but fails to parse is an error.
  pub fn discover(dir: &Path) -> AssetResult<Self> {
    for candidate in CONFIG_FILE_CANDIDATES {
      let path = dir.join(candidate);
      if path.is_file() {
        return PartialAssetOptions::from_path(&path).map(Self::from_partial);
      }
    }
    Ok(Self::default())
  }

  /// Whether any configured naming needs a content hash.
  pub fn needs_hash(&self) -> bool {
    match &self.name_format {
      Some(format) => format.contains("[hash]"),
      None => self.use_hash,
    }
  }
}
