//! Source maps for replaced asset modules.

use serde::Serialize;

/// Revision 3 source map document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
  /// Always `3`.
  pub version: u8,
  /// Module id the map points back to.
  pub sources: Vec<String>,
  /// Original module content.
  pub sources_content: Vec<String>,
  /// Unused; present for consumers that require it.
  pub names: Vec<String>,
  /// Base64 VLQ mappings.
  pub mappings: String,
}

impl SourceMap {
  /// Map for a full-document overwrite of `original` by `generated`.
  ///
  /// The generated text replaces the whole original, so it has no columns
  /// that correspond to original characters. Each generated line gets one
  /// segment at column 0 pointing at the start of the original document;
  /// with zero deltas that segment encodes as `AAAA`. Later columns on a line
  /// resolve to the same origin through that segment.
  pub fn overwrite(id: &str, original: &str, generated: &str) -> Self {
    let line_count = generated.split('\n').count();
    Self {
      version: 3,
      sources: vec![id.to_string()],
      sources_content: vec![original.to_string()],
      names: Vec::new(),
      mappings: vec!["AAAA"; line_count].join(";"),
    }
  }
}

/// Map attached to a transform result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleMap {
  /// `{ "mappings": "" }`: tells the host no mapping is needed.
  Empty,
  /// Full document map.
  Full(SourceMap),
}

impl ModuleMap {
  /// Serialize the map as JSON for the host.
  pub fn to_json(&self) -> serde_json::Result<String> {
    match self {
      Self::Empty => Ok(serde_json::json!({ "mappings": "" }).to_string()),
      Self::Full(map) => serde_json::to_string(map),
    }
  }
}
