//! Error types surfaced by asset resolution.
//!
//! Only conditions that stop the build live here. Unrecognized modes and
//! materialization failures are advisory and travel through the warning
//! channel instead (see [`crate::warnings`]).

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type AssetResult<T> = Result<T, AssetError>;

/// Build-stopping failures raised while resolving assets.
#[derive(Debug, Error)]
pub enum AssetError {
  /// The configured hash algorithm is not supported.
  #[error("unsupported hash algorithm `{algorithm}`")]
  UnsupportedAlgorithm {
    /// Algorithm name as configured.
    algorithm: String,
  },

  /// The configured digest encoding is not supported.
  #[error("unsupported hash encoding `{encoding}`")]
  UnsupportedEncoding {
    /// Encoding name as configured.
    encoding: String,
  },

  /// Reading or inspecting an asset failed.
  #[error("failed to access {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },

  /// A configuration file could not be read or parsed.
  #[error("invalid configuration in {}: {message}", path.display())]
  Config {
    /// Path of the configuration file.
    path: PathBuf,
    /// Parser message.
    message: String,
  },
}

impl AssetError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  /// Returns `true` for errors caused by a broken hash configuration.
  pub fn is_configuration(&self) -> bool {
    matches!(
      self,
      Self::UnsupportedAlgorithm { .. } | Self::UnsupportedEncoding { .. }
    )
  }
}
