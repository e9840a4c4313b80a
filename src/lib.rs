#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod error;
pub mod fs;
pub mod hashing;
pub mod logging;
pub mod materialize;
pub mod mime;
pub mod mode;
pub mod models;
pub mod naming;
pub mod pipeline;
pub mod queue;
pub mod reference;
pub mod session;
pub mod sourcemap;
pub mod warnings;

#[cfg(test)]
mod testing;

pub use config::{AssetOptions, HashOptions, PartialAssetOptions, PartialHashOptions};
pub use error::{AssetError, AssetResult};
pub use fs::{AssetFs, TokioFs};
pub use hashing::{ContentHasher, DigestHasher};
pub use models::{
  AssetMode, MaterializeReport, ModuleOutput, OutputTarget, PendingCopyJob, ResolvedModule,
};
pub use pipeline::MARKER_COMMENT;
pub use session::{AssetSession, AssetSessionBuilder, PLUGIN_NAME};
pub use sourcemap::{ModuleMap, SourceMap};
pub use warnings::{CollectedWarnings, TracingWarnings, WarningSink};
