//! Command-line front end: resolves asset files the way the bundler plugin
//! would and materializes copy-mode assets into an output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use smart_asset::logging::{LogLevel, init_logging};
use smart_asset::{
  AssetMode, AssetOptions, AssetSession, OutputTarget, PartialAssetOptions,
};

#[derive(Debug, Parser)]
#[command(name = "smart-asset", version, about = "Inline, copy or rebase asset files")]
struct Cli {
  /// Asset files to resolve.
  #[arg(required = true)]
  files: Vec<String>,

  /// Configuration file (JSON or YAML); discovered in the working directory when omitted.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Mode override: rebase, inline or copy.
  #[arg(long)]
  mode: Option<String>,

  /// Inline threshold in KiB for inline mode; 0 inlines every file.
  #[arg(long)]
  max_size: Option<u64>,

  /// Directory the bundle is written to.
  #[arg(long, default_value = "dist")]
  out_dir: PathBuf,

  /// Sub-directory of the output for copied assets.
  #[arg(long)]
  assets_path: Option<String>,

  /// Prefix for public asset URLs.
  #[arg(long)]
  public_path: Option<String>,

  /// Name copied assets by content hash.
  #[arg(long)]
  use_hash: bool,

  /// Keep the original name in front of the hash.
  #[arg(long)]
  keep_name: bool,

  /// Export `require(...)` expressions instead of strings.
  #[arg(long)]
  keep_import: bool,

  /// Resolve only; do not copy anything.
  #[arg(long)]
  dry_run: bool,

  /// Log verbosity (silent, error, warn, info, debug).
  #[arg(long, default_value_t = LogLevel::Warn)]
  log_level: LogLevel,
}

impl Cli {
  fn load_options(&self) -> Result<AssetOptions> {
    let base = match &self.config {
      Some(path) => PartialAssetOptions::from_path(path)
        .map(AssetOptions::from_partial)
        .with_context(|| format!("failed to load {}", path.display()))?,
      None => {
        let cwd = std::env::current_dir().context("failed to read working directory")?;
        AssetOptions::discover(&cwd)?
      }
    };

    let overrides = PartialAssetOptions {
      mode: self.mode.clone().map(AssetMode::from),
      max_inline_size_kib: self.max_size.map(Some),
      assets_path: self.assets_path.clone(),
      public_path: self.public_path.clone(),
      use_hash: self.use_hash.then_some(true),
      keep_name: self.keep_name.then_some(true),
      keep_import: self.keep_import.then_some(true),
      ..Default::default()
    };
    Ok(base.merge(overrides))
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.log_level);

  let options = cli.load_options()?;
  let session = AssetSession::new(options)?;

  for file in &cli.files {
    let resolved = session
      .load(file)
      .await
      .with_context(|| format!("failed to resolve {file}"))?;
    match resolved {
      Some(module) => {
        let export = module.code.lines().last().unwrap_or_default();
        println!("{file}\t{export}");
      }
      None => println!("{file}\t(skipped)"),
    }
  }

  let report = session
    .generate_bundle(&OutputTarget::Dir(cli.out_dir.clone()), !cli.dry_run)
    .await;
  for destination in &report.copied {
    println!("copied\t{}", destination.display());
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_max_size_overrides_config_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("assets.json");
    std::fs::write(&config, r#"{ "mode": "inline", "maxSize": 4 }"#).unwrap();

    let cli = Cli::try_parse_from([
      "smart-asset",
      "--config",
      config.to_str().unwrap(),
      "--max-size",
      "0",
      "logo.png",
    ])
    .unwrap();
    let options = cli.load_options().unwrap();
    assert_eq!(options.mode, AssetMode::Inline);
    assert_eq!(options.max_inline_size_kib, Some(0));
  }

  #[test]
  fn config_threshold_survives_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("assets.yaml");
    std::fs::write(&config, "maxSize: 4\n").unwrap();

    let cli = Cli::try_parse_from(["smart-asset", "--config", config.to_str().unwrap(), "a.png"])
      .unwrap();
    assert_eq!(cli.load_options().unwrap().max_inline_size_kib, Some(4));
  }
}
