use std::fs;
use std::sync::Arc;

use smart_asset::hashing::hash_bytes;
use smart_asset::{
  AssetMode, AssetOptions, AssetSession, CollectedWarnings, MARKER_COMMENT, ModuleMap,
  OutputTarget,
};
use tempfile::tempdir;

fn session_with_warnings(options: AssetOptions) -> (AssetSession, CollectedWarnings) {
  let warnings = CollectedWarnings::new();
  let session = AssetSession::builder(options)
    .warnings(Arc::new(warnings.clone()))
    .build()
    .unwrap();
  (session, warnings)
}

#[tokio::test]
async fn copies_hashed_assets_into_every_output_target() {
  let temp = tempdir().unwrap();
  let src = temp.path().join("src");
  fs::create_dir_all(&src).unwrap();
  let logo = src.join("logo.png");
  fs::write(&logo, b"\x89PNG fake").unwrap();

  let options = AssetOptions {
    mode: AssetMode::Copy,
    use_hash: true,
    keep_name: true,
    assets_path: Some("assets".into()),
    public_path: Some("/static".into()),
    ..Default::default()
  };
  let expected_hash = hash_bytes(b"\x89PNG fake", &options.hash).unwrap();
  let expected_name = format!("logo~{expected_hash}.png");
  let (session, warnings) = session_with_warnings(options);

  let id = logo.to_string_lossy().into_owned();
  let module = session.load(&id).await.unwrap().unwrap();
  assert_eq!(module.reference, format!("/static/{expected_name}"));
  assert_eq!(
    module.code,
    format!("{MARKER_COMMENT}\nexport default \"/static/{expected_name}\"")
  );

  let cjs = temp.path().join("dist/cjs");
  session
    .generate_bundle(&OutputTarget::Dir(cjs.clone()), true)
    .await;
  assert_eq!(
    fs::read(cjs.join("assets").join(&expected_name)).unwrap(),
    b"\x89PNG fake"
  );

  let esm = temp.path().join("dist/esm");
  let report = session
    .generate_bundle(&OutputTarget::Dir(esm.clone()), true)
    .await;
  assert!(report.copied.is_empty());
  assert!(!esm.exists());
  assert!(warnings.messages().is_empty());
}

#[tokio::test]
async fn inlines_small_files_and_copies_large_ones() {
  let temp = tempdir().unwrap();
  let small = temp.path().join("small.txt");
  let large = temp.path().join("large.txt");
  fs::write(&small, b"text").unwrap();
  fs::write(&large, vec![b'x'; 1025]).unwrap();

  let (session, _) = session_with_warnings(AssetOptions {
    mode: AssetMode::Inline,
    max_inline_size_kib: Some(1),
    extensions: vec![".txt".into()],
    ..Default::default()
  });

  let small_module = session
    .load(&small.to_string_lossy())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(small_module.reference, "data:text/plain;base64,dGV4dA==");

  let large_module = session
    .load(&large.to_string_lossy())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(large_module.mode, AssetMode::Copy);
  assert_eq!(large_module.reference, "large.txt");

  let bundle = temp.path().join("out/bundle.js");
  session
    .generate_bundle(&OutputTarget::File(bundle), true)
    .await;
  assert!(temp.path().join("out/large.txt").exists());
  assert!(!temp.path().join("out/small.txt").exists());
}

#[tokio::test]
async fn zero_inline_threshold_inlines_everything() {
  let temp = tempdir().unwrap();
  let file = temp.path().join("a.txt");
  fs::write(&file, b"text").unwrap();

  let (session, _) = session_with_warnings(AssetOptions {
    mode: AssetMode::Inline,
    max_inline_size_kib: Some(0),
    extensions: vec![".txt".into()],
    ..Default::default()
  });

  let module = session
    .load(&file.to_string_lossy())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(module.mode, AssetMode::Inline);
  assert_eq!(module.reference, "data:text/plain;base64,dGV4dA==");
  assert!(session.pending_jobs().is_empty());
}

#[tokio::test]
async fn sha1_hex_names_from_config() {
  let temp = tempdir().unwrap();
  let logo = temp.path().join("logo.png");
  fs::write(&logo, b"text").unwrap();
  let config = temp.path().join("smart-asset.config.json");
  fs::write(
    &config,
    r#"{ "url": "copy", "useHash": true, "hashOptions": { "hash": "sha1", "encoding": "hex", "maxLength": 32 } }"#,
  )
  .unwrap();

  let options = AssetOptions::discover(temp.path()).unwrap();
  let (session, _) = session_with_warnings(options);
  let module = session
    .load(&logo.to_string_lossy())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(module.reference, "372ea08cab33e71c02c651dbc83a474d.png");
}

#[tokio::test]
async fn missing_source_warns_without_aborting_batch() {
  let temp = tempdir().unwrap();
  let present = temp.path().join("present.png");
  fs::write(&present, b"ok").unwrap();
  let missing = temp.path().join("missing.png");

  let (session, warnings) = session_with_warnings(AssetOptions {
    mode: AssetMode::Copy,
    ..Default::default()
  });

  session.load(&missing.to_string_lossy()).await.unwrap();
  session.load(&present.to_string_lossy()).await.unwrap();

  let out = temp.path().join("dist");
  let report = session
    .generate_bundle(&OutputTarget::Dir(out.clone()), true)
    .await;

  assert_eq!(report.failed, vec![missing.clone()]);
  assert!(out.join("present.png").exists());
  assert_eq!(
    warnings.messages(),
    vec![format!("Unable to copy asset: {}", missing.display())]
  );
  assert!(session.pending_jobs().is_empty());
}

#[tokio::test]
async fn rebases_and_maps_through_transform() {
  let temp = tempdir().unwrap();
  let vendor = temp.path().join("node_modules/pkg/icons");
  fs::create_dir_all(&vendor).unwrap();
  let icon = vendor.join("star.svg");
  fs::write(&icon, "<svg/>").unwrap();

  let (session, _) = session_with_warnings(AssetOptions {
    rebase_path: temp.path().join("node_modules"),
    keep_import: true,
    source_map: true,
    ..Default::default()
  });

  let id = icon.to_string_lossy().into_owned();
  let output = session.transform("<svg/>", &id).await.unwrap().unwrap();
  assert_eq!(
    output.code,
    format!("{MARKER_COMMENT}\nexport default require(\"./pkg/icons/star.svg\")")
  );
  let ModuleMap::Full(map) = output.map else {
    panic!("expected full source map");
  };
  assert_eq!(map.sources, vec![id.clone()]);

  assert!(session.transform(&output.code, &id).await.unwrap().is_none());
}

#[tokio::test]
async fn skips_unmatched_modules() {
  let (session, _) = session_with_warnings(AssetOptions::default());
  assert!(session.load("src/index.js").await.unwrap().is_none());
  assert!(session
    .transform("export {}", "src/index.js")
    .await
    .unwrap()
    .is_none());
  assert!(session.pending_jobs().is_empty());
}
