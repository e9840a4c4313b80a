//! MIME type lookup for data URIs.

use std::path::Path;

/// MIME type constants, without charset parameters.
#[allow(missing_docs)]
pub mod types {
  pub const PLAIN: &str = "text/plain";
  pub const HTML: &str = "text/html";
  pub const CSS: &str = "text/css";
  pub const JAVASCRIPT: &str = "text/javascript";
  pub const CSV: &str = "text/csv";
  pub const MARKDOWN: &str = "text/markdown";
  pub const JSON: &str = "application/json";
  pub const XML: &str = "application/xml";
  pub const PDF: &str = "application/pdf";
  pub const WASM: &str = "application/wasm";
  pub const OCTET_STREAM: &str = "application/octet-stream";

  pub const PNG: &str = "image/png";
  pub const JPEG: &str = "image/jpeg";
  pub const GIF: &str = "image/gif";
  pub const WEBP: &str = "image/webp";
  pub const AVIF: &str = "image/avif";
  pub const SVG: &str = "image/svg+xml";
  pub const ICO: &str = "image/x-icon";
  pub const BMP: &str = "image/bmp";
  pub const TIFF: &str = "image/tiff";

  pub const MP3: &str = "audio/mpeg";
  pub const WAV: &str = "audio/wav";
  pub const OGG_AUDIO: &str = "audio/ogg";
  pub const FLAC: &str = "audio/flac";
  pub const AAC: &str = "audio/aac";

  pub const MP4: &str = "video/mp4";
  pub const WEBM: &str = "video/webm";
  pub const OGG_VIDEO: &str = "video/ogg";

  pub const WOFF: &str = "font/woff";
  pub const WOFF2: &str = "font/woff2";
  pub const TTF: &str = "font/ttf";
  pub const OTF: &str = "font/otf";
  pub const EOT: &str = "application/vnd.ms-fontobject";
}

/// Guess the MIME type of a file from its extension.
pub fn from_path(path: &Path) -> &'static str {
  let ext = path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| ext.to_ascii_lowercase());
  from_extension(ext.as_deref())
}

/// Guess the MIME type from an extension without the leading dot.
pub fn from_extension(ext: Option<&str>) -> &'static str {
  match ext {
    Some("txt" | "text") => types::PLAIN,
    Some("html" | "htm") => types::HTML,
    Some("css") => types::CSS,
    Some("js" | "mjs" | "cjs") => types::JAVASCRIPT,
    Some("csv") => types::CSV,
    Some("md" | "markdown") => types::MARKDOWN,
    Some("json") => types::JSON,
    Some("xml") => types::XML,
    Some("pdf") => types::PDF,
    Some("wasm") => types::WASM,

    Some("png") => types::PNG,
    Some("jpg" | "jpeg") => types::JPEG,
    Some("gif") => types::GIF,
    Some("webp") => types::WEBP,
    Some("avif") => types::AVIF,
    Some("svg") => types::SVG,
    Some("ico") => types::ICO,
    Some("bmp") => types::BMP,
    Some("tif" | "tiff") => types::TIFF,

    Some("mp3") => types::MP3,
    Some("wav") => types::WAV,
    Some("ogg" | "oga") => types::OGG_AUDIO,
    Some("flac") => types::FLAC,
    Some("aac" | "m4a") => types::AAC,

    Some("mp4" | "m4v") => types::MP4,
    Some("webm") => types::WEBM,
    Some("ogv") => types::OGG_VIDEO,

    Some("woff") => types::WOFF,
    Some("woff2") => types::WOFF2,
    Some("ttf") => types::TTF,
    Some("otf") => types::OTF,
    Some("eot") => types::EOT,

    _ => types::OCTET_STREAM,
  }
}
