//! Content hashing for hashed asset names.
//!
//! `hash(bytes, algorithm, encoding, max_length)` is deterministic; the
//! truncation applies to the encoded string, never to the raw digest.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use twox_hash::{XxHash32, XxHash64};

use crate::config::HashOptions;
use crate::error::{AssetError, AssetResult};
use crate::fs::AssetFs;

const XXHASH_SEED: u32 = 0xcafe_babe;

const BASE26: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const BASE32: &[u8] = b"123456789abcdefghjkmnpqrstuvwxyz";
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const BASE52: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE58: &[u8] = b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";
const BASE62: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Computes the content tag embedded in hashed asset names.
#[async_trait]
pub trait ContentHasher: Send + Sync {
  /// Hash the file at `path` according to `options`.
  async fn hash(&self, path: &Path, options: &HashOptions) -> AssetResult<String>;
}

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
  /// SHA-1.
  Sha1,
  /// MD5.
  Md5,
  /// SHA-256 from the SHA-2 family.
  Sha256,
  /// SHA-512 from the SHA-2 family.
  Sha512,
  /// BLAKE3 with a 256-bit output.
  Blake3,
  /// 32-bit xxHash, big-endian digest.
  XxHash32,
  /// 64-bit xxHash, big-endian digest.
  XxHash64,
}

impl FromStr for HashAlgorithm {
  type Err = AssetError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value.to_ascii_lowercase().as_str() {
      "sha1" => Ok(Self::Sha1),
      "md5" => Ok(Self::Md5),
      "sha256" => Ok(Self::Sha256),
      "sha512" => Ok(Self::Sha512),
      "blake3" => Ok(Self::Blake3),
      "xxhash32" => Ok(Self::XxHash32),
      "xxhash64" => Ok(Self::XxHash64),
      _ => Err(AssetError::UnsupportedAlgorithm {
        algorithm: value.to_string(),
      }),
    }
  }
}

impl HashAlgorithm {
  fn digest(self, bytes: &[u8]) -> Vec<u8> {
    match self {
      Self::Sha1 => Sha1::digest(bytes).to_vec(),
      Self::Md5 => Md5::digest(bytes).to_vec(),
      Self::Sha256 => Sha256::digest(bytes).to_vec(),
      Self::Sha512 => Sha512::digest(bytes).to_vec(),
      Self::Blake3 => blake3::hash(bytes).as_bytes().to_vec(),
      Self::XxHash32 => XxHash32::oneshot(XXHASH_SEED, bytes).to_be_bytes().to_vec(),
      Self::XxHash64 => XxHash64::oneshot(u64::from(XXHASH_SEED), bytes)
        .to_be_bytes()
        .to_vec(),
    }
  }
}

/// Supported digest encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashEncoding {
  /// Lowercase hexadecimal.
  Hex,
  /// Standard base64 with padding.
  Base64,
  /// URL-safe base64 without padding.
  Base64Url,
  /// Big-number conversion over a fixed alphabet.
  Alphabet(&'static [u8]),
}

impl FromStr for HashEncoding {
  type Err = AssetError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    let encoding = match value.to_ascii_lowercase().as_str() {
      "hex" => Self::Hex,
      "base64" => Self::Base64,
      "base64url" => Self::Base64Url,
      "base26" => Self::Alphabet(BASE26),
      "base32" => Self::Alphabet(BASE32),
      "base36" => Self::Alphabet(BASE36),
      "base52" => Self::Alphabet(BASE52),
      "base58" => Self::Alphabet(BASE58),
      "base62" => Self::Alphabet(BASE62),
      _ => {
        return Err(AssetError::UnsupportedEncoding {
          encoding: value.to_string(),
        });
      }
    };
    Ok(encoding)
  }
}

impl HashEncoding {
  fn encode(self, digest: &[u8]) -> String {
    match self {
      Self::Hex => hex::encode(digest),
      Self::Base64 => general_purpose::STANDARD.encode(digest),
      Self::Base64Url => general_purpose::URL_SAFE_NO_PAD.encode(digest),
      Self::Alphabet(alphabet) => encode_with_alphabet(digest, alphabet),
    }
  }
}

impl HashOptions {
  /// Check that algorithm and encoding are supported.
  pub fn validate(&self) -> AssetResult<()> {
    self.algorithm.parse::<HashAlgorithm>()?;
    self.encoding.parse::<HashEncoding>()?;
    Ok(())
  }
}

/// Hash raw bytes with the configured algorithm, encoding and truncation.
pub fn hash_bytes(bytes: &[u8], options: &HashOptions) -> AssetResult<String> {
  let algorithm: HashAlgorithm = options.algorithm.parse()?;
  let encoding: HashEncoding = options.encoding.parse()?;

  let encoded = encoding.encode(&algorithm.digest(bytes));
  Ok(match options.max_length {
    Some(max) => encoded.chars().take(max).collect(),
    None => encoded,
  })
}

/// Treat `bytes` as a big-endian integer and write it in base `alphabet.len()`.
fn encode_with_alphabet(bytes: &[u8], alphabet: &[u8]) -> String {
  let base = alphabet.len() as u32;
  let mut digits = bytes.to_vec();
  let mut output = Vec::new();
  let mut start = 0;

  while start < digits.len() {
    if digits[start] == 0 {
      start += 1;
      continue;
    }

    let mut remainder = 0u32;
    for digit in digits[start..].iter_mut() {
      let acc = (remainder << 8) | u32::from(*digit);
      *digit = (acc / base) as u8;
      remainder = acc % base;
    }
    output.push(alphabet[remainder as usize]);
  }

  if output.is_empty() {
    output.push(alphabet[0]);
  }
  output.reverse();
  output.into_iter().map(char::from).collect()
}

/// Default hasher: reads the file through an [`AssetFs`] and digests it.
#[derive(Clone)]
pub struct DigestHasher {
  fs: Arc<dyn AssetFs>,
}

impl DigestHasher {
  /// Create a hasher reading through `fs`.
  pub fn new(fs: Arc<dyn AssetFs>) -> Self {
    Self { fs }
  }
}

#[async_trait]
impl ContentHasher for DigestHasher {
  async fn hash(&self, path: &Path, options: &HashOptions) -> AssetResult<String> {
    let content = self
      .fs
      .read(path)
      .await
      .map_err(|err| AssetError::io(path, err))?;
    hash_bytes(&content, options)
  }
}
