/* src/cli/src/build/hash.rs */

use sha2::{Digest, Sha256};

/// Hex content hash over the given byte slices, truncated to `length` chars.
/// Release builds hash one chunk at a time (`chunkhash`); development builds
/// hash every emitted chunk together (one build-wide hash).
pub(crate) fn content_hash(parts: &[&[u8]], length: usize) -> String {
  let mut hasher = Sha256::new();
  for part in parts {
    hasher.update(part);
  }
  let hex = hex::encode(hasher.finalize());
  hex[..length.min(hex.len())].to_string()
}
