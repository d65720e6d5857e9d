/* src/server/core/src/manifest.rs */

// Bundle manifest: maps entry names to the content-hashed output filenames the
// build pipeline emitted. Written by `plinth build`, read back when serving.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::PlinthError;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
  /// Hashed output filename, relative to the output directory
  pub file: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_map: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleManifest {
  pub version: u32,
  pub entries: BTreeMap<String, AssetEntry>,
}

impl BundleManifest {
  pub fn new() -> Self {
    Self { version: 1, entries: BTreeMap::new() }
  }

  pub fn insert(&mut self, entry: impl Into<String>, asset: AssetEntry) {
    self.entries.insert(entry.into(), asset);
  }

  pub fn get(&self, entry: &str) -> Option<&AssetEntry> {
    self.entries.get(entry)
  }

  /// Read `manifest.json` from a build output directory.
  pub fn load(out_dir: &Path) -> Result<Self, PlinthError> {
    let path = out_dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|e| {
      PlinthError::not_found(format!("failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content)
      .map_err(|e| PlinthError::internal(format!("invalid manifest at {}: {e}", path.display())))
  }

  /// Write `manifest.json` into a build output directory.
  pub fn save(&self, out_dir: &Path) -> Result<(), PlinthError> {
    let path = out_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(self)
      .map_err(|e| PlinthError::internal(format!("failed to serialize manifest: {e}")))?;
    std::fs::write(&path, format!("{json}\n")).map_err(|e| {
      PlinthError::internal(format!("failed to write {}: {e}", path.display()))
    })
  }
}

impl Default for BundleManifest {
  fn default() -> Self {
    Self::new()
  }
}
