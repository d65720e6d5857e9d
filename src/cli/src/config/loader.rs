/* src/cli/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::PlinthConfig;

pub const CONFIG_FILE: &str = "plinth.toml";

/// Walk up from `start` looking for plinth.toml.
pub fn find_config(start: &Path) -> Result<PathBuf> {
  let mut dir = start.to_path_buf();
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.exists() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("no {CONFIG_FILE} found in {} or any parent directory", start.display());
    }
  }
}

pub fn load_config(path: &Path) -> Result<PlinthConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  let config: PlinthConfig =
    toml::from_str(&content).with_context(|| format!("invalid config in {}", path.display()))?;
  if config.project.name.is_empty() {
    bail!("project.name must not be empty in {}", path.display());
  }
  Ok(config)
}
