/* src/cli/src/clean.rs */

// `plinth clean` command: removes build output, the generated entry page,
// and runs user-defined cleanup commands.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PlinthConfig;
use crate::shell::run_command;
use crate::ui;

pub fn run_clean(config: &PlinthConfig, base_dir: &Path) -> Result<()> {
  ui::arrow("cleaning project");

  delete_dir_if_exists(&base_dir.join(&config.frontend.out_dir))?;
  delete_dir_if_exists(&base_dir.join(&config.build.dist_dir))?;
  delete_file_if_exists(&base_dir.join(&config.frontend.html_out))?;
  for cmd in &config.clean.commands {
    run_command(base_dir, cmd, "clean", &[])?;
  }

  ui::ok("clean complete");
  Ok(())
}

fn delete_dir_if_exists(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_dir_all(path)
      .with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", path.display()));
  }
  Ok(())
}

fn delete_file_if_exists(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_file(path)
      .with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", path.display()));
  }
  Ok(())
}
