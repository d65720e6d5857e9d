/* src/cli/src/build/run.rs */

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use plinth_server::BundleManifest;

use super::hash::content_hash;
use super::html;
use super::output::{self, Chunk};
use crate::config::PlinthConfig;
use crate::shell::run_command;
use crate::ui::{self, DIM, RESET};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
  Development,
  Release,
}

impl BuildMode {
  /// `NODE_ENV=production` means release; anything else (or unset) is
  /// development. The --release flag forces release.
  pub fn from_env(release_flag: bool) -> Self {
    if release_flag || std::env::var("NODE_ENV").as_deref() == Ok("production") {
      Self::Release
    } else {
      Self::Development
    }
  }

  pub fn node_env(self) -> &'static str {
    match self {
      Self::Development => "development",
      Self::Release => "production",
    }
  }

  fn label(self) -> &'static str {
    match self {
      Self::Development => "development",
      Self::Release => "release",
    }
  }
}

/// Output filenames for the chunks, pairing by index.
/// Release: per-chunk content hash. Development: one hash for the whole build.
fn chunk_names(chunks: &[Chunk], mode: BuildMode, hash_length: usize) -> Vec<String> {
  match mode {
    BuildMode::Release => chunks
      .iter()
      .map(|c| format!("{}.bundle.{}.js", c.name, content_hash(&[&c.js], hash_length)))
      .collect(),
    BuildMode::Development => {
      let all: Vec<&[u8]> = chunks.iter().map(|c| c.js.as_slice()).collect();
      let build_hash = content_hash(&all, hash_length);
      chunks.iter().map(|c| format!("{}.bundle.{build_hash}.js", c.name)).collect()
    }
  }
}

pub fn run_build(config: &PlinthConfig, base_dir: &Path, mode: BuildMode) -> Result<BundleManifest> {
  let started = Instant::now();
  ui::arrow(&format!("building {} ({})", config.project.name, mode.label()));

  let entry = config
    .frontend
    .entry
    .as_deref()
    .context("frontend.entry is required in plinth.toml")?;
  let bundler = config
    .build
    .bundler_command
    .as_deref()
    .context("build.bundler_command is required in plinth.toml")?;

  let dist_dir = base_dir.join(&config.build.dist_dir);
  output::clear_dir(&dist_dir)?;
  run_command(
    base_dir,
    bundler,
    "bundler",
    &[
      ("NODE_ENV", mode.node_env()),
      ("PLINTH_ENTRY", entry),
      ("PLINTH_DIST_DIR", &config.build.dist_dir),
    ],
  )?;

  let chunks = output::collect_chunks(&dist_dir)?;
  ensure!(!chunks.is_empty(), "bundler produced no .js output in {}", dist_dir.display());

  let names = chunk_names(&chunks, mode, config.build.hash_length as usize);

  // Destination is cleared before any output lands
  let out_dir = base_dir.join(&config.frontend.out_dir);
  output::clear_dir(&out_dir)?;
  let manifest = output::emit_chunks(&out_dir, &chunks, &names, config.build.sourcemap)?;
  manifest.save(&out_dir)?;

  for asset in manifest.entries.values() {
    let size = std::fs::metadata(out_dir.join(&asset.file)).map(|m| m.len()).unwrap_or(0);
    ui::detail_ok(&format!(
      "{}/{}  {DIM}({}){RESET}",
      config.frontend.out_dir,
      asset.file,
      ui::format_size(size)
    ));
  }
  ui::detail_ok("manifest.json");

  html::generate_html(base_dir, &config.frontend, &manifest)?;
  ui::detail_ok(&config.frontend.html_out);

  ui::ok(&format!("build complete in {:.1}s", started.elapsed().as_secs_f64()));
  Ok(manifest)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn starter_config(bundler: &str) -> PlinthConfig {
    let toml_str = format!(
      r#"
[project]
name = "starter"

[frontend]
entry = "src/main.tsx"

[build]
bundler_command = '''{bundler}'''
"#
    );
    toml::from_str(&toml_str).unwrap()
  }

  fn scaffold(base: &Path) {
    std::fs::create_dir_all(base.join("views")).unwrap();
    std::fs::write(
      base.join("views/index.template.html"),
      "<html><body><!--plinth:scripts--></body></html>",
    )
    .unwrap();
  }

  // Copies a fixture source file into the dist dir, standing in for a real bundler
  const FAKE_BUNDLER: &str =
    "mkdir -p \"$PLINTH_DIST_DIR\" && cp src-fixture.js \"$PLINTH_DIST_DIR/app.js\"";

  #[test]
  fn hash_changes_iff_content_changes() {
    let tmp = tempfile::tempdir().unwrap();
    scaffold(tmp.path());
    let config = starter_config(FAKE_BUNDLER);

    std::fs::write(tmp.path().join("src-fixture.js"), "console.log(1)").unwrap();
    let first = run_build(&config, tmp.path(), BuildMode::Release).unwrap();
    let second = run_build(&config, tmp.path(), BuildMode::Release).unwrap();
    // Same source, same filename
    assert_eq!(first.get("app").unwrap().file, second.get("app").unwrap().file);

    std::fs::write(tmp.path().join("src-fixture.js"), "console.log(2)").unwrap();
    let third = run_build(&config, tmp.path(), BuildMode::Release).unwrap();
    assert_ne!(first.get("app").unwrap().file, third.get("app").unwrap().file);
  }

  #[test]
  fn generated_html_references_current_bundle() {
    let tmp = tempfile::tempdir().unwrap();
    scaffold(tmp.path());
    let config = starter_config(FAKE_BUNDLER);

    std::fs::write(tmp.path().join("src-fixture.js"), "console.log(1)").unwrap();
    let first = run_build(&config, tmp.path(), BuildMode::Release).unwrap();

    std::fs::write(tmp.path().join("src-fixture.js"), "console.log(2)").unwrap();
    let second = run_build(&config, tmp.path(), BuildMode::Release).unwrap();

    let html = std::fs::read_to_string(tmp.path().join("views/index.html")).unwrap();
    assert!(html.contains(&second.get("app").unwrap().file));
    assert!(!html.contains(&first.get("app").unwrap().file));
    // Stale bundle files are gone too: the destination was cleared
    assert!(!tmp.path().join("wwwroot/dist").join(&first.get("app").unwrap().file).exists());
  }

  #[test]
  fn failing_bundler_aborts_build() {
    let tmp = tempfile::tempdir().unwrap();
    scaffold(tmp.path());
    let config = starter_config("echo 'compile error' >&2; exit 1");

    let err = run_build(&config, tmp.path(), BuildMode::Release).unwrap_err();
    assert!(format!("{err:#}").contains("bundler exited"));
    // No partial output: manifest was never written
    assert!(!tmp.path().join("wwwroot/dist/manifest.json").exists());
  }

  #[test]
  fn empty_bundler_output_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    scaffold(tmp.path());
    let config = starter_config("mkdir -p \"$PLINTH_DIST_DIR\"");
    let err = run_build(&config, tmp.path(), BuildMode::Development).unwrap_err();
    assert!(format!("{err}").contains("no .js output"));
  }

  #[test]
  fn development_mode_uses_one_build_hash() {
    let tmp = tempfile::tempdir().unwrap();
    scaffold(tmp.path());
    let bundler = "mkdir -p \"$PLINTH_DIST_DIR\" && \
                   printf 'aaa' > \"$PLINTH_DIST_DIR/app.js\" && \
                   printf 'bbb' > \"$PLINTH_DIST_DIR/vendor.js\"";
    let config = starter_config(bundler);

    let manifest = run_build(&config, tmp.path(), BuildMode::Development).unwrap();
    let app = &manifest.get("app").unwrap().file;
    let vendor = &manifest.get("vendor").unwrap().file;
    let app_hash = app.trim_start_matches("app.bundle.").trim_end_matches(".js");
    let vendor_hash = vendor.trim_start_matches("vendor.bundle.").trim_end_matches(".js");
    assert_eq!(app_hash, vendor_hash);

    // Release mode: per-chunk hashes differ because contents differ
    let manifest = run_build(&config, tmp.path(), BuildMode::Release).unwrap();
    let app = &manifest.get("app").unwrap().file;
    let vendor = &manifest.get("vendor").unwrap().file;
    let app_hash = app.trim_start_matches("app.bundle.").trim_end_matches(".js");
    let vendor_hash = vendor.trim_start_matches("vendor.bundle.").trim_end_matches(".js");
    assert_ne!(app_hash, vendor_hash);
  }

  #[test]
  fn mode_from_env_respects_release_flag() {
    assert_eq!(BuildMode::from_env(true), BuildMode::Release);
  }
}
