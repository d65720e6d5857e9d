/* src/cli/src/build/html.rs */

// HTML entry-page generation: inject the hashed bundle filenames into the
// template's script slot and write the result to its configured path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use plinth_server::BundleManifest;

use crate::config::FrontendSection;

pub(crate) const SCRIPT_SLOT: &str = "<!--plinth:scripts-->";

/// Replace the script slot with one `<script>` tag per manifest entry.
pub(crate) fn render_template(
  template: &str,
  manifest: &BundleManifest,
  public_path: &str,
) -> Result<String> {
  if !template.contains(SCRIPT_SLOT) {
    bail!("template is missing the {SCRIPT_SLOT} slot");
  }
  let public_path = public_path.trim_end_matches('/');
  let tags: Vec<String> = manifest
    .entries
    .values()
    .map(|asset| format!(r#"<script src="{public_path}/{}"></script>"#, asset.file))
    .collect();
  Ok(template.replace(SCRIPT_SLOT, &tags.join("\n")))
}

/// Read the template, render it, and overwrite the generated entry page.
pub(crate) fn generate_html(
  base_dir: &Path,
  frontend: &FrontendSection,
  manifest: &BundleManifest,
) -> Result<PathBuf> {
  let template_path = base_dir.join(&frontend.template);
  let template = std::fs::read_to_string(&template_path)
    .with_context(|| format!("failed to read template {}", template_path.display()))?;

  let html = render_template(&template, manifest, &frontend.public_path)?;

  let out_path = base_dir.join(&frontend.html_out);
  if let Some(parent) = out_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::write(&out_path, &html)
    .with_context(|| format!("failed to write {}", out_path.display()))?;
  Ok(out_path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use plinth_server::AssetEntry;

  fn manifest_with(file: &str) -> BundleManifest {
    let mut manifest = BundleManifest::new();
    manifest.insert("app", AssetEntry { file: file.to_string(), source_map: None });
    manifest
  }

  #[test]
  fn injects_current_bundle_filename() {
    let template = "<html><body><!--plinth:scripts--></body></html>";
    let html =
      render_template(template, &manifest_with("app.bundle.1a2b3c4d.js"), "/dist").unwrap();
    assert!(html.contains(r#"<script src="/dist/app.bundle.1a2b3c4d.js"></script>"#));
    assert!(!html.contains(SCRIPT_SLOT));
  }

  #[test]
  fn rerender_drops_stale_filename() {
    let template = "<html><body><!--plinth:scripts--></body></html>";
    let first = render_template(template, &manifest_with("app.bundle.aaaa.js"), "/dist").unwrap();
    let second = render_template(template, &manifest_with("app.bundle.bbbb.js"), "/dist").unwrap();
    assert!(first.contains("app.bundle.aaaa.js"));
    assert!(!second.contains("app.bundle.aaaa.js"));
    assert!(second.contains("app.bundle.bbbb.js"));
  }

  #[test]
  fn missing_slot_is_an_error() {
    let err = render_template("<html></html>", &manifest_with("a.js"), "/dist").unwrap_err();
    assert!(format!("{err}").contains("plinth:scripts"));
  }

  #[test]
  fn trailing_slash_in_public_path_is_normalized() {
    let html = render_template(
      "<!--plinth:scripts-->",
      &manifest_with("app.bundle.cc.js"),
      "/dist/",
    )
    .unwrap();
    assert!(html.contains(r#"src="/dist/app.bundle.cc.js""#));
  }

  #[test]
  fn generate_html_overwrites_previous_output() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("views")).unwrap();
    std::fs::write(
      tmp.path().join("views/index.template.html"),
      "<html><!--plinth:scripts--></html>",
    )
    .unwrap();
    let frontend = FrontendSection::default();

    let path = generate_html(tmp.path(), &frontend, &manifest_with("app.bundle.aaaa.js")).unwrap();
    assert_eq!(path, tmp.path().join("views/index.html"));
    generate_html(tmp.path(), &frontend, &manifest_with("app.bundle.bbbb.js")).unwrap();

    let html = std::fs::read_to_string(path).unwrap();
    assert!(!html.contains("aaaa"));
    assert!(html.contains("app.bundle.bbbb.js"));
  }
}
