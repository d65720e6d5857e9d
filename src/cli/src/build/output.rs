/* src/cli/src/build/output.rs */

// Bundle output handling: collect what the bundler emitted, then write the
// hash-named copies and the manifest into a cleared output directory.

use std::path::Path;

use anyhow::{Context, Result};
use plinth_server::{AssetEntry, BundleManifest};

/// One bundler-emitted bundle plus its optional source map.
pub(crate) struct Chunk {
  /// Entry name, derived from the emitted filename (`app.js` -> `app`)
  pub name: String,
  pub js: Vec<u8>,
  pub source_map: Option<Vec<u8>>,
}

/// Read `*.js` files (with `.js.map` siblings) from the bundler's dist
/// directory, sorted by name for deterministic output.
pub(crate) fn collect_chunks(dist_dir: &Path) -> Result<Vec<Chunk>> {
  let entries = std::fs::read_dir(dist_dir)
    .with_context(|| format!("failed to read bundler output {}", dist_dir.display()))?;

  let mut names: Vec<String> = Vec::new();
  for entry in entries {
    let entry = entry?;
    let file_name = entry.file_name().to_string_lossy().to_string();
    if let Some(stem) = file_name.strip_suffix(".js") {
      names.push(stem.to_string());
    }
  }
  names.sort();

  let mut chunks = Vec::new();
  for name in names {
    let js_path = dist_dir.join(format!("{name}.js"));
    let js = std::fs::read(&js_path)
      .with_context(|| format!("failed to read {}", js_path.display()))?;
    let map_path = dist_dir.join(format!("{name}.js.map"));
    let source_map = if map_path.exists() { Some(std::fs::read(&map_path)?) } else { None };
    chunks.push(Chunk { name, js, source_map });
  }
  Ok(chunks)
}

/// Delete a directory if present, then recreate it empty.
pub(crate) fn clear_dir(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_dir_all(path)
      .with_context(|| format!("failed to remove {}", path.display()))?;
  }
  std::fs::create_dir_all(path).with_context(|| format!("failed to create {}", path.display()))?;
  Ok(())
}

/// Write chunks under their hashed names and return the bundle manifest.
/// `names` pairs with `chunks` by index.
pub(crate) fn emit_chunks(
  out_dir: &Path,
  chunks: &[Chunk],
  names: &[String],
  sourcemap: bool,
) -> Result<BundleManifest> {
  let mut manifest = BundleManifest::new();

  for (chunk, file_name) in chunks.iter().zip(names) {
    let out_path = out_dir.join(file_name);
    let map_name = format!("{file_name}.map");

    let emit_map = sourcemap && chunk.source_map.is_some();
    let js = if emit_map {
      rewrite_source_mapping_url(&chunk.js, &format!("{}.js.map", chunk.name), &map_name)
    } else {
      chunk.js.clone()
    };
    std::fs::write(&out_path, &js)
      .with_context(|| format!("failed to write {}", out_path.display()))?;

    let mut entry = AssetEntry { file: file_name.clone(), source_map: None };
    if emit_map {
      let map_path = out_dir.join(&map_name);
      if let Some(map) = &chunk.source_map {
        std::fs::write(&map_path, map)
          .with_context(|| format!("failed to write {}", map_path.display()))?;
      }
      entry.source_map = Some(map_name);
    }
    manifest.insert(chunk.name.clone(), entry);
  }

  Ok(manifest)
}

/// Point a bundle's `sourceMappingURL` comment at the hashed map filename.
/// Non-UTF-8 bundles are left untouched.
fn rewrite_source_mapping_url(js: &[u8], old_map: &str, new_map: &str) -> Vec<u8> {
  match std::str::from_utf8(js) {
    Ok(text) => text.replace(old_map, new_map).into_bytes(),
    Err(_) => js.to_vec(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn collect_picks_js_and_maps() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("app.js"), "js").unwrap();
    std::fs::write(tmp.path().join("app.js.map"), "map").unwrap();
    std::fs::write(tmp.path().join("vendor.js"), "v").unwrap();
    std::fs::write(tmp.path().join("styles.css"), "ignored").unwrap();

    let chunks = collect_chunks(tmp.path()).unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].name, "app");
    assert!(chunks[0].source_map.is_some());
    assert_eq!(chunks[1].name, "vendor");
    assert!(chunks[1].source_map.is_none());
  }

  #[test]
  fn clear_dir_empties_existing() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("out");
    std::fs::create_dir_all(dir.join("sub")).unwrap();
    std::fs::write(dir.join("stale.js"), "old").unwrap();

    clear_dir(&dir).unwrap();
    assert!(dir.exists());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
  }

  #[test]
  fn emit_writes_hashed_names_and_manifest() {
    let tmp = tempfile::tempdir().unwrap();
    let chunks = vec![Chunk {
      name: "app".to_string(),
      js: b"console.log(1)\n//# sourceMappingURL=app.js.map\n".to_vec(),
      source_map: Some(b"{}".to_vec()),
    }];
    let names = vec!["app.bundle.1a2b3c4d.js".to_string()];

    let manifest = emit_chunks(tmp.path(), &chunks, &names, true).unwrap();
    let entry = manifest.get("app").unwrap();
    assert_eq!(entry.file, "app.bundle.1a2b3c4d.js");
    assert_eq!(entry.source_map.as_deref(), Some("app.bundle.1a2b3c4d.js.map"));

    let js = std::fs::read_to_string(tmp.path().join("app.bundle.1a2b3c4d.js")).unwrap();
    assert!(js.contains("sourceMappingURL=app.bundle.1a2b3c4d.js.map"));
    assert!(tmp.path().join("app.bundle.1a2b3c4d.js.map").exists());
  }

  #[test]
  fn emit_skips_maps_when_sourcemap_disabled() {
    let tmp = tempfile::tempdir().unwrap();
    let chunks = vec![Chunk {
      name: "app".to_string(),
      js: b"console.log(1)".to_vec(),
      source_map: Some(b"{}".to_vec()),
    }];
    let names = vec!["app.bundle.ff00ff00.js".to_string()];

    let manifest = emit_chunks(tmp.path(), &chunks, &names, false).unwrap();
    assert!(manifest.get("app").unwrap().source_map.is_none());
    assert!(!tmp.path().join("app.bundle.ff00ff00.js.map").exists());
  }
}
