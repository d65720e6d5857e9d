/* src/cli/src/serve.rs */

use std::path::Path;

use anyhow::{Context, Result};
use plinth_server::{BundleManifest, EntryPage, PlinthServer};
use plinth_server_axum::IntoAxumRouter;

use crate::config::PlinthConfig;
use crate::ui;

/// Assemble the server bootstrap from config: static assets under the public
/// path, and the generated entry page as the Default/Index action.
pub(crate) fn build_server(
  config: &PlinthConfig,
  base_dir: &Path,
  development: bool,
) -> PlinthServer {
  let entry_page = EntryPage::new(base_dir.join(&config.frontend.html_out));
  PlinthServer::new()
    .static_dir(base_dir.join(&config.frontend.out_dir))
    .public_path(config.frontend.public_path.clone())
    .development(development)
    .action(entry_page.into_action("Default", "Index"))
}

pub(crate) fn serve_port(config: &PlinthConfig) -> u16 {
  std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(config.dev.port)
}

pub async fn run_serve(config: &PlinthConfig, base_dir: &Path) -> Result<()> {
  let out_dir = base_dir.join(&config.frontend.out_dir);
  BundleManifest::load(&out_dir).context("no build output found, run `plinth build` first")?;

  let port = serve_port(config);
  ui::arrow(&format!("serving {}", config.project.name));
  let server = build_server(config, base_dir, false);
  server.serve(&format!("0.0.0.0:{port}")).await.context("server error")
}
