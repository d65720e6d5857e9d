/* src/server/core/src/page.rs */

use std::path::{Path, PathBuf};

use crate::action::{ActionDef, ActionResult};
use crate::errors::PlinthError;

/// The generated HTML entry page. Read from disk on every request so a dev
/// rebuild that rewrites the file is picked up without a server restart.
#[derive(Debug, Clone)]
pub struct EntryPage {
  path: PathBuf,
}

impl EntryPage {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn read(&self) -> Result<String, PlinthError> {
    std::fs::read_to_string(&self.path).map_err(|e| {
      PlinthError::internal(format!(
        "failed to read entry page {}: {e} (run `plinth build` first)",
        self.path.display()
      ))
    })
  }

  /// Wrap this page as an action handler, conventionally `Default`/`Index`.
  pub fn into_action(self, controller: &str, action: &str) -> ActionDef {
    ActionDef::new(controller, action, move |_req| {
      let page = self.clone();
      async move { page.read().map(ActionResult::Html) }
    })
  }
}
