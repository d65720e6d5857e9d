/* src/server/core/src/server.rs */

use std::path::PathBuf;

use crate::action::ActionDef;
use crate::route::RouteTable;

/// Framework-agnostic parts extracted from `PlinthServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct PlinthParts {
  pub routes: RouteTable,
  pub actions: Vec<ActionDef>,
  pub static_dir: Option<PathBuf>,
  pub public_path: String,
  pub development: bool,
}

pub struct PlinthServer {
  routes: RouteTable,
  actions: Vec<ActionDef>,
  static_dir: Option<PathBuf>,
  public_path: String,
  development: bool,
}

impl PlinthServer {
  /// Starts from the conventional SPA route table: controller/action dispatch
  /// with Default/Index fill-ins, then a catch-all forcing Default/Index.
  pub fn new() -> Self {
    Self {
      routes: RouteTable::conventional(),
      actions: Vec::new(),
      static_dir: None,
      public_path: "/dist".to_string(),
      development: false,
    }
  }

  pub fn action(mut self, def: ActionDef) -> Self {
    self.actions.push(def);
    self
  }

  /// Replace the route table. Registration order is matching order.
  pub fn routes(mut self, table: RouteTable) -> Self {
    self.routes = table;
    self
  }

  /// Serve static files from this directory under the public path.
  pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.static_dir = Some(dir.into());
    self
  }

  pub fn public_path(mut self, path: impl Into<String>) -> Self {
    let path = path.into();
    self.public_path = if path.starts_with('/') { path } else { format!("/{path}") };
    self
  }

  /// Development mode: handler errors render a diagnostic page.
  pub fn development(mut self, flag: bool) -> Self {
    self.development = flag;
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  pub fn into_parts(self) -> PlinthParts {
    PlinthParts {
      routes: self.routes,
      actions: self.actions,
      static_dir: self.static_dir,
      public_path: self.public_path,
      development: self.development,
    }
  }
}

impl Default for PlinthServer {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::action::ActionResult;

  #[test]
  fn new_has_conventional_routes() {
    let parts = PlinthServer::new().into_parts();
    assert_eq!(parts.routes.len(), 2);
    assert!(!parts.development);
    assert_eq!(parts.public_path, "/dist");
  }

  #[test]
  fn public_path_gets_leading_slash() {
    let parts = PlinthServer::new().public_path("assets").into_parts();
    assert_eq!(parts.public_path, "/assets");
    let parts = PlinthServer::new().public_path("/assets").into_parts();
    assert_eq!(parts.public_path, "/assets");
  }

  #[test]
  fn builder_collects_actions() {
    let parts = PlinthServer::new()
      .action(ActionDef::new("Default", "Index", |_req| async {
        Ok(ActionResult::Html(String::new()))
      }))
      .development(true)
      .static_dir("wwwroot/dist")
      .into_parts();
    assert_eq!(parts.actions.len(), 1);
    assert!(parts.development);
    assert_eq!(parts.static_dir.as_deref(), Some(std::path::Path::new("wwwroot/dist")));
  }
}
