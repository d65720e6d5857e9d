/* src/server/core/src/action.rs */

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::PlinthError;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type ActionHandlerFn =
  Arc<dyn Fn(ActionRequest) -> BoxFuture<Result<ActionResult, PlinthError>> + Send + Sync>;

/// Request data handed to an action handler after route resolution.
#[derive(Debug, Clone)]
pub struct ActionRequest {
  pub controller: String,
  pub action: String,
  /// Route values other than controller/action (e.g. the catch-all rest)
  pub params: BTreeMap<String, String>,
  /// Raw request path as received
  pub path: String,
}

/// What an action produces. Adapters turn this into a framework response.
pub enum ActionResult {
  Html(String),
  Json(serde_json::Value),
}

/// A named action on a controller, with its boxed async handler.
pub struct ActionDef {
  pub controller: String,
  pub name: String,
  pub handler: ActionHandlerFn,
}

impl ActionDef {
  pub fn new<F, Fut>(controller: impl Into<String>, name: impl Into<String>, handler: F) -> Self
  where
    F: Fn(ActionRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionResult, PlinthError>> + Send + 'static,
  {
    Self {
      controller: controller.into(),
      name: name.into(),
      handler: Arc::new(move |req| Box::pin(handler(req))),
    }
  }

  /// Lookup key used by adapters. Conventional dispatch is case-insensitive.
  pub fn dispatch_key(&self) -> String {
    dispatch_key(&self.controller, &self.name)
  }
}

pub fn dispatch_key(controller: &str, action: &str) -> String {
  format!("{}/{}", controller.to_ascii_lowercase(), action.to_ascii_lowercase())
}
