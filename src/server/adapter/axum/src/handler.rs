/* src/server/adapter/axum/src/handler.rs */

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Response};
use plinth_server::action::{ActionDef, ActionRequest, dispatch_key};
use plinth_server::route::RouteTable;
use plinth_server::{ActionResult, PlinthError, PlinthParts};
use tower_http::services::ServeDir;

use crate::error::AxumError;

pub(crate) struct AppState {
  pub routes: RouteTable,
  pub actions: HashMap<String, Arc<ActionDef>>,
  pub development: bool,
}

pub(crate) fn build_router(parts: PlinthParts) -> Router {
  let PlinthParts { routes, actions, static_dir, public_path, development } = parts;

  let actions = actions.into_iter().map(|a| (a.dispatch_key(), Arc::new(a))).collect();
  let state = Arc::new(AppState { routes, actions, development });
  let pages = Router::new().fallback(dispatch).with_state(state);

  // Static files mount first; the route table only sees unmatched requests.
  // `nest_service` rejects "/", so a root mount serves files directly and
  // hands misses to the route table instead.
  match static_dir {
    Some(dir) if public_path == "/" => {
      Router::new().fallback_service(ServeDir::new(dir).fallback(pages))
    }
    Some(dir) => {
      Router::new().nest_service(&public_path, ServeDir::new(dir)).fallback_service(pages)
    }
    None => pages,
  }
}

/// Walk the route table for the request path and invoke the resolved action.
async fn dispatch(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
  match run_action(&state, uri.path()).await {
    Ok(result) => match result {
      ActionResult::Html(body) => Html(body).into_response(),
      ActionResult::Json(value) => axum::Json(value).into_response(),
    },
    Err(err) => AxumError::new(err, state.development).into_response(),
  }
}

async fn run_action(state: &AppState, path: &str) -> Result<ActionResult, PlinthError> {
  // A match whose controller/action pair has no registered handler falls
  // through to later routes, so unknown two-segment paths still reach the
  // SPA catch-all.
  let resolved = state.routes.matches(path).find_map(|m| {
    let controller = m.controller()?.to_string();
    let action = m.action()?.to_string();
    let def = state.actions.get(&dispatch_key(&controller, &action))?.clone();
    Some((m, controller, action, def))
  });
  let (matched, controller, action, def) = resolved
    .ok_or_else(|| PlinthError::not_found(format!("no route matches {path}")))?;

  let request = ActionRequest {
    params: matched.params(),
    path: path.to_string(),
    controller,
    action,
  };
  (def.handler)(request).await
}
