/* src/server/core/src/lib.rs */

pub mod action;
pub mod errors;
pub mod manifest;
pub mod page;
pub mod route;
pub mod server;

// Re-exports for ergonomic use
pub use action::{ActionDef, ActionHandlerFn, ActionRequest, ActionResult, BoxFuture, dispatch_key};
pub use errors::PlinthError;
pub use manifest::{AssetEntry, BundleManifest, MANIFEST_FILE};
pub use page::EntryPage;
pub use route::{RouteMatch, RoutePattern, RouteTable};
pub use server::{PlinthParts, PlinthServer};
