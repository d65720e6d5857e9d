/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use plinth_server::PlinthServer;

/// Re-export plinth-server core for convenience
pub use plinth_server;

/// Extension trait that converts a `PlinthServer` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> axum::Router;
  fn serve(
    self,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), std::io::Error>> + Send;
}

impl IntoAxumRouter for PlinthServer {
  fn into_axum_router(self) -> axum::Router {
    handler::build_router(self.into_parts())
  }

  async fn serve(self, addr: &str) -> Result<(), std::io::Error> {
    let router = self.into_axum_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    println!("Plinth server running on http://localhost:{}", local_addr.port());
    axum::serve(listener, router).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn into_axum_router_builds_without_panic() {
    let server = PlinthServer::new();
    let _router = server.into_axum_router();
  }
}
