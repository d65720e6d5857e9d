/* src/cli/src/dev/network.rs */

use anyhow::{Result, bail};

/// Bind-probe for a free port, preferring the configured one.
pub(super) fn find_available_port(preferred: u16) -> Result<u16> {
  if std::net::TcpListener::bind(("0.0.0.0", preferred)).is_ok() {
    return Ok(preferred);
  }
  for offset in 1..100u16 {
    let port = preferred.saturating_add(offset);
    if std::net::TcpListener::bind(("0.0.0.0", port)).is_ok() {
      return Ok(port);
    }
  }
  bail!("no available port found in range {preferred}-{}", preferred.saturating_add(99));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn preferred_port_when_free() {
    // Bind to an ephemeral port, free it, then ask for it
    let listener = std::net::TcpListener::bind(("0.0.0.0", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    assert_eq!(find_available_port(port).unwrap(), port);
  }

  #[test]
  fn occupied_port_moves_on() {
    let listener = std::net::TcpListener::bind(("0.0.0.0", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    // Listener still held, so the preferred port is taken
    let found = find_available_port(port).unwrap();
    assert_ne!(found, port);
  }
}
