/* src/cli/src/ui.rs */

// Terminal output helpers shared across commands.

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[2m";
pub const CYAN: &str = "\x1b[36m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";

pub fn arrow(msg: &str) {
  println!("{CYAN}=>{RESET} {msg}");
}

pub fn ok(msg: &str) {
  println!("{GREEN}✓{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("   {msg}");
}

pub fn detail_ok(msg: &str) {
  println!("   {GREEN}✓{RESET} {msg}");
}

pub fn error(msg: &str) {
  eprintln!("{RED}error{RESET}: {msg}");
}

pub fn format_size(bytes: u64) -> String {
  if bytes >= 1_000_000 {
    format!("{:.1} MB", bytes as f64 / 1_000_000.0)
  } else if bytes >= 1_000 {
    format!("{:.1} kB", bytes as f64 / 1_000.0)
  } else {
    format!("{bytes} B")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn format_size_units() {
    assert_eq!(format_size(12), "12 B");
    assert_eq!(format_size(1_200), "1.2 kB");
    assert_eq!(format_size(3_400_000), "3.4 MB");
  }
}
