/* src/cli/src/main.rs */

mod build;
mod clean;
mod config;
mod dev;
mod serve;
mod shell;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::build::BuildMode;

#[derive(Parser)]
#[command(name = "plinth", version, about = "SPA starter toolchain: build pipeline and server bootstrap")]
struct Cli {
  /// Path to plinth.toml (defaults to searching upward from the current directory)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Bundle the frontend entry and generate the HTML entry page
  Build {
    /// Force release output naming regardless of NODE_ENV
    #[arg(long)]
    release: bool,
  },
  /// Serve the built output
  Serve,
  /// Build in development mode, serve, and rebuild on change
  Dev,
  /// Remove build output and generated artifacts
  Clean,
}

#[tokio::main]
async fn main() {
  if let Err(e) = run().await {
    ui::error(&format!("{e:#}"));
    std::process::exit(1);
  }
}

async fn run() -> Result<()> {
  let cli = Cli::parse();

  let config_path = match cli.config {
    Some(path) => path,
    None => {
      let cwd = std::env::current_dir().context("failed to resolve current directory")?;
      config::find_config(&cwd)?
    }
  };
  let base_dir = config_path.parent().unwrap_or(Path::new(".")).to_path_buf();
  let config = config::load_config(&config_path)?;

  match cli.command {
    Command::Build { release } => {
      build::run_build(&config, &base_dir, BuildMode::from_env(release))?;
      Ok(())
    }
    Command::Serve => serve::run_serve(&config, &base_dir).await,
    Command::Dev => dev::run_dev(&config, &base_dir).await,
    Command::Clean => clean::run_clean(&config, &base_dir),
  }
}
