/* src/cli/src/dev/mod.rs */

// `plinth dev`: development build, in-process server, rebuild on change.

mod network;

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use plinth_server_axum::IntoAxumRouter;
use tokio::signal;

use crate::build::{BuildMode, run_build};
use crate::config::PlinthConfig;
use crate::serve::build_server;
use crate::ui::{CYAN, DIM, GREEN, RED, RESET};

fn setup_watcher() -> Result<(RecommendedWatcher, tokio::sync::mpsc::Receiver<()>)> {
  let (tx, rx) = tokio::sync::mpsc::channel(16);
  let watcher = RecommendedWatcher::new(
    move |res: std::result::Result<notify::Event, notify::Error>| {
      if res.is_ok() {
        let _ = tx.blocking_send(());
      }
    },
    notify::Config::default(),
  )?;
  // Paths are watched in run_dev after watcher creation
  Ok((watcher, rx))
}

async fn handle_rebuild(config: &PlinthConfig, base_dir: &Path) {
  let started = Instant::now();
  println!("  {CYAN}[plinth]{RESET} rebuilding...");

  let cfg = config.clone();
  let bd = base_dir.to_path_buf();
  let result =
    tokio::task::spawn_blocking(move || run_build(&cfg, &bd, BuildMode::Development)).await;

  match result {
    Ok(Ok(_)) => println!(
      "  {GREEN}[plinth]{RESET} rebuild complete ({:.1}s)",
      started.elapsed().as_secs_f64()
    ),
    Ok(Err(e)) => println!("  {RED}[plinth]{RESET} rebuild error: {e:#}"),
    Err(e) => println!("  {RED}[plinth]{RESET} rebuild panicked: {e}"),
  }
}

fn print_dev_banner(config: &PlinthConfig, port: u16, watched: &[String]) {
  println!();
  println!("  {CYAN}plinth dev{RESET}  {DIM}{}{RESET}", config.project.name);
  println!("  {DIM}local{RESET}     http://localhost:{port}");
  if !watched.is_empty() {
    println!("  {DIM}watching{RESET}  {}", watched.join(", "));
  }
  println!();
}

pub async fn run_dev(config: &PlinthConfig, base_dir: &Path) -> Result<()> {
  run_build(config, base_dir, BuildMode::Development)?;

  // Set up the file watcher before starting the server
  let (mut watcher, mut watcher_rx) = setup_watcher()?;
  let mut watched = Vec::new();
  for dir in &config.dev.watch_dirs {
    let path = base_dir.join(dir);
    if path.exists() {
      watcher.watch(&path, RecursiveMode::Recursive)?;
      watched.push(format!("{dir}/"));
    }
  }
  let template = base_dir.join(&config.frontend.template);
  if template.exists() {
    watcher.watch(&template, RecursiveMode::NonRecursive)?;
    watched.push(config.frontend.template.clone());
  }

  let port = network::find_available_port(config.dev.port)?;
  print_dev_banner(config, port, &watched);

  let router = build_server(config, base_dir, true).into_axum_router();
  let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
  let mut server_task = tokio::spawn(async move { axum::serve(listener, router).await });

  // Event loop: Ctrl+C, server exit, or file change triggers rebuild
  loop {
    tokio::select! {
      _ = signal::ctrl_c() => {
        println!();
        println!("  {DIM}shutting down...{RESET}");
        break;
      }
      result = &mut server_task => {
        match result {
          Ok(Ok(())) => println!("  {RED}server exited{RESET}"),
          Ok(Err(e)) => println!("  {RED}server error: {e}{RESET}"),
          Err(e) => println!("  {RED}server panicked: {e}{RESET}"),
        }
        return Ok(());
      }
      Some(()) = watcher_rx.recv() => {
        // Debounce: wait 300ms, drain pending events
        tokio::time::sleep(Duration::from_millis(300)).await;
        while watcher_rx.try_recv().is_ok() {}
        handle_rebuild(config, base_dir).await;
      }
    }
  }

  server_task.abort();
  Ok(())
}
