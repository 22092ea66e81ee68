//! `campus` — terminal front end for the campus record tables.
//!
//! # Usage
//!
//! ```
//! campus --url https://myproject.supabase.co --api-key <anon key>
//! campus --config ~/.config/campus/config.toml
//! ```

mod app;
mod config;
mod ui;

use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use app::App;
use campus_store_rest::{RestConfig, RestStore};
use clap::Parser;
use config::ConfigFile;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "campus", about = "Terminal front end for the campus record tables")]
struct Args {
  /// Path to a TOML config file (url, api_key, log_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the hosted row-store.
  #[arg(long, env = "CAMPUS_URL")]
  url: Option<String>,

  /// API key (Supabase anon key).
  #[arg(long, env = "CAMPUS_API_KEY")]
  api_key: Option<String>,

  /// Diagnostic log destination. Logging is off when unset — stderr would
  /// corrupt the alternate screen.
  #[arg(long, env = "CAMPUS_LOG", value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let settings = config::resolve(args.url, args.api_key, args.log_file, &file_cfg);

  // Route diagnostics to a file when requested.
  if let Some(path) = &settings.log_file {
    let log = std::fs::File::create(path)
      .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::INFO.into())
          .from_env_lossy(),
      )
      .with_writer(Arc::new(log))
      .with_ansi(false)
      .init();
  }

  let store = RestStore::new(RestConfig {
    base_url: settings.url,
    api_key:  settings.api_key,
  })
  .context("building HTTP client")?;
  let mut app = App::new(Arc::new(store));

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Initial load. A failure is not fatal — it surfaces as a status banner
  // and the user can retry with `r`.
  app.init().await;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          if !app.handle_key(key).await {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
