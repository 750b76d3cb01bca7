mod action;
mod activity;
mod app;
mod auth;
mod cache;
mod config;
mod dropdown;
mod error;
mod event;
mod github;
mod sort;
mod source;
mod tui;
mod types;
mod ui;

use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::activity::active_entries;
use crate::app::{load_or_fetch, App, LoadSettings};
use crate::config::Config;
use crate::event::Event;
use crate::github::GitHub;
use crate::source::RepoSource;
use crate::sort::sort_entries;
use crate::tui::EventHandler;
use crate::types::SortMode;

/// List recently active GitHub repositories, sortable by stars and forks.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (default: <config dir>/active-repos/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository URL; repeat to list several. Replaces the configured list.
    #[arg(long = "repo", value_name = "URL")]
    repos: Vec<String>,

    /// Ignore cached data and fetch everything again
    #[arg(long)]
    refresh: bool,

    /// Print the active repositories as JSON instead of starting the TUI
    #[arg(long)]
    json: bool,

    /// Sort order used with --json
    #[arg(long, value_enum, default_value_t = SortMode::BestMatch)]
    sort: SortMode,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    // The TUI owns the terminal, so log to a file when one can be opened.
    let log_file = cache::cache_dir().and_then(|dir| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("active-repos.log"))
            .ok()
    });

    match log_file {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = Config::load(cli.config.as_deref())?.with_repos(cli.repos);
    config.validate()?;

    let token = auth::load_token(&config);
    let github = GitHub::new(config.api_base.clone(), token)?;
    let settings = LoadSettings::from(&config);

    if cli.json {
        return print_json(&github, &settings, cli.refresh, cli.sort).await;
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    // Run the application
    let result = run(Arc::new(github), settings, cli.refresh).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn print_json(
    source: &dyn RepoSource,
    settings: &LoadSettings,
    force: bool,
    sort: SortMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let load = load_or_fetch(source, settings, force).await;
    let sorted = sort_entries(&load.entries, sort);
    let active = active_entries(&sorted, chrono::Utc::now(), settings.active_window);
    println!("{}", serde_json::to_string_pretty(&active)?);
    Ok(())
}

async fn run(
    source: Arc<dyn RepoSource>,
    settings: LoadSettings,
    refresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize terminal
    let mut terminal = tui::init()?;

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create app state
    let mut app = App::new(source, settings, action_tx.clone());
    let size = terminal.size()?;
    app.update(Action::Resize(size.width, size.height));

    // Create event handler
    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    // Main loop
    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    Event::Init if refresh => {
                        action_tx.send(Action::Load { force: true })?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
