// src/main.rs

mod app;
mod avatar;
mod comment_renderer;
mod commit_screen;
mod commit_utils;
mod config;
mod diff_styler;
mod error;
mod file_screen;
mod git;
mod github;
mod list;
mod navigation;
mod task;
pub mod types;
mod ui;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::{io, time::Duration};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::{Cli, Config};
use crate::task::{FetchOutcome, RefreshCommitTask};
use crate::ui::draw;

const INPUT_POLL: Duration = Duration::from_millis(100);

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    init_logging(&config.log_file)?;
    info!(repo = %config.repo, base = %config.base, remote = config.is_remote(), "starting");

    let (tx, rx) = mpsc::channel(8);
    let task = RefreshCommitTask::new(config.source, tx);
    let mut app = App::new(config.repo, config.base);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &task, rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("event loop failed: {err}");
        return Err(err.into());
    }

    Ok(())
}

/// Forwards terminal key presses to the event loop from a blocking thread.
fn spawn_input_reader() -> mpsc::Receiver<KeyEvent> {
    let (tx, rx) = mpsc::channel(32);
    tokio::task::spawn_blocking(move || {
        loop {
            if tx.is_closed() {
                return;
            }
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    error!("terminal poll failed: {e}");
                    return;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.blocking_send(key).is_err() {
                        return;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!("terminal read failed: {e}");
                    return;
                }
            }
        }
    });
    rx
}

async fn run_app<B: tui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    task: &RefreshCommitTask,
    mut results: mpsc::Receiver<FetchOutcome>,
) -> io::Result<()> {
    let mut keys = spawn_input_reader();

    loop {
        for request in app.take_requests() {
            task.execute(request);
        }

        terminal.draw(|f| draw(f, app))?;

        tokio::select! {
            key = keys.recv() => match key {
                Some(key) => app.handle_key_event(key),
                None => return Ok(()),
            },
            Some(outcome) = results.recv() => {
                app.on_fetch_outcome(outcome);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
