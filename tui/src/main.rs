mod app;
mod backend;
mod cli;
mod config;
mod terminal;
mod ui;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use task_core::{TaskApi, TaskView};
use tracing_subscriber::EnvFilter;

use crate::app::{Action, App};
use crate::backend::TaskBackend;
use crate::cli::Cli;

const TICK: Duration = Duration::from_millis(250);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    init_logging(config.log_file.as_deref())?;

    let backend = TaskBackend::from_config(&config);
    tracing::info!(backend = ?config.backend, source = %backend.label(), "starting task view");
    let source = backend.label();
    let app = App::new(TaskView::new(backend), source);

    let mut terminal = terminal::setup_terminal().context("failed to set up terminal")?;
    let result = run_app(&mut terminal, app).await;
    terminal::restore_terminal(&mut terminal);
    result
}

/// Logs go to a file only; the terminal belongs to the UI.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// One handler at a time: each key or completed request is applied before
/// the next event is read.
async fn run_app<B: Backend, A: TaskApi>(
    terminal: &mut Terminal<B>,
    mut app: App<A>,
) -> anyhow::Result<()> {
    app.view.begin_load();
    terminal.draw(|f| ui::draw(f, &app))?;
    let listed = app.view.api().list().await;
    app.view.finish_load(listed);
    app.collect_notices();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Action::None => {}
            Action::Quit => break,
            Action::Reload => {
                app.view.begin_load();
                terminal.draw(|f| ui::draw(f, &app))?;
                let listed = app.view.api().list().await;
                app.view.finish_load(listed);
            }
            Action::Submit => {
                // Validation failures are shown inline in the form.
                if let Ok(submission) = app.view.begin_submit() {
                    app.collect_notices();
                    terminal.draw(|f| ui::draw(f, &app))?;
                    let result = app.view.send(submission).await;
                    app.view.finish_submit(result);
                }
            }
            Action::ConfirmDelete => {
                if let Some(id) = app.view.begin_delete() {
                    let result = app.view.api().delete(id).await;
                    app.view.finish_delete(id, result);
                }
            }
        }
        app.collect_notices();
    }

    app.view.unmount();
    tracing::info!("task view closed");
    Ok(())
}
