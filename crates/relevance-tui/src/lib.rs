//! relevance-tui: Terminal UI for the review relevance client
//!
//! This crate provides the interactive surface:
//! - Review JSON editor seeded with an example review
//! - Scrollable conversation log of reviews and verdicts
//! - Header with service health, footer with key hints and a spinner

mod app;
mod conversation;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod text;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use relevance_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use relevance_engine::{ApiClient, ClientError, Config, HealthStatus, PredictionResult, Uuid};
use std::io::{self, stdout};
use tokio::task::JoinHandle;
use tracing::{error, info};

type HealthTask = JoinHandle<Result<HealthStatus, ClientError>>;
type PredictTask = (Uuid, JoinHandle<Result<PredictionResult, ClientError>>);

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application against the service configured in `config`.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::from_config(config);
    info!(api_base = %client.base(), "starting tui");

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client.base());

    // 10 Hz keeps the spinner moving
    let mut events = EventHandler::new(100);

    let result = run_loop(&mut terminal, &mut app, &mut events, &client).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    client: &ApiClient,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut health_task: Option<HealthTask> = None;
    let mut predict_task: Option<PredictTask> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            screens::review::ReviewScreen.render(app, area, buf);

            if app.show_help {
                screens::render_help_overlay(area, buf);
            }
        })?;

        // Start background work the app asked for
        if app.take_health_request() {
            if let Some(stale) = health_task.take() {
                stale.abort();
            }
            let client = client.clone();
            health_task = Some(tokio::spawn(async move { client.check_health().await }));
        }

        if predict_task.is_none() {
            if let Some(pending) = app.take_pending_request() {
                let (id, review) = pending.into_parts();
                let client = client.clone();
                let handle = tokio::spawn(async move { client.predict(&review).await });
                predict_task = Some((id, handle));
            }
        }

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = event::key_to_action(key);
                    if action == Action::None {
                        app.handle_input_key(key);
                    } else {
                        app.handle_action(action);
                    }
                }
                Event::Paste(text) => app.handle_paste(&text),
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        // Collect finished background work (non-blocking)
        if health_task.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = health_task.take() {
                match handle.await {
                    Ok(result) => app.session.apply_health(result),
                    Err(e) => error!(error = %e, "health task failed"),
                }
            }
        }

        if predict_task
            .as_ref()
            .is_some_and(|(_, handle)| handle.is_finished())
        {
            if let Some((id, handle)) = predict_task.take() {
                match handle.await {
                    Ok(outcome) => {
                        // Failures already landed in the error slot
                        let _ = app.session.resolve(id, outcome);
                    }
                    Err(e) => {
                        error!(error = %e, %id, "predict task failed");
                        app.session.abandon(id, format!("Request aborted: {e}"));
                    }
                }
            }
        }

        if app.should_quit {
            if let Some(handle) = health_task.take() {
                handle.abort();
            }
            if let Some((_, handle)) = predict_task.take() {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}
