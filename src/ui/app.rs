//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::poller::PassReport;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub refresh_interval: Duration,
    /// Full URL of the stats endpoint
    pub source: String,
}

impl UIConfig {
    pub fn new(with_background_color: bool, refresh_interval: Duration, source: String) -> Self {
        Self {
            with_background_color,
            refresh_interval,
            source,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying the latest stats.
    Dashboard,
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Dashboard state; collects reports even while the splash is showing.
    dashboard: Box<DashboardState>,

    /// Receives render pass reports from the poller.
    report_receiver: mpsc::Receiver<PassReport>,

    /// Broadcasts shutdown signal to the poller.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        report_receiver: mpsc::Receiver<PassReport>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            dashboard: Box::new(DashboardState::new(
                environment,
                Instant::now(),
                ui_config,
            )),
            report_receiver,
            shutdown_sender,
        }
    }

    /// Queues every report that has arrived since the last frame.
    fn drain_reports(&mut self) {
        while let Ok(report) = self.report_receiver.try_recv() {
            self.dashboard.add_report(report);
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    loop {
        app.drain_reports();

        if app.current_screen == Screen::Dashboard {
            app.dashboard.update();
        }
        terminal.draw(|f| render(f, &app))?;

        if app.current_screen == Screen::Splash && splash_start.elapsed() >= splash_duration {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }

                // Any other key skips the splash screen
                if app.current_screen == Screen::Splash {
                    app.current_screen = Screen::Dashboard;
                }
            }
        }

        // Let the poller task make progress between frames.
        tokio::task::yield_now().await;
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f, &app.dashboard.source),
        Screen::Dashboard => render_dashboard(f, &app.dashboard),
    }
}
