//! Dashboard main renderer

use super::components::{clients, footer, header, logs, summary};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(30),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(main_chunks[1]);

    summary::render_summary_panel(f, content_chunks[0], state);
    clients::render_clients_table(f, content_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::events::Event;
    use crate::render::StatusDocument;
    use crate::render::tests::status_dictionary_payload;
    use crate::ui::UIConfig;
    use crate::workers::poller::PassReport;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::{Duration, Instant};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn dashboard_shows_summary_and_clients() {
        let mut state = DashboardState::new(
            Environment::Local,
            Instant::now(),
            UIConfig::new(true, Duration::from_secs(3), "http://localhost:5000/performanceStats".to_string()),
        );
        let payload = status_dictionary_payload();
        state.add_report(PassReport {
            document: StatusDocument::build(Some(&payload), None),
            event: Event::success("Fetched stats".to_string()),
            fetched: true,
            finished_at: Instant::now(),
        });
        state.update();

        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| render_dashboard(f, &state)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Total performance: 6200"));
        assert!(text.contains("WIP chunks: 2"));
        assert!(text.contains("worker-a"));
        assert!(text.contains("192.168.1.21"));
        assert!(text.contains("wordlist-chunk-ac"));
        assert!(text.contains("[Q] Quit"));
    }

    #[test]
    fn dashboard_renders_before_first_pass() {
        let state = DashboardState::new(
            Environment::Local,
            Instant::now(),
            UIConfig::new(false, Duration::from_secs(3), "test".to_string()),
        );
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_dashboard(f, &state)).unwrap();
        assert!(buffer_text(&terminal).contains("Waiting for first fetch"));
    }
}
