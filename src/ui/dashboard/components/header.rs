//! Dashboard header component
//!
//! Renders the title and the refresh countdown gauge

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};
use std::time::Instant;

/// Render header with title and time until the next refresh.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("CHUNK MONITOR v{}", version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = if state.last_pass_at().is_none() {
        // Animated gauge while the first request is in flight
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        ("FETCHING - First request".to_string(), Color::LightBlue, progress)
    } else {
        let (remaining_secs, percent) = state.refresh_countdown(Instant::now());
        let color = if state.failures() > 0 {
            Color::LightYellow
        } else {
            Color::LightGreen
        };
        let text = if remaining_secs > 0 {
            format!("REFRESHING in {}s", remaining_secs)
        } else {
            "REFRESHING".to_string()
        };
        (text, color, percent)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
