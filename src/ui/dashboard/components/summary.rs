//! Dashboard summary panel
//!
//! Renders the `overall` paragraphs plus connection details

use super::super::state::DashboardState;
use super::super::utils::{format_compact_timestamp, format_uptime};
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render the progress summary.
pub fn render_summary_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut lines = Vec::new();

    match state.document() {
        Some(document) => {
            for paragraph in &document.overall {
                // "Label: value" with the value highlighted
                match paragraph.split_once(": ") {
                    Some((label, value)) => {
                        let value_color = if value == "undefined" {
                            Color::DarkGray
                        } else {
                            Color::White
                        };
                        lines.push(Line::from(vec![
                            Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
                            Span::styled(
                                value.to_string(),
                                Style::default()
                                    .fg(value_color)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        ]));
                    }
                    None => lines.push(Line::from(paragraph.as_str())),
                }
            }
        }
        None => lines.push(Line::from(Span::styled(
            "Waiting for first fetch...",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines.push(Line::from(""));

    lines.push(Line::from(vec![Span::styled(
        format!("Server: {}", state.environment),
        Style::default().fg(Color::LightBlue),
    )]));

    if let Some(document) = state.document() {
        lines.push(Line::from(vec![Span::styled(
            format!("Layout: {}", document.api_version),
            Style::default().fg(Color::LightCyan),
        )]));
    }

    lines.push(Line::from(vec![Span::styled(
        format!(
            "Fetches: {} ({:.0}% ok)",
            state.passes(),
            state.success_rate()
        ),
        Style::default().fg(Color::LightYellow),
    )]));

    let last_success = state
        .last_success_timestamp()
        .as_deref()
        .map(format_compact_timestamp)
        .unwrap_or_else(|| "Never".to_string());
    lines.push(Line::from(vec![
        Span::styled("Last update: ", Style::default().fg(Color::Gray)),
        Span::styled(last_success, Style::default().fg(Color::Yellow)),
    ]));

    lines.push(Line::from(vec![Span::styled(
        format!("Uptime: {}", format_uptime(state.start_time.elapsed().as_secs())),
        Style::default().fg(Color::LightGreen),
    )]));

    let block = Block::default()
        .title("OVERALL")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
