//! Dashboard clients table
//!
//! Renders the `data-table-body` rows, one line per chunk in the chunk column

use super::super::state::DashboardState;
use crate::consts::cli_consts::PERFORMANCE_CLASS;
use crate::render::TableRow;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table};

/// Render the per-client table.
pub fn render_clients_table(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title("CLIENTS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let document = match state.document() {
        Some(document) if !document.table_body.is_empty() => document,
        Some(_) => {
            let empty = Paragraph::new("No clients connected.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(empty, area);
            return;
        }
        None => {
            let waiting = Paragraph::new("Waiting for first fetch...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(waiting, area);
            return;
        }
    };

    let header = Row::new(
        document
            .column_titles()
            .iter()
            .map(|title| Cell::from(title.to_uppercase())),
    )
    .style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = document.table_body.iter().map(table_row).collect();

    let widths: Vec<Constraint> = if document.api_version.has_chunk_lists() {
        vec![
            Constraint::Percentage(25),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Fill(1),
        ]
    } else {
        vec![
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Fill(1),
        ]
    };

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(block);
    f.render_widget(table, area);
}

/// Terminal lines for a row, saturating instead of wrapping.
fn row_height(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn table_row(row: &TableRow) -> Row<'static> {
    let lines = row
        .cells
        .iter()
        .map(|cell| cell.items().len())
        .max()
        .unwrap_or(1)
        .max(1);
    let height = row_height(lines);

    let cells = row.cells.iter().map(|cell| {
        let style = if cell.classes.contains(&PERFORMANCE_CLASS) {
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let text = if cell.is_list() {
            Text::from(
                cell.items()
                    .iter()
                    .map(|item| Line::from(format!("• {}", item)))
                    .collect::<Vec<_>>(),
            )
        } else {
            Text::from(cell.plain_text())
        };
        Cell::from(text).style(style)
    });

    Row::new(cells.collect::<Vec<_>>()).height(height)
}
