//! Plain-text report for terminals and logs

use super::StatusDocument;
use std::fmt::Write as _;

const COLUMN_GAP: usize = 3;

/// Summary lines, a blank line, then an aligned client table.
pub fn render_report(document: &StatusDocument) -> String {
    let mut out = String::new();
    for paragraph in &document.overall {
        let _ = writeln!(out, "{}", paragraph);
    }
    out.push('\n');

    if document.table_body.is_empty() {
        out.push_str("No clients connected.\n");
        return out;
    }

    let header: Vec<String> = document
        .column_titles()
        .iter()
        .map(|title| title.to_uppercase())
        .collect();
    let rows: Vec<Vec<String>> = document.table_body.iter().map(|row| row.texts()).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    write_line(&mut out, &header, &widths);
    for row in &rows {
        write_line(&mut out, row, &widths);
    }
    out
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i == last {
            line.push_str(cell);
        } else {
            let pad = widths[i] + COLUMN_GAP - cell.chars().count();
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
    }
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{client_data_payload, status_dictionary_payload};

    #[test]
    fn report_lists_summary_then_table() {
        let payload = client_data_payload();
        let document = StatusDocument::build(Some(&payload), None);
        let report = render_report(&document);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Total performance: 42");
        assert_eq!(lines[4], "Total chunks: 4");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "CLIENT ID   IP         PERFORMANCE");
        assert_eq!(lines[7], "c1          10.0.0.1   7");
    }

    #[test]
    fn chunk_lists_are_joined() {
        let payload = status_dictionary_payload();
        let document = StatusDocument::build(Some(&payload), None);
        let report = render_report(&document);
        assert!(report.contains("wordlist-chunk-ab, wordlist-chunk-ac"));
    }

    #[test]
    fn empty_table_says_so() {
        let document = StatusDocument::build(None, None);
        let report = render_report(&document);
        assert!(report.starts_with("Total performance: undefined\n"));
        assert!(report.ends_with("No clients connected.\n"));
    }
}
