//! HTML status page

use super::{OVERALL_ID, StatusDocument, TABLE_BODY_ID};
use askama::Template;
use chrono::Local;

#[derive(Template)]
#[template(path = "status.html")]
pub struct StatusPage<'a> {
    pub title: &'a str,
    pub source: String,
    pub generated_at: String,
    pub overall_id: &'static str,
    pub table_body_id: &'static str,
    pub document: &'a StatusDocument,
}

impl<'a> StatusPage<'a> {
    pub fn new(document: &'a StatusDocument, source: String) -> Self {
        Self {
            title: "Chunk batching status",
            source,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            overall_id: OVERALL_ID,
            table_body_id: TABLE_BODY_ID,
            document,
        }
    }
}

/// Renders the full page for a document.
pub fn render_page(document: &StatusDocument, source: &str) -> Result<String, askama::Error> {
    StatusPage::new(document, source.to_string()).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{client_data_payload, status_dictionary_payload};
    use serde_json::json;

    #[test]
    fn page_contains_containers_and_summary() {
        let payload = client_data_payload();
        let document = StatusDocument::build(Some(&payload), None);
        let html = render_page(&document, "http://localhost:5000/performanceStats").unwrap();

        assert!(html.contains(r#"<div id="overall">"#));
        assert!(html.contains(r#"<tbody id="data-table-body">"#));
        assert!(html.contains("<p>Total performance: 42</p>"));
        assert!(html.contains("<p>Total chunks: 4</p>"));
        assert!(!html.contains("WIP chunks"));
        assert!(html.contains(
            r#"<tr><td>c1</td><td>10.0.0.1</td><td class="performance-number">7</td></tr>"#
        ));
    }

    #[test]
    fn chunk_lists_render_as_unordered_lists() {
        let payload = status_dictionary_payload();
        let document = StatusDocument::build(Some(&payload), None);
        let html = render_page(&document, "test").unwrap();

        assert!(html.contains("<th>Working chunks</th>"));
        assert!(
            html.contains("<ul><li>wordlist-chunk-ab</li><li>wordlist-chunk-ac</li></ul>")
        );
    }

    #[test]
    fn payload_text_is_escaped() {
        let payload = serde_json::from_value(json!({
            "clientData": { "<script>": { "ip": "1.2.3.4", "performance": 1 } }
        }))
        .unwrap();
        let document = StatusDocument::build(Some(&payload), None);
        let html = render_page(&document, "test").unwrap();

        assert!(!html.contains("<td><script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
