//! Status document
//!
//! A render pass turns one payload into a [`StatusDocument`]: the paragraphs of the
//! `overall` container and the rows of the `data-table-body` table body. The HTML page, the
//! text report and the dashboard all draw from the same document.

pub mod html;
pub mod text;

use crate::consts::cli_consts::PERFORMANCE_CLASS;
use crate::payload::{ApiVersion, ClientEntry, StatsPayload};

/// Id of the element that receives the summary paragraphs.
pub const OVERALL_ID: &str = "overall";
/// Id of the table body that receives the client rows.
pub const TABLE_BODY_ID: &str = "data-table-body";

/// Contents of one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    /// An unordered list, one item per entry.
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub content: CellContent,
    pub classes: Vec<&'static str>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: CellContent::Text(text.into()),
            classes: Vec::new(),
        }
    }

    pub fn list(items: Vec<String>) -> Self {
        Self {
            content: CellContent::List(items),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn is_list(&self) -> bool {
        matches!(self.content, CellContent::List(_))
    }

    /// List items, empty for text cells.
    pub fn items(&self) -> &[String] {
        match &self.content {
            CellContent::List(items) => items,
            CellContent::Text(_) => &[],
        }
    }

    /// Flattened text of the cell; list items are joined with `", "`.
    pub fn plain_text(&self) -> String {
        match &self.content {
            CellContent::Text(text) => text.clone(),
            CellContent::List(items) => items.join(", "),
        }
    }

    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

impl TableRow {
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(Cell::plain_text).collect()
    }
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDocument {
    pub api_version: ApiVersion,
    /// Paragraphs of the `overall` container, in display order.
    pub overall: Vec<String>,
    /// Rows of the `data-table-body` table body.
    pub table_body: Vec<TableRow>,
}

impl StatusDocument {
    pub fn new(api_version: ApiVersion) -> Self {
        Self {
            api_version,
            overall: Vec::new(),
            table_body: Vec::new(),
        }
    }

    /// Renders a whole pass. `None` stands for a failed fetch: every summary value reads
    /// `undefined` and the table stays empty.
    pub fn build(payload: Option<&StatsPayload>, pinned: Option<ApiVersion>) -> Self {
        let api_version = ApiVersion::resolve(pinned, payload);
        let mut document = Self::new(api_version);
        document.append_summary(payload);
        if let Some(payload) = payload {
            document.append_client_table(&payload.clients(api_version));
        }
        document
    }

    pub fn append_summary(&mut self, payload: Option<&StatsPayload>) {
        self.overall
            .extend(render_summary(payload, self.api_version));
    }

    pub fn append_client_table(&mut self, clients: &[ClientEntry]) {
        self.table_body
            .extend(render_client_table(clients, self.api_version));
    }

    /// Column headings matching the cells of each row.
    pub fn column_titles(&self) -> &'static [&'static str] {
        if self.api_version.has_chunk_lists() {
            &["Client ID", "IP", "Performance", "Working chunks"]
        } else {
            &["Client ID", "IP", "Performance"]
        }
    }
}

/// Summary paragraphs in fixed order. The WIP line only exists for the status-dictionary
/// layout.
pub fn render_summary(payload: Option<&StatsPayload>, version: ApiVersion) -> Vec<String> {
    let fallback = StatsPayload::default();
    let p = payload.unwrap_or(&fallback);

    let mut lines = vec![
        format!("Total performance: {}", p.total_performance),
        format!("ETA: {}", p.eta),
        format!("Batched chunks: {}", p.batched_chunks),
        format!("Unbatched chunks: {}", p.todo_chunks),
    ];
    if version.has_wip_chunks() {
        lines.push(format!("WIP chunks: {}", p.wip_chunks));
    }
    lines.push(format!("Total chunks: {}", p.total_chunks));
    lines
}

/// One row per client: id, IP, performance, and the chunk list when the layout has one.
/// Missing or `null` values leave their cell empty.
pub fn render_client_table(clients: &[ClientEntry], version: ApiVersion) -> Vec<TableRow> {
    clients
        .iter()
        .map(|client| {
            let mut cells = vec![
                Cell::text(client.client_id.cell_text()),
                Cell::text(client.ip.cell_text()),
                Cell::text(client.performance.cell_text()).with_class(PERFORMANCE_CLASS),
            ];
            if version.has_chunk_lists() {
                cells.push(Cell::list(client.chunk_ids()));
            }
            TableRow { cells }
        })
        .collect()
}
