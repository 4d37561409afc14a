//! Dashboard state management

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event;
use crate::render::StatusDocument;
use crate::ui::app::UIConfig;
use crate::workers::poller::PassReport;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Dashboard state, fed by render pass reports.
#[derive(Debug)]
pub struct DashboardState {
    /// The server being watched.
    pub environment: Environment,
    /// Full URL of the stats endpoint.
    pub source: String,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Time between render passes.
    pub refresh_interval: Duration,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Reports waiting to be applied on the next update
    pub pending_reports: VecDeque<PassReport>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Animation tick counter
    pub tick: usize,

    /// Document of the most recent pass, successful or not.
    document: Option<StatusDocument>,
    /// When the most recent pass finished.
    last_pass_at: Option<Instant>,
    /// Timestamp of the most recent successful fetch.
    last_success_timestamp: Option<String>,
    passes: u64,
    failures: u64,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            source: ui_config.source,
            start_time,
            refresh_interval: ui_config.refresh_interval,
            with_background_color: ui_config.with_background_color,
            pending_reports: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            document: None,
            last_pass_at: None,
            last_success_timestamp: None,
            passes: 0,
            failures: 0,
        }
    }

    pub fn document(&self) -> Option<&StatusDocument> {
        self.document.as_ref()
    }

    pub fn last_pass_at(&self) -> Option<Instant> {
        self.last_pass_at
    }

    pub fn last_success_timestamp(&self) -> &Option<String> {
        &self.last_success_timestamp
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    // Setters used by the updaters
    pub(super) fn set_document(&mut self, document: StatusDocument) {
        self.document = Some(document);
    }

    pub(super) fn record_pass(&mut self, finished_at: Instant, fetched: bool, timestamp: &str) {
        self.passes += 1;
        self.last_pass_at = Some(finished_at);
        if fetched {
            self.last_success_timestamp = Some(timestamp.to_string());
        } else {
            self.failures += 1;
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add a report to the processing queue
    pub fn add_report(&mut self, report: PassReport) {
        self.pending_reports.push_back(report);
    }
}
