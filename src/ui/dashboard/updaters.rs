//! Dashboard state update logic

use super::state::DashboardState;
use crate::workers::poller::PassReport;
use std::time::Instant;

impl DashboardState {
    /// Advance the animation tick and apply queued reports.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(report) = self.pending_reports.pop_front() {
            self.apply_report(report);
        }
    }

    fn apply_report(&mut self, report: PassReport) {
        self.record_pass(
            report.finished_at,
            report.fetched,
            &report.event.timestamp,
        );
        self.add_to_activity_log(report.event);
        self.set_document(report.document);
    }

    /// Seconds until the next pass and how far along the wait is, in percent.
    pub fn refresh_countdown(&self, now: Instant) -> (u64, u16) {
        let interval = self.refresh_interval;
        let Some(last) = self.last_pass_at() else {
            return (0, 0);
        };
        if interval.is_zero() {
            return (0, 100);
        }
        let elapsed = now.saturating_duration_since(last);
        if elapsed >= interval {
            return (0, 100);
        }
        let remaining = interval - elapsed;
        let percent = (elapsed.as_secs_f64() / interval.as_secs_f64() * 100.0) as u16;
        (remaining.as_secs_f64().ceil() as u64, percent.min(100))
    }

    /// Share of passes whose fetch succeeded, in percent.
    pub fn success_rate(&self) -> f64 {
        if self.passes() == 0 {
            return 0.0;
        }
        (self.passes() - self.failures()) as f64 / self.passes() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::Environment;
    use crate::events::Event;
    use crate::logging::LogLevel;
    use crate::render::StatusDocument;
    use crate::render::tests::client_data_payload;
    use crate::ui::UIConfig;
    use crate::ui::dashboard::DashboardState;
    use crate::workers::poller::PassReport;
    use std::time::{Duration, Instant};

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            UIConfig::new(false, Duration::from_secs(3), "test".to_string()),
        )
    }

    fn report(fetched: bool, finished_at: Instant) -> PassReport {
        let payload = client_data_payload();
        let (document, event) = if fetched {
            (
                StatusDocument::build(Some(&payload), None),
                Event::success("ok".to_string()),
            )
        } else {
            (
                StatusDocument::build(None, None),
                Event::error("boom".to_string(), LogLevel::Warn),
            )
        };
        PassReport {
            document,
            event,
            fetched,
            finished_at,
        }
    }

    #[test]
    fn update_applies_queued_reports_in_order() {
        let mut state = state();
        let now = Instant::now();
        state.add_report(report(true, now));
        state.add_report(report(false, now));
        state.update();

        assert_eq!(state.tick, 1);
        assert_eq!(state.passes(), 2);
        assert_eq!(state.failures(), 1);
        assert_eq!(state.activity_logs.len(), 2);
        assert!(state.last_success_timestamp().is_some());
        // The latest pass wins, even when it failed.
        assert!(state.document().unwrap().table_body.is_empty());
        assert!((state.success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn countdown_before_first_pass_is_empty() {
        assert_eq!(state().refresh_countdown(Instant::now()), (0, 0));
    }

    #[test]
    fn countdown_tracks_elapsed_time() {
        let mut state = state();
        let start = Instant::now();
        state.add_report(report(true, start));
        state.update();

        let (remaining, percent) = state.refresh_countdown(start + Duration::from_millis(1500));
        assert_eq!(remaining, 2);
        assert_eq!(percent, 50);

        assert_eq!(
            state.refresh_countdown(start + Duration::from_secs(10)),
            (0, 100)
        );
    }

    #[test]
    fn activity_log_is_capped() {
        let mut state = state();
        for _ in 0..(crate::consts::cli_consts::MAX_ACTIVITY_LOGS + 5) {
            state.add_to_activity_log(Event::success("ok".to_string()));
        }
        assert_eq!(
            state.activity_logs.len(),
            crate::consts::cli_consts::MAX_ACTIVITY_LOGS
        );
    }
}
