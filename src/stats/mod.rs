use crate::environment::Environment;
use crate::error_classifier::ErrorClassifier;
use crate::payload::{ApiVersion, StatsPayload};
use crate::render::StatusDocument;
use crate::stats::error::StatsError;

pub(crate) mod client;
pub use client::StatsClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait StatsSource: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Human-readable location of the stats, used in page footers and logs.
    fn describe(&self) -> String;

    /// Fetch the aggregate progress and per-client breakdown.
    async fn get_performance_stats(&self) -> Result<StatsPayload, StatsError>;
}

/// Fetches one payload. A failure is logged and swallowed; callers get `None`.
pub async fn fetch_data(source: &dyn StatsSource) -> Option<StatsPayload> {
    match source.get_performance_stats().await {
        Ok(payload) => {
            log::debug!("Fetched stats from {}: {:?}", source.describe(), payload);
            Some(payload)
        }
        Err(e) => {
            let level = ErrorClassifier::new().classify_fetch_error(&e);
            log::log!(log::Level::from(level), "Error fetching data: {}", e);
            None
        }
    }
}

/// One full render pass: fetch, then build the summary and the client table.
pub async fn print_data_on_screen(
    source: &dyn StatsSource,
    pinned: Option<ApiVersion>,
) -> StatusDocument {
    let payload = fetch_data(source).await;
    StatusDocument::build(payload.as_ref(), pinned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::client_data_payload;
    use std::cell::RefCell;
    use std::sync::Once;

    thread_local! {
        static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    /// Collects records per thread, so parallel tests only see their own.
    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            RECORDS.with(|records| {
                records
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT: Once = Once::new();

    fn capture_logs() {
        INIT.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
        RECORDS.with(|records| records.borrow_mut().clear());
    }

    fn captured() -> Vec<(log::Level, String)> {
        RECORDS.with(|records| records.borrow().clone())
    }

    fn failing_source() -> MockStatsSource {
        let mut source = MockStatsSource::new();
        source.expect_describe().return_const("mock".to_string());
        source.expect_get_performance_stats().times(1).returning(|| {
            Err(StatsError::Http {
                status: 503,
                message: "unavailable".to_string(),
            })
        });
        source
    }

    #[tokio::test]
    async fn fetch_data_returns_payload_on_success() {
        let mut source = MockStatsSource::new();
        source.expect_describe().return_const("mock".to_string());
        source
            .expect_get_performance_stats()
            .times(1)
            .returning(|| Ok(client_data_payload()));

        let payload = fetch_data(&source).await;
        assert_eq!(payload, Some(client_data_payload()));
    }

    #[tokio::test]
    async fn fetch_data_swallows_errors() {
        let source = failing_source();
        assert_eq!(fetch_data(&source).await, None);
    }

    #[tokio::test]
    async fn failed_fetch_logs_one_classified_error() {
        capture_logs();
        let source = failing_source();
        assert_eq!(fetch_data(&source).await, None);

        let records = captured();
        assert_eq!(records.len(), 1);
        // 503 is a temporary server problem.
        assert_eq!(records[0].0, log::Level::Warn);
        assert_eq!(
            records[0].1,
            "Error fetching data: HTTP error with status 503: unavailable"
        );
    }

    #[tokio::test]
    async fn decode_failure_logs_at_error_level() {
        capture_logs();
        let mut source = MockStatsSource::new();
        source.expect_get_performance_stats().times(1).returning(|| {
            Err(StatsError::Decode(
                serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            ))
        });

        let document = print_data_on_screen(&source, None).await;
        assert!(document.table_body.is_empty());

        let records = captured();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, log::Level::Error);
        assert!(records[0].1.starts_with("Error fetching data: Decoding error:"));
    }

    #[tokio::test]
    async fn render_pass_fetches_exactly_once() {
        let mut source = MockStatsSource::new();
        source.expect_describe().return_const("mock".to_string());
        source
            .expect_get_performance_stats()
            .times(1)
            .returning(|| Ok(client_data_payload()));

        let document = print_data_on_screen(&source, None).await;
        assert_eq!(document.overall[0], "Total performance: 42");
        assert_eq!(document.table_body.len(), 1);
    }

    #[tokio::test]
    async fn render_pass_after_failure_shows_undefined() {
        let source = failing_source();
        let document = print_data_on_screen(&source, Some(ApiVersion::ClientData)).await;

        assert_eq!(
            document.overall,
            vec![
                "Total performance: undefined",
                "ETA: undefined",
                "Batched chunks: undefined",
                "Unbatched chunks: undefined",
                "Total chunks: undefined",
            ]
        );
        assert!(document.table_body.is_empty());
    }
}
