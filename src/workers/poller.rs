//! Periodic render passes for watch mode

use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::error_classifier::ErrorClassifier;
use crate::events::Event;
use crate::payload::ApiVersion;
use crate::render::StatusDocument;
use crate::stats::StatsSource;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Outcome of one render pass.
#[derive(Debug, Clone)]
pub struct PassReport {
    pub document: StatusDocument,
    pub event: Event,
    /// Whether the fetch succeeded.
    pub fetched: bool,
    pub finished_at: Instant,
}

/// Runs a render pass every `interval` and forwards the reports.
pub struct Poller {
    source: Arc<dyn StatsSource>,
    pinned: Option<ApiVersion>,
    interval: Duration,
    classifier: ErrorClassifier,
    sender: mpsc::Sender<PassReport>,
}

impl Poller {
    pub fn new(
        source: Arc<dyn StatsSource>,
        pinned: Option<ApiVersion>,
        interval: Duration,
        sender: mpsc::Sender<PassReport>,
    ) -> Self {
        Self {
            source,
            pinned,
            interval,
            classifier: ErrorClassifier::new(),
            sender,
        }
    }

    /// Fetches once and renders, turning a failure into an error event.
    pub async fn run_pass(&self) -> PassReport {
        let (document, event, fetched) = match self.source.get_performance_stats().await {
            Ok(payload) => {
                let document = StatusDocument::build(Some(&payload), self.pinned);
                let event = Event::success(format!(
                    "Fetched stats ({}): {} client(s)",
                    document.api_version,
                    document.table_body.len()
                ));
                (document, event, true)
            }
            Err(e) => {
                let level = self.classifier.classify_fetch_error(&e);
                let event = Event::error(format!("Error fetching data: {}", e), level);
                (StatusDocument::build(None, self.pinned), event, false)
            }
        };
        PassReport {
            document,
            event,
            fetched,
            finished_at: Instant::now(),
        }
    }

    /// Loops until shutdown or until the receiving side goes away.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    let report = self.run_pass().await;
                    if self.sender.send(report).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Spawns the poller task.
pub fn start_poller(
    source: Arc<dyn StatsSource>,
    pinned: Option<ApiVersion>,
    interval: Duration,
    shutdown: broadcast::Receiver<()>,
) -> (mpsc::Receiver<PassReport>, JoinHandle<()>) {
    let (sender, receiver) = mpsc::channel::<PassReport>(EVENT_QUEUE_SIZE);
    let poller = Poller::new(source, pinned, interval, sender);
    let handle = tokio::spawn(poller.run(shutdown));
    (receiver, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;
    use crate::logging::LogLevel;
    use crate::render::tests::client_data_payload;
    use crate::stats::MockStatsSource;
    use crate::stats::error::StatsError;

    fn source_with(
        result: fn() -> Result<crate::payload::StatsPayload, StatsError>,
    ) -> Arc<dyn StatsSource> {
        let mut source = MockStatsSource::new();
        source.expect_describe().return_const("mock".to_string());
        source
            .expect_get_performance_stats()
            .returning(move || result());
        Arc::new(source)
    }

    #[tokio::test]
    async fn successful_pass_reports_client_count() {
        let (sender, _receiver) = mpsc::channel(1);
        let poller = Poller::new(
            source_with(|| Ok(client_data_payload())),
            None,
            Duration::from_secs(1),
            sender,
        );

        let report = poller.run_pass().await;
        assert!(report.fetched);
        assert_eq!(report.event.event_type, EventType::Success);
        assert_eq!(report.event.msg, "Fetched stats (clientData): 1 client(s)");
        assert_eq!(report.document.table_body.len(), 1);
    }

    #[tokio::test]
    async fn failed_pass_renders_undefined_and_classifies_error() {
        let (sender, _receiver) = mpsc::channel(1);
        let poller = Poller::new(
            source_with(|| {
                Err(StatsError::Http {
                    status: 404,
                    message: "Not Found".to_string(),
                })
            }),
            None,
            Duration::from_secs(1),
            sender,
        );

        let report = poller.run_pass().await;
        assert!(!report.fetched);
        assert_eq!(report.event.event_type, EventType::Error);
        assert_eq!(report.event.log_level, LogLevel::Error);
        assert!(report.document.table_body.is_empty());
        assert_eq!(report.document.overall[0], "Total performance: undefined");
    }

    #[tokio::test]
    async fn poller_reports_until_shutdown() {
        let (shutdown_sender, _) = broadcast::channel(1);
        let (mut receiver, handle) = start_poller(
            source_with(|| Ok(client_data_payload())),
            None,
            Duration::from_millis(10),
            shutdown_sender.subscribe(),
        );

        let first = receiver.recv().await.unwrap();
        assert!(first.fetched);
        let second = receiver.recv().await.unwrap();
        assert!(second.finished_at >= first.finished_at);

        shutdown_sender.send(()).unwrap();
        // Drain so a pending send cannot block the loop.
        while receiver.try_recv().is_ok() {}
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("poller did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn poller_stops_when_receiver_is_dropped() {
        let (shutdown_sender, _) = broadcast::channel::<()>(1);
        let (receiver, handle) = start_poller(
            source_with(|| Ok(client_data_payload())),
            None,
            Duration::from_millis(5),
            shutdown_sender.subscribe(),
        );
        drop(receiver);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("poller did not stop")
            .unwrap();
    }
}
