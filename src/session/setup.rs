//! Session setup and initialization

use crate::environment::Environment;
use crate::payload::ApiVersion;
use crate::stats::{StatsClient, StatsSource};
use crate::workers::poller::{PassReport, start_poller};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Options shared by the TUI and headless watch modes.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub pinned: Option<ApiVersion>,
    pub interval: Duration,
}

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Reports from the poller, one per render pass
    pub report_receiver: mpsc::Receiver<PassReport>,
    /// Join handle of the poller task
    pub join_handle: JoinHandle<()>,
    /// Shutdown sender to stop the poller
    pub shutdown_sender: broadcast::Sender<()>,
    /// The server being watched
    pub environment: Environment,
    /// Full URL of the stats endpoint
    pub source: String,
    /// Seconds between passes (for display purposes)
    pub interval: Duration,
}

/// Sets up a watch session
///
/// 1. Creates the stats client
/// 2. Sets up the shutdown channel
/// 3. Starts the poller
pub async fn setup_session(
    env: Environment,
    options: WatchOptions,
) -> Result<SessionData, Box<dyn Error>> {
    let source: Arc<dyn StatsSource> = Arc::new(StatsClient::new(env.clone())?);

    let (shutdown_sender, _) = broadcast::channel(1);
    let (report_receiver, join_handle) = start_poller(
        source.clone(),
        options.pinned,
        options.interval,
        shutdown_sender.subscribe(),
    );

    Ok(SessionData {
        report_receiver,
        join_handle,
        shutdown_sender,
        environment: source.environment().clone(),
        source: source.describe(),
        interval: options.interval,
    })
}
