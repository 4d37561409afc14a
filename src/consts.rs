pub mod cli_consts {
    //! Monitor Configuration Constants
    //!
    //! Constants for the stats monitor, grouped by functional area.

    // =============================================================================
    // SERVER CONFIGURATION
    // =============================================================================

    /// Path of the aggregate stats endpoint on the server.
    pub const STATS_ENDPOINT: &str = "/performanceStats";

    /// Environment variable consulted when neither `--server` nor the config file set a URL.
    pub const SERVER_ENV_VAR: &str = "CHUNK_MONITOR_SERVER";

    /// HTTP client timeouts
    pub mod http {
        use std::time::Duration;

        /// Connection timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // DASHBOARD CONFIGURATION
    // =============================================================================

    /// Default seconds between render passes in watch mode.
    /// Matches the cadence at which clients report their performance.
    pub const DEFAULT_REFRESH_SECS: u64 = 3;

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the channel between the poller and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 16;

    /// Styling class attached to every performance cell.
    pub const PERFORMANCE_CLASS: &str = "performance-number";
}
