use crate::logging::LogLevel;
use crate::stats::error::StatsError;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_fetch_error(&self, error: &StatsError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            StatsError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            StatsError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: wrong server, auth, or a payload we cannot read
            StatsError::Http { status, .. } if *status == 401 => LogLevel::Error,
            StatsError::Http { status, .. } if *status == 403 => LogLevel::Error,
            StatsError::Http { status, .. } if *status == 404 => LogLevel::Error,
            StatsError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
