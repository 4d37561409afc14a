//! Stats Client
//!
//! HTTP client for the stats server's aggregate progress endpoint.

use crate::consts::cli_consts::{STATS_ENDPOINT, http};
use crate::environment::Environment;
use crate::payload::StatsPayload;
use crate::stats::StatsSource;
use crate::stats::error::StatsError;
use reqwest::{Client, ClientBuilder, Response};

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("chunk-monitor/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    environment: Environment,
}

impl StatsClient {
    pub fn new(environment: Environment) -> Result<Self, StatsError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.server_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Full URL of the stats endpoint.
    pub fn stats_url(&self) -> String {
        self.build_url(STATS_ENDPOINT)
    }

    async fn handle_response_status(response: Response) -> Result<Response, StatsError> {
        if !response.status().is_success() {
            return Err(StatsError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json(&self, endpoint: &str) -> Result<StatsPayload, StatsError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(StatsPayload::from_slice(&response_bytes)?)
    }
}

#[async_trait::async_trait]
impl StatsSource for StatsClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    fn describe(&self) -> String {
        self.stats_url()
    }

    async fn get_performance_stats(&self) -> Result<StatsPayload, StatsError> {
        self.get_json(STATS_ENDPOINT).await
    }
}
