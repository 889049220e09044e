use std::time::Duration;

use tracing::warn;

use cache::synchronizer::DEFAULT_SYNC_INTERVAL;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the shopping-list service.
    pub base_api_url: String,

    /// Connection string for the local state database.
    pub database_url: String,

    /// How often auto-sync refreshes the list snapshot.
    ///
    /// Purpose:
    /// - keep every screen working off recent data
    /// - bound how stale a snapshot can get without user action
    pub sync_interval: Duration,
}

impl ClientConfig {
    /// Read configuration from the environment:
    ///
    /// - `SL_BASE_API_URL` (default `http://localhost:8080`)
    /// - `SL_DATABASE_URL` (default `sqlite://sl_client.db`)
    /// - `SL_SYNC_INTERVAL_MS` (default `15000`)
    pub fn from_env() -> Self {
        let base_api_url = std::env::var("SL_BASE_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let database_url = std::env::var("SL_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://sl_client.db".to_string());

        let sync_interval = match std::env::var("SL_SYNC_INTERVAL_MS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(e) => {
                    warn!(
                        value = %raw,
                        error = %e,
                        "SL_SYNC_INTERVAL_MS is not a number; using the default"
                    );
                    DEFAULT_SYNC_INTERVAL
                }
            },
            Err(_) => DEFAULT_SYNC_INTERVAL,
        };

        Self {
            base_api_url,
            database_url,
            sync_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the SL_* variables end to end; splitting it would race
    // the process-wide environment across parallel tests.
    #[test]
    fn from_env_defaults_overrides_and_fallback() {
        unsafe {
            std::env::remove_var("SL_BASE_API_URL");
            std::env::remove_var("SL_DATABASE_URL");
            std::env::remove_var("SL_SYNC_INTERVAL_MS");
        }

        let config = ClientConfig::from_env();
        assert_eq!(config.base_api_url, "http://localhost:8080");
        assert_eq!(config.database_url, "sqlite://sl_client.db");
        assert_eq!(config.sync_interval, DEFAULT_SYNC_INTERVAL);

        unsafe { std::env::set_var("SL_SYNC_INTERVAL_MS", "5000") };
        assert_eq!(
            ClientConfig::from_env().sync_interval,
            Duration::from_millis(5000)
        );

        // Garbage falls back to the default instead of failing startup.
        unsafe { std::env::set_var("SL_SYNC_INTERVAL_MS", "soon") };
        assert_eq!(ClientConfig::from_env().sync_interval, DEFAULT_SYNC_INTERVAL);

        unsafe { std::env::remove_var("SL_SYNC_INTERVAL_MS") };
    }
}
