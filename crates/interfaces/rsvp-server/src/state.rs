use std::sync::Arc;

use rsvp_app_core::persistence::default_data_dir;
use rsvp_app_core::StorePersistence;

use crate::config::Config;
use crate::error::ApiError;

/// Shared state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub records: StorePersistence,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let root = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        tracing::info!(root = %root, "rsvp store location");
        Ok(Self::with_records(config, StorePersistence::open(root)))
    }

    pub fn with_records(config: Config, records: StorePersistence) -> Self {
        Self {
            config: Arc::new(config),
            records,
        }
    }

    /// Run store work off the async executor.
    pub async fn blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&StorePersistence) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let records = self.records.clone();
        tokio::task::spawn_blocking(move || f(&records))
            .await
            .map_err(|e| ApiError::Internal(e.into()))?
    }
}
