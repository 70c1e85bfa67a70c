//! Server configuration loaded from environment variables.

use camino::Utf8PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. "0.0.0.0:3000").
    pub bind_addr: String,

    /// Public origin used for share links, without a trailing slash.
    pub base_url: String,

    /// Directory holding `rsvp.redb`. `None` means the platform data dir.
    pub data_dir: Option<Utf8PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `RSVP_BIND_ADDR`: bind address (default: "0.0.0.0:3000")
    /// - `RSVP_BASE_URL`: origin for share links (default: "http://localhost:3000")
    /// - `RSVP_DATA_DIR`: store directory (default: platform data dir)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("RSVP_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let base_url = std::env::var("RSVP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let data_dir = std::env::var("RSVP_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(Utf8PathBuf::from);

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            data_dir = ?data_dir,
            "rsvp configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            data_dir,
        })
    }
}
