use anyhow::{bail, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub uploads: UploadConfig,
    pub gemini: GeminiConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct UploadConfig {
    /// Scratch directory for in-flight uploads (created at startup)
    pub dir: String,
    /// Request body cap in megabytes
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API credential. No bundled default; must come from GEMINI_API_KEY
    /// or an explicit config entry.
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
    pub quota_backoff_secs: u64,
}

impl Config {
    /// Load configuration from defaults, an optional TOML file, and
    /// environment overrides (MEETING_SCRIBE__SECTION__KEY).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "meeting-scribe")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 5004)?
            .set_default("uploads.dir", "uploads")?
            .set_default("uploads.max_upload_mb", 100)?
            .set_default("gemini.model", "gemini-2.5-flash")?
            .set_default("gemini.base_url", "https://generativelanguage.googleapis.com")?
            .set_default("gemini.poll_interval_secs", 1)?
            .set_default("gemini.poll_timeout_secs", 120)?
            .set_default("gemini.quota_backoff_secs", 30)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("MEETING_SCRIBE").separator("__"))
            .set_override_option("gemini.api_key", std::env::var("GEMINI_API_KEY").ok())?
            .build()?;

        let cfg: Config = settings.try_deserialize()?;

        if cfg.gemini.api_key.trim().is_empty() {
            bail!("Gemini API key is not configured; set GEMINI_API_KEY");
        }

        Ok(cfg)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.uploads.max_upload_mb * 1024 * 1024
    }
}
