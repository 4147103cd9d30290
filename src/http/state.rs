use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::summary::Summarizer;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Scratch directory for in-flight uploads
    pub uploads_dir: PathBuf,
    /// Request body cap applied to the router
    pub max_upload_bytes: usize,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(cfg: &Config) -> Self {
        let client = GeminiClient::new(cfg.gemini.clone());
        let summarizer = Summarizer::new(
            client,
            Duration::from_secs(cfg.gemini.quota_backoff_secs),
        );

        Self {
            uploads_dir: PathBuf::from(&cfg.uploads.dir),
            max_upload_bytes: cfg.max_upload_bytes(),
            summarizer: Arc::new(summarizer),
        }
    }
}
