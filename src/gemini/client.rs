use std::time::{Duration, Instant};

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info};

use super::types::{
    Content, FileData, FileEnvelope, FileState, GenerateRequest, GenerateResponse, Part,
    RemoteFile, StartUploadFile, StartUploadRequest,
};
use crate::config::GeminiConfig;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("audio processing failed on the Gemini side")]
    ProcessingFailed,

    #[error("remote file {name} still processing after {waited_secs}s")]
    PollTimeout { name: String, waited_secs: u64 },

    #[error("upload session response missing x-goog-upload-url header")]
    MissingUploadUrl,

    #[error("model returned no text candidates")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, GeminiError>;

const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Thin client for the Gemini Files API and generateContent endpoint.
///
/// The base URL is configurable so tests can stand in a local mock for
/// generativelanguage.googleapis.com.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    cfg: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(cfg: GeminiConfig) -> Self {
        Self {
            cfg,
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// Stage a local file with the Files API (resumable upload protocol:
    /// a start request yields a session URL, the bytes then go there in
    /// a single finalize step).
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile> {
        let start = self
            .client
            .post(format!("{}/upload/v1beta/files", self.cfg.base_url))
            .header("x-goog-api-key", &self.cfg.api_key)
            .header("x-goog-upload-protocol", "resumable")
            .header("x-goog-upload-command", "start")
            .header("x-goog-upload-header-content-length", bytes.len())
            .header("x-goog-upload-header-content-type", mime_type)
            .json(&StartUploadRequest {
                file: StartUploadFile { display_name },
            })
            .send()
            .await?;
        let start = check(start).await?;

        let upload_url = start
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .ok_or(GeminiError::MissingUploadUrl)?;

        debug!("upload session opened for {}", display_name);

        let resp = self
            .client
            .post(upload_url)
            .header("x-goog-api-key", &self.cfg.api_key)
            .header("x-goog-upload-offset", "0")
            .header("x-goog-upload-command", "upload, finalize")
            .body(bytes)
            .send()
            .await?;
        let resp = check(resp).await?;

        let envelope: FileEnvelope = resp.json().await?;
        info!(
            "uploaded {} as {} (state: {:?})",
            display_name, envelope.file.name, envelope.file.state
        );
        Ok(envelope.file)
    }

    /// GET /v1beta/{name} — refresh the handle's processing state.
    pub async fn get_file(&self, name: &str) -> Result<RemoteFile> {
        let resp = self
            .client
            .get(format!("{}/v1beta/{}", self.cfg.base_url, name))
            .header("x-goog-api-key", &self.cfg.api_key)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Poll until the file leaves PROCESSING, at the configured interval
    /// and within the configured deadline. FAILED is terminal.
    pub async fn wait_until_active(&self, mut file: RemoteFile) -> Result<RemoteFile> {
        let started = Instant::now();
        let deadline = Duration::from_secs(self.cfg.poll_timeout_secs);

        while file.state == FileState::Processing {
            if started.elapsed() >= deadline {
                return Err(GeminiError::PollTimeout {
                    name: file.name,
                    waited_secs: self.cfg.poll_timeout_secs,
                });
            }
            tokio::time::sleep(Duration::from_secs(self.cfg.poll_interval_secs)).await;
            file = self.get_file(&file.name).await?;
        }

        if file.state == FileState::Failed {
            return Err(GeminiError::ProcessingFailed);
        }

        debug!("{} ready (state: {:?})", file.name, file.state);
        Ok(file)
    }

    /// Run the model over a staged audio file with the given prompt and
    /// return the first candidate's text.
    pub async fn generate_content(&self, prompt: &str, file: &RemoteFile) -> Result<String> {
        let mime_type = file.mime_type.as_deref().unwrap_or("audio/mpeg");
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(prompt),
                    Part::FileData(FileData {
                        mime_type,
                        file_uri: &file.uri,
                    }),
                ],
            }],
        };

        let resp = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.cfg.base_url, self.cfg.model
            ))
            .header("x-goog-api-key", &self.cfg.api_key)
            .json(&request)
            .send()
            .await?;
        let resp = check(resp).await?;

        let body: GenerateResponse = resp.json().await?;
        let text: String = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GeminiError::EmptyResponse);
        }
        Ok(text)
    }

    /// DELETE /v1beta/{name}. Callers treat failures as best-effort.
    pub async fn delete_file(&self, name: &str) -> Result<()> {
        let resp = self
            .client
            .delete(format!("{}/v1beta/{}", self.cfg.base_url, name))
            .header("x-goog-api-key", &self.cfg.api_key)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Map non-success statuses to typed errors, keeping 429 distinct so the
/// caller can apply its single quota retry.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(GeminiError::QuotaExhausted(body));
    }
    Err(GeminiError::Api { status, body })
}
