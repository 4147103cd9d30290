use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::extract::extract_json;
use crate::gemini::{GeminiClient, GeminiError, RemoteFile};

/// Fixed instruction prompt for the analysis call. Output language and
/// honesty constraints are part of the contract with the model.
const ANALYSIS_PROMPT: &str = r#"
You are a professional Executive Assistant. Listen to this recording.

CRITICAL RULES:
1. LANGUAGE: ALL OUTPUT MUST BE IN KOREAN (한국어).
2. HONESTY: Summarize EXACTLY what is said. Do not invent business topics.

OUTPUT FORMAT (JSON ONLY):
{
    "title": "Meeting Title (Korean)",
    "summary": "3-sentence summary (Polite Korean)",
    "action_items": [ {"owner": "Name", "task": "Task", "deadline": "Date"} ],
    "key_decisions": [ "Decision 1", "Decision 2" ],
    "timeline": [ {"time": "00:00", "topic": "Topic"} ]
}
"#;

/// Runs one recording through the full analysis pipeline: stage with the
/// Files API, wait until the remote side has processed it, ask the model
/// for the structured summary, and tear the staged file down again.
pub struct Summarizer {
    client: GeminiClient,
    quota_backoff: Duration,
}

impl Summarizer {
    pub fn new(client: GeminiClient, quota_backoff: Duration) -> Self {
        Self {
            client,
            quota_backoff,
        }
    }

    /// Analyze the audio file at `path` and return the extracted JSON
    /// summary text. The staged remote file is deleted before returning,
    /// whatever the outcome; deletion failures are logged and swallowed
    /// so they never mask the analysis result.
    pub async fn analyze(&self, path: &Path) -> Result<String> {
        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recording");

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read uploaded file {}", path.display()))?;

        info!("uploading {} ({} bytes) for analysis", display_name, bytes.len());

        let file = self
            .client
            .upload_file(bytes, mime_type_for(path), display_name)
            .await?;
        let remote_name = file.name.clone();

        let outcome = self.run_inference(file).await;

        if let Err(e) = self.client.delete_file(&remote_name).await {
            warn!("failed to delete remote file {}: {}", remote_name, e);
        }

        outcome
    }

    async fn run_inference(&self, file: RemoteFile) -> Result<String> {
        let file = self.client.wait_until_active(file).await?;

        let text = match self.client.generate_content(ANALYSIS_PROMPT, &file).await {
            Ok(text) => text,
            // Exactly one retry, only for the quota case.
            Err(GeminiError::QuotaExhausted(detail)) => {
                warn!(
                    "quota exhausted ({}); retrying once after {}s",
                    detail.trim(),
                    self.quota_backoff.as_secs()
                );
                tokio::time::sleep(self.quota_backoff).await;
                self.client.generate_content(ANALYSIS_PROMPT, &file).await?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(extract_json(&text))
    }
}

/// Content type hint for the Files API, from the upload's extension.
fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        _ => "audio/mpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_type_for_known_extensions() {
        assert_eq!(mime_type_for(&PathBuf::from("a.wav")), "audio/wav");
        assert_eq!(mime_type_for(&PathBuf::from("a.MP3")), "audio/mpeg");
        assert_eq!(mime_type_for(&PathBuf::from("a.m4a")), "audio/mp4");
    }

    #[test]
    fn test_mime_type_fallback() {
        assert_eq!(mime_type_for(&PathBuf::from("mystery.bin")), "audio/mpeg");
        assert_eq!(mime_type_for(&PathBuf::from("noext")), "audio/mpeg");
    }
}
