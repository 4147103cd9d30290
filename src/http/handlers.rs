use super::state::AppState;
use anyhow::Context;
use crate::docx::{render_minutes, ATTACHMENT_FILENAME, DOCX_MIME_TYPE};
use crate::summary::SummaryResult;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /
/// Landing page with the upload form
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../templates/index.html"))
}

/// POST /upload
/// Accept a multipart audio file, run it through the Gemini analysis
/// pipeline, and return the extracted JSON summary text verbatim.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    // Pull out the "audio" field; reject before touching Gemini when the
    // file is missing or unnamed.
    let mut audio: Option<(String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("audio") {
                    continue;
                }
                let filename = field.file_name().unwrap_or("").to_string();
                if filename.is_empty() {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: "No selected file".to_string(),
                        }),
                    )
                        .into_response();
                }
                match field.bytes().await {
                    Ok(bytes) => {
                        audio = Some((filename, bytes.to_vec()));
                        break;
                    }
                    // Keeps the framework-level code, e.g. 413 when the
                    // body cap is tripped mid-stream
                    Err(e) => {
                        return (
                            e.status(),
                            Json(ErrorResponse {
                                error: format!("Failed to read uploaded file: {}", e),
                            }),
                        )
                            .into_response();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return (
                    e.status(),
                    Json(ErrorResponse {
                        error: format!("Failed to parse multipart data: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    }

    let Some((filename, bytes)) = audio else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file part".to_string(),
            }),
        )
            .into_response();
    };

    let filepath = state.uploads_dir.join(sanitize_filename(&filename));

    // Write and analyze as one fallible step so the cleanup below also
    // covers a failed or partial scratch write.
    let result = match tokio::fs::write(&filepath, &bytes)
        .await
        .with_context(|| format!("failed to write scratch file {}", filepath.display()))
    {
        Ok(()) => {
            info!("received {} ({} bytes), analyzing", filename, bytes.len());
            state.summarizer.analyze(&filepath).await
        }
        Err(e) => Err(e),
    };

    // The scratch file never outlives the request, whatever the outcome.
    if filepath.exists() {
        if let Err(e) = tokio::fs::remove_file(&filepath).await {
            warn!("failed to remove scratch file {}: {}", filepath.display(), e);
        }
    }

    match result {
        Ok(summary_json) => {
            info!("analysis complete for {}", filename);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                summary_json,
            )
                .into_response()
        }
        Err(e) => {
            error!("analysis failed for {}: {:#}", filename, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("분석 실패: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /download_word
/// Render a posted summary as a .docx attachment
pub async fn download_word(Json(summary): Json<SummaryResult>) -> impl IntoResponse {
    match render_minutes(&summary) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, DOCX_MIME_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", ATTACHMENT_FILENAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("document build failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("{}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Reduce an uploaded filename to a safe flat name: path components are
/// dropped and anything outside [A-Za-z0-9._-] becomes an underscore.
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // A name of only dots or nothing at all would escape or vanish
    if cleaned.trim_matches('.').is_empty() {
        "recording".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_name() {
        assert_eq!(sanitize_filename("meeting.mp3"), "meeting.mp3");
    }

    #[test]
    fn test_sanitize_drops_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\rec.wav"), "rec.wav");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("주간 회의.m4a"), "_____.m4a");
        assert_eq!(sanitize_filename("a b?c.wav"), "a_b_c.wav");
    }

    #[test]
    fn test_sanitize_degenerate_names() {
        assert_eq!(sanitize_filename(".."), "recording");
        assert_eq!(sanitize_filename("...."), "recording");
    }
}
