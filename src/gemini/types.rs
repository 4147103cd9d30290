use serde::{Deserialize, Serialize};

/// Processing state of a file staged with the Files API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    Processing,
    Active,
    Failed,
    #[serde(other)]
    Unknown,
}

/// A file staged on the Gemini side for inference. Owned by the remote
/// service; we hold only the handle and must delete it when done.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    /// Resource name, e.g. "files/abc123"
    pub name: String,
    /// URI passed to generateContent as file_data
    pub uri: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub state: FileState,
}

/// Envelope used by the upload endpoints: `{"file": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct FileEnvelope {
    pub file: RemoteFile,
}

#[derive(Debug, Serialize)]
pub(crate) struct StartUploadRequest<'a> {
    pub file: StartUploadFile<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StartUploadFile<'a> {
    pub display_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Part<'a> {
    Text(&'a str),
    FileData(FileData<'a>),
}

#[derive(Debug, Serialize)]
pub(crate) struct FileData<'a> {
    pub mime_type: &'a str,
    pub file_uri: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}
