pub mod config;
pub mod docx;
pub mod gemini;
pub mod http;
pub mod summary;

pub use config::Config;
pub use gemini::{FileState, GeminiClient, GeminiError, RemoteFile};
pub use http::{create_router, AppState};
pub use summary::{extract_json, ActionItem, SummaryResult, Summarizer, TimelineEntry};
