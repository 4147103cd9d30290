//! HTTP API surface
//!
//! - GET  /              - landing page
//! - POST /upload        - analyze a multipart audio upload
//! - POST /download_word - render a summary as a .docx attachment
//! - GET  /health        - health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
