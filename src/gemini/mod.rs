//! Client for Google's hosted Gemini inference API.
//!
//! Covers the three interactions the service needs: staging audio with
//! the Files API, polling the staged file until it is ready, and running
//! generateContent over it. Deleting the staged file afterwards is our
//! responsibility; orphaned remote files count against the quota.

mod client;
mod types;

pub use client::{GeminiClient, GeminiError};
pub use types::{FileState, RemoteFile};
