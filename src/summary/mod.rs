//! Meeting-summary domain: the structured summary shape, the fixed
//! analysis prompt, JSON extraction from model text, and the Summarizer
//! that drives one recording through the Gemini pipeline.

mod extract;
mod summarizer;
mod types;

pub use extract::extract_json;
pub use summarizer::Summarizer;
pub use types::{ActionItem, SummaryResult, TimelineEntry};
