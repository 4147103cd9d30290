use serde::{Deserialize, Serialize};

/// The structured summary shape the model is instructed to produce, and
/// the body shape the export endpoint accepts. Every field is optional
/// on the wire; the exporter substitutes defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub key_decisions: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}
