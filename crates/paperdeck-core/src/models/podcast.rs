use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a project's podcast view. Both urls may be server-relative and
/// must go through `urls::resolve` before they are played or opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastEpisode {
    pub paper_id: String,
    pub title: String,
    pub mp3_url: String,
    #[serde(default)]
    pub pdf_url: String,
}

/// A generated audio asset attached to a paper. Zero or more per paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastAsset {
    pub id: String,
    pub paper_id: String,
    pub mp3_url: String,
    pub duration_sec: f64,
    pub created_at: DateTime<Utc>,
}
