use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of analysis tools the backend can run against papers.
///
/// Adding a tool is a compile-time-checked change: every dispatch-side match
/// over this enum is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Summarize,
    Podcast,
    Recommend,
    Latex,
    ImportArxiv,
    Chat,
}

impl ToolKind {
    /// Path segment used by the tools endpoints.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Summarize => "summarize",
            ToolKind::Podcast => "podcast",
            ToolKind::Recommend => "recommend",
            ToolKind::Latex => "latex",
            ToolKind::ImportArxiv => "import_arxiv",
            ToolKind::Chat => "chat",
        }
    }

    /// Tools that accept the whole batch selection in one request.
    pub fn supports_batch(self) -> bool {
        matches!(self, ToolKind::Summarize | ToolKind::Podcast)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend-reported lifecycle of a job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Error,
}

/// Server truth about one tool execution against one paper. Distinct from
/// the client's dispatch ledger, which tracks requests in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub paper_id: String,
    pub tool: ToolKind,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
}

/// Response body of a tool invocation request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRunOutcome {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_kind_round_trips_through_serde() {
        for tool in [
            ToolKind::Summarize,
            ToolKind::Podcast,
            ToolKind::Recommend,
            ToolKind::Latex,
            ToolKind::ImportArxiv,
            ToolKind::Chat,
        ] {
            let json = serde_json::to_string(&tool).unwrap();
            assert_eq!(json, format!("\"{}\"", tool.as_str()));
        }
    }

    #[test]
    fn only_summarize_and_podcast_batch() {
        assert!(ToolKind::Summarize.supports_batch());
        assert!(ToolKind::Podcast.supports_batch());
        assert!(!ToolKind::Recommend.supports_batch());
        assert!(!ToolKind::Chat.supports_batch());
    }
}
