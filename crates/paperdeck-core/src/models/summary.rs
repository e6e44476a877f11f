use serde::{Deserialize, Serialize};

/// One row of a project's summary view: the extracted metadata projection
/// plus the server-relative PDF path for the source paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    pub paper_id: String,
    pub title: String,
    pub summary: String,
    pub conference: String,
    pub year: i32,
    pub domain: String,
    pub tags: String,
    pub pdf_url: String,
}
