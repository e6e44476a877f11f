use serde::{Deserialize, Serialize};

/// Extracted metadata for one paper. Produced by the backend in response to
/// a summarize run; the client only caches and invalidates it, never
/// constructs or mutates one.
///
/// Field casing mirrors the backend: only `paperId` is camelCase, the
/// extraction fields are snake_case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRow {
    #[serde(rename = "paperId")]
    pub paper_id: String,
    pub conference: String,
    pub year: i32,
    pub link: String,
    pub domain: String,
    pub title: String,
    pub summary: String,
    pub tags: String,
    pub date_added: String,
    pub ready_to_publish: bool,
    pub script_lines: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_casing() {
        let json = r#"{
            "paperId": "paper-1",
            "conference": "NeurIPS",
            "year": 2017,
            "link": "https://arxiv.org/abs/1706.03762",
            "domain": "NLP",
            "title": "Attention Is All You Need",
            "summary": "Transformers.",
            "tags": "attention,transformer",
            "date_added": "2026-01-05",
            "ready_to_publish": true,
            "script_lines": 42
        }"#;
        let row: MetadataRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.paper_id, "paper-1");
        assert!(row.ready_to_publish);
        assert_eq!(row.script_lines, 42);
    }
}
