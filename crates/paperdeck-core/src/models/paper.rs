use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded document within a project. Created by a successful upload and
/// read-only thereafter from the client's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub mime: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Paper {
    /// Server-relative path of the stored PDF stream.
    pub fn file_path(&self) -> String {
        format!("/api/projects/{}/papers/{}/file", self.project_id, self.id)
    }

    /// Title when extracted, the original file name otherwise.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.original_name)
    }

    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper() -> Paper {
        serde_json::from_str(
            r#"{
                "id": "paper-1",
                "projectId": "p1",
                "filename": "abc123.pdf",
                "originalName": "attention.pdf",
                "size": 2097152,
                "mime": "application/pdf",
                "createdAt": "2026-01-05T10:00:00Z",
                "updatedAt": "2026-01-05T10:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn file_path_is_scoped_under_project() {
        assert_eq!(paper().file_path(), "/api/projects/p1/papers/paper-1/file");
    }

    #[test]
    fn display_name_falls_back_to_original_name() {
        let mut p = paper();
        assert_eq!(p.display_name(), "attention.pdf");
        p.title = Some("Attention Is All You Need".to_string());
        assert_eq!(p.display_name(), "Attention Is All You Need");
    }

    #[test]
    fn size_mb_converts_bytes() {
        assert!((paper().size_mb() - 2.0).abs() < f64::EPSILON);
    }
}
