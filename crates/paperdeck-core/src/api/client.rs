//! Typed client for the backend REST surface.
//!
//! One request method per endpoint; every response funnels through the same
//! status check so the error taxonomy stays uniform. Paths are resolved
//! against the configured backend origin.

use reqwest::multipart;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::CoreConfig;
use crate::error::ApiError;
use crate::models::{
    Job, MetadataRow, NewProject, Paper, PodcastAsset, PodcastEpisode, Project, SummaryItem,
    ToolKind, ToolRunOutcome,
};

/// Error body shape of the backend (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    config: CoreConfig,
}

impl ApiClient {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.resolve(path)
    }

    /// Maps a non-success response onto the error taxonomy, surfacing the
    /// backend's `detail` message when one is present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| status.to_string());
        if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound(detail))
        } else {
            Err(ApiError::Server {
                status: status.as_u16(),
                detail,
            })
        }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let response = self.http.get(self.url("/api/projects")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Creates a project. An empty (or whitespace) name is rejected here,
    /// before any network call.
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Project, ApiError> {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("project name is required".to_string()));
        }
        let body = NewProject {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/projects"))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/projects/{project_id}")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/projects/{project_id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn list_papers(&self, project_id: &str) -> Result<Vec<Paper>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/projects/{project_id}/papers")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Uploads one file as multipart form data. The pipeline calls this once
    /// per file; the backend does not accept multi-file uploads.
    pub async fn upload_paper(
        &self,
        project_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Paper, ApiError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|err| ApiError::Validation(format!("bad upload part: {err}")))?;
        let form = multipart::Form::new().part("file", part);
        let response = self
            .http
            .post(self.url(&format!("/api/projects/{project_id}/papers/upload")))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn metadata_table(&self, project_id: &str) -> Result<Vec<MetadataRow>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/projects/{project_id}/metadata/table")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Raw CSV bytes of the project's metadata table.
    pub async fn metadata_csv(&self, project_id: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/projects/{project_id}/metadata/csv")))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn summaries(&self, project_id: &str) -> Result<Vec<SummaryItem>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/projects/{project_id}/summaries")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn podcasts(&self, project_id: &str) -> Result<Vec<PodcastEpisode>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/projects/{project_id}/podcasts")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn paper_metadata(
        &self,
        project_id: &str,
        paper_id: &str,
    ) -> Result<MetadataRow, ApiError> {
        let response = self
            .http
            .get(self.url(&format!(
                "/api/projects/{project_id}/papers/{paper_id}/metadata"
            )))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn paper_podcasts(
        &self,
        project_id: &str,
        paper_id: &str,
    ) -> Result<Vec<PodcastAsset>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!(
                "/api/projects/{project_id}/papers/{paper_id}/podcasts"
            )))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Job records the backend keeps for one paper, newest first.
    pub async fn paper_jobs(&self, project_id: &str, paper_id: &str) -> Result<Vec<Job>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!(
                "/api/projects/{project_id}/papers/{paper_id}/jobs"
            )))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Runs `tool` against a single paper.
    pub async fn run_tool(
        &self,
        project_id: &str,
        paper_id: &str,
        tool: ToolKind,
    ) -> Result<ToolRunOutcome, ApiError> {
        let response = self
            .http
            .post(self.url(&format!(
                "/api/projects/{project_id}/papers/{paper_id}/tools/{tool}"
            )))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Runs `tool` against a set of papers in one request. Callers validate
    /// non-emptiness; this is the raw wire call.
    pub async fn run_tool_batch(
        &self,
        project_id: &str,
        tool: ToolKind,
        paper_ids: &[String],
    ) -> Result<ToolRunOutcome, ApiError> {
        let body = serde_json::json!({ "paperIds": paper_ids });
        let response = self
            .http
            .post(self.url(&format!("/api/projects/{project_id}/papers/tools/{tool}")))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Absolute URL of a paper's PDF stream.
    pub fn paper_file_url(&self, paper: &Paper) -> String {
        self.config.resolve(&paper.file_path())
    }

    /// Fetches an arbitrary resource (e.g. a podcast MP3) by path or
    /// absolute URL.
    pub async fn fetch_bytes(&self, path_or_url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(self.url(path_or_url)).send().await?;
        let response = Self::check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(CoreConfig::from_env())
    }

    #[tokio::test]
    async fn empty_project_name_is_rejected_without_network() {
        // Base URL points nowhere; validation must fire before any request.
        let client = ApiClient::new(CoreConfig::new("http://127.0.0.1:1"));
        let err = client.create_project("   ", "desc").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    #[ignore] // Requires a running backend (PAPERDECK_BACKEND_URL)
    async fn lists_projects_against_live_backend() {
        let projects = client().list_projects().await.unwrap();
        // Shape check only; content depends on the backend's state.
        for project in projects {
            assert!(!project.id.is_empty());
        }
    }

    #[tokio::test]
    #[ignore] // Requires a running backend (PAPERDECK_BACKEND_URL)
    async fn create_and_delete_round_trip() {
        let client = client();
        let project = client
            .create_project("paperdeck client test", "created by an ignored test")
            .await
            .unwrap();
        client.delete_project(&project.id).await.unwrap();
    }
}
