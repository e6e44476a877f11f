//! Sequential upload pipeline.
//!
//! One batch at a time, one file per request, in order. Sequential transfer
//! bounds backend concurrency and gives the user a legible progress line. A
//! failed file is recorded and skipped; the remaining files are still
//! attempted, and every success invalidates the project's papers key
//! immediately so the list grows as uploads land.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::events::CoreEvent;
use crate::models::Paper;
use crate::store::{EntityCache, Mutation};

/// Progress of the current (or most recent) upload batch.
#[derive(Debug, Clone, Default)]
pub struct UploadProgress {
    /// True from the first attempt until every file has settled.
    pub busy: bool,
    pub total: usize,
    pub settled: usize,
    pub succeeded: usize,
    /// (file name, message) per failed file.
    pub failures: Vec<(String, String)>,
}

pub struct UploadPipeline {
    api: Arc<ApiClient>,
    cache: Arc<Mutex<EntityCache>>,
    progress: Mutex<UploadProgress>,
    events: UnboundedSender<CoreEvent>,
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl UploadPipeline {
    pub fn new(
        api: Arc<ApiClient>,
        cache: Arc<Mutex<EntityCache>>,
        events: UnboundedSender<CoreEvent>,
    ) -> Self {
        Self {
            api,
            cache,
            progress: Mutex::new(UploadProgress::default()),
            events,
        }
    }

    /// Kicks off a batch upload into `project_id`. Rejects an empty batch
    /// and refuses to interleave with a batch still in flight.
    pub fn start(self: &Arc<Self>, project_id: String, files: Vec<PathBuf>) -> Result<(), ApiError> {
        if files.is_empty() {
            return Err(ApiError::Validation("no files to upload".to_string()));
        }
        {
            let mut progress = self.progress.lock();
            if progress.busy {
                return Err(ApiError::Validation(
                    "an upload batch is already running".to_string(),
                ));
            }
            *progress = UploadProgress {
                busy: true,
                total: files.len(),
                ..UploadProgress::default()
            };
        }
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let api = Arc::clone(&this.api);
            let pid = project_id.clone();
            this.run_with(project_id, files, move |path| {
                let api = Arc::clone(&api);
                let pid = pid.clone();
                async move {
                    let name = file_name_of(&path);
                    let bytes = tokio::fs::read(&path).await.map_err(|err| {
                        ApiError::Validation(format!("cannot read {}: {err}", path.display()))
                    })?;
                    api.upload_paper(&pid, &name, bytes).await
                }
            })
            .await;
        });
        Ok(())
    }

    /// The sequential loop, generic over the per-file transfer so the settle
    /// accounting is testable without a backend.
    async fn run_with<F, Fut>(&self, project_id: String, files: Vec<PathBuf>, mut upload: F)
    where
        F: FnMut(PathBuf) -> Fut,
        Fut: Future<Output = Result<Paper, ApiError>>,
    {
        let total = files.len();
        for (index, path) in files.into_iter().enumerate() {
            let name = file_name_of(&path);
            let result = upload(path).await;
            match result {
                Ok(paper) => {
                    tracing::info!(project = %project_id, file = %name, paper = %paper.id, "upload landed");
                    let mut progress = self.progress.lock();
                    progress.settled = index + 1;
                    progress.succeeded += 1;
                    drop(progress);
                    // Invalidate per file, not once at the end: the paper
                    // list grows incrementally as uploads land.
                    self.cache.lock().apply(&Mutation::PaperUploaded {
                        project_id: project_id.clone(),
                    });
                }
                Err(err) => {
                    tracing::warn!(project = %project_id, file = %name, error = %err, "upload failed, continuing batch");
                    let mut progress = self.progress.lock();
                    progress.settled = index + 1;
                    progress.failures.push((name, err.to_string()));
                }
            }
            let _ = self.events.send(CoreEvent::UploadAdvanced {
                project_id: project_id.clone(),
                settled: index + 1,
                total,
            });
        }
        self.progress.lock().busy = false;
        let _ = self.events.send(CoreEvent::UploadFinished { project_id });
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress.lock().clone()
    }

    pub fn busy(&self) -> bool {
        self.progress.lock().busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::store::CacheKey;
    use chrono::Utc;

    fn pipeline() -> (Arc<UploadPipeline>, Arc<Mutex<EntityCache>>) {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let api = Arc::new(ApiClient::new(CoreConfig::new("http://127.0.0.1:1")));
        let cache = Arc::new(Mutex::new(EntityCache::new()));
        let pipeline = Arc::new(UploadPipeline::new(api, Arc::clone(&cache), tx));
        (pipeline, cache)
    }

    fn paper(id: &str) -> Paper {
        Paper {
            id: id.to_string(),
            project_id: "p1".to_string(),
            title: None,
            filename: format!("{id}.pdf"),
            original_name: format!("{id}.pdf"),
            size: 1,
            mime: "application/pdf".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let (pipeline, _) = pipeline();
        let err = pipeline.start("p1".to_string(), Vec::new()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(!pipeline.busy());
    }

    #[tokio::test]
    async fn failed_file_does_not_stop_the_batch() {
        let (pipeline, cache) = pipeline();
        let files = vec![
            PathBuf::from("one.pdf"),
            PathBuf::from("two.pdf"),
            PathBuf::from("three.pdf"),
        ];

        // Seed the papers key so invalidation is observable.
        {
            let mut cache = cache.lock();
            let key = CacheKey::Papers("p1".to_string());
            let token = cache.begin_fetch(&key);
            cache.complete_fetch(
                &key,
                token,
                Ok(crate::store::CacheValue::Papers(Arc::new(Vec::new()))),
            );
        }

        pipeline.progress.lock().busy = true;
        pipeline.progress.lock().total = files.len();

        let mut attempt = 0;
        pipeline
            .run_with("p1".to_string(), files, |path| {
                attempt += 1;
                let busy_during = pipeline.busy();
                async move {
                    assert!(busy_during, "busy flag must hold while files settle");
                    if path == Path::new("two.pdf") {
                        Err(ApiError::Server {
                            status: 500,
                            detail: "extraction blew up".to_string(),
                        })
                    } else {
                        let stem = path
                            .file_stem()
                            .map(|s| s.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        Ok(paper(&stem))
                    }
                }
            })
            .await;
        assert_eq!(attempt, 3, "all files must be attempted");

        let progress = pipeline.progress();
        assert!(!progress.busy, "busy drops only after every file settled");
        assert_eq!(progress.settled, 3);
        assert_eq!(progress.succeeded, 2);
        assert_eq!(progress.failures.len(), 1);
        assert_eq!(progress.failures[0].0, "two.pdf");

        // Successes around the failure invalidated the papers key.
        assert!(cache.lock().needs_fetch(&CacheKey::Papers("p1".to_string())));
    }

    #[tokio::test]
    async fn second_batch_is_refused_while_busy() {
        let (pipeline, _) = pipeline();
        pipeline.progress.lock().busy = true;
        let err = pipeline
            .start("p1".to_string(), vec![PathBuf::from("a.pdf")])
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
