//! Session runtime: one explicitly constructed instance owns the API
//! client, the entity cache and the two orchestrators, and hands the UI a
//! channel of wake-up events.
//!
//! There is no global state anywhere in this crate - tests build a fresh
//! runtime (or a fresh cache) per case and the TUI builds exactly one per
//! session.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::api::ApiClient;
use crate::config::CoreConfig;
use crate::dispatch::{ToolDispatcher, UploadPipeline};
use crate::error::ApiError;
use crate::events::CoreEvent;
use crate::store::{CacheKey, CacheValue, EntityCache, Mutation, SlotStatus};

pub struct CoreRuntime {
    api: Arc<ApiClient>,
    cache: Arc<Mutex<EntityCache>>,
    dispatcher: Arc<ToolDispatcher>,
    uploads: Arc<UploadPipeline>,
    events: UnboundedSender<CoreEvent>,
}

impl CoreRuntime {
    /// Builds the runtime and returns the receiving end of its event
    /// channel for the UI loop.
    pub fn new(config: CoreConfig) -> (Self, UnboundedReceiver<CoreEvent>) {
        let (events, events_rx) = unbounded_channel();
        let api = Arc::new(ApiClient::new(config));
        let cache = Arc::new(Mutex::new(EntityCache::new()));
        let dispatcher = Arc::new(ToolDispatcher::new(
            Arc::clone(&api),
            Arc::clone(&cache),
            events.clone(),
        ));
        let uploads = Arc::new(UploadPipeline::new(
            Arc::clone(&api),
            Arc::clone(&cache),
            events.clone(),
        ));
        (
            Self {
                api,
                cache,
                dispatcher,
                uploads,
                events,
            },
            events_rx,
        )
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn dispatcher(&self) -> &Arc<ToolDispatcher> {
        &self.dispatcher
    }

    pub fn uploads(&self) -> &Arc<UploadPipeline> {
        &self.uploads
    }

    /// Cache read in the read-through sense: returns whatever is cached
    /// under `key` and, when the slot is stale or empty, schedules the fetch
    /// that will fill it. Views call this every frame; at most one fetch per
    /// key is outstanding.
    pub fn read(&self, key: &CacheKey) -> Option<CacheValue> {
        let (value, fetch) = {
            let mut cache = self.cache.lock();
            if cache.needs_fetch(key) {
                let token = cache.begin_fetch(key);
                (cache.get(key), Some(token))
            } else {
                (cache.get(key), None)
            }
        };
        if let Some(token) = fetch {
            self.spawn_fetch(key.clone(), token);
        }
        value
    }

    pub fn status(&self, key: &CacheKey) -> SlotStatus {
        self.cache.lock().status(key)
    }

    /// Manual retry of a failed key: invalidate, then read (which refetches).
    pub fn retry(&self, key: &CacheKey) {
        self.cache.lock().invalidate(key);
        let _ = self.read(key);
    }

    fn spawn_fetch(&self, key: CacheKey, token: crate::store::FetchToken) {
        let api = Arc::clone(&self.api);
        let cache = Arc::clone(&self.cache);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = match &key {
                CacheKey::Projects => api
                    .list_projects()
                    .await
                    .map(|v| CacheValue::Projects(Arc::new(v))),
                CacheKey::Project(id) => api
                    .get_project(id)
                    .await
                    .map(|v| CacheValue::Project(Arc::new(v))),
                CacheKey::Papers(id) => api
                    .list_papers(id)
                    .await
                    .map(|v| CacheValue::Papers(Arc::new(v))),
                CacheKey::Summaries(id) => api
                    .summaries(id)
                    .await
                    .map(|v| CacheValue::Summaries(Arc::new(v))),
                CacheKey::Podcasts(id) => api
                    .podcasts(id)
                    .await
                    .map(|v| CacheValue::Podcasts(Arc::new(v))),
                CacheKey::Table(id) => api
                    .metadata_table(id)
                    .await
                    .map(|v| CacheValue::Table(Arc::new(v))),
                CacheKey::Metadata(project_id, paper_id) => api
                    .paper_metadata(project_id, paper_id)
                    .await
                    .map(|v| CacheValue::Metadata(Arc::new(v))),
                CacheKey::Jobs(project_id, paper_id) => api
                    .paper_jobs(project_id, paper_id)
                    .await
                    .map(|v| CacheValue::Jobs(Arc::new(v))),
            };
            let applied = cache.lock().complete_fetch(
                &key,
                token,
                result.map_err(|err| err.to_string()),
            );
            if applied {
                let _ = events.send(CoreEvent::CacheFetched(key));
            }
        });
    }

    /// Creates a project. Validation happens in the client; on success the
    /// project list is invalidated and the UI is woken with the new record.
    pub fn create_project(&self, name: String, description: String) {
        let api = Arc::clone(&self.api);
        let cache = Arc::clone(&self.cache);
        let events = self.events.clone();
        tokio::spawn(async move {
            match api.create_project(&name, &description).await {
                Ok(project) => {
                    cache.lock().apply(&Mutation::ProjectCreated);
                    let _ = events.send(CoreEvent::ProjectCreated(project));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "project creation failed");
                    let _ = events.send(CoreEvent::MutationFailed {
                        context: "create project",
                        message: err.to_string(),
                    });
                }
            }
        });
    }

    /// Deletes a project. On success every key scoped under it is
    /// invalidated, outstanding dispatches are superseded, and the UI is
    /// told to navigate away if it is looking at the corpse.
    pub fn delete_project(&self, project_id: String) {
        let api = Arc::clone(&self.api);
        let cache = Arc::clone(&self.cache);
        let dispatcher = Arc::clone(&self.dispatcher);
        let events = self.events.clone();
        tokio::spawn(async move {
            match api.delete_project(&project_id).await {
                Ok(()) => {
                    dispatcher.cancel_project(&project_id);
                    cache.lock().apply(&Mutation::ProjectDeleted {
                        project_id: project_id.clone(),
                    });
                    let _ = events.send(CoreEvent::ProjectDeleted { project_id });
                }
                Err(err) => {
                    tracing::warn!(error = %err, project = %project_id, "project deletion failed");
                    let _ = events.send(CoreEvent::MutationFailed {
                        context: "delete project",
                        message: err.to_string(),
                    });
                }
            }
        });
    }

    /// Navigation away from a project: outcomes of its in-flight dispatches
    /// must no longer apply state or invalidations.
    pub fn leave_project(&self, project_id: &str) {
        self.dispatcher.cancel_project(project_id);
    }

    /// Saves the project's metadata CSV under `dest_dir`.
    pub fn download_csv(&self, project_id: String, dest_dir: PathBuf) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let saved: Result<PathBuf, ApiError> = async {
                let bytes = api.metadata_csv(&project_id).await?;
                let path = dest_dir.join(format!("project_{project_id}_metadata.csv"));
                tokio::fs::write(&path, &bytes).await.map_err(|err| {
                    ApiError::Validation(format!("cannot write {}: {err}", path.display()))
                })?;
                Ok(path)
            }
            .await;
            match saved {
                Ok(path) => {
                    let _ = events.send(CoreEvent::CsvSaved { path });
                }
                Err(err) => {
                    let _ = events.send(CoreEvent::MutationFailed {
                        context: "download csv",
                        message: err.to_string(),
                    });
                }
            }
        });
    }
}
