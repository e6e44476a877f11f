//! Entity cache - single source of truth for everything fetched from the
//! backend, with an explicit invalidation contract.
//!
//! Views never talk to the network; they read keys out of this cache and the
//! runtime fetches whatever a read finds missing. Mutations (uploads, tool
//! runs, project create/delete) invalidate the affected keys and nothing
//! else refreshes behind the UI's back.
//!
//! # Invalidation rules
//! Every slot carries an epoch that is bumped on invalidation. A fetch
//! completion carries the epoch observed when the fetch started and is
//! dropped when the slot has moved on, so a response that raced with an
//! invalidation (or with navigating away) can never reinstate stale data.
//! Invalidating an already-invalid slot is a no-op in effect: the next read
//! refetches either way.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    Job, MetadataRow, Paper, PodcastEpisode, Project, SummaryItem, ToolKind,
};

/// Hierarchical cache key. Keys scoped under a project report that project's
/// id so deletion can cascade by scope instead of walking object graphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The project list.
    Projects,
    /// One project record.
    Project(String),
    /// All papers of a project.
    Papers(String),
    /// The summary view of a project.
    Summaries(String),
    /// The podcast view of a project.
    Podcasts(String),
    /// The metadata table of a project.
    Table(String),
    /// Extracted metadata of one paper within a project.
    Metadata(String, String),
    /// Job records of one paper within a project.
    Jobs(String, String),
}

impl CacheKey {
    /// Project scope of this key; `None` only for the project list itself.
    pub fn project_id(&self) -> Option<&str> {
        match self {
            CacheKey::Projects => None,
            CacheKey::Project(id)
            | CacheKey::Papers(id)
            | CacheKey::Summaries(id)
            | CacheKey::Podcasts(id)
            | CacheKey::Table(id)
            | CacheKey::Metadata(id, _)
            | CacheKey::Jobs(id, _) => Some(id),
        }
    }
}

/// Value stored under a cache key. Collections are Arc'd so reads hand out
/// cheap clones to render code.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Projects(Arc<Vec<Project>>),
    Project(Arc<Project>),
    Papers(Arc<Vec<Paper>>),
    Summaries(Arc<Vec<SummaryItem>>),
    Podcasts(Arc<Vec<PodcastEpisode>>),
    Table(Arc<Vec<MetadataRow>>),
    Metadata(Arc<MetadataRow>),
    Jobs(Arc<Vec<Job>>),
}

/// Read-side view of one slot, for inline status badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// Nothing cached and no fetch outstanding.
    Empty,
    /// A fetch is outstanding for the current epoch.
    Loading,
    /// A value fetched at the current epoch is present.
    Ready,
    /// The last fetch at the current epoch failed. Not refetched until the
    /// key is invalidated again (manual retry).
    Failed(String),
}

/// Opaque handle returned by `begin_fetch`; passed back on completion so the
/// cache can tell a live response from a superseded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug, Default)]
struct Slot {
    /// Bumped on every invalidation. Completions carrying an older epoch are
    /// dropped, which is what makes superseded responses inert.
    epoch: u64,
    value: Option<CacheValue>,
    error: Option<String>,
    /// Epoch at which the outstanding fetch started, if any.
    inflight: Option<u64>,
}

/// Client-visible mutations, each mapped to the exact key set it
/// invalidates. Keeping the table in one match keeps it exhaustive.
#[derive(Debug, Clone)]
pub enum Mutation {
    ProjectCreated,
    ProjectDeleted { project_id: String },
    PaperUploaded { project_id: String },
    ToolSettled { tool: ToolKind, project_id: String },
}

#[derive(Debug, Default)]
pub struct EntityCache {
    slots: HashMap<CacheKey, Slot>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if one fetched at the current epoch exists.
    pub fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.slots.get(key).and_then(|slot| slot.value.clone())
    }

    pub fn status(&self, key: &CacheKey) -> SlotStatus {
        let Some(slot) = self.slots.get(key) else {
            return SlotStatus::Empty;
        };
        if slot.value.is_some() {
            SlotStatus::Ready
        } else if slot.inflight == Some(slot.epoch) {
            SlotStatus::Loading
        } else if let Some(message) = &slot.error {
            SlotStatus::Failed(message.clone())
        } else {
            SlotStatus::Empty
        }
    }

    /// Whether a read of `key` should trigger a fetch: nothing cached at the
    /// current epoch, no live fetch outstanding, and no failure waiting for
    /// a manual retry.
    pub fn needs_fetch(&self, key: &CacheKey) -> bool {
        let Some(slot) = self.slots.get(key) else {
            return true;
        };
        slot.value.is_none() && slot.error.is_none() && slot.inflight != Some(slot.epoch)
    }

    /// Marks a fetch as outstanding and returns the token its completion
    /// must present.
    pub fn begin_fetch(&mut self, key: &CacheKey) -> FetchToken {
        let slot = self.slots.entry(key.clone()).or_default();
        slot.inflight = Some(slot.epoch);
        FetchToken(slot.epoch)
    }

    /// Applies a fetch result. Returns `false` when the slot's epoch moved
    /// on since `begin_fetch` - the result is dropped and the next read
    /// refetches.
    pub fn complete_fetch(
        &mut self,
        key: &CacheKey,
        token: FetchToken,
        result: Result<CacheValue, String>,
    ) -> bool {
        let slot = self.slots.entry(key.clone()).or_default();
        if token.0 != slot.epoch {
            tracing::debug!(?key, "dropping superseded fetch result");
            return false;
        }
        slot.inflight = None;
        match result {
            Ok(value) => {
                slot.value = Some(value);
                slot.error = None;
            }
            Err(message) => {
                slot.value = None;
                slot.error = Some(message);
            }
        }
        true
    }

    /// Marks `key` stale: drops the cached value and error, and bumps the
    /// epoch so any outstanding fetch completes into the void. The next read
    /// always refetches. Idempotent in effect.
    pub fn invalidate(&mut self, key: &CacheKey) {
        let slot = self.slots.entry(key.clone()).or_default();
        slot.epoch += 1;
        slot.value = None;
        slot.error = None;
    }

    /// Cascade: invalidates every known key scoped under `project_id`. Keys
    /// never read are not tracked and need no invalidation - their first
    /// read fetches.
    pub fn invalidate_project(&mut self, project_id: &str) {
        let scoped: Vec<CacheKey> = self
            .slots
            .keys()
            .filter(|key| key.project_id() == Some(project_id))
            .cloned()
            .collect();
        for key in scoped {
            self.invalidate(&key);
        }
    }

    /// Invalidates the per-paper metadata keys of one project (the
    /// `(metadata, projectId, *)` wildcard row of the mutation table).
    fn invalidate_metadata_of(&mut self, project_id: &str) {
        let scoped: Vec<CacheKey> = self
            .slots
            .keys()
            .filter(|key| matches!(key, CacheKey::Metadata(p, _) if p == project_id))
            .cloned()
            .collect();
        for key in scoped {
            self.invalidate(&key);
        }
    }

    /// Invalidates the per-paper job keys of one project. Every tool run
    /// creates or updates a job record.
    fn invalidate_jobs_of(&mut self, project_id: &str) {
        let scoped: Vec<CacheKey> = self
            .slots
            .keys()
            .filter(|key| matches!(key, CacheKey::Jobs(p, _) if p == project_id))
            .cloned()
            .collect();
        for key in scoped {
            self.invalidate(&key);
        }
    }

    /// The mutation-to-invalidation table. Every client-visible mutation
    /// funnels through here; invalidation is never narrower than the
    /// mutation's true effect.
    pub fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::ProjectCreated => {
                self.invalidate(&CacheKey::Projects);
            }
            Mutation::ProjectDeleted { project_id } => {
                self.invalidate(&CacheKey::Projects);
                self.invalidate_project(project_id);
            }
            Mutation::PaperUploaded { project_id } => {
                self.invalidate(&CacheKey::Papers(project_id.clone()));
            }
            Mutation::ToolSettled { tool, project_id } => {
                // Every tool run leaves a job record behind.
                self.invalidate_jobs_of(project_id);
                match tool {
                    ToolKind::Summarize => {
                        self.invalidate(&CacheKey::Summaries(project_id.clone()));
                        self.invalidate_metadata_of(project_id);
                    }
                    ToolKind::Podcast => {
                        self.invalidate(&CacheKey::Podcasts(project_id.clone()));
                    }
                    // Nothing else is cached under the remaining tools;
                    // their output is surfaced through the dispatch status.
                    ToolKind::Recommend
                    | ToolKind::Latex
                    | ToolKind::ImportArxiv
                    | ToolKind::Chat => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn papers_value() -> CacheValue {
        CacheValue::Papers(Arc::new(Vec::new()))
    }

    fn fetch(cache: &mut EntityCache, key: &CacheKey) {
        let token = cache.begin_fetch(key);
        assert!(cache.complete_fetch(key, token, Ok(papers_value())));
    }

    #[test]
    fn invalidate_forces_refetch_on_next_read() {
        let mut cache = EntityCache::new();
        let key = CacheKey::Papers("p1".to_string());

        assert!(cache.needs_fetch(&key));
        fetch(&mut cache, &key);
        assert!(!cache.needs_fetch(&key));
        assert!(cache.get(&key).is_some());

        cache.invalidate(&key);
        assert!(cache.get(&key).is_none());
        assert!(cache.needs_fetch(&key));
    }

    #[test]
    fn double_invalidate_behaves_like_single() {
        let mut cache = EntityCache::new();
        let key = CacheKey::Summaries("p1".to_string());
        fetch(&mut cache, &key);

        cache.invalidate(&key);
        let once = (cache.get(&key).is_none(), cache.needs_fetch(&key));
        cache.invalidate(&key);
        let twice = (cache.get(&key).is_none(), cache.needs_fetch(&key));
        assert_eq!(once, twice);

        // A fresh fetch lands normally after either.
        fetch(&mut cache, &key);
        assert_eq!(cache.status(&key), SlotStatus::Ready);
    }

    #[test]
    fn superseded_completion_is_dropped() {
        let mut cache = EntityCache::new();
        let key = CacheKey::Papers("p1".to_string());

        let stale = cache.begin_fetch(&key);
        cache.invalidate(&key);

        // The pre-invalidation response must not land.
        assert!(!cache.complete_fetch(&key, stale, Ok(papers_value())));
        assert!(cache.get(&key).is_none());
        assert!(cache.needs_fetch(&key));

        // The refetch started after the invalidation does land.
        let live = cache.begin_fetch(&key);
        assert!(cache.complete_fetch(&key, live, Ok(papers_value())));
        assert_eq!(cache.status(&key), SlotStatus::Ready);
    }

    #[test]
    fn project_delete_cascades_by_scope() {
        let mut cache = EntityCache::new();
        let keys = [
            CacheKey::Project("p1".to_string()),
            CacheKey::Papers("p1".to_string()),
            CacheKey::Summaries("p1".to_string()),
            CacheKey::Podcasts("p1".to_string()),
            CacheKey::Table("p1".to_string()),
            CacheKey::Metadata("p1".to_string(), "paper-1".to_string()),
        ];
        for key in &keys {
            fetch(&mut cache, key);
        }
        let other = CacheKey::Papers("p2".to_string());
        fetch(&mut cache, &other);
        fetch(&mut cache, &CacheKey::Projects);

        cache.apply(&Mutation::ProjectDeleted {
            project_id: "p1".to_string(),
        });

        for key in &keys {
            assert!(cache.needs_fetch(key), "{key:?} should be stale");
        }
        // The project list is stale too; unrelated projects are untouched.
        assert!(cache.needs_fetch(&CacheKey::Projects));
        assert!(!cache.needs_fetch(&other));
    }

    #[test]
    fn summarize_invalidates_summaries_and_metadata_only() {
        let mut cache = EntityCache::new();
        let summaries = CacheKey::Summaries("p1".to_string());
        let podcasts = CacheKey::Podcasts("p1".to_string());
        let meta_a = CacheKey::Metadata("p1".to_string(), "a".to_string());
        let meta_other = CacheKey::Metadata("p2".to_string(), "b".to_string());
        for key in [&summaries, &podcasts, &meta_a, &meta_other] {
            fetch(&mut cache, key);
        }

        cache.apply(&Mutation::ToolSettled {
            tool: ToolKind::Summarize,
            project_id: "p1".to_string(),
        });

        assert!(cache.needs_fetch(&summaries));
        assert!(cache.needs_fetch(&meta_a));
        assert!(!cache.needs_fetch(&podcasts));
        assert!(!cache.needs_fetch(&meta_other));
    }

    #[test]
    fn podcast_leaves_summaries_untouched() {
        let mut cache = EntityCache::new();
        let summaries = CacheKey::Summaries("p1".to_string());
        let podcasts = CacheKey::Podcasts("p1".to_string());
        fetch(&mut cache, &summaries);
        fetch(&mut cache, &podcasts);

        cache.apply(&Mutation::ToolSettled {
            tool: ToolKind::Podcast,
            project_id: "p1".to_string(),
        });

        assert!(cache.needs_fetch(&podcasts));
        assert!(!cache.needs_fetch(&summaries));
    }

    #[test]
    fn failed_fetch_waits_for_manual_retry() {
        let mut cache = EntityCache::new();
        let key = CacheKey::Table("p1".to_string());

        let token = cache.begin_fetch(&key);
        assert!(cache.complete_fetch(&key, token, Err("boom".to_string())));
        assert_eq!(cache.status(&key), SlotStatus::Failed("boom".to_string()));
        assert!(!cache.needs_fetch(&key), "failures are not hot-refetched");

        cache.invalidate(&key);
        assert!(cache.needs_fetch(&key));
    }

    #[test]
    fn loading_status_tracks_live_fetch_only() {
        let mut cache = EntityCache::new();
        let key = CacheKey::Projects;
        assert_eq!(cache.status(&key), SlotStatus::Empty);

        cache.begin_fetch(&key);
        assert_eq!(cache.status(&key), SlotStatus::Loading);

        // Invalidation orphans the in-flight fetch; the slot reads as empty
        // again so the next read kicks off a live one.
        cache.invalidate(&key);
        assert_eq!(cache.status(&key), SlotStatus::Empty);
    }
}
