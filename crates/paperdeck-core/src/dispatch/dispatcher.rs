//! Tool dispatch: single-target and batch invocations with per-lane
//! lifecycle tracking.
//!
//! Bookkeeping lives in `DispatchLedger`, a pure state machine; the
//! `ToolDispatcher` wrapper owns the network call, the cache invalidation on
//! settle and the wake-up event to the UI loop. Nothing escapes the dispatch
//! boundary as an unhandled error - callers always end up observing a
//! terminal `Done` or `Error` lane state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::events::CoreEvent;
use crate::models::{ToolKind, ToolRunOutcome};
use crate::store::{EntityCache, Mutation};

/// What a dispatch is aimed at within its project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DispatchTarget {
    /// A single paper.
    Paper(String),
    /// The batch selection, one request covering the whole id set.
    Batch,
}

/// Identity of one dispatch lane. At most one request is in flight per lane;
/// re-dispatching a running lane is coalesced, never duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    pub tool: ToolKind,
    pub project_id: String,
    pub target: DispatchTarget,
}

impl DispatchKey {
    pub fn single(tool: ToolKind, project_id: &str, paper_id: &str) -> Self {
        Self {
            tool,
            project_id: project_id.to_string(),
            target: DispatchTarget::Paper(paper_id.to_string()),
        }
    }

    pub fn batch(tool: ToolKind, project_id: &str) -> Self {
        Self {
            tool,
            project_id: project_id.to_string(),
            target: DispatchTarget::Batch,
        }
    }
}

/// Lane lifecycle: `Idle → Running → Done | Error`. A cancelled lane drops
/// back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Done,
    Error,
}

/// Lane state plus the human-readable message that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatus {
    pub state: RunState,
    pub message: String,
}

impl RunStatus {
    fn idle() -> Self {
        Self {
            state: RunState::Idle,
            message: String::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Lane {
    state: RunState,
    message: String,
    /// Bumped by cancellation; a settle carrying an older generation is
    /// inert.
    generation: u64,
}

/// Pure dispatch bookkeeping, one lane per `DispatchKey`.
#[derive(Debug, Default)]
pub struct DispatchLedger {
    lanes: HashMap<DispatchKey, Lane>,
}

impl DispatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a run on the lane. Returns the generation token its settle
    /// must present, or `None` when the lane is already running - the
    /// duplicate is coalesced into the in-flight request.
    pub fn begin(&mut self, key: &DispatchKey) -> Option<u64> {
        let lane = self.lanes.entry(key.clone()).or_default();
        if lane.state == RunState::Running {
            return None;
        }
        lane.state = RunState::Running;
        lane.message.clear();
        lane.generation += 1;
        Some(lane.generation)
    }

    /// Applies a terminal outcome. Returns `false` when the outcome is stale
    /// (the lane was cancelled or restarted since `begin`) - stale outcomes
    /// change nothing, including cache invalidation decisions upstream.
    pub fn settle(
        &mut self,
        key: &DispatchKey,
        generation: u64,
        outcome: Result<String, String>,
    ) -> bool {
        let Some(lane) = self.lanes.get_mut(key) else {
            return false;
        };
        if lane.generation != generation || lane.state != RunState::Running {
            tracing::debug!(?key, "dropping superseded dispatch outcome");
            return false;
        }
        match outcome {
            Ok(message) => {
                lane.state = RunState::Done;
                lane.message = message;
            }
            Err(message) => {
                lane.state = RunState::Error;
                lane.message = message;
            }
        }
        true
    }

    /// Makes every outstanding run scoped under `project_id` inert and
    /// resets those lanes, e.g. when the user navigates away or the project
    /// is deleted.
    pub fn cancel_project(&mut self, project_id: &str) {
        for (key, lane) in self.lanes.iter_mut() {
            if key.project_id == project_id && lane.state == RunState::Running {
                lane.generation += 1;
                lane.state = RunState::Idle;
                lane.message.clear();
            }
        }
    }

    pub fn status(&self, key: &DispatchKey) -> RunStatus {
        self.lanes
            .get(key)
            .map(|lane| RunStatus {
                state: lane.state,
                message: lane.message.clone(),
            })
            .unwrap_or_else(RunStatus::idle)
    }

    pub fn is_running(&self, key: &DispatchKey) -> bool {
        self.status(key).state == RunState::Running
    }

    /// Lanes of a project currently running, for the status line.
    pub fn running_in(&self, project_id: &str) -> Vec<DispatchKey> {
        self.lanes
            .iter()
            .filter(|(key, lane)| {
                key.project_id == project_id && lane.state == RunState::Running
            })
            .map(|(key, _)| key.clone())
            .collect()
    }
}

pub struct ToolDispatcher {
    api: Arc<ApiClient>,
    cache: Arc<Mutex<EntityCache>>,
    ledger: Mutex<DispatchLedger>,
    events: UnboundedSender<CoreEvent>,
}

impl ToolDispatcher {
    pub fn new(
        api: Arc<ApiClient>,
        cache: Arc<Mutex<EntityCache>>,
        events: UnboundedSender<CoreEvent>,
    ) -> Self {
        Self {
            api,
            cache,
            ledger: Mutex::new(DispatchLedger::new()),
            events,
        }
    }

    /// Dispatches `tool` against one paper. A re-click while the lane is
    /// running is coalesced; no second backend job is created.
    pub fn run_single(
        self: &Arc<Self>,
        tool: ToolKind,
        project_id: &str,
        paper_id: &str,
    ) -> Result<(), ApiError> {
        let key = DispatchKey::single(tool, project_id, paper_id);
        let Some(generation) = self.ledger.lock().begin(&key) else {
            tracing::debug!(%tool, paper_id, "dispatch already running, coalesced");
            return Ok(());
        };
        let this = Arc::clone(self);
        let project_id = project_id.to_string();
        let paper_id = paper_id.to_string();
        tokio::spawn(async move {
            let outcome = this.api.run_tool(&project_id, &paper_id, tool).await;
            this.finish(key, generation, outcome);
        });
        Ok(())
    }

    /// Dispatches `tool` against the batch selection in one request. An
    /// empty id set is rejected here, before any network call.
    pub fn run_batch(
        self: &Arc<Self>,
        tool: ToolKind,
        project_id: &str,
        paper_ids: Vec<String>,
    ) -> Result<(), ApiError> {
        if paper_ids.is_empty() {
            return Err(ApiError::Validation("no papers selected".to_string()));
        }
        let key = DispatchKey::batch(tool, project_id);
        let Some(generation) = self.ledger.lock().begin(&key) else {
            tracing::debug!(%tool, project_id, "batch dispatch already running, coalesced");
            return Ok(());
        };
        let this = Arc::clone(self);
        let project_id = project_id.to_string();
        tokio::spawn(async move {
            let outcome = this
                .api
                .run_tool_batch(&project_id, tool, &paper_ids)
                .await;
            this.finish(key, generation, outcome);
        });
        Ok(())
    }

    /// Terminal handling for both shapes: record the lane outcome, and -
    /// only when the outcome is still live - invalidate the tool's keys.
    /// Invalidation happens on success and failure alike; a failed batch may
    /// still have partially executed server-side.
    fn finish(
        &self,
        key: DispatchKey,
        generation: u64,
        outcome: Result<ToolRunOutcome, ApiError>,
    ) {
        let (ok, message) = match &outcome {
            Ok(result) => (true, result.message.clone().unwrap_or_default()),
            Err(err) => (false, err.to_string()),
        };
        let applied = self
            .ledger
            .lock()
            .settle(&key, generation, if ok { Ok(message.clone()) } else { Err(message.clone()) });
        if !applied {
            return;
        }
        if !ok {
            tracing::warn!(tool = %key.tool, project = %key.project_id, %message, "tool dispatch failed");
        }
        self.cache.lock().apply(&Mutation::ToolSettled {
            tool: key.tool,
            project_id: key.project_id.clone(),
        });
        let _ = self.events.send(CoreEvent::ToolSettled { key, ok, message });
    }

    pub fn status(&self, key: &DispatchKey) -> RunStatus {
        self.ledger.lock().status(key)
    }

    pub fn is_running(&self, key: &DispatchKey) -> bool {
        self.ledger.lock().is_running(key)
    }

    pub fn running_in(&self, project_id: &str) -> Vec<DispatchKey> {
        self.ledger.lock().running_in(project_id)
    }

    /// Supersedes every outstanding run under the project; their outcomes
    /// will be dropped on arrival.
    pub fn cancel_project(&self, project_id: &str) {
        self.ledger.lock().cancel_project(project_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> DispatchKey {
        DispatchKey::single(ToolKind::Summarize, "p1", "paper-1")
    }

    #[test]
    fn begin_coalesces_while_running() {
        let mut ledger = DispatchLedger::new();
        let generation = ledger.begin(&key()).expect("first begin starts a run");
        assert!(ledger.begin(&key()).is_none(), "re-click must coalesce");
        assert!(ledger.is_running(&key()));

        assert!(ledger.settle(&key(), generation, Ok("done".to_string())));
        assert_eq!(ledger.status(&key()).state, RunState::Done);

        // After settling, a new run may start.
        assert!(ledger.begin(&key()).is_some());
    }

    #[test]
    fn settle_reports_terminal_state_and_message() {
        let mut ledger = DispatchLedger::new();
        let generation = ledger.begin(&key()).unwrap();
        assert!(ledger.settle(&key(), generation, Err("tool exploded".to_string())));
        let status = ledger.status(&key());
        assert_eq!(status.state, RunState::Error);
        assert_eq!(status.message, "tool exploded");
    }

    #[test]
    fn cancelled_run_ignores_late_outcome() {
        let mut ledger = DispatchLedger::new();
        let generation = ledger.begin(&key()).unwrap();
        ledger.cancel_project("p1");
        assert_eq!(ledger.status(&key()).state, RunState::Idle);

        // The superseded outcome must not resurrect the lane.
        assert!(!ledger.settle(&key(), generation, Ok("late".to_string())));
        assert_eq!(ledger.status(&key()).state, RunState::Idle);
    }

    #[test]
    fn cancel_is_scoped_to_the_project() {
        let mut ledger = DispatchLedger::new();
        let other = DispatchKey::batch(ToolKind::Podcast, "p2");
        ledger.begin(&key()).unwrap();
        let other_generation = ledger.begin(&other).unwrap();

        ledger.cancel_project("p1");
        assert!(ledger.is_running(&other));
        assert!(ledger.settle(&other, other_generation, Ok(String::new())));
    }

    #[test]
    fn batch_and_single_lanes_are_distinct() {
        let mut ledger = DispatchLedger::new();
        let single = key();
        let batch = DispatchKey::batch(ToolKind::Summarize, "p1");
        assert!(ledger.begin(&single).is_some());
        assert!(
            ledger.begin(&batch).is_some(),
            "a running single-target run must not block the batch lane"
        );
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_without_network() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        // Base URL points nowhere; rejection must happen before any request.
        let api = Arc::new(ApiClient::new(crate::CoreConfig::new("http://127.0.0.1:1")));
        let cache = Arc::new(Mutex::new(EntityCache::new()));
        let dispatcher = Arc::new(ToolDispatcher::new(api, cache, tx));

        let err = dispatcher
            .run_batch(ToolKind::Podcast, "p1", Vec::new())
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(!dispatcher.is_running(&DispatchKey::batch(ToolKind::Podcast, "p1")));
    }
}
