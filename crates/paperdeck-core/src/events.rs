use std::path::PathBuf;

use crate::dispatch::DispatchKey;
use crate::models::Project;
use crate::store::CacheKey;

/// Notifications pushed from background tasks to the UI loop.
///
/// The UI re-reads the cache and ledgers when one arrives; events wake it
/// up, they do not carry authoritative state.
#[derive(Debug)]
pub enum CoreEvent {
    /// A cache fetch landed (value or error recorded under the key).
    CacheFetched(CacheKey),
    /// A project was created and the project list invalidated.
    ProjectCreated(Project),
    /// A project was deleted; if it is on screen the UI must navigate away.
    ProjectDeleted { project_id: String },
    /// A create/delete mutation failed before changing anything.
    MutationFailed { context: &'static str, message: String },
    /// One file of an upload batch settled.
    UploadAdvanced {
        project_id: String,
        settled: usize,
        total: usize,
    },
    /// All files of an upload batch settled; the busy flag is down.
    UploadFinished { project_id: String },
    /// A tool dispatch reached a terminal state.
    ToolSettled {
        key: DispatchKey,
        ok: bool,
        message: String,
    },
    /// The metadata CSV export was written to disk.
    CsvSaved { path: PathBuf },
}
