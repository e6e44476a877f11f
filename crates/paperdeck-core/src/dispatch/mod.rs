pub mod dispatcher;
pub mod upload;

pub use dispatcher::{
    DispatchKey, DispatchLedger, DispatchTarget, RunState, RunStatus, ToolDispatcher,
};
pub use upload::{UploadPipeline, UploadProgress};
