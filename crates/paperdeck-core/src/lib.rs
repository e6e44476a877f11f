pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod models;
pub mod runtime;
pub mod selection;
pub mod store;
pub mod tracing_setup;
pub mod urls;

pub use config::CoreConfig;
pub use error::ApiError;
pub use events::CoreEvent;
pub use runtime::CoreRuntime;
