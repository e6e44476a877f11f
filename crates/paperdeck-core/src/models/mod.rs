pub mod job;
pub mod metadata;
pub mod paper;
pub mod podcast;
pub mod project;
pub mod summary;

pub use job::{Job, JobStatus, ToolKind, ToolRunOutcome};
pub use metadata::MetadataRow;
pub use paper::Paper;
pub use podcast::{PodcastAsset, PodcastEpisode};
pub use project::{NewProject, Project};
pub use summary::SummaryItem;
