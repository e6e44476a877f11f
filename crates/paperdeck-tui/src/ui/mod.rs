pub mod app;
pub mod components;
pub mod exclusive;
pub mod selector;
pub mod theme;
pub mod views;

pub use app::{
    App, CreateField, CreateProjectForm, Overlay, ProjectTab, StatusLevel, StatusLine, UploadForm,
    View,
};
pub use exclusive::Exclusive;
pub use selector::SelectorState;
