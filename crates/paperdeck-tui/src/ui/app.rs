use std::sync::Arc;

use paperdeck_core::models::{Paper, Project};
use paperdeck_core::selection::SelectionCoordinator;
use paperdeck_core::store::{CacheKey, CacheValue};
use paperdeck_core::CoreRuntime;

use tokio::sync::mpsc::UnboundedSender;

use crate::audio::{AudioPlayer, AudioResult};
use crate::ui::exclusive::Exclusive;
use crate::ui::selector::SelectorState;

/// Top-level navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Projects,
    Project { project_id: String },
}

/// Tabs of the project detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectTab {
    #[default]
    Files,
    Summary,
    Podcasts,
    Table,
}

impl ProjectTab {
    pub const ALL: [ProjectTab; 4] = [
        ProjectTab::Files,
        ProjectTab::Summary,
        ProjectTab::Podcasts,
        ProjectTab::Table,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ProjectTab::Files => "Files",
            ProjectTab::Summary => "Summary",
            ProjectTab::Podcasts => "Podcasts",
            ProjectTab::Table => "Table",
        }
    }
}

/// Which modal is on screen. `None` is the closed state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    CreateProject,
    ConfirmDelete,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateField {
    #[default]
    Name,
    Description,
}

/// Form state of the create-project modal.
#[derive(Debug, Clone, Default)]
pub struct CreateProjectForm {
    pub name: String,
    pub description: String,
    pub focus: CreateField,
    pub busy: bool,
}

impl CreateProjectForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Form state of the upload modal: whitespace-separated file paths.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub input: String,
}

impl UploadForm {
    pub fn paths(&self) -> Vec<std::path::PathBuf> {
        self.input
            .split_whitespace()
            .map(std::path::PathBuf::from)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// One-line message in the status bar, replaced by the next one.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub text: String,
}

pub struct App {
    pub core: CoreRuntime,
    pub running: bool,
    pub view: View,
    pub tab: Exclusive<ProjectTab>,
    pub overlay: Exclusive<Overlay>,
    pub selection: SelectionCoordinator,

    pub project_list: SelectorState,
    pub paper_list: SelectorState,
    pub podcast_list: SelectorState,

    pub create_form: CreateProjectForm,
    pub pending_delete: Option<String>,
    pub delete_busy: bool,
    pub upload_form: UploadForm,

    pub status: Option<StatusLine>,

    pub audio: AudioPlayer,
    /// Channel background MP3 fetches report back on.
    pub audio_tx: UnboundedSender<AudioResult>,
    /// Paper id of the episode currently playing, if any.
    pub playing: Option<String>,
    /// Paper id of the episode whose MP3 is being fetched.
    pub audio_loading: Option<String>,
}

impl App {
    pub fn new(core: CoreRuntime, audio_tx: UnboundedSender<AudioResult>) -> Self {
        Self {
            core,
            running: true,
            view: View::Projects,
            tab: Exclusive::new(ProjectTab::default()),
            overlay: Exclusive::new(Overlay::default()),
            selection: SelectionCoordinator::new(),
            project_list: SelectorState::new(),
            paper_list: SelectorState::new(),
            podcast_list: SelectorState::new(),
            create_form: CreateProjectForm::default(),
            pending_delete: None,
            delete_busy: false,
            upload_form: UploadForm::default(),
            status: None,
            audio: AudioPlayer::new(),
            audio_tx,
            playing: None,
            audio_loading: None,
        }
    }

    pub fn current_project_id(&self) -> Option<&str> {
        match &self.view {
            View::Projects => None,
            View::Project { project_id } => Some(project_id),
        }
    }

    /// Projects currently cached (read-through: schedules a fetch if stale).
    pub fn projects(&self) -> Arc<Vec<Project>> {
        match self.core.read(&CacheKey::Projects) {
            Some(CacheValue::Projects(projects)) => projects,
            _ => Arc::new(Vec::new()),
        }
    }

    /// Papers of the project on screen.
    pub fn papers(&self) -> Arc<Vec<Paper>> {
        let Some(project_id) = self.current_project_id() else {
            return Arc::new(Vec::new());
        };
        match self.core.read(&CacheKey::Papers(project_id.to_string())) {
            Some(CacheValue::Papers(papers)) => papers,
            _ => Arc::new(Vec::new()),
        }
    }

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusLine {
            level,
            text: text.into(),
        });
    }

    /// Enter a project: fresh tab, selection and highlights.
    pub fn open_project(&mut self, project_id: String) {
        self.view = View::Project { project_id };
        self.tab.set(ProjectTab::default());
        self.selection.reset();
        self.paper_list.reset();
        self.podcast_list.reset();
        self.stop_audio();
    }

    /// Back to the project list. Outstanding dispatches for the project are
    /// superseded so their outcomes cannot apply stale invalidations.
    pub fn leave_project(&mut self) {
        if let View::Project { project_id } = &self.view {
            self.core.leave_project(project_id);
        }
        self.view = View::Projects;
        self.selection.reset();
        self.stop_audio();
    }

    pub fn stop_audio(&mut self) {
        self.audio.stop();
        self.playing = None;
        self.audio_loading = None;
    }

    /// Clamp list highlights against the collections they point into.
    /// Called once per loop iteration, before drawing.
    pub fn reconcile(&mut self) {
        match &self.view {
            View::Projects => {
                let count = self.projects().len();
                self.project_list.clamp(count);
            }
            View::Project { project_id } => {
                let papers = self.papers();
                self.paper_list.clamp(papers.len());
                // Keep focus in step with the highlight so the detail pane
                // always shows the highlighted paper.
                if let Some(paper) = papers.get(self.paper_list.index) {
                    if self.selection.focused_id() != Some(paper.id.as_str()) {
                        self.selection.focus(paper.id.clone());
                    }
                }
                let episodes = match self
                    .core
                    .read(&CacheKey::Podcasts(project_id.clone()))
                {
                    Some(CacheValue::Podcasts(episodes)) => episodes.len(),
                    _ => 0,
                };
                self.podcast_list.clamp(episodes);
            }
        }
    }
}
