//! Keyboard handling. Modals capture input first; otherwise keys route to
//! the active view.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use paperdeck_core::models::ToolKind;
use paperdeck_core::store::{CacheKey, CacheValue};

use crate::audio::AudioResult;
use crate::ui::{App, CreateField, Overlay, ProjectTab, StatusLevel, View};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+C always quits, regardless of what is on screen.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }
    if app.overlay.active() != Overlay::None {
        handle_overlay_key(app, key);
        return;
    }
    match app.view.clone() {
        View::Projects => handle_projects_key(app, key),
        View::Project { project_id } => handle_project_key(app, key, &project_id),
    }
}

fn handle_projects_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.project_list.move_up(),
        KeyCode::Down | KeyCode::Char('j') => {
            let count = app.projects().len();
            app.project_list.move_down(count);
        }
        KeyCode::Enter => {
            let projects = app.projects();
            if let Some(project) = projects.get(app.project_list.index) {
                app.open_project(project.id.clone());
            }
        }
        KeyCode::Char('n') => {
            if app.overlay.set(Overlay::CreateProject) {
                app.create_form.reset();
            }
        }
        KeyCode::Char('x') => {
            let projects = app.projects();
            if let Some(project) = projects.get(app.project_list.index) {
                app.pending_delete = Some(project.id.clone());
                app.overlay.set(Overlay::ConfirmDelete);
            }
        }
        KeyCode::Char('r') => app.core.retry(&CacheKey::Projects),
        KeyCode::Char('q') => app.running = false,
        _ => {}
    }
}

fn handle_project_key(app: &mut App, key: KeyEvent, project_id: &str) {
    match key.code {
        KeyCode::Esc => app.leave_project(),
        KeyCode::Char('q') => app.running = false,

        KeyCode::Char('1') => {
            app.tab.set(ProjectTab::Files);
        }
        KeyCode::Char('2') => {
            app.tab.set(ProjectTab::Summary);
        }
        KeyCode::Char('3') => {
            app.tab.set(ProjectTab::Podcasts);
        }
        KeyCode::Char('4') => {
            app.tab.set(ProjectTab::Table);
        }
        KeyCode::Tab => {
            let next = match app.tab.active() {
                ProjectTab::Files => ProjectTab::Summary,
                ProjectTab::Summary => ProjectTab::Podcasts,
                ProjectTab::Podcasts => ProjectTab::Table,
                ProjectTab::Table => ProjectTab::Files,
            };
            app.tab.set(next);
        }

        KeyCode::Up | KeyCode::Char('k') => match app.tab.active() {
            ProjectTab::Files => app.paper_list.move_up(),
            ProjectTab::Podcasts => app.podcast_list.move_up(),
            _ => {}
        },
        KeyCode::Down | KeyCode::Char('j') => match app.tab.active() {
            ProjectTab::Files => {
                let count = app.papers().len();
                app.paper_list.move_down(count);
            }
            ProjectTab::Podcasts => {
                let count = podcast_count(app, project_id);
                app.podcast_list.move_down(count);
            }
            _ => {}
        },

        KeyCode::Char(' ') => {
            let papers = app.papers();
            if let Some(paper) = papers.get(app.paper_list.index) {
                let id = paper.id.clone();
                drop(papers);
                app.selection.toggle(&id);
            }
        }
        KeyCode::Char('c') => {
            app.selection.clear_selection();
            app.set_status(StatusLevel::Info, "selection cleared");
        }

        KeyCode::Char('s') => dispatch_batch(app, project_id, ToolKind::Summarize),
        KeyCode::Char('p') => dispatch_batch(app, project_id, ToolKind::Podcast),
        KeyCode::Char('S') => dispatch_single(app, project_id, ToolKind::Summarize),
        KeyCode::Char('P') => dispatch_single(app, project_id, ToolKind::Podcast),

        KeyCode::Char('u') => {
            if app.overlay.set(Overlay::Upload) {
                app.upload_form.input.clear();
            }
        }
        KeyCode::Char('d') => {
            if app.tab.is_active(ProjectTab::Table) {
                let dest = dirs::download_dir()
                    .or_else(|| std::env::current_dir().ok())
                    .unwrap_or_else(|| std::path::PathBuf::from("."));
                app.core.download_csv(project_id.to_string(), dest);
                app.set_status(StatusLevel::Info, "downloading csv...");
            }
        }
        KeyCode::Char('r') => retry_active_tab(app, project_id),

        KeyCode::Enter => {
            if app.tab.is_active(ProjectTab::Podcasts) {
                toggle_playback(app, project_id);
            }
        }
        _ => {}
    }
}

fn podcast_count(app: &App, project_id: &str) -> usize {
    match app.core.read(&CacheKey::Podcasts(project_id.to_string())) {
        Some(CacheValue::Podcasts(episodes)) => episodes.len(),
        _ => 0,
    }
}

/// Batch dispatch against the pruned selection. Stale selected ids are
/// dropped before the request; an empty effective set is rejected without a
/// network call and surfaced inline.
fn dispatch_batch(app: &mut App, project_id: &str, tool: ToolKind) {
    let papers = app.papers();
    let ids = app.selection.selected_in(&papers);
    drop(papers);
    match app.core.dispatcher().run_batch(tool, project_id, ids) {
        Ok(()) => app.set_status(StatusLevel::Info, format!("{tool} dispatched")),
        Err(err) => app.set_status(StatusLevel::Error, err.to_string()),
    }
}

fn dispatch_single(app: &mut App, project_id: &str, tool: ToolKind) {
    let papers = app.papers();
    let Some(paper) = app.selection.focused_in(&papers) else {
        app.set_status(StatusLevel::Error, "no paper focused");
        return;
    };
    let paper_id = paper.id.clone();
    drop(papers);
    match app
        .core
        .dispatcher()
        .run_single(tool, project_id, &paper_id)
    {
        Ok(()) => app.set_status(StatusLevel::Info, format!("{tool} dispatched")),
        Err(err) => app.set_status(StatusLevel::Error, err.to_string()),
    }
}

/// Manual refresh of whatever the active tab is looking at.
fn retry_active_tab(app: &mut App, project_id: &str) {
    let pid = project_id.to_string();
    match app.tab.active() {
        ProjectTab::Files => {
            app.core.retry(&CacheKey::Papers(pid.clone()));
            let papers = app.papers();
            if let Some(paper) = app.selection.focused_in(&papers) {
                let paper_id = paper.id.clone();
                drop(papers);
                app.core.retry(&CacheKey::Metadata(pid.clone(), paper_id.clone()));
                app.core.retry(&CacheKey::Jobs(pid, paper_id));
            }
        }
        ProjectTab::Summary => app.core.retry(&CacheKey::Summaries(pid)),
        ProjectTab::Podcasts => app.core.retry(&CacheKey::Podcasts(pid)),
        ProjectTab::Table => app.core.retry(&CacheKey::Table(pid)),
    }
}

/// Play the highlighted episode, or stop it when it is already playing.
fn toggle_playback(app: &mut App, project_id: &str) {
    let episodes = match app.core.read(&CacheKey::Podcasts(project_id.to_string())) {
        Some(CacheValue::Podcasts(episodes)) => episodes,
        _ => return,
    };
    let Some(episode) = episodes.get(app.podcast_list.index) else {
        return;
    };
    if app.playing.as_deref() == Some(episode.paper_id.as_str()) {
        app.stop_audio();
        return;
    }
    if !app.audio.is_available() {
        app.set_status(StatusLevel::Error, "audio output not available");
        return;
    }
    let paper_id = episode.paper_id.clone();
    let url = episode.mp3_url.clone();
    app.audio_loading = Some(paper_id.clone());
    let api = Arc::clone(app.core.api());
    let tx = app.audio_tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_bytes(&url).await.map_err(|err| err.to_string());
        let _ = tx.send(AudioResult { paper_id, result });
    });
}

fn handle_overlay_key(app: &mut App, key: KeyEvent) {
    match app.overlay.active() {
        Overlay::None => {}
        Overlay::CreateProject => handle_create_key(app, key),
        Overlay::ConfirmDelete => handle_delete_key(app, key),
        Overlay::Upload => handle_upload_key(app, key),
    }
}

fn handle_create_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if !app.create_form.busy && app.overlay.set(Overlay::None) {
                app.create_form.reset();
            }
        }
        KeyCode::Tab => {
            app.create_form.focus = match app.create_form.focus {
                CreateField::Name => CreateField::Description,
                CreateField::Description => CreateField::Name,
            };
        }
        KeyCode::Enter => {
            if app.create_form.busy {
                return;
            }
            // Same rule the client enforces: an empty name never leaves the
            // form.
            if app.create_form.name.trim().is_empty() {
                app.set_status(StatusLevel::Error, "project name is required");
                return;
            }
            app.create_form.busy = true;
            app.core.create_project(
                app.create_form.name.clone(),
                app.create_form.description.clone(),
            );
        }
        KeyCode::Backspace => {
            let field = match app.create_form.focus {
                CreateField::Name => &mut app.create_form.name,
                CreateField::Description => &mut app.create_form.description,
            };
            field.pop();
        }
        KeyCode::Char(c) => {
            let field = match app.create_form.focus {
                CreateField::Name => &mut app.create_form.name,
                CreateField::Description => &mut app.create_form.description,
            };
            field.push(c);
        }
        _ => {}
    }
}

fn handle_delete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('n') => {
            if !app.delete_busy && app.overlay.set(Overlay::None) {
                app.pending_delete = None;
            }
        }
        KeyCode::Enter | KeyCode::Char('y') => {
            if app.delete_busy {
                return;
            }
            if let Some(project_id) = app.pending_delete.clone() {
                app.delete_busy = true;
                app.core.delete_project(project_id);
            }
        }
        _ => {}
    }
}

fn handle_upload_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay.set(Overlay::None);
        }
        KeyCode::Enter => {
            let Some(project_id) = app.current_project_id().map(str::to_string) else {
                app.overlay.set(Overlay::None);
                return;
            };
            let paths = app.upload_form.paths();
            let total = paths.len();
            match app.core.uploads().start(project_id, paths) {
                Ok(()) => {
                    app.overlay.set(Overlay::None);
                    app.set_status(StatusLevel::Info, format!("uploading {total} files..."));
                }
                Err(err) => app.set_status(StatusLevel::Error, err.to_string()),
            }
        }
        KeyCode::Backspace => {
            app.upload_form.input.pop();
        }
        KeyCode::Char(c) => {
            app.upload_form.input.push(c);
        }
        _ => {}
    }
}
