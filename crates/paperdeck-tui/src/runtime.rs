//! The UI event loop: terminal input, core notifications and audio fetch
//! results multiplexed over one `tokio::select!`.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use paperdeck_core::CoreEvent;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::audio::AudioResult;
use crate::input::handle_key;
use crate::render::render;
use crate::terminal::Tui;
use crate::ui::{App, Overlay, StatusLevel, View};

pub async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    core_events: &mut UnboundedReceiver<CoreEvent>,
    audio_results: &mut UnboundedReceiver<AudioResult>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    // Periodic wake-up so playback state and in-flight badges stay fresh
    // even without input.
    let mut tick = tokio::time::interval(Duration::from_millis(100));

    while app.running {
        app.reconcile();
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    handle_key(app, key);
                }
            }
            Some(event) = core_events.recv() => {
                handle_core_event(app, event);
                // Drain whatever else queued up before redrawing once.
                while let Ok(event) = core_events.try_recv() {
                    handle_core_event(app, event);
                }
            }
            Some(result) = audio_results.recv() => {
                handle_audio_result(app, result);
            }
            _ = tick.tick() => {
                if app.playing.is_some() && app.audio.finished() {
                    app.playing = None;
                }
            }
        }
    }
    Ok(())
}

fn handle_core_event(app: &mut App, event: CoreEvent) {
    match event {
        // The next draw re-reads the cache; nothing else to do.
        CoreEvent::CacheFetched(_) => {}

        CoreEvent::ProjectCreated(project) => {
            app.create_form.busy = false;
            if app.overlay.sync(Overlay::None) {
                app.create_form.reset();
            }
            app.set_status(
                StatusLevel::Success,
                format!("created project {}", project.name),
            );
        }

        CoreEvent::ProjectDeleted { project_id } => {
            app.delete_busy = false;
            app.pending_delete = None;
            app.overlay.sync(Overlay::None);
            // If the corpse is on screen, navigate home.
            if app.view == (View::Project { project_id: project_id.clone() }) {
                app.leave_project();
            }
            app.set_status(StatusLevel::Info, "project deleted");
        }

        CoreEvent::MutationFailed { context, message } => {
            app.create_form.busy = false;
            app.delete_busy = false;
            app.set_status(StatusLevel::Error, format!("{context}: {message}"));
        }

        CoreEvent::UploadAdvanced { settled, total, .. } => {
            app.set_status(StatusLevel::Info, format!("uploading {settled}/{total}"));
        }

        CoreEvent::UploadFinished { .. } => {
            let progress = app.core.uploads().progress();
            if progress.failures.is_empty() {
                app.set_status(
                    StatusLevel::Success,
                    format!("uploaded {} files", progress.succeeded),
                );
            } else {
                let names: Vec<&str> = progress
                    .failures
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect();
                app.set_status(
                    StatusLevel::Error,
                    format!(
                        "uploaded {}, failed {}: {}",
                        progress.succeeded,
                        progress.failures.len(),
                        names.join(", ")
                    ),
                );
            }
        }

        CoreEvent::ToolSettled { key, ok, message } => {
            let text = if message.is_empty() {
                format!("{} {}", key.tool, if ok { "done" } else { "failed" })
            } else {
                format!("{}: {}", key.tool, message)
            };
            app.set_status(
                if ok {
                    StatusLevel::Success
                } else {
                    StatusLevel::Error
                },
                text,
            );
        }

        CoreEvent::CsvSaved { path } => {
            app.set_status(StatusLevel::Success, format!("saved {}", path.display()));
        }
    }
}

fn handle_audio_result(app: &mut App, result: AudioResult) {
    // Ignore results for an episode the user moved away from.
    if app.audio_loading.as_deref() != Some(result.paper_id.as_str()) {
        return;
    }
    app.audio_loading = None;
    match result.result {
        Ok(bytes) => match app.audio.play_bytes(bytes) {
            Ok(()) => {
                app.playing = Some(result.paper_id);
            }
            Err(err) => app.set_status(StatusLevel::Error, err),
        },
        Err(err) => {
            app.set_status(StatusLevel::Error, format!("audio fetch failed: {err}"));
        }
    }
}
