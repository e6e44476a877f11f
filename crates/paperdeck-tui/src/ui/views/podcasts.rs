use paperdeck_core::store::{CacheKey, CacheValue};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme;
use crate::ui::views::{render_empty_hint, render_slot_badge};
use crate::ui::App;

/// Podcasts tab: generated audio digests, playable in place.
pub fn render(f: &mut Frame, app: &App, area: Rect, project_id: &str) {
    let key = CacheKey::Podcasts(project_id.to_string());
    if render_slot_badge(f, app, area, &key) {
        return;
    }
    let episodes = match app.core.read(&key) {
        Some(CacheValue::Podcasts(episodes)) => episodes,
        _ => return,
    };
    if episodes.is_empty() {
        render_empty_hint(f, area, "No podcasts yet. Select files and run Podcast.");
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (index, episode) in episodes.iter().enumerate() {
        let highlighted = index == app.podcast_list.index;
        let playing = app.playing.as_deref() == Some(episode.paper_id.as_str());
        let loading = app.audio_loading.as_deref() == Some(episode.paper_id.as_str());
        let marker = if playing {
            "▶ "
        } else if loading {
            "… "
        } else {
            "  "
        };
        let row_style = if highlighted {
            theme::selected_row()
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, theme::status_ok()),
            Span::styled(episode.title.clone(), row_style),
        ]));
        lines.push(Line::styled(
            format!("   {}", app.core.api().config().resolve(&episode.mp3_url)),
            theme::dim(),
        ));
    }
    if !app.audio.is_available() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Audio output unavailable on this system.",
            theme::status_error(),
        ));
    }
    f.render_widget(Paragraph::new(lines), area);
}
