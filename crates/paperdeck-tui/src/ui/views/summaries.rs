use paperdeck_core::store::{CacheKey, CacheValue};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::theme;
use crate::ui::views::{render_empty_hint, render_slot_badge};
use crate::ui::App;

/// Summary tab: every summarized paper of the project.
pub fn render(f: &mut Frame, app: &App, area: Rect, project_id: &str) {
    let key = CacheKey::Summaries(project_id.to_string());
    if render_slot_badge(f, app, area, &key) {
        return;
    }
    let items = match app.core.read(&key) {
        Some(CacheValue::Summaries(items)) => items,
        _ => return,
    };
    if items.is_empty() {
        render_empty_hint(
            f,
            area,
            "No summaries yet. Select files and run Summarize.",
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for item in items.iter() {
        lines.push(Line::from(vec![
            Span::styled(item.title.clone(), theme::title()),
            Span::styled(
                format!("  {} · {} · {}", item.conference, item.year, item.domain),
                theme::muted(),
            ),
        ]));
        lines.push(Line::styled(
            app.core.api().config().resolve(&item.pdf_url),
            theme::accent(),
        ));
        lines.push(Line::styled(item.summary.clone(), theme::muted()));
        if !item.tags.is_empty() {
            lines.push(Line::styled(format!("Tags: {}", item.tags), theme::dim()));
        }
        lines.push(Line::raw(""));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
