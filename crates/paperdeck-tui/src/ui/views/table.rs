use paperdeck_core::store::{CacheKey, CacheValue};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Line,
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::ui::theme;
use crate::ui::views::{render_empty_hint, render_slot_badge};
use crate::ui::App;

/// Table tab: the project's extracted metadata, one row per summarized
/// paper.
pub fn render(f: &mut Frame, app: &App, area: Rect, project_id: &str) {
    let key = CacheKey::Table(project_id.to_string());
    if render_slot_badge(f, app, area, &key) {
        return;
    }
    let rows_data = match app.core.read(&key) {
        Some(CacheValue::Table(rows)) => rows,
        _ => return,
    };
    if rows_data.is_empty() {
        render_empty_hint(f, area, "No metadata available.");
        return;
    }

    let header = Row::new(
        ["Title", "Conf", "Year", "Domain", "Tags", "Ready", "Script"]
            .into_iter()
            .map(|label| Cell::from(Line::styled(label, theme::title()))),
    );
    let rows = rows_data.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.title.clone()),
            Cell::from(row.conference.clone()),
            Cell::from(row.year.to_string()),
            Cell::from(row.domain.clone()),
            Cell::from(row.tags.clone()),
            Cell::from(if row.ready_to_publish { "yes" } else { "no" }),
            Cell::from(row.script_lines.to_string()),
        ])
        .style(Style::default().fg(theme::TEXT_MUTED))
    });
    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(6),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .column_spacing(1);
    f.render_widget(table, area);
}
