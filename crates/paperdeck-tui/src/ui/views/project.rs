use paperdeck_core::store::{CacheKey, CacheValue};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::components::tab_bar::render_tab_bar;
use crate::ui::theme;
use crate::ui::views::{files, podcasts, summaries, table};
use crate::ui::{App, ProjectTab};

/// Project detail view: header, tab strip, and exactly one tab panel.
pub fn render(f: &mut Frame, app: &App, area: Rect, project_id: &str) {
    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(f, app, rows[0], project_id);
    render_tab_bar(f, app, rows[1]);

    let content = rows[3];
    match app.tab.active() {
        ProjectTab::Files => files::render(f, app, content, project_id),
        ProjectTab::Summary => summaries::render(f, app, content, project_id),
        ProjectTab::Podcasts => podcasts::render(f, app, content, project_id),
        ProjectTab::Table => table::render(f, app, content, project_id),
    }

    let hint = match app.tab.active() {
        ProjectTab::Files => {
            "space select · s/p run selected · S/P run focused · u upload · c clear · esc back"
        }
        ProjectTab::Summary => "s/p run selected · r refresh · esc back",
        ProjectTab::Podcasts => "enter play/stop · r refresh · esc back",
        ProjectTab::Table => "d download csv · r refresh · esc back",
    };
    f.render_widget(Paragraph::new(Line::styled(hint, theme::dim())), rows[4]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect, project_id: &str) {
    let project = match app.core.read(&CacheKey::Project(project_id.to_string())) {
        Some(CacheValue::Project(project)) => Some(project),
        _ => None,
    };
    let name = project
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Project".to_string());
    let mut lines = vec![Line::from(vec![
        Span::styled(name, theme::title()),
        Span::styled(
            format!("  {} selected", app.selection.selection().len()),
            theme::dim(),
        ),
    ])];
    if let Some(description) = project.as_ref().and_then(|p| p.description.clone()) {
        if !description.is_empty() {
            lines.push(Line::styled(description, theme::muted()));
        }
    }
    f.render_widget(Paragraph::new(lines), area);
}
