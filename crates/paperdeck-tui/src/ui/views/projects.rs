use paperdeck_core::store::CacheKey;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme;
use crate::ui::views::{render_empty_hint, render_slot_badge};
use crate::ui::App;

/// Home view: every project, newest knowledge of the backend's list.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    f.render_widget(
        Paragraph::new(Line::styled("Projects", theme::title())),
        rows[0],
    );

    let list_area = rows[1];
    if !render_slot_badge(f, app, list_area, &CacheKey::Projects) {
        let projects = app.projects();
        if projects.is_empty() {
            render_empty_hint(f, list_area, "No projects yet. Create one to get started.");
        } else {
            let mut lines: Vec<Line> = Vec::new();
            for (index, project) in projects.iter().enumerate() {
                let highlighted = index == app.project_list.index;
                let row_style = if highlighted {
                    theme::selected_row()
                } else {
                    theme::muted()
                };
                let marker = if highlighted { "> " } else { "  " };
                let mut spans = vec![
                    Span::styled(marker, theme::accent()),
                    Span::styled(project.name.clone(), row_style),
                ];
                if let Some(description) = &project.description {
                    if !description.is_empty() {
                        spans.push(Span::styled(
                            format!("  {description}"),
                            theme::dim(),
                        ));
                    }
                }
                spans.push(Span::styled(
                    format!("  {}", project.created_at.format("%Y-%m-%d")),
                    theme::dim(),
                ));
                lines.push(Line::from(spans));
            }
            f.render_widget(Paragraph::new(lines), list_area);
        }
    }

    f.render_widget(
        Paragraph::new(Line::styled(
            "enter open · n new · x delete · r refresh · q quit",
            theme::dim(),
        )),
        rows[2],
    );
}
