use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::ui::components::statusbar::render_statusbar;
use crate::ui::views::{modals, project, projects};
use crate::ui::{theme, App, View};

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme::BG_APP)),
        area,
    );

    let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    match &app.view {
        View::Projects => projects::render(f, app, rows[0]),
        View::Project { project_id } => project::render(f, app, rows[0], project_id),
    }
    render_statusbar(f, app, rows[1]);

    // Modals paint last, over a dimmed backdrop.
    modals::render(f, app, area);
}
