use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme;
use crate::ui::{App, StatusLevel, View};

/// Bottom status bar: last message on the left, upload/dispatch activity on
/// the right.
pub fn render_statusbar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(32)]).split(area);

    let message = app.status.as_ref().map(|status| {
        let style = match status.level {
            StatusLevel::Info => theme::status_info(),
            StatusLevel::Success => theme::status_ok(),
            StatusLevel::Error => theme::status_error(),
        };
        Span::styled(status.text.clone(), style)
    });
    if let Some(span) = message {
        f.render_widget(Paragraph::new(Line::from(span)), chunks[0]);
    }

    let mut activity: Vec<String> = Vec::new();
    let uploads = app.core.uploads().progress();
    if uploads.busy {
        activity.push(format!("uploading {}/{}", uploads.settled, uploads.total));
    }
    if let View::Project { project_id } = &app.view {
        let running = app.core.dispatcher().running_in(project_id);
        if !running.is_empty() {
            let tools: Vec<&str> = running.iter().map(|key| key.tool.as_str()).collect();
            activity.push(format!("running: {}", tools.join(", ")));
        }
    }
    if !activity.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                activity.join("  "),
                theme::accent(),
            )))
            .right_aligned(),
            chunks[1],
        );
    }
}
