use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme;
use crate::ui::{App, ProjectTab};

/// Renders the four-tab strip of the project view. Exactly one tab is
/// active; its content panel is the only one drawn below.
pub fn render_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (index, tab) in ProjectTab::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", theme::dim()));
        }
        let style = if app.tab.is_active(tab) {
            theme::tab_active()
        } else {
            theme::tab_inactive()
        };
        spans.push(Span::styled(format!("{} ", index + 1), theme::dim()));
        spans.push(Span::styled(tab.title(), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
