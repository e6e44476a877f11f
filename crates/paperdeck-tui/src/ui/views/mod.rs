pub mod files;
pub mod modals;
pub mod podcasts;
pub mod project;
pub mod projects;
pub mod summaries;
pub mod table;

use paperdeck_core::store::{CacheKey, SlotStatus};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

use crate::ui::theme;
use crate::ui::App;

/// Standard inline treatment for a key without a usable value: a loading or
/// failure badge. Returns true when it rendered one, in which case the
/// caller skips its content. Reads the key first, so looking at a view is
/// what schedules its fetch.
pub fn render_slot_badge(f: &mut Frame, app: &App, area: Rect, key: &CacheKey) -> bool {
    let _ = app.core.read(key);
    match app.core.status(key) {
        SlotStatus::Ready => false,
        SlotStatus::Loading | SlotStatus::Empty => {
            f.render_widget(
                Paragraph::new(Line::styled("Loading...", theme::dim())),
                area,
            );
            true
        }
        SlotStatus::Failed(message) => {
            f.render_widget(
                Paragraph::new(vec![
                    Line::styled(message, theme::status_error()),
                    Line::styled("press r to retry", theme::dim()),
                ]),
                area,
            );
            true
        }
    }
}

/// Muted single-line hint for empty collections.
pub fn render_empty_hint(f: &mut Frame, area: Rect, hint: &str) {
    f.render_widget(Paragraph::new(Line::styled(hint, theme::muted())), area);
}
