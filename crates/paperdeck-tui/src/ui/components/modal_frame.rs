use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
    Frame,
};

use crate::ui::theme;

/// Centered modal area of at most `max_width` columns and `height` rows.
pub fn modal_area(terminal_area: Rect, max_width: u16, height: u16) -> Rect {
    let width = max_width.min(terminal_area.width.saturating_sub(4));
    let height = height.min(terminal_area.height.saturating_sub(2));
    let x = terminal_area.x + (terminal_area.width.saturating_sub(width)) / 2;
    let y = terminal_area.y + (terminal_area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Dims the existing content so the modal reads as the only interactive
/// surface.
struct DimOverlay;

impl Widget for DimOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(Style::default().add_modifier(Modifier::DIM));
                }
            }
        }
    }
}

/// Clears and paints the modal surface over a dimmed backdrop, renders the
/// header line, and returns the content area below it.
pub fn render_modal_frame(
    f: &mut Frame,
    terminal_area: Rect,
    title: &str,
    hint: &str,
    max_width: u16,
    height: u16,
) -> Rect {
    f.render_widget(DimOverlay, terminal_area);

    let area = modal_area(terminal_area, max_width, height);
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default().style(Style::default().bg(theme::BG_MODAL)),
        area,
    );

    // One column of horizontal and one row of vertical padding.
    let inner = Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    );
    let rows = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(inner);

    let spacing = (rows[0].width as usize).saturating_sub(title.len() + hint.len());
    let header = Line::from(vec![
        Span::styled(title, theme::title()),
        Span::raw(" ".repeat(spacing)),
        Span::styled(hint, theme::dim()),
    ]);
    f.render_widget(Paragraph::new(header), rows[0]);

    rows[1]
}

/// A labelled single-line input field; the focused field gets the accent.
pub fn render_input_line(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let label_style = if focused { theme::accent() } else { theme::muted() };
    let value_span = if value.is_empty() {
        Span::styled(placeholder, theme::dim())
    } else {
        Span::styled(value, Style::default().fg(theme::TEXT_PRIMARY))
    };
    let cursor = if focused {
        Span::styled("█", theme::accent())
    } else {
        Span::raw("")
    };
    let line = Line::from(vec![
        Span::styled(format!("{label}: "), label_style),
        value_span,
        cursor,
    ]);
    f.render_widget(Paragraph::new(line), area);
}
