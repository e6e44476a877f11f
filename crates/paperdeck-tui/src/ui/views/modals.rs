use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::ui::components::modal_frame::{render_input_line, render_modal_frame};
use crate::ui::theme;
use crate::ui::{App, CreateField, Overlay};

/// Renders whichever modal is open. Exactly one can be; `Overlay::None`
/// draws nothing.
pub fn render(f: &mut Frame, app: &App, terminal_area: Rect) {
    match app.overlay.active() {
        Overlay::None => {}
        Overlay::CreateProject => render_create_project(f, app, terminal_area),
        Overlay::ConfirmDelete => render_confirm_delete(f, app, terminal_area),
        Overlay::Upload => render_upload(f, app, terminal_area),
    }
}

fn render_create_project(f: &mut Frame, app: &App, terminal_area: Rect) {
    let content = render_modal_frame(
        f,
        terminal_area,
        "New Project",
        "tab switch · enter create · esc cancel",
        56,
        9,
    );
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(content);

    let form = &app.create_form;
    render_input_line(
        f,
        rows[0],
        "Name",
        &form.name,
        "Project name",
        form.focus == CreateField::Name,
    );
    render_input_line(
        f,
        rows[1],
        "Description",
        &form.description,
        "Description",
        form.focus == CreateField::Description,
    );
    if form.busy {
        f.render_widget(
            Paragraph::new(Line::styled("Creating...", theme::accent())),
            rows[3],
        );
    }
}

fn render_confirm_delete(f: &mut Frame, app: &App, terminal_area: Rect) {
    let content = render_modal_frame(
        f,
        terminal_area,
        "Delete project?",
        "enter confirm · esc cancel",
        56,
        8,
    );
    let name = app
        .pending_delete
        .as_ref()
        .and_then(|id| {
            app.projects()
                .iter()
                .find(|p| &p.id == id)
                .map(|p| p.name.clone())
        })
        .unwrap_or_default();
    let mut lines = vec![
        Line::styled(
            "This will remove the project directory and all files.",
            theme::muted(),
        ),
        Line::styled(name, theme::title()),
    ];
    if app.delete_busy {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Deleting...", theme::status_error()));
    }
    f.render_widget(Paragraph::new(lines), content);
}

fn render_upload(f: &mut Frame, app: &App, terminal_area: Rect) {
    let content = render_modal_frame(
        f,
        terminal_area,
        "Upload PDFs",
        "enter upload · esc cancel",
        72,
        8,
    );
    let rows =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(content);
    render_input_line(
        f,
        rows[0],
        "Files",
        &app.upload_form.input,
        "/path/to/one.pdf /path/to/two.pdf",
        true,
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::raw(""),
            Line::styled(
                "Paths are uploaded in order, one request per file.",
                theme::dim(),
            ),
        ]),
        rows[1],
    );
}
