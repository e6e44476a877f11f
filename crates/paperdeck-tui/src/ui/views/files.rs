use paperdeck_core::dispatch::{DispatchKey, RunState};
use paperdeck_core::models::ToolKind;
use paperdeck_core::store::{CacheKey, CacheValue, SlotStatus};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme;
use crate::ui::views::{render_empty_hint, render_slot_badge};
use crate::ui::App;

/// Files tab: paper list with batch checkboxes on the left, the focused
/// paper's detail pane on the right.
pub fn render(f: &mut Frame, app: &App, area: Rect, project_id: &str) {
    let columns =
        Layout::horizontal([Constraint::Length(44), Constraint::Min(0)]).split(area);

    render_paper_list(f, app, columns[0], project_id);
    render_detail(f, app, columns[1], project_id);
}

fn render_paper_list(f: &mut Frame, app: &App, area: Rect, project_id: &str) {
    let key = CacheKey::Papers(project_id.to_string());
    if render_slot_badge(f, app, area, &key) {
        return;
    }
    let papers = app.papers();
    if papers.is_empty() {
        render_empty_hint(f, area, "No files uploaded yet. Press u to upload.");
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (index, paper) in papers.iter().enumerate() {
        let highlighted = index == app.paper_list.index;
        let checked = app.selection.is_selected(&paper.id);
        let checkbox = if checked { "[x] " } else { "[ ] " };
        let row_style = if highlighted {
            theme::selected_row()
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(checkbox, if checked { theme::accent() } else { theme::dim() }),
            Span::styled(paper.original_name.clone(), row_style),
            Span::styled(format!("  {:.2} MB", paper.size_mb()), theme::dim()),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_detail(f: &mut Frame, app: &App, area: Rect, project_id: &str) {
    let papers = app.papers();
    let Some(paper) = app.selection.focused_in(&papers) else {
        render_empty_hint(f, area, "Upload a PDF to begin.");
        return;
    };

    let mut lines = vec![
        Line::styled(paper.display_name().to_string(), theme::title()),
        Line::from(vec![
            Span::styled(paper.original_name.clone(), theme::muted()),
            Span::styled(
                format!("  {:.2} MB  {}", paper.size_mb(), paper.mime),
                theme::dim(),
            ),
        ]),
        Line::styled(
            format!("uploaded {}", paper.created_at.format("%Y-%m-%d %H:%M")),
            theme::dim(),
        ),
        Line::styled(app.core.api().paper_file_url(paper), theme::accent()),
        Line::raw(""),
    ];

    // Per-paper tool lifecycles, straight from the dispatch ledger.
    for tool in [ToolKind::Summarize, ToolKind::Podcast] {
        let status = app
            .core
            .dispatcher()
            .status(&DispatchKey::single(tool, project_id, &paper.id));
        if status.state != RunState::Idle {
            let (label, style) = match status.state {
                RunState::Running => ("running", theme::accent()),
                RunState::Done => ("done", theme::status_ok()),
                RunState::Error => ("error", theme::status_error()),
                RunState::Idle => unreachable!(),
            };
            let mut spans = vec![
                Span::styled(format!("{tool}: "), theme::muted()),
                Span::styled(label, style),
            ];
            if !status.message.is_empty() {
                spans.push(Span::styled(format!("  {}", status.message), theme::dim()));
            }
            lines.push(Line::from(spans));
        }
    }
    lines.push(Line::raw(""));

    render_metadata(app, project_id, &paper.id, &mut lines);
    render_jobs(app, project_id, &paper.id, &mut lines);

    f.render_widget(Paragraph::new(lines).wrap(ratatui::widgets::Wrap { trim: false }), area);
}

fn render_metadata(app: &App, project_id: &str, paper_id: &str, lines: &mut Vec<Line<'static>>) {
    let key = CacheKey::Metadata(project_id.to_string(), paper_id.to_string());
    match app.core.status(&key) {
        SlotStatus::Ready => {
            if let Some(CacheValue::Metadata(row)) = app.core.read(&key) {
                lines.push(Line::from(vec![
                    Span::styled(row.title.clone(), theme::title()),
                    Span::styled(
                        format!("  {} · {} · {}", row.conference, row.year, row.domain),
                        theme::muted(),
                    ),
                ]));
                lines.push(Line::styled(row.summary.clone(), theme::muted()));
                if !row.tags.is_empty() {
                    lines.push(Line::styled(format!("Tags: {}", row.tags), theme::dim()));
                }
            }
        }
        SlotStatus::Loading | SlotStatus::Empty => {
            let _ = app.core.read(&key);
            lines.push(Line::styled("Loading metadata...", theme::dim()));
        }
        SlotStatus::Failed(_) => {
            // Typically a 404: the paper has not been summarized yet.
            lines.push(Line::styled(
                "No metadata yet. Run summarize to extract it.",
                theme::dim(),
            ));
        }
    }
}

fn render_jobs(app: &App, project_id: &str, paper_id: &str, lines: &mut Vec<Line<'static>>) {
    let key = CacheKey::Jobs(project_id.to_string(), paper_id.to_string());
    let Some(CacheValue::Jobs(jobs)) = app.core.read(&key) else {
        return;
    };
    if jobs.is_empty() {
        return;
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("Jobs", theme::muted()));
    for job in jobs.iter().take(4) {
        let style = match job.status {
            paperdeck_core::models::JobStatus::Done => theme::status_ok(),
            paperdeck_core::models::JobStatus::Error => theme::status_error(),
            _ => theme::accent(),
        };
        let mut spans = vec![
            Span::styled(format!("{}: ", job.tool), theme::dim()),
            Span::styled(format!("{:?}", job.status).to_lowercase(), style),
        ];
        if let Some(message) = &job.message {
            if !message.is_empty() {
                spans.push(Span::styled(format!("  {message}"), theme::dim()));
            }
        }
        lines.push(Line::from(spans));
    }
}
