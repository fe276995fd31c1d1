use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_textarea::TextArea;

use crate::i18n::Localization;
use crate::models::Priority;
use crate::validate::{ErrorBag, FIELD_DESCRIPTION};

/// Input field of the add dialog that currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Description,
    Priority,
    DueDate,
}

impl DialogFocus {
    pub fn next(self) -> DialogFocus {
        match self {
            DialogFocus::Description => DialogFocus::Priority,
            DialogFocus::Priority => DialogFocus::DueDate,
            DialogFocus::DueDate => DialogFocus::Description,
        }
    }
}

/// State of the add-record dialog.
pub struct AddDialog {
    pub textarea: TextArea<'static>,
    pub priority: Priority,
    pub due_date: String,
    pub focus: DialogFocus,
    pub errors: ErrorBag,
}

impl AddDialog {
    pub fn new(due_date: String) -> Self {
        Self {
            textarea: styled_textarea(""),
            priority: Priority::Medium,
            due_date,
            focus: DialogFocus::Description,
            errors: ErrorBag::new(),
        }
    }

    pub fn description(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

/// State of the inline description-edit dialog.
pub struct EditDialog {
    pub record_id: i64,
    pub textarea: TextArea<'static>,
}

impl EditDialog {
    pub fn new(record_id: i64, description: &str) -> Self {
        Self {
            record_id,
            textarea: styled_textarea(description),
        }
    }

    pub fn description(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

pub enum DialogType {
    Add(AddDialog),
    Edit(EditDialog),
    ConfirmDelete { record_id: i64 },
}

fn styled_textarea(initial: &str) -> TextArea<'static> {
    let mut textarea = if initial.is_empty() {
        TextArea::default()
    } else {
        TextArea::from(initial.lines().map(|s| s.to_string()))
    };
    textarea.set_style(Style::default().fg(Color::White));
    textarea.set_cursor_style(Style::default().bg(Color::Cyan).fg(Color::Black));
    textarea.set_cursor_line_style(Style::default());
    textarea
}

/// Render the open dialog centered over the record table.
pub fn render_dialog(f: &mut Frame, dialog: &DialogType, localization: &Localization) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    match dialog {
        DialogType::Add(add) => render_add_dialog(f, area, add, localization),
        DialogType::Edit(edit) => render_edit_dialog(f, area, edit, localization),
        DialogType::ConfirmDelete { .. } => render_confirm_dialog(f, area, localization),
    }
}

fn dialog_block(title: String) -> Block<'static> {
    Block::default()
        .title(format!("  {}  ", title))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
}

fn render_add_dialog(f: &mut Frame, area: Rect, dialog: &AddDialog, localization: &Localization) {
    let block = dialog_block(localization.get("DialogAddTitle"));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // description label
            Constraint::Min(3),    // description input
            Constraint::Length(1), // priority row
            Constraint::Length(1), // due date row
            Constraint::Length(2), // validation errors
            Constraint::Length(1), // key hints
        ])
        .split(inner);

    let focused = |field: DialogFocus| {
        if dialog.focus == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let description_label = Paragraph::new(localization.get("HeaderDescription"))
        .style(focused(DialogFocus::Description));
    f.render_widget(description_label, chunks[0]);
    f.render_widget(&dialog.textarea, chunks[1]);

    let priority_line = Line::from(vec![
        Span::styled(
            format!("{}: ", localization.get("HeaderPriority")),
            focused(DialogFocus::Priority),
        ),
        Span::raw(localization.get(dialog.priority.label_key())),
    ]);
    f.render_widget(Paragraph::new(priority_line), chunks[2]);

    let due_date_line = Line::from(vec![
        Span::styled(
            format!("{}: ", localization.get("HeaderDueDate")),
            focused(DialogFocus::DueDate),
        ),
        Span::raw(dialog.due_date.clone()),
    ]);
    f.render_widget(Paragraph::new(due_date_line), chunks[3]);

    // Validation errors, translated at display time only
    let errors: Vec<Line> = dialog
        .errors
        .errors_for(FIELD_DESCRIPTION)
        .iter()
        .map(|key| Line::from(Span::styled(localization.get(key), Style::default().fg(Color::Red))))
        .collect();
    f.render_widget(Paragraph::new(errors), chunks[4]);

    let hints = Paragraph::new("Tab: next field   Enter: save   Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, chunks[5]);
}

fn render_edit_dialog(f: &mut Frame, area: Rect, dialog: &EditDialog, localization: &Localization) {
    let block = dialog_block(localization.get("DialogEditTitle"));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    f.render_widget(&dialog.textarea, chunks[0]);

    let hints = Paragraph::new("Enter: save   Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, chunks[1]);
}

fn render_confirm_dialog(f: &mut Frame, area: Rect, localization: &Localization) {
    let block = dialog_block(localization.get("DialogConfirmDeleteTitle"));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(localization.get("DialogConfirmDeleteMessage"))
        .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    let hints = Paragraph::new("y/Enter: delete   n/Esc: cancel")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hints, chunks[1]);
}

/// Centered rect taking the given percentages of the available area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
