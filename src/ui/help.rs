use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;

const KEYS: &[(&str, &str)] = &[
    ("a", "add a record"),
    ("e / Enter", "edit the selected description"),
    ("d", "delete the selected record"),
    ("1", "sort by id"),
    ("2", "sort by description"),
    ("3", "sort by priority"),
    ("4", "sort by due date"),
    ("l", "switch the display language"),
    ("j / k", "move the selection"),
    ("q", "quit"),
];

/// Key overview overlay. Any key closes it.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let height = (KEYS.len() + 4) as u16;
    let popup = centered(40, height, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!("  {}  ", app.tr("HelpTitle")))
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let lines: Vec<String> = KEYS
        .iter()
        .map(|(key, action)| format!("  {key:<10} {action}"))
        .collect();

    let paragraph = Paragraph::new(lines.join("\n"))
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, popup);
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
