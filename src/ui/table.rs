use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::app::App;

/// Render the record table with translated headers. Priorities are stored
/// as tokens and translated here, at the presentation boundary.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec![
        Cell::from(format!("1:{}", app.tr("HeaderID"))),
        Cell::from(format!("2:{}", app.tr("HeaderDescription"))),
        Cell::from(format!("3:{}", app.tr("HeaderPriority"))),
        Cell::from(format!("4:{}", app.tr("HeaderDueDate"))),
    ])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(record.id.to_string()),
                Cell::from(record.description.clone()),
                Cell::from(app.tr(record.priority.label_key())),
                Cell::from(record.due_date.clone()),
            ])
            .style(style)
        })
        .collect();

    let title = format!("  {}  ", app.tr(app.flavor().title_key()));
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded),
    );

    f.render_widget(table, area);
}
