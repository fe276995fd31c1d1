use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, NotificationLevel};
use crate::sort::SortField;

/// Bottom status line: active language, sort state, record count and the
/// current notification (if any).
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if let Some(notification) = &app.notification {
        let color = match notification.level {
            NotificationLevel::Info => Color::Blue,
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Error => Color::Red,
        };
        let line = Line::from(Span::styled(
            format!(" {} ", notification.message),
            Style::default().fg(Color::White).bg(color),
        ));
        f.render_widget(Paragraph::new(line), area);
        return;
    }

    let sort_state = match app.sorted_by {
        Some(field) => {
            let name = match field {
                SortField::Id => app.tr("HeaderID"),
                SortField::Description => app.tr("HeaderDescription"),
                SortField::Priority => app.tr("HeaderPriority"),
                SortField::Date => app.tr("HeaderDueDate"),
            };
            let arrow = if app.sort_ascending { "▲" } else { "▼" };
            format!("{name} {arrow}")
        }
        None => "-".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" [{}] ", app.localization.current()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(format!(" {} ", sort_state)),
        Span::styled(
            format!(" {} ", app.records.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            " a:add  e:edit  d:delete  1-4:sort  l:language  ?:help  q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
