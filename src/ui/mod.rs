pub mod dialogs;
mod help;
mod statusbar;
mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{App, Mode};

/// Main render function.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // record table
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    table::render(f, chunks[0], app);
    statusbar::render(f, chunks[1], app);

    if let Some(dialog) = &app.dialog {
        dialogs::render_dialog(f, dialog, &app.localization);
    }

    if app.mode == Mode::Help {
        help::render(f, f.area(), app);
    }
}
