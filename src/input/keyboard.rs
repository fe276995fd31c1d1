use crossterm::event::{KeyCode, KeyEvent};
use tui_textarea::{CursorMove, TextArea};

use crate::app::{App, Mode};
use crate::sort::SortField;
use crate::ui::dialogs::{AddDialog, DialogFocus, DialogType, EditDialog};
use crate::validate;

/// Handle one key press.
/// Returns false when the app should exit.
pub fn handle_key_input(app: &mut App, key: KeyEvent) -> bool {
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Dialog => handle_dialog_mode(app, key),
        Mode::Help => {
            // Any key closes the overlay
            app.mode = Mode::Normal;
            true
        }
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('?') => app.mode = Mode::Help,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('a') => app.open_add_dialog(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_dialog(),
        KeyCode::Char('d') => app.open_confirm_delete(),
        KeyCode::Char('l') => app.cycle_language(),
        KeyCode::Char('1') => app.sort(SortField::Id),
        KeyCode::Char('2') => app.sort(SortField::Description),
        KeyCode::Char('3') => app.sort(SortField::Priority),
        KeyCode::Char('4') => app.sort(SortField::Date),
        _ => {}
    }
    true
}

fn handle_dialog_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(mut dialog) = app.dialog.take() else {
        app.mode = Mode::Normal;
        return true;
    };

    let close = match &mut dialog {
        DialogType::Add(add) => handle_add_dialog(app, add, key),
        DialogType::Edit(edit) => handle_edit_dialog(app, edit, key),
        DialogType::ConfirmDelete { record_id } => handle_confirm_delete(app, *record_id, key),
    };

    if close {
        app.close_dialog();
    } else {
        app.dialog = Some(dialog);
    }
    true
}

fn handle_add_dialog(app: &mut App, dialog: &mut AddDialog, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Enter => return app.submit_add_dialog(dialog),
        KeyCode::Tab => {
            dialog.focus = dialog.focus.next();
            return false;
        }
        _ => {}
    }

    match dialog.focus {
        DialogFocus::Description => {
            apply_to_textarea(&mut dialog.textarea, key);
            // Keep the error display current while typing
            let description = dialog.description();
            validate::validate_description(&mut dialog.errors, &description);
        }
        DialogFocus::Priority => {
            if matches!(
                key.code,
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            ) {
                dialog.priority = dialog.priority.cycle();
            }
        }
        DialogFocus::DueDate => match key.code {
            KeyCode::Backspace => {
                dialog.due_date.pop();
            }
            KeyCode::Char(c) => dialog.due_date.push(c),
            _ => {}
        },
    }
    false
}

fn handle_edit_dialog(app: &mut App, dialog: &mut EditDialog, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Enter => {
            app.edit_description(dialog.record_id, &dialog.description());
            true
        }
        _ => {
            apply_to_textarea(&mut dialog.textarea, key);
            false
        }
    }
}

// tui-textarea tracks its own event types, so key presses are translated
// by hand instead of handing the terminal event over directly.
fn apply_to_textarea(textarea: &mut TextArea<'static>, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => textarea.insert_char(c),
        KeyCode::Backspace => {
            textarea.delete_char();
        }
        KeyCode::Delete => {
            textarea.delete_next_char();
        }
        KeyCode::Left => textarea.move_cursor(CursorMove::Back),
        KeyCode::Right => textarea.move_cursor(CursorMove::Forward),
        KeyCode::Up => textarea.move_cursor(CursorMove::Up),
        KeyCode::Down => textarea.move_cursor(CursorMove::Down),
        KeyCode::Home => textarea.move_cursor(CursorMove::Head),
        KeyCode::End => textarea.move_cursor(CursorMove::End),
        _ => {}
    }
}

fn handle_confirm_delete(app: &mut App, record_id: i64, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.remove_record(record_id);
            true
        }
        KeyCode::Char('n') | KeyCode::Esc => true,
        _ => false,
    }
}
