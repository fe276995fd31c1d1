use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::Local;

use crate::i18n::Localization;
use crate::models::{Priority, Record};
use crate::sort::{self, SortField};
use crate::store::{AppFlavor, RecordStore};
use crate::ui::dialogs::{AddDialog, DialogType, EditDialog};
use crate::validate::{self, FIELD_DESCRIPTION};

/// Notification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Transient status-bar notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    /// Notifications disappear after 3 seconds.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= 3
    }
}

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation and list operations.
    Normal,
    /// A dialog is open and owns the keyboard.
    Dialog,
    /// Key overview overlay.
    Help,
}

/// Application state.
///
/// The record list only reflects store state: every mutation is persisted
/// first and the list is then reloaded wholesale from the store.
pub struct App {
    pub store: RecordStore,
    pub localization: Localization,
    /// Displayed records, in current display order.
    pub records: Vec<Record>,
    /// Index of the selected row.
    pub selected: usize,
    /// Shared sort direction toggle, flipped on every sort regardless of
    /// which field is chosen.
    pub sort_ascending: bool,
    /// Field of the most recent sort, for the status bar.
    pub sorted_by: Option<SortField>,
    pub mode: Mode,
    pub dialog: Option<DialogType>,
    pub notification: Option<Notification>,
    pub install_dir: PathBuf,
}

impl App {
    pub fn new(store: RecordStore, localization: Localization, install_dir: PathBuf) -> Result<Self> {
        store.ensure_schema()?;
        let records = store.select_all()?;

        Ok(Self {
            store,
            localization,
            records,
            selected: 0,
            sort_ascending: false,
            sorted_by: None,
            mode: Mode::Normal,
            dialog: None,
            notification: None,
            install_dir,
        })
    }

    pub fn flavor(&self) -> AppFlavor {
        self.store.flavor()
    }

    /// Translated text for a key in the current language.
    pub fn tr(&self, key: &str) -> String {
        self.localization.get(key)
    }

    pub fn notify(&mut self, level: NotificationLevel, message: String) {
        self.notification = Some(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    fn report_failure(&mut self, message_key: &str, err: &anyhow::Error) {
        let message = format!("{}: {}", self.tr(message_key), err);
        self.notify(NotificationLevel::Error, message);
    }

    /// Replace the displayed list with fresh store contents.
    pub fn reload(&mut self) {
        match self.store.select_all() {
            Ok(records) => {
                self.records = records;
                if self.selected >= self.records.len() {
                    self.selected = self.records.len().saturating_sub(1);
                }
            }
            Err(err) => self.report_failure("MsgReloadFailed", &err),
        }
    }

    /// Re-sort the displayed list by `field`, flipping the shared direction
    /// toggle first. The list is replaced wholesale (clear, then append in
    /// order), so the selection resets to the top.
    pub fn sort(&mut self, field: SortField) {
        self.sort_ascending = !self.sort_ascending;
        let sorted = sort::sort_records(field, self.sort_ascending, &self.records);
        self.records.clear();
        self.records.extend(sorted);
        self.sorted_by = Some(field);
        self.selected = 0;
    }

    /// Persist a new record, then reload. A rejected insert is reported and
    /// leaves the list untouched.
    pub fn add_record(&mut self, description: &str, priority: Priority, due_date: &str) {
        match self.store.insert(description, priority, due_date) {
            Ok(()) => {
                self.reload();
                let message = self.tr("MsgRecordAdded");
                self.notify(NotificationLevel::Success, message);
            }
            Err(err) => self.report_failure("MsgAddFailed", &err),
        }
    }

    /// Delete a record by id. The store compacts the rowids of all surviving
    /// records, so the whole list is reloaded afterwards.
    pub fn remove_record(&mut self, id: i64) {
        match self.store.delete_and_reindex(id) {
            Ok(()) => self.reload(),
            Err(err) => self.report_failure("MsgDeleteFailed", &err),
        }
    }

    /// Persist a new description for a record, then reload.
    pub fn edit_description(&mut self, id: i64, description: &str) {
        match self.store.update_description(id, description) {
            Ok(()) => self.reload(),
            Err(err) => self.report_failure("MsgEditFailed", &err),
        }
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.records.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn cycle_language(&mut self) {
        self.localization.cycle_language();
    }

    pub fn open_add_dialog(&mut self) {
        let today = Local::now().format("%d.%m.%Y").to_string();
        self.dialog = Some(DialogType::Add(AddDialog::new(today)));
        self.mode = Mode::Dialog;
    }

    pub fn open_edit_dialog(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let dialog = EditDialog::new(record.id, &record.description);
        self.dialog = Some(DialogType::Edit(dialog));
        self.mode = Mode::Dialog;
    }

    pub fn open_confirm_delete(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        self.dialog = Some(DialogType::ConfirmDelete {
            record_id: record.id,
        });
        self.mode = Mode::Dialog;
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.mode = Mode::Normal;
    }

    /// Submit the add dialog. The record is only added when the description
    /// has no validation errors; otherwise the errors stay in the dialog's
    /// bag for display. Returns true when the dialog should close.
    pub fn submit_add_dialog(&mut self, dialog: &mut AddDialog) -> bool {
        let description = dialog.description();
        validate::validate_description(&mut dialog.errors, &description);
        if dialog.errors.has_errors(FIELD_DESCRIPTION) {
            return false;
        }
        self.add_record(&description, dialog.priority, &dialog.due_date);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_app(dir: &tempfile::TempDir) -> App {
        let languages = dir.path().join("languages");
        let icons = dir.path().join("icons");
        fs::create_dir_all(&languages).unwrap();
        fs::create_dir_all(&icons).unwrap();
        fs::write(
            languages.join("strings.en.toml"),
            "PriorityHigh = \"High\"\nMsgRecordAdded = \"Saved\"",
        )
        .unwrap();
        fs::write(icons.join("en.png"), b"icon").unwrap();

        let store = RecordStore::new(dir.path().join("test.db"), AppFlavor::Notes);
        let localization = Localization::load(&languages, &icons).unwrap();
        App::new(store, localization, dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_add_reloads_from_store() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);

        app.add_record("hello", Priority::Medium, "01.06.2024");
        assert_eq!(app.records.len(), 1);
        assert_eq!(app.records[0].id, 1);
        assert_eq!(app.records[0].priority, Priority::Medium);
    }

    #[test]
    fn test_rejected_add_leaves_list_untouched_and_notifies() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);
        app.add_record("kept", Priority::High, "01.06.2024");

        app.add_record("", Priority::High, "01.06.2024");
        assert_eq!(app.records.len(), 1);
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
    }

    #[test]
    fn test_remove_compacts_identifiers() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);
        for i in 1..=3 {
            app.add_record(&format!("r{i}"), Priority::Low, "01.06.2024");
        }

        app.remove_record(2);

        let ids: Vec<i64> = app.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let descriptions: Vec<&str> =
            app.records.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["r1", "r3"]);
    }

    #[test]
    fn test_edit_description_changes_only_that_record() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);
        app.add_record("one", Priority::High, "01.06.2024");
        app.add_record("two", Priority::Low, "02.06.2024");

        app.edit_description(1, "updated");

        assert_eq!(app.records[0].description, "updated");
        assert_eq!(app.records[0].priority, Priority::High);
        assert_eq!(app.records[1].description, "two");
        assert_eq!(app.records[1].due_date, "02.06.2024");
    }

    #[test]
    fn test_sort_toggle_is_shared_across_fields() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);
        app.add_record("b", Priority::Medium, "01.06.2024");
        app.add_record("a", Priority::High, "02.06.2024");

        app.sort(SortField::Id);
        assert!(app.sort_ascending);

        // A different field still flips the same toggle
        app.sort(SortField::Description);
        assert!(!app.sort_ascending);
        assert_eq!(app.records[0].description, "b");
    }

    #[test]
    fn test_sort_resets_selection() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);
        for i in 1..=3 {
            app.add_record(&format!("r{i}"), Priority::Low, "01.06.2024");
        }
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);

        app.sort(SortField::Id);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_priority_stays_consistent_across_insert_reload_sort() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);
        app.add_record("m", Priority::Medium, "01.01.2024");
        app.add_record("h", Priority::High, "02.01.2024");
        app.add_record("l", Priority::Low, "03.01.2024");

        app.reload();
        app.sort(SortField::Priority);

        for record in &app.records {
            let roundtripped = Priority::from_token(record.priority.token()).unwrap();
            assert_eq!(roundtripped.rank(), record.priority.rank());
        }
        assert_eq!(app.records[0].priority, Priority::High);
    }

    #[test]
    fn test_submit_gates_on_description_validation() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);

        // One character over the limit: the dialog stays open, nothing is
        // stored and the error stays in the bag for display
        let mut dialog = AddDialog::new("01.06.2024".to_string());
        dialog.textarea.insert_str("x".repeat(2049));
        assert!(!app.submit_add_dialog(&mut dialog));
        assert!(app.store.select_all().unwrap().is_empty());
        assert!(dialog.errors.has_errors(FIELD_DESCRIPTION));

        let mut dialog = AddDialog::new("01.06.2024".to_string());
        dialog.textarea.insert_str("");
        assert!(!app.submit_add_dialog(&mut dialog));
        assert!(app.store.select_all().unwrap().is_empty());

        // Exactly at the limit the record is added and the dialog closes
        let mut dialog = AddDialog::new("01.06.2024".to_string());
        dialog.textarea.insert_str("x".repeat(2048));
        assert!(app.submit_add_dialog(&mut dialog));
        let records = app.store.select_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description.chars().count(), 2048);
    }

    #[test]
    fn test_selection_is_clamped_after_reload() {
        let dir = tempdir().unwrap();
        let mut app = test_app(&dir);
        for i in 1..=2 {
            app.add_record(&format!("r{i}"), Priority::Low, "01.06.2024");
        }
        app.select_next();
        assert_eq!(app.selected, 1);

        app.remove_record(2);
        assert_eq!(app.selected, 0);
    }
}
