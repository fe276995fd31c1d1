use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};

use crate::models::{Priority, Record};

/// Which of the two app flavors the process runs as. The flavor picks the
/// table name and the window title; everything else is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlavor {
    Notes,
    Tasks,
}

impl AppFlavor {
    pub fn table(self) -> &'static str {
        match self {
            AppFlavor::Notes => "Notes",
            AppFlavor::Tasks => "Tasks",
        }
    }

    /// Localization key of the title shown in the status bar.
    pub fn title_key(self) -> &'static str {
        match self {
            AppFlavor::Notes => "TitleNotes",
            AppFlavor::Tasks => "TitleTasks",
        }
    }
}

/// SQLite-backed row store.
///
/// Each operation opens its own connection and closes it before returning;
/// nothing is batched across logical steps. The record identifier is the
/// implicit rowid, not a column, and it is positional: deleting any row
/// rebuilds the table so the survivors are renumbered contiguously from 1.
pub struct RecordStore {
    db_path: PathBuf,
    flavor: AppFlavor,
}

impl RecordStore {
    pub fn new(db_path: PathBuf, flavor: AppFlavor) -> Self {
        Self { db_path, flavor }
    }

    pub fn flavor(&self) -> AppFlavor {
        self.flavor
    }

    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Connection::open(&self.db_path)
            .with_context(|| format!("failed to open database {}", self.db_path.display()))
    }

    /// Create the table if it does not exist yet. No-op otherwise.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (\
                 Description VARCHAR(2048) NOT NULL, \
                 Priority VARCHAR(15) NOT NULL, \
                 DueDate VARCHAR(15) NOT NULL)",
                self.flavor.table()
            ),
            [],
        )?;
        Ok(())
    }

    /// Insert one row. Rejects empty fields; on rejection nothing is
    /// persisted and the caller reports the error without touching its list.
    pub fn insert(&self, description: &str, priority: Priority, due_date: &str) -> Result<()> {
        if description.is_empty() || due_date.is_empty() {
            bail!("description, priority and due date must all be set");
        }
        let conn = self.open()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (Description, Priority, DueDate) VALUES (?1, ?2, ?3)",
                self.flavor.table()
            ),
            params![description, priority.token(), due_date],
        )?;
        Ok(())
    }

    /// All rows in the store's native order (insertion order until the first
    /// delete, rebuild order afterwards).
    pub fn select_all(&self) -> Result<Vec<Record>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT rowid, Description, Priority, DueDate FROM {}",
            self.flavor.table()
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, description, token, due_date) = row?;
            // Unknown tokens rank highest rather than failing the whole load
            let priority = Priority::from_token(&token).unwrap_or(Priority::High);
            records.push(Record {
                id,
                description,
                due_date,
                priority,
            });
        }
        Ok(records)
    }

    /// Delete a row, then rebuild the table so the surviving rows occupy
    /// rowids 1..n contiguously. Identifiers shift on every delete.
    ///
    /// Four separate statements, not a transaction; a crash mid-sequence can
    /// leave the table deleted-but-not-rebuilt. Accepted weakness.
    pub fn delete_and_reindex(&self, id: i64) -> Result<()> {
        let conn = self.open()?;
        let table = self.flavor.table();
        conn.execute(&format!("DELETE FROM {table} WHERE rowid = ?1"), params![id])?;
        conn.execute(
            &format!("CREATE TABLE {table}_rebuild AS SELECT * FROM {table}"),
            [],
        )?;
        conn.execute(&format!("DROP TABLE {table}"), [])?;
        conn.execute(
            &format!("ALTER TABLE {table}_rebuild RENAME TO {table}"),
            [],
        )?;
        Ok(())
    }

    /// In-place description update. No reindexing.
    pub fn update_description(&self, id: i64, description: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            &format!(
                "UPDATE {} SET Description = ?1 WHERE rowid = ?2",
                self.flavor.table()
            ),
            params![description, id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store(dir: &tempfile::TempDir, flavor: AppFlavor) -> RecordStore {
        let store = RecordStore::new(dir.path().join("test.db"), flavor);
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_insert_and_select_roundtrip() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, AppFlavor::Notes);

        store.insert("first", Priority::High, "01.02.2024").unwrap();
        store.insert("second", Priority::Low, "02.02.2024").unwrap();

        let records = store.select_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].description, "first");
        assert_eq!(records[0].priority, Priority::High);
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].due_date, "02.02.2024");
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, AppFlavor::Tasks);
        store.insert("kept", Priority::Medium, "01.01.2024").unwrap();

        store.ensure_schema().unwrap();
        assert_eq!(store.select_all().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_rejects_empty_fields_and_persists_nothing() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, AppFlavor::Notes);

        assert!(store.insert("", Priority::High, "01.01.2024").is_err());
        assert!(store.insert("desc", Priority::High, "").is_err());
        assert!(store.select_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_reindexes_surviving_rows_from_one() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, AppFlavor::Notes);
        for i in 1..=4 {
            store
                .insert(&format!("record {i}"), Priority::Medium, "01.01.2024")
                .unwrap();
        }

        store.delete_and_reindex(2).unwrap();

        let records = store.select_all().unwrap();
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        // Identifiers are never sparse after a delete
        assert_eq!(ids, vec![1, 2, 3]);
        let descriptions: Vec<&str> = records.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["record 1", "record 3", "record 4"]);
    }

    #[test]
    fn test_delete_then_insert_fills_the_compacted_range() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, AppFlavor::Notes);
        for i in 1..=3 {
            store
                .insert(&format!("r{i}"), Priority::Low, "01.01.2024")
                .unwrap();
        }

        store.delete_and_reindex(1).unwrap();
        store.insert("new", Priority::High, "02.01.2024").unwrap();

        let ids: Vec<i64> = store.select_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_update_description_touches_only_the_target_row() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, AppFlavor::Tasks);
        store.insert("one", Priority::High, "01.01.2024").unwrap();
        store.insert("two", Priority::Low, "02.01.2024").unwrap();

        store.update_description(2, "changed").unwrap();

        let records = store.select_all().unwrap();
        assert_eq!(records[0].description, "one");
        assert_eq!(records[0].priority, Priority::High);
        assert_eq!(records[1].description, "changed");
        assert_eq!(records[1].priority, Priority::Low);
        assert_eq!(records[1].due_date, "02.01.2024");
    }

    #[test]
    fn test_priority_tokens_survive_storage() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, AppFlavor::Notes);
        for priority in Priority::ALL {
            store.insert("p", priority, "01.01.2024").unwrap();
        }

        let records = store.select_all().unwrap();
        let stored: Vec<Priority> = records.iter().map(|r| r.priority).collect();
        assert_eq!(stored, Priority::ALL.to_vec());
    }

    #[test]
    fn test_flavors_use_separate_tables() {
        let dir = tempdir().unwrap();
        let notes = test_store(&dir, AppFlavor::Notes);
        let tasks = RecordStore::new(dir.path().join("test.db"), AppFlavor::Tasks);
        tasks.ensure_schema().unwrap();

        notes.insert("a note", Priority::High, "01.01.2024").unwrap();

        assert_eq!(notes.select_all().unwrap().len(), 1);
        assert!(tasks.select_all().unwrap().is_empty());
    }
}
