use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

/// The notes collection
pub const NOTES: &str = "notes";
/// The tasks collection
pub const TASKS: &str = "tasks";
/// The attachment-metadata collection
pub const FILES: &str = "files";

/// Ordered key-value persistence for top-level collections.
///
/// Each collection is an ordered list of JSON records addressable by
/// id. Reads return snapshots: the caller's copy does not track later
/// writes.
pub trait KeyValueStore {
    /// All records of a collection, in stored order
    fn read_all(&self, collection: &str) -> Result<Vec<Value>>;

    /// A single record by id, or `None` if absent
    fn read_one(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Upsert by id. New records append to the end of the collection;
    /// existing records keep their position.
    fn write_one(&self, collection: &str, id: &str, record: &Value) -> Result<()>;

    /// Remove a record. Returns whether anything was removed; deleting
    /// an absent id is not an error.
    fn delete_one(&self, collection: &str, id: &str) -> Result<bool>;

    /// Replace a collection's entire contents and order atomically.
    fn replace_all(&self, collection: &str, records: &[(String, Value)]) -> Result<()>;
}

/// SQLite-backed implementation over the `records` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteStore {
    fn read_all(&self, collection: &str) -> Result<Vec<Value>> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM records WHERE collection = ?1 ORDER BY position")?;

        let bodies = stmt
            .query_map(params![collection], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(Into::into))
            .collect()
    }

    fn read_one(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM records WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn write_one(&self, collection: &str, id: &str, record: &Value) -> Result<()> {
        self.conn.execute(
            "INSERT INTO records (collection, id, position, body)
             VALUES (
                 ?1, ?2,
                 (SELECT COALESCE(MAX(position), -1) + 1 FROM records WHERE collection = ?1),
                 ?3
             )
             ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body",
            params![collection, id, record.to_string()],
        )?;
        Ok(())
    }

    fn delete_one(&self, collection: &str, id: &str) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        Ok(rows_affected > 0)
    }

    fn replace_all(&self, collection: &str, records: &[(String, Value)]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM records WHERE collection = ?1",
            params![collection],
        )?;
        for (position, (id, record)) in records.iter().enumerate() {
            tx.execute(
                "INSERT INTO records (collection, id, position, body) VALUES (?1, ?2, ?3, ?4)",
                params![collection, id, position as i64, record.to_string()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use serde_json::json;
    use tempfile::tempdir;

    fn setup_test_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = Database::new(&db_path).create().unwrap();
        (dir, store)
    }

    #[test]
    fn test_write_and_read_back() {
        let (_dir, store) = setup_test_store();

        store
            .write_one(NOTES, "a", &json!({"id": "a", "n": 1}))
            .unwrap();

        let record = store.read_one(NOTES, "a").unwrap().unwrap();
        assert_eq!(record["n"], 1);
    }

    #[test]
    fn test_read_one_absent() {
        let (_dir, store) = setup_test_store();
        assert!(store.read_one(NOTES, "missing").unwrap().is_none());
    }

    #[test]
    fn test_read_all_preserves_insertion_order() {
        let (_dir, store) = setup_test_store();

        for id in ["a", "b", "c"] {
            store.write_one(NOTES, id, &json!({ "id": id })).unwrap();
        }

        let records = store.read_all(NOTES).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_upsert_keeps_position() {
        let (_dir, store) = setup_test_store();

        for id in ["a", "b", "c"] {
            store.write_one(NOTES, id, &json!({ "id": id })).unwrap();
        }
        store
            .write_one(NOTES, "a", &json!({"id": "a", "edited": true}))
            .unwrap();

        let records = store.read_all(NOTES).unwrap();
        assert_eq!(records[0]["id"], "a");
        assert_eq!(records[0]["edited"], true);
    }

    #[test]
    fn test_delete_one() {
        let (_dir, store) = setup_test_store();

        store.write_one(TASKS, "t1", &json!({"id": "t1"})).unwrap();

        assert!(store.delete_one(TASKS, "t1").unwrap());
        assert!(store.read_one(TASKS, "t1").unwrap().is_none());

        // Deleting an absent id reports false, not an error
        assert!(!store.delete_one(TASKS, "t1").unwrap());
    }

    #[test]
    fn test_replace_all_rewrites_order() {
        let (_dir, store) = setup_test_store();

        for id in ["a", "b", "c"] {
            store.write_one(TASKS, id, &json!({ "id": id })).unwrap();
        }
        let reordered = vec![
            ("c".to_string(), json!({"id": "c"})),
            ("a".to_string(), json!({"id": "a"})),
        ];
        store.replace_all(TASKS, &reordered).unwrap();

        let records = store.read_all(TASKS).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_collections_are_independent() {
        let (_dir, store) = setup_test_store();

        store.write_one(NOTES, "x", &json!({"id": "x"})).unwrap();
        store.write_one(TASKS, "x", &json!({"id": "x"})).unwrap();

        assert_eq!(store.read_all(NOTES).unwrap().len(), 1);
        store.delete_one(NOTES, "x").unwrap();
        assert_eq!(store.read_all(TASKS).unwrap().len(), 1);
    }
}
