//! SQLite-backed store
//!
//! Two tables, `lists` and `items`, linked by `items.list_id`. Every
//! statement is parameterized and logged before it runs. List aggregates
//! come from a single `LEFT JOIN ... GROUP BY` query per call.

use rusqlite::{Connection, OptionalExtension, Params, Row};
use std::fmt;
use std::path::Path;

use super::error::{Result, StoreError};
use super::{Item, ItemId, ListId, TodoList, TodoStore};

const SCHEMA: &str = include_str!("schema.sql");

const LIST_COLUMNS: &str = r#"
    SELECT lists.id,
           lists.name,
           COUNT(items.id) AS total_count,
           COUNT(NULLIF(items.completed, 1)) AS remaining_count
      FROM lists
      LEFT JOIN items ON items.list_id = lists.id
"#;

/// Emit the statement and its parameters ahead of execution
fn log_statement(sql: &str, params: &dyn fmt::Debug) {
    tracing::info!(statement = %sql.trim(), params = ?params, "query");
}

fn execute<P: Params + fmt::Debug>(conn: &Connection, sql: &str, params: P) -> Result<usize> {
    log_statement(sql, &params);
    Ok(conn.execute(sql, params)?)
}

fn list_from_row(row: &Row<'_>) -> rusqlite::Result<TodoList> {
    let total: i64 = row.get(2)?;
    let remaining: i64 = row.get(3)?;

    Ok(TodoList {
        id: ListId(row.get(0)?),
        name: row.get(1)?,
        total_count: total as usize,
        completed_count: (total - remaining) as usize,
    })
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: ItemId(row.get(0)?),
        name: row.get(1)?,
        completed: row.get(2)?,
    })
}

/// A store holding one SQLite connection for its lifetime
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "database opened");
        Self::with_connection(conn)
    }

    /// Private in-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl TodoStore for SqliteStore {
    fn find_list(&self, list_id: ListId) -> Result<Option<TodoList>> {
        let sql = format!("{LIST_COLUMNS} WHERE lists.id = ?1 GROUP BY lists.id");
        log_statement(&sql, &(list_id.0,));

        let list = self
            .conn
            .query_row(&sql, (list_id.0,), list_from_row)
            .optional()?;
        Ok(list)
    }

    fn all_lists(&self) -> Result<Vec<TodoList>> {
        let sql = format!("{LIST_COLUMNS} GROUP BY lists.id ORDER BY lists.name, lists.id");
        log_statement(&sql, &());

        let mut stmt = self.conn.prepare(&sql)?;
        let lists = stmt
            .query_map([], list_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    fn list_items(&self, list_id: ListId) -> Result<Vec<Item>> {
        let sql = "SELECT id, name, completed FROM items WHERE list_id = ?1 ORDER BY id";
        log_statement(sql, &(list_id.0,));

        let mut stmt = self.conn.prepare(sql)?;
        let items = stmt
            .query_map((list_id.0,), item_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn create_list(&mut self, name: &str) -> Result<ListId> {
        execute(&self.conn, "INSERT INTO lists (name) VALUES (?1)", (name,))?;
        Ok(ListId(self.conn.last_insert_rowid()))
    }

    fn delete_list(&mut self, list_id: ListId) -> Result<()> {
        // Both deletes commit together or not at all
        let tx = self.conn.transaction()?;
        execute(&tx, "DELETE FROM items WHERE list_id = ?1", (list_id.0,))?;
        execute(&tx, "DELETE FROM lists WHERE id = ?1", (list_id.0,))?;
        tx.commit()?;
        Ok(())
    }

    fn rename_list(&mut self, list_id: ListId, new_name: &str) -> Result<()> {
        execute(
            &self.conn,
            "UPDATE lists SET name = ?1 WHERE id = ?2",
            (new_name, list_id.0),
        )?;
        Ok(())
    }

    fn add_item(&mut self, list_id: ListId, name: &str) -> Result<Option<ItemId>> {
        let inserted = execute(
            &self.conn,
            "INSERT INTO items (list_id, name) SELECT id, ?2 FROM lists WHERE id = ?1",
            (list_id.0, name),
        )?;

        if inserted == 0 {
            return Ok(None);
        }
        Ok(Some(ItemId(self.conn.last_insert_rowid())))
    }

    fn delete_item(&mut self, list_id: ListId, item_id: ItemId) -> Result<()> {
        execute(
            &self.conn,
            "DELETE FROM items WHERE list_id = ?1 AND id = ?2",
            (list_id.0, item_id.0),
        )?;
        Ok(())
    }

    fn set_item_status(&mut self, list_id: ListId, item_id: ItemId, completed: bool) -> Result<()> {
        execute(
            &self.conn,
            "UPDATE items SET completed = ?1 WHERE list_id = ?2 AND id = ?3",
            (completed, list_id.0, item_id.0),
        )?;
        Ok(())
    }

    fn complete_all(&mut self, list_id: ListId) -> Result<()> {
        execute(
            &self.conn,
            "UPDATE items SET completed = 1 WHERE list_id = ?1",
            (list_id.0,),
        )?;
        Ok(())
    }

    fn disconnect(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| StoreError::Database(e))?;
        tracing::debug!("database closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn orphaned_items(store: &SqliteStore) -> i64 {
        store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM items WHERE list_id NOT IN (SELECT id FROM lists)",
                [],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_aggregates_from_join() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = store.create_list("groceries").unwrap();
        let milk = store.add_item(id, "milk").unwrap().unwrap();
        store.add_item(id, "eggs").unwrap();
        store.add_item(id, "bread").unwrap();
        store.set_item_status(id, milk, true).unwrap();

        let list = store.find_list(id).unwrap().unwrap();
        assert_eq!(list.total_count, 3);
        assert_eq!(list.completed_count, 1);
        assert_eq!(list.remaining_count(), 2);
        assert!(!list.is_complete());
    }

    #[test]
    fn test_empty_list_has_zero_counts() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = store.create_list("empty").unwrap();

        let list = store.find_list(id).unwrap().unwrap();
        assert_eq!((list.total_count, list.completed_count), (0, 0));
        assert!(!list.is_complete());
    }

    #[test]
    fn test_delete_list_leaves_no_orphans() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let keep = store.create_list("keep").unwrap();
        let doomed = store.create_list("doomed").unwrap();
        store.add_item(keep, "stay").unwrap();
        store.add_item(doomed, "go").unwrap();
        store.add_item(doomed, "go too").unwrap();

        store.delete_list(doomed).unwrap();

        assert!(store.find_list(doomed).unwrap().is_none());
        assert!(store.list_items(doomed).unwrap().is_empty());
        assert_eq!(store.list_items(keep).unwrap().len(), 1);
        assert_eq!(orphaned_items(&store), 0);
    }

    #[test]
    fn test_ids_are_not_reissued() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let list = store.create_list("chores").unwrap();
        let first = store.add_item(list, "dishes").unwrap().unwrap();
        store.delete_item(list, first).unwrap();

        let second = store.add_item(list, "laundry").unwrap().unwrap();
        assert!(second > first);

        store.delete_list(list).unwrap();
        let next_list = store.create_list("chores again").unwrap();
        assert!(next_list > list);
    }

    #[test]
    fn test_add_item_to_missing_list_inserts_nothing() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        assert_eq!(store.add_item(ListId(42), "ghost").unwrap(), None);
        assert_eq!(orphaned_items(&store), 0);
    }

    #[test]
    fn test_status_update_is_scoped_to_list() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let a = store.create_list("a").unwrap();
        let b = store.create_list("b").unwrap();
        let item = store.add_item(a, "thing").unwrap().unwrap();

        // Wrong list id: nothing changes
        store.set_item_status(b, item, true).unwrap();
        assert!(!store.list_items(a).unwrap()[0].completed);

        store.set_item_status(a, item, true).unwrap();
        assert!(store.list_items(a).unwrap()[0].completed);
    }

    #[test]
    fn test_reopen_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.db");

        let mut store = SqliteStore::open(&path).unwrap();
        let id = store.create_list("persisted").unwrap();
        store.add_item(id, "survives").unwrap();
        store.disconnect().unwrap();

        let store = SqliteStore::open(&path).unwrap();
        let list = store.find_list(id).unwrap().unwrap();
        assert_eq!(list.name, "persisted");
        assert_eq!(list.total_count, 1);
    }

    #[test]
    fn test_statements_are_logged_with_params() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut store = SqliteStore::open_in_memory().unwrap();
            let id = store.create_list("groceries").unwrap();
            store.delete_list(id).unwrap();
        });

        let lines = log.lines();
        let logged = |statement: &str, params: &str| {
            lines.iter().any(|line| {
                line.contains(&format!("statement={statement}"))
                    && line.contains(&format!("params={params}"))
            })
        };

        assert!(
            logged("INSERT INTO lists (name) VALUES (?1)", "(\"groceries\",)"),
            "missing insert in {lines:#?}"
        );
        assert!(
            logged("DELETE FROM items WHERE list_id = ?1", "(1,)"),
            "missing item delete in {lines:#?}"
        );
        assert!(
            logged("DELETE FROM lists WHERE id = ?1", "(1,)"),
            "missing list delete in {lines:#?}"
        );

        // Items go before their list
        let position = |needle: &str| lines.iter().position(|l| l.contains(needle));
        assert!(position("DELETE FROM items") < position("DELETE FROM lists"));
    }

    #[test]
    fn test_names_are_stored_verbatim() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let tricky = "Robert'); DROP TABLE lists;--";
        let id = store.create_list(tricky).unwrap();

        assert_eq!(store.find_list(id).unwrap().unwrap().name, tricky);
        assert_eq!(store.all_lists().unwrap().len(), 1);
    }
}
