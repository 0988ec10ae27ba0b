//! SQLite-backed record store.

use common::model::post::{NewPost, Post};
use rusqlite::{params, Connection, Row};
use std::time::Duration;

/// Handle to the record store. It holds only the database path; every
/// operation opens its own connection, so clones can be handed to any
/// worker without shared mutable state.
#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    fn connection(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Create the posts table on a fresh database. AUTOINCREMENT keeps
    /// internal ids monotonic even after a full clear.
    pub fn ensure_schema(&self) -> rusqlite::Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                external_id INTEGER NOT NULL,
                post_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                body TEXT NOT NULL DEFAULT ''
            );",
        )
    }

    /// Insert a batch of records inside one transaction, preserving the
    /// slice order. Returns the number of rows written.
    pub fn insert_many(&self, posts: &[NewPost]) -> rusqlite::Result<usize> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO posts (external_id, post_id, name, email, body)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for post in posts {
                stmt.execute(params![
                    post.external_id,
                    post.post_id,
                    post.name,
                    post.email,
                    post.body
                ])?;
            }
        }
        tx.commit()?;
        Ok(posts.len())
    }

    /// One page of records ordered by internal id, optionally filtered by
    /// a case-insensitive substring match over name, email and body.
    pub fn find_page(
        &self,
        search: &str,
        page: u64,
        page_size: u64,
    ) -> rusqlite::Result<Vec<Post>> {
        let conn = self.connection()?;
        let limit = page_size as i64;
        // Saturate so an astronomically large page is an empty page, not an
        // overflow or a negative OFFSET.
        let offset = page
            .saturating_sub(1)
            .saturating_mul(page_size)
            .min(i64::MAX as u64) as i64;

        let mut posts = Vec::new();
        if search.is_empty() {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, post_id, name, email, body FROM posts
                 ORDER BY id ASC LIMIT ?1 OFFSET ?2",
            )?;
            let rows = stmt.query_map(params![limit, offset], read_post)?;
            for post in rows {
                posts.push(post?);
            }
        } else {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, post_id, name, email, body FROM posts
                 WHERE name LIKE ?1 ESCAPE '\\'
                    OR email LIKE ?1 ESCAPE '\\'
                    OR body LIKE ?1 ESCAPE '\\'
                 ORDER BY id ASC LIMIT ?2 OFFSET ?3",
            )?;
            let rows = stmt.query_map(params![like_pattern(search), limit, offset], read_post)?;
            for post in rows {
                posts.push(post?);
            }
        }
        Ok(posts)
    }

    /// Number of records matching the same filter as [`Database::find_page`].
    pub fn count(&self, search: &str) -> rusqlite::Result<u64> {
        let conn = self.connection()?;
        let total: i64 = if search.is_empty() {
            conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?
        } else {
            conn.query_row(
                "SELECT COUNT(*) FROM posts
                 WHERE name LIKE ?1 ESCAPE '\\'
                    OR email LIKE ?1 ESCAPE '\\'
                    OR body LIKE ?1 ESCAPE '\\'",
                params![like_pattern(search)],
                |row| row.get(0),
            )?
        };
        Ok(total as u64)
    }

    /// Remove every record, returning how many were deleted. The id
    /// sequence survives, so records inserted later keep fresh ids.
    pub fn delete_all(&self) -> rusqlite::Result<usize> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM posts", [])
    }
}

fn read_post(row: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        external_id: row.get(1)?,
        post_id: row.get(2)?,
        name: row.get(3)?,
        email: row.get(4)?,
        body: row.get(5)?,
    })
}

/// LIKE wildcards in the term are escaped so they match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
