//! Post storage
//!
//! The sync routine and the server see storage only through the
//! [`PostStore`] trait; [`SqliteStore`] is the shipping implementation.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use crate::content::Post;

/// Storage operations over the post table
pub trait PostStore: Send + Sync {
    /// Insert a new post
    fn create(&self, post: &Post) -> Result<()>;

    /// Overwrite title and content for an existing slug
    fn update_fields(&self, slug: &str, title: &str, content: &str) -> Result<()>;

    /// Look up a post by its slug
    fn find_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    /// All posts, ordered by title
    fn list_all(&self) -> Result<Vec<Post>>;

    /// Delete every post whose slug is in the given set, returning the
    /// number of rows removed
    fn delete_by_slugs(&self, slugs: &HashSet<String>) -> Result<usize>;
}

/// SQLite-backed post store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database and ensure the schema exists
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS posts (
                slug TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl PostStore for SqliteStore {
    fn create(&self, post: &Post) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO posts (slug, title, content) VALUES (?1, ?2, ?3)",
            params![post.slug, post.title, post.content],
        )?;
        Ok(())
    }

    fn update_fields(&self, slug: &str, title: &str, content: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE posts SET title = ?2, content = ?3 WHERE slug = ?1",
            params![slug, title, content],
        )?;
        Ok(())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let conn = self.conn.lock().unwrap();
        let post = conn
            .query_row(
                "SELECT slug, title, content FROM posts WHERE slug = ?1",
                params![slug],
                |row| {
                    Ok(Post {
                        slug: row.get(0)?,
                        title: row.get(1)?,
                        content: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(post)
    }

    fn list_all(&self) -> Result<Vec<Post>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT slug, title, content FROM posts ORDER BY title")?;
        let posts = stmt
            .query_map([], |row| {
                Ok(Post {
                    slug: row.get(0)?,
                    title: row.get(1)?,
                    content: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    fn delete_by_slugs(&self, slugs: &HashSet<String>) -> Result<usize> {
        if slugs.is_empty() {
            return Ok(0);
        }
        let conn = self.conn.lock().unwrap();
        let mut deleted = 0;
        for slug in slugs {
            deleted += conn.execute("DELETE FROM posts WHERE slug = ?1", params![slug])?;
        }
        Ok(deleted)
    }
}
