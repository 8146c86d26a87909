//! mdblog: a markdown-to-database blog engine
//!
//! This crate keeps a SQLite table of blog posts in sync with a directory
//! of markdown files and serves the posts over HTTP with embedded
//! templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod store;
pub mod sync;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use store::SqliteStore;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Markdown source directory
    pub posts_dir: std::path::PathBuf,
    /// SQLite database path
    pub db_path: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let db_path = base_dir.join(&config.db_file);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            db_path,
        })
    }

    /// Open the post store backing this blog
    pub fn open_store(&self) -> Result<SqliteStore> {
        SqliteStore::open(&self.db_path)
    }

    /// Run one sync pass
    pub fn sync(&self) -> Result<sync::SyncReport> {
        commands::sync::run(self)
    }

    /// List persisted posts
    pub fn list(&self) -> Result<()> {
        commands::list::run(self)
    }

    /// Create a new post file
    pub fn new_post(&self, title: &str) -> Result<std::path::PathBuf> {
        commands::new::create_post(self, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PostStore;
    use tempfile::tempdir;

    #[test]
    fn test_blog_without_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.posts_dir, dir.path().join("posts"));
        assert_eq!(blog.db_path, dir.path().join("blog.db"));
    }

    #[test]
    fn test_blog_reads_config() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "posts_dir: content\ndb_file: data/posts.db\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.posts_dir, dir.path().join("content"));
        assert_eq!(blog.db_path, dir.path().join("data/posts.db"));
    }

    #[test]
    fn test_new_post_then_sync_round_trip() {
        let dir = tempdir().unwrap();
        commands::init::init_blog(dir.path()).unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        blog.new_post("Round Trip").unwrap();
        let report = blog.sync().unwrap();
        // hello-world from init plus the new post
        assert_eq!(report.created, 2);

        let store = blog.open_store().unwrap();
        let post = store.find_by_slug("round-trip").unwrap().unwrap();
        assert_eq!(post.title, "Round Trip");
    }
}
