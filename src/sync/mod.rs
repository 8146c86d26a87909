//! Markdown reconciliation
//!
//! One sync pass makes the persisted post set exactly match the markdown
//! files under the configured directory: new slugs are created, changed
//! posts updated in place, and posts whose slug no file produces any more
//! are deleted. The pass is a single sequential walk with no locking;
//! running two passes concurrently against the same store is undefined.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{ParsedDocument, Post};
use crate::store::PostStore;

/// Outcome counts for one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub deleted: usize,
    pub skipped: usize,
    /// Slugs removed in the delete phase, for operator output
    pub deleted_slugs: Vec<String>,
}

impl SyncReport {
    /// Whether the pass mutated storage at all
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.deleted == 0
    }
}

/// Run one reconciliation pass over `posts_dir` against `store`.
///
/// Non-markdown files and files with malformed front matter are skipped
/// with a warning; directory or storage failures abort the pass, leaving
/// any mutations already applied in place.
pub fn run(posts_dir: &Path, store: &dyn PostStore, default_title: &str) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    let mut existing_slugs: HashSet<String> = store
        .list_all()
        .context("failed to list persisted posts")?
        .into_iter()
        .map(|p| p.slug)
        .collect();

    for entry in WalkDir::new(posts_dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
    {
        let entry = entry.with_context(|| format!("failed to read {:?}", posts_dir))?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }

        if !is_markdown_file(path) {
            tracing::warn!("Skipping file: {}", path.display());
            report.skipped += 1;
            continue;
        }

        match sync_file(path, store, default_title)? {
            FileOutcome::Created(slug) => {
                existing_slugs.remove(&slug);
                report.created += 1;
            }
            FileOutcome::Updated(slug) => {
                existing_slugs.remove(&slug);
                report.updated += 1;
            }
            FileOutcome::Unchanged(slug) => {
                existing_slugs.remove(&slug);
                report.unchanged += 1;
            }
            FileOutcome::Skipped => {
                report.skipped += 1;
            }
        }
    }

    // Whatever is left was not produced by any file this pass
    if !existing_slugs.is_empty() {
        report.deleted = store.delete_by_slugs(&existing_slugs)?;
        report.deleted_slugs = existing_slugs.into_iter().collect();
        report.deleted_slugs.sort();
        tracing::info!("Deleted missing posts: {:?}", report.deleted_slugs);
    }

    Ok(report)
}

/// Per-file result of the scan phase
enum FileOutcome {
    Created(String),
    Updated(String),
    Unchanged(String),
    Skipped,
}

fn sync_file(path: &Path, store: &dyn PostStore, default_title: &str) -> Result<FileOutcome> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;

    let doc = match ParsedDocument::parse(&raw) {
        Ok(doc) => doc,
        Err(e) => {
            // Malformed header rejects the whole file; never ingest a
            // half-parsed mapping.
            tracing::warn!("Skipping {}: {}", path.display(), e);
            return Ok(FileOutcome::Skipped);
        }
    };

    let title = doc.title().unwrap_or(default_title).to_string();
    let post = Post::new(title, doc.body);

    match store.find_by_slug(&post.slug)? {
        None => {
            store.create(&post)?;
            tracing::info!("Created post: {}", post.title);
            Ok(FileOutcome::Created(post.slug))
        }
        Some(existing) if existing.title != post.title || existing.content != post.content => {
            store.update_fields(&post.slug, &post.title, &post.content)?;
            tracing::info!("Updated post: {}", post.title);
            Ok(FileOutcome::Updated(post.slug))
        }
        Some(_) => {
            tracing::info!("No changes for post: {}", post.title);
            Ok(FileOutcome::Unchanged(post.slug))
        }
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
