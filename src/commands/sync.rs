//! Run one reconciliation pass

use anyhow::Result;

use crate::sync::SyncReport;
use crate::Blog;

/// Sync the posts directory into the store and print the report
pub fn run(blog: &Blog) -> Result<SyncReport> {
    let store = blog.open_store()?;
    let report = crate::sync::run(&blog.posts_dir, &store, &blog.config.default_title)?;

    println!(
        "Sync complete: {} created, {} updated, {} unchanged, {} deleted, {} skipped",
        report.created, report.updated, report.unchanged, report.deleted, report.skipped
    );
    if !report.deleted_slugs.is_empty() {
        println!("Deleted: {}", report.deleted_slugs.join(", "));
    }

    Ok(report)
}
