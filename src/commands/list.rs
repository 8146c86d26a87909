//! List persisted posts

use anyhow::Result;

use crate::store::PostStore;
use crate::Blog;

/// Print every post currently in the store
pub fn run(blog: &Blog) -> Result<()> {
    let store = blog.open_store()?;
    let posts = store.list_all()?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {} [{}]", post.title, post.slug);
    }

    Ok(())
}
