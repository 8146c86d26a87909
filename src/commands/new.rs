//! Create a new post file

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create `posts/<slug>.md` with a front-matter header for the given title
pub fn create_post(blog: &Blog, title: &str) -> Result<PathBuf> {
    fs::create_dir_all(&blog.posts_dir)?;

    let slug = slug::slugify(title);
    let file_path = blog.posts_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!("---\nTitle: {}\n---\n", title);
    fs::write(&file_path, content)?;

    Ok(file_path)
}
