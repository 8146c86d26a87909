//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new blog in the given directory
pub fn init_blog(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Already a blog directory: {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("posts"))?;

    let config_content = r#"# Blog Configuration

# Site
title: My Blog
description: ''
author: ''

# Directory & storage
posts_dir: posts
db_file: blog.db

# Writing
default_title: Untitled

# Server
server:
  ip: localhost
  port: 4000
"#;
    fs::write(&config_path, config_content)?;

    // A first post so `sync` has something to pick up
    let welcome = r#"---
Title: Hello World
---
Welcome to your new blog. Edit this file, add more markdown files next to
it, then run `mdblog sync` to publish them.
"#;
    fs::write(target_dir.join("posts/hello-world.md"), welcome)?;

    Ok(())
}
