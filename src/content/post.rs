//! Post model

use serde::{Deserialize, Serialize};

/// A persisted blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Raw markdown content
    pub content: String,

    /// Slug (URL-friendly name), always derived from the title
    pub slug: String,
}

impl Post {
    /// Create a post, deriving the slug from the title
    pub fn new(title: String, content: String) -> Self {
        let slug = slug::slugify(&title);
        Self {
            title,
            content,
            slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_derived_from_title() {
        let post = Post::new("Hello World".to_string(), "body".to_string());
        assert_eq!(post.slug, "hello-world");
    }

    #[test]
    fn test_slug_collapses_non_alphanumeric_runs() {
        let post = Post::new("  Ship -- it!!  v2  ".to_string(), String::new());
        assert_eq!(post.slug, "ship-it-v2");
    }

    #[test]
    fn test_slug_is_deterministic() {
        let a = Post::new("Some Title: Part 2".to_string(), String::new());
        let b = Post::new("Some Title: Part 2".to_string(), "other".to_string());
        assert_eq!(a.slug, b.slug);
    }
}
