//! Content module - front matter, post model, markdown rendering

mod frontmatter;
mod markdown;
mod post;

pub use frontmatter::{ParseError, ParsedDocument};
pub use markdown::MarkdownRenderer;
pub use post::Post;
