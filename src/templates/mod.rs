//! Built-in page templates using the Tera template engine
//!
//! The templates are embedded directly in the binary, so a deployed
//! instance needs no theme directory on disk.

use anyhow::Result;
use tera::{Context, Tera};

use crate::config::BlogConfig;
use crate::content::Post;

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies arrive pre-rendered as HTML; autoescaping would
        // mangle them.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("home.html", include_str!("blog/home.html")),
            ("post.html", include_str!("blog/post.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render the list page with all posts
    pub fn render_home(&self, config: &BlogConfig, posts: &[Post]) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", config);
        context.insert("posts", posts);
        Ok(self.tera.render("home.html", &context)?)
    }

    /// Render the detail page.
    ///
    /// `post` is `None` for the placeholder page; the same template is used
    /// either way, only the payload differs.
    pub fn render_post(
        &self,
        config: &BlogConfig,
        post: Option<&Post>,
        content_html: &str,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", config);
        match post {
            Some(post) => {
                context.insert("post", post);
                context.insert("content_html", content_html);
            }
            None => {
                context.insert("post", &tera::Value::Null);
                context.insert("content_html", "");
            }
        }
        Ok(self.tera.render("post.html", &context)?)
    }
}
