//! Blog HTTP server
//!
//! Two read-only views over the post store: the list page at `/` and the
//! detail page at `/posts/{slug}`. The detail route answers every method;
//! non-GET requests get the same placeholder page as a missing slug, which
//! mirrors the historical behavior this engine replaces (see DESIGN.md).

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::BlogConfig;
use crate::content::MarkdownRenderer;
use crate::store::PostStore;
use crate::templates::TemplateRenderer;

/// Server state shared by the handlers
struct ServerState {
    config: BlogConfig,
    store: Arc<dyn PostStore>,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

/// Start the blog server
pub async fn start(config: BlogConfig, store: Arc<dyn PostStore>, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        config,
        store,
        templates: TemplateRenderer::new()?,
        markdown: MarkdownRenderer::new(),
    });

    let app = Router::new()
        .route("/", get(home_handler))
        .route("/posts/:slug", any(post_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// List page: every persisted post, no filtering or pagination
async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let posts = match state.store.list_all() {
        Ok(posts) => posts,
        Err(e) => return internal_error(e),
    };

    match state.templates.render_home(&state.config, &posts) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Detail page: GET renders the post when found; everything else falls
/// through to the placeholder
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    method: Method,
    Path(slug): Path<String>,
) -> Response {
    if method != Method::GET {
        return placeholder_page(&state);
    }
    detail_page(&state, &slug)
}

fn detail_page(state: &ServerState, slug: &str) -> Response {
    let post = match state.store.find_by_slug(slug) {
        Ok(post) => post,
        Err(e) => return internal_error(e),
    };

    let Some(post) = post else {
        return placeholder_page(state);
    };

    let content_html = state.markdown.render(&post.content);
    match state
        .templates
        .render_post(&state.config, Some(&post), &content_html)
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

/// The shared miss response: 404 with the empty detail template
fn placeholder_page(state: &ServerState) -> Response {
    match state.templates.render_post(&state.config, None, "") {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => internal_error(e),
    }
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::error!("Request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use crate::store::SqliteStore;
    use axum::body::to_bytes;
    use tempfile::tempdir;

    fn test_state() -> (tempfile::TempDir, ServerState) {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("test.db")).unwrap();
        store
            .create(&Post::new(
                "Hello World".to_string(),
                "# Heading\n\nBody text".to_string(),
            ))
            .unwrap();

        let state = ServerState {
            config: BlogConfig::default(),
            store: Arc::new(store),
            templates: TemplateRenderer::new().unwrap(),
            markdown: MarkdownRenderer::new(),
        };
        (dir, state)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_detail_page_renders_post() {
        let (_dir, state) = test_state();

        let response = detail_page(&state, "hello-world");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("<h2>Hello World</h2>"));
        assert!(body.contains("<h1>Heading</h1>"));
    }

    #[tokio::test]
    async fn test_detail_page_miss_is_placeholder() {
        let (_dir, state) = test_state();

        let response = detail_page(&state, "no-such-slug");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_string(response).await;
        assert!(body.contains("There is nothing here."));
    }

    #[tokio::test]
    async fn test_non_get_to_existing_slug_is_placeholder() {
        let (_dir, state) = test_state();
        let state = Arc::new(state);

        // The slug exists, but a POST still gets the miss page
        let response = post_handler(
            State(state.clone()),
            Method::POST,
            Path("hello-world".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let non_get = body_string(response).await;
        assert!(non_get.contains("There is nothing here."));

        // Identical payload to a GET for a slug that does not exist
        let miss = body_string(detail_page(&state, "no-such-slug")).await;
        assert_eq!(non_get, miss);
    }
}
