//! Shared application state and route wiring.
//!
//! The router is built explicitly from an [`AppState`]; there is no global
//! handler registry.

use std::path::Path;
use std::sync::Arc;

use axum::{Router, routing::get};
use snippety_core::{SnippetStore, TemplateCache};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SnippetStore,
    pub templates: Arc<TemplateCache>,
}

impl AppState {
    pub fn new(store: SnippetStore, templates: TemplateCache) -> Self {
        Self { store, templates: Arc::new(templates) }
    }
}

/// Build the router. Files under `static_dir` are served below `/static/`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/snippet/view/{id}", get(handlers::snippet_view))
        .route(
            "/snippet/create",
            get(handlers::snippet_create).post(handlers::snippet_create_post),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn ui_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../ui")
    }

    async fn test_app() -> Router {
        let store = SnippetStore::open_in_memory().await.unwrap();
        let templates = TemplateCache::new(ui_dir().join("html")).unwrap();
        router(AppState::new(store, templates), &ui_dir().join("static"))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn get(app: &Router, uri: &str) -> Response {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_form(app: &Router, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri("/snippet/create")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_empty() {
        let app = test_app().await;
        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("nothing to see here"));
    }

    #[tokio::test]
    async fn test_create_then_view() {
        let app = test_app().await;

        let response = post_form(&app, "title=O+snail&content=Climb+Mount+Fuji&expires=7").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/snippet/view/1");

        let response = get(&app, "/snippet/view/1").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("O snail"));
        assert!(html.contains("Climb Mount Fuji"));

        let home = body_text(get(&app, "/").await).await;
        assert!(home.contains(r#"href="/snippet/view/1""#));
    }

    #[tokio::test]
    async fn test_view_not_found() {
        let app = test_app().await;
        for uri in ["/snippet/view/99", "/snippet/view/0", "/snippet/view/-3", "/snippet/view/abc"] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_create_form_renders() {
        let app = test_app().await;
        let response = get(&app, "/snippet/create").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"<form action="/snippet/create" method="POST">"#));
    }

    #[tokio::test]
    async fn test_invalid_create_rerenders_form() {
        let app = test_app().await;
        let response = post_form(&app, "title=&content=Body&expires=3").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains("This field cannot be blank"));
        assert!(html.contains("This field must equal 1, 7 or 365"));
        assert!(html.contains("Body"));
    }

    #[tokio::test]
    async fn test_created_content_is_escaped() {
        let app = test_app().await;
        post_form(&app, "title=%3Cb%3Ebold%3C%2Fb%3E&content=x&expires=1").await;

        let html = body_text(get(&app, "/snippet/view/1").await).await;
        assert!(!html.contains("<b>bold"));
        assert!(html.contains("&lt;b&gt;bold"));
    }

    #[tokio::test]
    async fn test_static_files() {
        let app = test_app().await;
        let response = get(&app, "/static/css/main.css").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(&app, "/static/css/missing.css").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = test_app().await;
        assert_eq!(get(&app, "/nope").await.status(), StatusCode::NOT_FOUND);
    }
}
