//! HTTP interface - routes, handlers, templates and error pages.
//!
//! Each handler borrows the shared [`AppState`], delegates to the `core`
//! operations and either renders a template or returns JSON.
//!
//! Successful form submissions queue a flash message in the visitor's session;
//! the restaurant list and menu pages drain and display them.

/// Read-only JSON API
pub mod api;
/// Error responses and the "not found" page
pub mod error;
/// Path id extraction
pub mod extract;
/// Menu item pages
pub mod menu_items;
/// Restaurant pages
pub mod restaurants;
/// HTML template rendering
pub mod templates;

pub use extract::Ids;
pub use templates::Templates;

use crate::{config::ServerConfig, errors::Result};
use axum::{
    Router, ServiceExt,
    extract::{Request, State},
    middleware,
    response::Html,
    routing::get,
};
use axum_messages::{Messages, MessagesManagerLayer};
use sea_orm::DatabaseConnection;
use tower_http::{normalize_path::NormalizePath, trace::TraceLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::{debug, info};

/// The complete HTTP service: the router behind trailing-slash normalization.
pub type App = NormalizePath<Router>;

/// Shared data available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Pooled database connection for all persistence operations
    pub database: DatabaseConnection,
    /// Compiled page templates
    pub templates: Templates,
}

impl AppState {
    /// Creates the handler state, compiling all templates.
    ///
    /// # Errors
    /// Returns an error if a template fails to compile.
    pub fn new(database: DatabaseConnection) -> Result<Self> {
        Ok(Self {
            database,
            templates: Templates::new()?,
        })
    }
}

/// Builds the application router.
///
/// Flash messages live in a cookie-keyed in-memory session store, so they do
/// not survive a restart.
pub fn router(state: AppState) -> Router {
    let templates = state.templates.clone();
    let sessions = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    Router::new()
        .merge(restaurants::router())
        .merge(menu_items::router())
        .merge(api::router())
        .route("/test/", get(test_page))
        .route("/t/", get(test_page))
        .fallback(error::not_found)
        .with_state(state)
        .layer(MessagesManagerLayer)
        .layer(sessions)
        .layer(middleware::map_response_with_state(
            templates,
            error::render_error_page,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Wraps the router so `/restaurants` is served as `/restaurants/`.
///
/// Normalization must run before routing, so it wraps the router rather than
/// going through [`Router::layer`].
#[must_use]
pub fn app(state: AppState) -> App {
    NormalizePath::append_trailing_slash(router(state))
}

/// Queues a flash message for the visitor's next listing page.
pub fn flash(messages: Messages, message: impl Into<String>) {
    let message = message.into();
    debug!(%message, "Queued flash message");
    let _ = messages.info(message);
}

/// Drains the flash messages queued by earlier requests.
#[must_use]
pub fn take_messages(messages: Messages) -> Vec<String> {
    messages.into_iter().map(|message| message.to_string()).collect()
}

async fn test_page(State(state): State<AppState>) -> Result<Html<String>> {
    state.templates.render("test.html", &serde_json::json!({}))
}

/// Serves the application until Ctrl-C is received.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use crate::{errors::Result, test_utils::*};
    use axum::http::{StatusCode, header};

    #[tokio::test]
    async fn test_static_test_page() -> Result<()> {
        let app = test_app(setup_test_db().await?)?;

        for uri in ["/test/", "/t/"] {
            let response = http_get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_text(response).await.contains("Test page"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_route_renders_not_found_page() -> Result<()> {
        let app = test_app(setup_test_db().await?)?;

        for uri in ["/nonexistent/", "/no/such/page/here/", "/restaurant/abc/edit/"] {
            let response = http_get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);
            assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
            assert!(body_text(response).await.contains("Page not found"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_trailing_slash_is_normalized() -> Result<()> {
        let (db, created) = setup_with_restaurant().await?;
        let app = test_app(db)?;

        let response = http_get(&app, "/restaurants").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Test Diner"));

        let response = http_get(&app, &format!("/restaurant/{}/menu/json", created.id)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Test Diner");

        let response = http_get(&app, "/nonexistent").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_flash_is_shown_once() -> Result<()> {
        let app = test_app(setup_test_db().await?)?;

        let response = post_form(&app, "/restaurant/new/", "nameNewRestaurant=Test+Diner").await;
        assert_eq!(redirect_target(&response), "/restaurants/");
        let cookie = session_cookie(&response);

        let first = body_text(http_get_with_cookie(&app, "/restaurants/", &cookie).await).await;
        assert!(first.contains("New restaurant created!"));

        let second = body_text(http_get_with_cookie(&app, "/restaurants/", &cookie).await).await;
        assert!(second.contains("Test Diner"));
        assert!(!second.contains("New restaurant created!"));

        let anonymous = body_text(http_get(&app, "/restaurants/").await).await;
        assert!(!anonymous.contains("New restaurant created!"));
        Ok(())
    }

    #[tokio::test]
    async fn test_end_to_end_restaurant_and_menu_flow() -> Result<()> {
        let db = setup_test_db().await?;
        let app = test_app(db)?;

        let response = post_form(&app, "/restaurant/new/", "nameNewRestaurant=Test+Diner").await;
        assert_eq!(redirect_target(&response), "/restaurants/");

        let list = body_json(http_get(&app, "/restaurants/json/").await).await;
        let id = list["Restaurants"][0]["id"].as_i64().unwrap_or_default();
        assert!(id > 0);
        assert_eq!(list["Restaurants"][0]["name"], "Test Diner");

        let response = post_form(
            &app,
            &format!("/restaurant/{id}/menu/new/"),
            "inputMenuItemName=Soup&inputMenuItemPrice=%242.50\
             &inputMenuItemDescription=Hot+soup&inputMenuItemCourse=Appetizer",
        )
        .await;
        assert_eq!(redirect_target(&response), format!("/{id}/menu/"));

        let menu = body_text(http_get(&app, &format!("/{id}/")).await).await;
        assert!(menu.contains("Soup"));
        assert!(menu.contains("$2.50"));

        let response = post_form(&app, &format!("/restaurant/{id}/delete/"), "").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let list = body_json(http_get(&app, "/restaurants/json/").await).await;
        assert_eq!(list["Restaurants"].as_array().map(Vec::len), Some(0));

        let response = http_get(&app, &format!("/restaurant/{id}/menu/json/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }
}
