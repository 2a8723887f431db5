//! Shared test utilities.
//!
//! This module provides helpers for setting up in-memory test databases,
//! creating test entities with sensible defaults, and driving the HTTP router
//! in-process.

#![allow(clippy::expect_used)]

use crate::{
    core::{MenuItemFields, menu_item, restaurant},
    entities,
    errors::Result,
    web::{App, AppState, app},
};
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test restaurant with the given name.
pub async fn create_test_restaurant(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::restaurant::Model> {
    restaurant::create_restaurant(db, name.to_string()).await
}

/// Creates a test menu item with sensible defaults.
///
/// # Defaults
/// * `price`: `"$5.99"`
/// * `description`: `"made fresh"`
/// * `course`: `"Entree"`
pub async fn create_test_menu_item(
    db: &DatabaseConnection,
    restaurant_id: i64,
    name: &str,
) -> Result<entities::menu_item::Model> {
    let fields = MenuItemFields {
        name: name.to_string(),
        price: "$5.99".to_string(),
        description: "made fresh".to_string(),
        course: "Entree".to_string(),
    };
    menu_item::create_menu_item(db, restaurant_id, fields).await
}

/// Sets up a test database holding one restaurant.
/// Returns (db, restaurant) for common test scenarios.
pub async fn setup_with_restaurant() -> Result<(DatabaseConnection, entities::restaurant::Model)> {
    let db = setup_test_db().await?;
    let restaurant = create_test_restaurant(&db, "Test Diner").await?;
    Ok((db, restaurant))
}

/// Builds the full application service over the given database.
pub fn test_app(db: DatabaseConnection) -> Result<App> {
    Ok(app(AppState::new(db)?))
}

/// Sends a GET request through the router.
pub async fn http_get(app: &App, uri: &str) -> Response {
    let request = Request::get(uri)
        .body(Body::empty())
        .expect("valid request");
    app.clone().oneshot(request).await.expect("infallible")
}

/// Sends a GET request carrying a `Cookie` header, as a returning browser would.
pub async fn http_get_with_cookie(app: &App, uri: &str, cookie: &str) -> Response {
    let request = Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("valid request");
    app.clone().oneshot(request).await.expect("infallible")
}

/// Sends a url-encoded form POST through the router.
pub async fn post_form(app: &App, uri: &str, form: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("valid request");
    app.clone().oneshot(request).await.expect("infallible")
}

/// Reads a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("json body")
}

/// Returns the `Location` header of a redirect, asserting the 303 status.
pub fn redirect_target(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

/// Returns the `name=value` part of the session cookie a response sets.
pub fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("session cookie")
        .to_string()
}
