//! Turning errors into HTTP responses.
//!
//! HTML handlers return [`Error`] directly. Its `IntoResponse` impl only picks
//! the status code and tags the response with an [`ErrorPage`] extension;
//! [`render_error_page`] runs as middleware and swaps the empty body for the
//! rendered "not found" or "server error" page. JSON handlers wrap the same
//! error in [`ApiError`] to get a JSON body instead.

use crate::errors::Error;
use crate::web::templates::Templates;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

/// Marker left on error responses for [`render_error_page`] to fill in.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    message: String,
}

#[derive(Serialize)]
struct ErrorView<'a> {
    message: &'a str,
}

impl Error {
    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn log(&self) {
        if self.is_not_found() {
            debug!("Lookup failed: {}", self);
        } else {
            error!("Request failed: {}", self);
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.log();
        let mut response = self.status_code().into_response();
        response.extensions_mut().insert(ErrorPage {
            message: self.to_string(),
        });
        response
    }
}

/// JSON flavour of [`Error`] for the API routes.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(error) = self;
        error.log();
        let status = error.status_code();
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            error.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Fallback for paths that match no route.
pub async fn not_found(uri: Uri) -> Error {
    Error::RouteNotFound {
        path: uri.path().to_string(),
    }
}

/// Middleware filling tagged error responses with the matching HTML page.
pub async fn render_error_page(State(templates): State<Templates>, response: Response) -> Response {
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };
    let status = response.status();
    let template = if status == StatusCode::NOT_FOUND {
        "404.html"
    } else {
        "500.html"
    };

    match templates.render(
        template,
        &ErrorView {
            message: &page.message,
        },
    ) {
        Ok(html) => (status, html).into_response(),
        Err(e) => {
            error!("Could not render error page {}: {}", template, e);
            (status, "Internal Error").into_response()
        }
    }
}
