//! Unified error types and result handling.

use thiserror::Error;

/// Every failure the application can produce, from configuration loading to
/// request handling.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// No restaurant has the requested id
    #[error("Restaurant not found: {id}")]
    RestaurantNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No menu item has the requested id
    #[error("Menu item not found: {id}")]
    MenuItemNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// The request path matched no route
    #[error("No route for {path}")]
    RouteNotFound {
        /// The path that was requested
        path: String,
    },

    /// Query or connection failure reported by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A template failed to parse or render
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Socket or filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable is set but is not valid Unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Whether this error means the requested resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RestaurantNotFound { .. } | Self::MenuItemNotFound { .. } | Self::RouteNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
