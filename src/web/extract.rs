//! Path id extraction.

use crate::errors::Error;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Integer ids captured from the request path.
///
/// A segment that is not an integer means the path names no resource, so the
/// rejection is a routing failure (404) rather than a bad request.
#[derive(Debug)]
pub struct Ids<T>(pub T);

impl<S, T> FromRequestParts<S> for Ids<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(ids)) => Ok(Self(ids)),
            Err(rejection) => {
                debug!("Rejected path {}: {}", parts.uri.path(), rejection);
                Err(Error::RouteNotFound {
                    path: parts.uri.path().to_string(),
                })
            }
        }
    }
}
