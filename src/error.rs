use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that cross from the service layer into an HTTP response.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The caller sent bad input. The message is returned verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("item not found")]
    NotFound,

    /// A dependency (store or upstream API) failed. Logged, never returned.
    #[error("{0}")]
    Upstream(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        SearchError::Validation(message.into())
    }

    /// Wraps a dependency failure with what we were doing when it happened.
    pub fn upstream(context: &str, err: anyhow::Error) -> Self {
        SearchError::Upstream(format!("{context}: {err:#}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SearchError::Validation(_) => StatusCode::BAD_REQUEST,
            SearchError::NotFound => StatusCode::NOT_FOUND,
            SearchError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            SearchError::Validation(message) => (status, message).into_response(),
            SearchError::NotFound => status.into_response(),
            SearchError::Upstream(detail) => {
                tracing::error!("request failed: {detail}");
                (
                    status,
                    "An error occurred while processing your request".to_string(),
                )
                    .into_response()
            }
        }
    }
}
