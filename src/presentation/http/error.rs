use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::error::AlertError;
use crate::domain::ports::store::StoreError;

/// Error returned by HTTP handlers, rendered as a plain-text body.
#[derive(Debug)]
pub enum ApiError {
    Alert(AlertError),
    /// The `{id}` path segment is not a number; no alert can match it.
    BadId(String),
    /// An authorized update could not be written.
    SaveFailed(StoreError),
}

impl From<AlertError> for ApiError {
    fn from(err: AlertError) -> Self {
        Self::Alert(err)
    }
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Alert(err) => match err {
                AlertError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                AlertError::Unauthenticated => StatusCode::UNAUTHORIZED,
                AlertError::Forbidden { .. } => StatusCode::FORBIDDEN,
                AlertError::Conflict(_) => StatusCode::CONFLICT,
                AlertError::NotFound(_) => StatusCode::NOT_FOUND,
                AlertError::Persistence(_) | AlertError::Sync(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::BadId(_) => StatusCode::NOT_FOUND,
            Self::SaveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Alert(AlertError::Unauthenticated) => "Authorization failed".to_string(),
            Self::Alert(AlertError::Conflict(_)) => "The alert's name is duplicated".to_string(),
            Self::Alert(AlertError::Sync(e)) => {
                format!("Synchronize alert to monitoring backend error: {e}")
            }
            Self::Alert(err) => err.to_string(),
            Self::BadId(raw) => format!("Find alert failed: invalid id {raw:?}"),
            Self::SaveFailed(e) => format!("Save alert error: {e}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "{}", self.message());
        }
        (status, self.message()).into_response()
    }
}
