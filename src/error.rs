//! Error types for room operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoomError {
    #[error("Room not found")]
    NotFound,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("No free room code available")]
    RegistryExhausted,
}

impl RoomError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        RoomError::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RoomError::NotFound => StatusCode::NOT_FOUND,
            RoomError::Forbidden(_) => StatusCode::FORBIDDEN,
            RoomError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RoomError::RegistryExhausted => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for RoomError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Room request failed");
        } else {
            tracing::debug!(error = %self, %status, "Room request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RoomError>;
