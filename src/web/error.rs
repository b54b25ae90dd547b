use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::services::activities_service::ActivityError;

impl ActivityError {
    pub fn status(&self) -> StatusCode {
        match self {
            ActivityError::InvalidEmail
            | ActivityError::AlreadySignedUp
            | ActivityError::ActivityFull => StatusCode::BAD_REQUEST,
            ActivityError::ActivityNotFound | ActivityError::ParticipantNotFound => {
                StatusCode::NOT_FOUND
            }
            ActivityError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ActivityError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ActivityError::Database(e) => {
                warn!("Activity store failed: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
