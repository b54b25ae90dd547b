use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::activities_service::{self, ActivityCardView};

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub activities: Vec<ActivityCardView>,
    pub notice: Option<&'static str>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BoardQuery {
    pub notice: Option<String>,
}

fn notice_message(notice: Option<&str>) -> Option<&'static str> {
    match notice? {
        "unregistered" => Some("Participant unregistered."),
        "not_found" => Some("Participant was already unregistered."),
        "error" => Some("Could not unregister participant."),
        _ => None,
    }
}

pub async fn board_handler(
    Query(query): Query<BoardQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let activities = match activities_service::load_activity_cards(&pool).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Board load failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let template = BoardTemplate {
        activities,
        notice: notice_message(query.notice.as_deref()),
    };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("Board render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UnregisterForm {
    pub email: String,
}

/// Form fallback for the board's delete buttons: unregisters, then sends the
/// browser back to the repainted board.
pub async fn unregister_command_handler(
    State(pool): State<SqlitePool>,
    Form(form): Form<UnregisterForm>,
) -> impl IntoResponse {
    let notice = match activities_service::unregister_from_activity(&pool, &form.email).await {
        Ok(_) => "unregistered",
        Err(activities_service::ActivityError::ParticipantNotFound) => "not_found",
        Err(e) => {
            warn!("Unregister command failed: {}", e);
            "error"
        }
    };
    Redirect::to(&format!("/board?notice={}", notice))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_notices_are_ignored() {
        assert_eq!(
            notice_message(Some("unregistered")),
            Some("Participant unregistered.")
        );
        assert_eq!(notice_message(Some("<script>")), None);
        assert_eq!(notice_message(None), None);
    }
}
