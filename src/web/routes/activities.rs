use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::services::activities_service::{self, ActivityError};

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

pub async fn activities_handler(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, ActivityError> {
    let listing = activities_service::load_activities_listing(&pool).await?;
    Ok(Json(listing))
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, ActivityError> {
    let message =
        activities_service::signup_for_activity(&pool, &activity_name, &query.email).await?;
    Ok(Json(serde_json::json!({ "message": message })))
}

pub async fn unregister_handler(
    Query(query): Query<EmailQuery>,
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, ActivityError> {
    let message = activities_service::unregister_from_activity(&pool, &query.email).await?;
    Ok(Json(serde_json::json!({ "message": message })))
}
