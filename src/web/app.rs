use axum::{
    response::Redirect,
    routing::{delete, get, get_service, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::web::routes::{activities, board};

pub fn build_router(pool: SqlitePool, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/board") }))
        .route("/board", get(board::board_handler))
        .route("/board/unregister", post(board::unregister_command_handler))
        .route("/activities", get(activities::activities_handler))
        .route(
            "/activities/:activity_name/signup",
            post(activities::signup_handler),
        )
        .route("/unregister", delete(activities::unregister_handler))
        .nest_service("/static", get_service(ServeDir::new(static_dir)))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(pool)
}
