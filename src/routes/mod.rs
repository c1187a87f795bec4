pub mod assets;
pub mod comments;
pub mod posts;
pub mod share;

use askama::Template;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

use crate::db::models::Post;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

/// The full application: blog pages, static assets, request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/blog/") }))
        .route("/assets/{*path}", get(assets::serve))
        .merge(posts::router())
        .merge(share::router())
        .merge(comments::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A `{post_id}` segment that is not an integer names no post.
pub(crate) fn post_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id).map_err(|_| AppError::NotFound)
}

pub(crate) fn published_post(conn: &Connection, id: i64) -> AppResult<Post> {
    crate::db::posts::find_published_by_id(conn, id)?.ok_or(AppError::NotFound)
}
