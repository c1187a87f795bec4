use askama::Template;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::models::{Comment, Post};
use crate::db::{comments, posts};
use crate::error::{AppError, AppResult};
use crate::forms::{BoundForm, CommentForm};
use crate::pagination::{Page, Paginator, POSTS_PER_PAGE};
use crate::routes::Html;
use crate::state::AppState;

// --- Templates ---

#[derive(Template)]
#[template(path = "blog/post/list.html")]
pub struct PostListTemplate {
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "blog/post/detail.html")]
pub struct PostDetailTemplate {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub form: BoundForm<CommentForm>,
}

// --- Request types ---

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

#[derive(Deserialize)]
pub struct DetailPath {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub post: String,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blog/", get(post_list))
        .route("/blog/{year}/{month}/{day}/{post}/", get(post_detail))
}

// --- Handlers ---

async fn post_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Html<PostListTemplate>> {
    let conn = state.db.get()?;

    let paginator = Paginator::new(posts::count_published(&conn)?, POSTS_PER_PAGE);
    let number = paginator.validate_number(query.page.as_deref())?;
    let items = posts::list_published(&conn, paginator.per_page(), paginator.offset(number))?;

    Ok(Html(PostListTemplate {
        page: paginator.page(number, items),
    }))
}

async fn post_detail(
    State(state): State<AppState>,
    path: Result<Path<DetailPath>, PathRejection>,
) -> AppResult<Html<PostDetailTemplate>> {
    let Path(DetailPath {
        year,
        month,
        day,
        post: slug,
    }) = path.map_err(|_| AppError::NotFound)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(AppError::NotFound)?;

    let conn = state.db.get()?;
    let post = posts::find_published_by_date(&conn, date, &slug)?.ok_or(AppError::NotFound)?;
    let comments = comments::active_for_post(&conn, post.id)?;

    Ok(Html(PostDetailTemplate {
        post,
        comments,
        form: BoundForm::unbound(),
    }))
}

// --- Tests ---
