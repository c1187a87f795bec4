use askama::Template;
use axum::extract::rejection::PathRejection;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::post;
use axum::Router;

use crate::db::comments;
use crate::db::models::{Comment, Post};
use crate::error::AppResult;
use crate::forms::{self, BoundForm, CommentForm};
use crate::routes::{post_id, published_post, Html};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "blog/post/comment.html")]
pub struct PostCommentTemplate {
    pub post: Post,
    pub form: BoundForm<CommentForm>,
    pub comment: Option<Comment>,
}

/// POST only; the router answers other methods with 405.
pub fn router() -> Router<AppState> {
    Router::new().route("/blog/post/{post_id}/comment/", post(post_comment))
}

async fn post_comment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> AppResult<Html<PostCommentTemplate>> {
    let conn = state.db.get()?;
    let post = published_post(&conn, post_id(path)?)?;

    let form = BoundForm::bind(forms::from_urlencoded::<CommentForm>(&body)?);
    let comment = match form.new_comment() {
        Some(new_comment) => {
            let comment = comments::insert(&conn, post.id, &new_comment)?;
            tracing::info!(post_id = post.id, comment_id = comment.id, "Comment added");
            Some(comment)
        }
        None => None,
    };

    Ok(Html(PostCommentTemplate {
        post,
        form,
        comment,
    }))
}
