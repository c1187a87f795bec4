use askama::Template;
use axum::extract::rejection::PathRejection;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;

use crate::db::models::Post;
use crate::error::{AppError, AppResult};
use crate::extractors::SiteUrl;
use crate::forms::{self, BoundForm, EmailPostForm};
use crate::mail::EmailMessage;
use crate::routes::{post_id, published_post, Html};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "blog/post/share.html")]
pub struct PostShareTemplate {
    pub post: Post,
    pub form: BoundForm<EmailPostForm>,
    pub sent: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/blog/post/{post_id}/share/", get(share_form).post(share_submit))
}

async fn share_form(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Html<PostShareTemplate>> {
    let conn = state.db.get()?;
    let post = published_post(&conn, post_id(path)?)?;

    Ok(Html(PostShareTemplate {
        post,
        form: BoundForm::unbound(),
        sent: false,
    }))
}

async fn share_submit(
    State(state): State<AppState>,
    site: Result<SiteUrl, AppError>,
    path: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> AppResult<Html<PostShareTemplate>> {
    let post = {
        let conn = state.db.get()?;
        published_post(&conn, post_id(path)?)?
    };

    let form = BoundForm::bind(forms::from_urlencoded::<EmailPostForm>(&body)?);
    let mut sent = false;

    if form.is_valid() {
        let post_url = site?.absolute(&post.absolute_url())?;
        let message = recommendation(&post, &form.data, &post_url, &state.config.mail.from);
        state.mailer.send(&message).await?;
        tracing::info!(post_id = post.id, "Shared post by email");
        sent = true;
    }

    Ok(Html(PostShareTemplate { post, form, sent }))
}

/// The email sent when a reader recommends `post` to a single recipient.
fn recommendation(post: &Post, data: &EmailPostForm, post_url: &str, from: &str) -> EmailMessage {
    EmailMessage {
        subject: format!(
            "{} ({}) recommends you read {}",
            data.name, data.email, post.title
        ),
        body: format!(
            "Read {} at {}\n\n{}'s comments: {}",
            post.title, post_url, data.name, data.comments
        ),
        from: from.to_string(),
        to: vec![data.to.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::PostStatus;
    use chrono::NaiveDate;

    fn post() -> Post {
        let publish = NaiveDate::from_ymd_opt(2024, 2, 9)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Post {
            id: 4,
            title: "Notes on Rust".to_string(),
            slug: "notes-on-rust".to_string(),
            author: "admin".to_string(),
            body: String::new(),
            publish,
            created: publish,
            updated: publish,
            status: PostStatus::Published,
        }
    }

    fn data(to: &str) -> EmailPostForm {
        EmailPostForm {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            to: to.to_string(),
            comments: "Worth a look.".to_string(),
        }
    }

    #[test]
    fn recommendation_embeds_sender_title_and_url() {
        let message = recommendation(
            &post(),
            &data("bob@y.org"),
            "http://testserver/blog/2024/2/9/notes-on-rust/",
            "webmaster@localhost",
        );

        assert_eq!(message.subject, "Ana (ana@x.com) recommends you read Notes on Rust");
        assert_eq!(
            message.body,
            "Read Notes on Rust at http://testserver/blog/2024/2/9/notes-on-rust/\n\nAna's comments: Worth a look."
        );
        assert_eq!(message.from, "webmaster@localhost");
        assert_eq!(message.to, vec!["bob@y.org".to_string()]);
    }

    #[test]
    fn unsent_page_shows_form() {
        let html = PostShareTemplate {
            post: post(),
            form: BoundForm::unbound(),
            sent: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("Share \"Notes on Rust\" by e-mail"));
        assert!(html.contains(r#"name="to""#));
    }

    #[test]
    fn invalid_submission_shows_field_errors() {
        let html = PostShareTemplate {
            post: post(),
            form: BoundForm::bind(data("nope")),
            sent: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("Enter a valid email address."));
        assert!(html.contains(r#"value="Ana""#));
    }

    #[test]
    fn sent_page_confirms_recipient() {
        let html = PostShareTemplate {
            post: post(),
            form: BoundForm::bind(data("bob@y.org")),
            sent: true,
        }
        .render()
        .unwrap();

        assert!(html.contains("E-mail successfully sent"));
        assert!(html.contains("bob@y.org"));
        assert!(!html.contains("<form"));
    }
}
