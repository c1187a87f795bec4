#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDateTime;
use tempfile::TempDir;
use tower::ServiceExt;

use bloglet::config::Config;
use bloglet::db::models::{NewComment, NewPost, Post, PostStatus};
use bloglet::db::{self, comments, posts, TIMESTAMP_FORMAT};
use bloglet::mail::Mailer;
use bloglet::routes;
use bloglet::state::{AppState, DbPool};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub struct TestApp {
    pub router: Router,
    pub db: DbPool,
    _dir: TempDir,
}

/// Full router over a fresh on-disk database.
pub fn test_app(mailer: Arc<dyn Mailer>) -> TestApp {
    let dir = TempDir::new().unwrap();
    let pool = db::create_pool(&dir.path().join("test.db")).expect("Failed to create test database");
    db::run_migrations(&pool).expect("Failed to run migrations");

    let state = AppState {
        db: pool.clone(),
        config: Config::default(),
        mailer,
    };

    TestApp {
        router: routes::router(state),
        db: pool,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(uri)
            .header(header::HOST, "testserver")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, String) {
        self.post_with(uri, body, "testserver", Some(FORM_CONTENT_TYPE))
            .await
    }

    /// POST with an explicit Host header and optional content type.
    pub async fn post_with(
        &self,
        uri: &str,
        body: &str,
        host: &str,
        content_type: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::HOST, host);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub fn add_post(&self, title: &str, slug: &str, publish: &str, status: PostStatus) -> Post {
        let conn = self.db.get().unwrap();
        posts::insert(
            &conn,
            &NewPost {
                title: title.to_string(),
                slug: slug.to_string(),
                author: "admin".to_string(),
                body: format!("All about {title}."),
                publish: NaiveDateTime::parse_from_str(publish, TIMESTAMP_FORMAT).unwrap(),
                status,
            },
        )
        .unwrap()
    }

    pub fn publish(&self, title: &str, slug: &str, publish: &str) -> Post {
        self.add_post(title, slug, publish, PostStatus::Published)
    }

    pub fn add_comment(&self, post_id: i64, name: &str, active: bool) -> i64 {
        let conn = self.db.get().unwrap();
        let comment = comments::insert(
            &conn,
            post_id,
            &NewComment {
                name: name.to_string(),
                email: "reader@example.com".to_string(),
                body: format!("{name} says hi"),
            },
        )
        .unwrap();
        if !active {
            conn.execute(
                "UPDATE blog_comment SET active = 0 WHERE id = ?1",
                rusqlite::params![comment.id],
            )
            .unwrap();
        }
        comment.id
    }

    pub fn comment_count(&self, post_id: i64) -> i64 {
        let conn = self.db.get().unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM blog_comment WHERE post_id = ?1",
            rusqlite::params![post_id],
            |row| row.get(0),
        )
        .unwrap()
    }
}
