use chrono::{Datelike, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    /// Two-letter code stored in the `status` column.
    pub fn code(self) -> &'static str {
        match self {
            PostStatus::Draft => "DF",
            PostStatus::Published => "PB",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DF" => Some(PostStatus::Draft),
            "PB" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

impl ToSql for PostStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for PostStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;
        PostStatus::from_code(code)
            .ok_or_else(|| FromSqlError::Other(format!("unknown post status {code:?}").into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub body: String,
    pub publish: NaiveDateTime,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub status: PostStatus,
}

impl Post {
    /// Canonical detail URL, keyed by publish date and slug.
    pub fn absolute_url(&self) -> String {
        format!(
            "/blog/{}/{}/{}/{}/",
            self.publish.year(),
            self.publish.month(),
            self.publish.day(),
            self.slug
        )
    }

    pub fn share_url(&self) -> String {
        format!("/blog/post/{}/share/", self.id)
    }

    pub fn comment_url(&self) -> String {
        format!("/blog/post/{}/comment/", self.id)
    }

    pub fn publish_display(&self) -> String {
        self.publish.format("%B %-d, %Y").to_string()
    }

    pub fn paragraphs(&self) -> Vec<String> {
        paragraphs(&self.body)
    }

    /// First `words` words of the body, with an ellipsis when truncated.
    pub fn excerpt(&self, words: usize) -> String {
        let mut parts = self.body.split_whitespace();
        let head: Vec<&str> = parts.by_ref().take(words).collect();
        let mut excerpt = head.join(" ");
        if parts.next().is_some() {
            excerpt.push_str(" …");
        }
        excerpt
    }
}

/// Fields supplied when a post is written; ids and audit timestamps come from the database.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub body: String,
    pub publish: NaiveDateTime,
    pub status: PostStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub active: bool,
}

impl Comment {
    pub fn created_display(&self) -> String {
        self.created.format("%B %-d, %Y, %H:%M").to_string()
    }

    pub fn paragraphs(&self) -> Vec<String> {
        paragraphs(&self.body)
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Split plain text on blank lines, dropping empty blocks.
fn paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
