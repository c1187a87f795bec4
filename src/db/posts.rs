use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{NewPost, Post, PostStatus};
use super::{parse_timestamp, TIMESTAMP_FORMAT};

const POST_COLUMNS: &str = "id, title, slug, author, body, publish, created, updated, status";

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        author: row.get(3)?,
        body: row.get(4)?,
        publish: parse_timestamp(5, &row.get::<_, String>(5)?)?,
        created: parse_timestamp(6, &row.get::<_, String>(6)?)?,
        updated: parse_timestamp(7, &row.get::<_, String>(7)?)?,
        status: row.get(8)?,
    })
}

pub fn insert(conn: &Connection, post: &NewPost) -> rusqlite::Result<Post> {
    conn.execute(
        "INSERT INTO blog_post (title, slug, author, body, publish, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            post.title,
            post.slug,
            post.author,
            post.body,
            post.publish.format(TIMESTAMP_FORMAT).to_string(),
            post.status,
        ],
    )?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {POST_COLUMNS} FROM blog_post WHERE id = ?1"),
        params![id],
        row_to_post,
    )
}

/// The published post with this slug whose publish timestamp falls on `date` (UTC).
pub fn find_published_by_date(
    conn: &Connection,
    date: NaiveDate,
    slug: &str,
) -> rusqlite::Result<Option<Post>> {
    conn.query_row(
        &format!(
            "SELECT {POST_COLUMNS} FROM blog_post
             WHERE status = ?1 AND slug = ?2 AND date(publish) = ?3"
        ),
        params![
            PostStatus::Published,
            slug,
            date.format("%Y-%m-%d").to_string()
        ],
        row_to_post,
    )
    .optional()
}

pub fn find_published_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Post>> {
    conn.query_row(
        &format!("SELECT {POST_COLUMNS} FROM blog_post WHERE status = ?1 AND id = ?2"),
        params![PostStatus::Published, id],
        row_to_post,
    )
    .optional()
}

pub fn count_published(conn: &Connection) -> rusqlite::Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM blog_post WHERE status = ?1",
        params![PostStatus::Published],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// One window of published posts, newest first.
pub fn list_published(
    conn: &Connection,
    limit: usize,
    offset: usize,
) -> rusqlite::Result<Vec<Post>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {POST_COLUMNS} FROM blog_post
         WHERE status = ?1
         ORDER BY publish DESC, id DESC
         LIMIT ?2 OFFSET ?3"
    ))?;

    let posts = stmt
        .query_map(
            params![PostStatus::Published, limit as i64, offset as i64],
            row_to_post,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(posts)
}
