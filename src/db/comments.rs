use rusqlite::{params, Connection, Row};

use super::models::{Comment, NewComment};
use super::parse_timestamp;

const COMMENT_COLUMNS: &str = "id, post_id, name, email, body, created, updated, active";

fn row_to_comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        body: row.get(4)?,
        created: parse_timestamp(5, &row.get::<_, String>(5)?)?,
        updated: parse_timestamp(6, &row.get::<_, String>(6)?)?,
        active: row.get(7)?,
    })
}

/// Attach a new comment to `post_id`. `active` takes the column default.
pub fn insert(conn: &Connection, post_id: i64, comment: &NewComment) -> rusqlite::Result<Comment> {
    conn.execute(
        "INSERT INTO blog_comment (post_id, name, email, body) VALUES (?1, ?2, ?3, ?4)",
        params![post_id, comment.name, comment.email, comment.body],
    )?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {COMMENT_COLUMNS} FROM blog_comment WHERE id = ?1"),
        params![id],
        row_to_comment,
    )
}

/// Active comments on a post, oldest first.
pub fn active_for_post(conn: &Connection, post_id: i64) -> rusqlite::Result<Vec<Comment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMMENT_COLUMNS} FROM blog_comment
         WHERE post_id = ?1 AND active = 1
         ORDER BY created ASC, id ASC"
    ))?;

    let comments = stmt
        .query_map(params![post_id], row_to_comment)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(comments)
}
