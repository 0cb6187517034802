//! Existence gates used before foreign-row-dependent writes.
//!
//! These do not lock rows; write paths that need atomicity pair them with
//! unique constraints or ownership-scoped statements.

use sqlx::PgPool;

use crate::{error::AppError, models::post::PostKind};

pub async fn user_exists(pool: &PgPool, user_id: i64) -> Result<bool, AppError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

pub async fn post_exists(pool: &PgPool, kind: PostKind, post_id: i64) -> Result<bool, AppError> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)",
        kind.table(),
        kind.id_column()
    );
    let exists: bool = sqlx::query_scalar(&sql).bind(post_id).fetch_one(pool).await?;
    Ok(exists)
}

/// Returns every id from `tag_ids` that has no row in `tags`, so callers
/// can report all invalid ids at once instead of failing on the first.
pub async fn missing_tag_ids(pool: &PgPool, tag_ids: &[i64]) -> Result<Vec<i64>, AppError> {
    if tag_ids.is_empty() {
        return Ok(Vec::new());
    }
    let known: Vec<i64> =
        sqlx::query_scalar("SELECT tag_id FROM tags WHERE tag_id = ANY($1)")
            .bind(tag_ids)
            .fetch_all(pool)
            .await?;
    Ok(tag_ids
        .iter()
        .copied()
        .filter(|id| !known.contains(id))
        .collect())
}
