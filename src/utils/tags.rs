//! Batch resolution of user tag names.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};

use crate::error::AppError;

#[derive(Debug, FromRow)]
struct UserTagRow {
    user_id: i64,
    tag_name: String,
}

/// Resolves the tag names of every user in `user_ids` with one query.
/// The returned map has an entry for every requested id even when that
/// user has no tags; callers index into it unconditionally.
pub async fn user_tags_for(
    pool: &PgPool,
    user_ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>, AppError> {
    let mut map: HashMap<i64, Vec<String>> =
        user_ids.iter().map(|id| (*id, Vec::new())).collect();

    if user_ids.is_empty() {
        return Ok(map);
    }

    let rows: Vec<UserTagRow> = sqlx::query_as(
        r#"
        SELECT ut.user_id, t.tag_name
        FROM user_tags ut
        JOIN tags t ON ut.tag_id = t.tag_id
        WHERE ut.user_id = ANY($1)
        ORDER BY t.tag_id
        "#,
    )
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    for row in rows {
        map.entry(row.user_id).or_default().push(row.tag_name);
    }

    Ok(map)
}
