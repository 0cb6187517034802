use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        like::{LikeRow, ToggleLikeRequest},
        post::PostKind,
    },
    response,
    utils::exists::{post_exists, user_exists},
};

/// Toggle a like. The check and the insert/delete run inside one
/// transaction, and the unique like constraint absorbs a concurrent
/// duplicate insert, so the row count per pair stays 0 or 1.
async fn toggle_like(
    pool: &PgPool,
    kind: PostKind,
    payload: ToggleLikeRequest,
) -> Result<impl IntoResponse + use<>, AppError> {
    let (user_ok, post_ok) = tokio::try_join!(
        user_exists(pool, payload.user_id),
        post_exists(pool, kind, payload.post_id),
    )?;
    if !user_ok {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    if !post_ok {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let mut tx = pool.begin().await?;

    let check = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = $1 AND {} = $2)",
        kind.like_table(),
        kind.id_column()
    );
    let is_liked: bool = sqlx::query_scalar(&check)
        .bind(payload.user_id)
        .bind(payload.post_id)
        .fetch_one(&mut *tx)
        .await?;

    let msg = if is_liked {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND {} = $2",
            kind.like_table(),
            kind.id_column()
        );
        sqlx::query(&sql)
            .bind(payload.user_id)
            .bind(payload.post_id)
            .execute(&mut *tx)
            .await?;
        "Unliked"
    } else {
        let sql = format!(
            "INSERT INTO {} (user_id, {}) VALUES ($1, $2)
             ON CONFLICT (user_id, {}) DO NOTHING",
            kind.like_table(),
            kind.id_column(),
            kind.id_column()
        );
        sqlx::query(&sql)
            .bind(payload.user_id)
            .bind(payload.post_id)
            .execute(&mut *tx)
            .await?;
        "Liked"
    };

    tx.commit().await?;

    Ok(response::ok(msg, json!({ "liked": !is_liked })))
}

pub async fn like_dynamic_post(
    State(pool): State<PgPool>,
    Json(payload): Json<ToggleLikeRequest>,
) -> Result<impl IntoResponse, AppError> {
    toggle_like(&pool, PostKind::Dynamic, payload).await
}

pub async fn like_team_post(
    State(pool): State<PgPool>,
    Json(payload): Json<ToggleLikeRequest>,
) -> Result<impl IntoResponse, AppError> {
    toggle_like(&pool, PostKind::Team, payload).await
}

/// Bare list of user ids who liked the post.
async fn liked_users(
    pool: &PgPool,
    kind: PostKind,
    post_id: i64,
) -> Result<impl IntoResponse + use<>, AppError> {
    let sql = format!(
        "SELECT user_id FROM {} WHERE {} = $1",
        kind.like_table(),
        kind.id_column()
    );
    let user_ids: Vec<i64> = sqlx::query_scalar(&sql).bind(post_id).fetch_all(pool).await?;
    Ok(response::ok("Liking users fetched", user_ids))
}

pub async fn get_like_dynamic_post_users(
    State(pool): State<PgPool>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    liked_users(&pool, PostKind::Dynamic, post_id).await
}

pub async fn get_like_team_post_users(
    State(pool): State<PgPool>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    liked_users(&pool, PostKind::Team, post_id).await
}

/// A user's like rows for one post kind, unenriched.
async fn user_liked_posts(
    pool: &PgPool,
    kind: PostKind,
    user_id: i64,
) -> Result<impl IntoResponse + use<>, AppError> {
    let sql = format!(
        "SELECT user_id, {} AS post_id, created_at FROM {} WHERE user_id = $1",
        kind.id_column(),
        kind.like_table()
    );
    let likes: Vec<LikeRow> = sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?;
    Ok(response::ok("Liked posts fetched", likes))
}

pub async fn get_user_liked_dynamic_posts(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    user_liked_posts(&pool, PostKind::Dynamic, user_id).await
}

pub async fn get_user_liked_team_posts(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    user_liked_posts(&pool, PostKind::Team, user_id).await
}
