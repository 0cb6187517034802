use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        comment::{Comment, DeleteCommentRequest, PostCommentsRequest, PublishCommentRequest,
                  UserCommentsRequest},
        post::PostKind,
    },
    response,
    utils::exists::{post_exists, user_exists},
};

/// Shared publish path: gate on author and post existence, then insert
/// into the kind's comment table.
async fn publish_comment(
    pool: &PgPool,
    kind: PostKind,
    payload: PublishCommentRequest,
) -> Result<impl IntoResponse + use<>, AppError> {
    if let Err(e) = payload.validate() {
        return Err(AppError::BadRequest(e.to_string()));
    }

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

    let sql = format!(
        "INSERT INTO {} (user_id, {}, content) VALUES ($1, $2, $3)",
        kind.comment_table(),
        kind.id_column()
    );
    sqlx::query(&sql)
        .bind(payload.user_id)
        .bind(payload.post_id)
        .bind(&payload.content)
        .execute(pool)
        .await?;

    Ok(response::ok_msg("Comment published"))
}

/// Shared delete path. The DELETE is scoped to the requesting user, so
/// ownership is enforced in the same statement that removes the row.
async fn delete_comment(
    pool: &PgPool,
    kind: PostKind,
    payload: DeleteCommentRequest,
) -> Result<impl IntoResponse + use<>, AppError> {
    let sql = format!(
        "DELETE FROM {} WHERE comment_id = $1 AND user_id = $2",
        kind.comment_table()
    );
    let deleted = sqlx::query(&sql)
        .bind(payload.comment_id)
        .bind(payload.user_id)
        .execute(pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        let check = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE comment_id = $1)",
            kind.comment_table()
        );
        let exists: bool = sqlx::query_scalar(&check)
            .bind(payload.comment_id)
            .fetch_one(pool)
            .await?;
        if exists {
            return Err(AppError::Forbidden(
                "Only the author can delete this comment".to_string(),
            ));
        }
        return Err(AppError::NotFound("Comment not found".to_string()));
    }

    Ok(response::ok_msg("Comment deleted"))
}

pub async fn publish_dynamic_comment(
    State(pool): State<PgPool>,
    Json(payload): Json<PublishCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    publish_comment(&pool, PostKind::Dynamic, payload).await
}

pub async fn publish_team_comment(
    State(pool): State<PgPool>,
    Json(payload): Json<PublishCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    publish_comment(&pool, PostKind::Team, payload).await
}

pub async fn delete_dynamic_comment(
    State(pool): State<PgPool>,
    Json(payload): Json<DeleteCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    delete_comment(&pool, PostKind::Dynamic, payload).await
}

pub async fn delete_team_comment(
    State(pool): State<PgPool>,
    Json(payload): Json<DeleteCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    delete_comment(&pool, PostKind::Team, payload).await
}

/// Every dynamic-post comment written by one user.
pub async fn get_user_dynamic_comments(
    State(pool): State<PgPool>,
    Json(payload): Json<UserCommentsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let comments: Vec<Comment> = sqlx::query_as(
        r#"
        SELECT comment_id, dynamic_post_id AS post_id, user_id, content, created_at
        FROM dynamic_post_comments
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(payload.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(response::ok("User comments fetched", comments))
}

/// Every comment on one dynamic post.
pub async fn get_post_dynamic_comments(
    State(pool): State<PgPool>,
    Json(payload): Json<PostCommentsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let comments: Vec<Comment> = sqlx::query_as(
        r#"
        SELECT comment_id, dynamic_post_id AS post_id, user_id, content, created_at
        FROM dynamic_post_comments
        WHERE dynamic_post_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(payload.post_id)
    .fetch_all(&pool)
    .await?;

    Ok(response::ok("Post comments fetched", comments))
}
