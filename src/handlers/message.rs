use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        message::{
            ChatMessage, Message, MessagesBetweenUsersRequest, Notifications, NotificationRow,
            SendMessageRequest, UserNotificationsRequest,
        },
        pagination::Pagination,
    },
    response,
};

/// Append a message row. Senders and receivers are not validated; the
/// message store is a fire-and-forget log.
pub async fn send_message(
    State(pool): State<PgPool>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(e) = payload.validate() {
        return Err(AppError::BadRequest(e.to_string()));
    }

    sqlx::query(
        r#"
        INSERT INTO messages (sender_type, sender_id, receiver_type, receiver_id, content, type)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&payload.sender_type)
    .bind(payload.sender_id)
    .bind(&payload.receiver_type)
    .bind(payload.receiver_id)
    .bind(&payload.content)
    .bind(&payload.kind)
    .execute(&pool)
    .await?;

    Ok(response::ok_msg("Message sent"))
}

/// Classified inbox: private messages the user sent or received, plus
/// every non-private message addressed to them, joined with profile
/// columns. For private messages the displayed profile is the other
/// party's; otherwise the receiver's.
pub async fn get_notification(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows: Vec<NotificationRow> = sqlx::query_as(
        r#"
        SELECT
            m.*,
            CASE
                WHEN m.type = 'private_message' THEN s.avatar_url
                ELSE r.avatar_url
            END AS sender_avatar,
            CASE
                WHEN m.type = 'private_message' THEN s.nickname
                ELSE r.nickname
            END AS sender_nickname,
            r.avatar_url AS receiver_avatar,
            r.nickname AS receiver_nickname
        FROM messages m
        LEFT JOIN users s ON m.sender_id = s.user_id
        LEFT JOIN users r ON m.receiver_id = r.user_id
        WHERE (m.type = 'private_message' AND (m.sender_id = $1 OR m.receiver_id = $1))
           OR (m.type != 'private_message' AND m.receiver_id = $1)
        ORDER BY m.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    let notifications = Notifications::classify(user_id, rows);

    Ok(response::ok(
        "Notifications fetched",
        json!({ "notifications": notifications }),
    ))
}

/// Two-party conversation history, newest first, paginated.
pub async fn get_messages_between_users(
    State(pool): State<PgPool>,
    Json(payload): Json<MessagesBetweenUsersRequest>,
) -> Result<impl IntoResponse, AppError> {
    let page = payload.page;

    let list: Vec<ChatMessage> = sqlx::query_as(
        r#"
        SELECT content, sender_id, receiver_id, created_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(payload.user1_id)
    .bind(payload.user2_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)
        "#,
    )
    .bind(payload.user1_id)
    .bind(payload.user2_id)
    .fetch_one(&pool)
    .await?;

    Ok(response::ok(
        "Messages fetched",
        json!({
            "list": list,
            "pagination": Pagination::new(total, &page),
        }),
    ))
}

/// Paginated admin notifications addressed to the user.
pub async fn get_user_admin_notifications(
    State(pool): State<PgPool>,
    Json(payload): Json<UserNotificationsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let page = payload.page;

    let list: Vec<Message> = sqlx::query_as(
        r#"
        SELECT *
        FROM messages
        WHERE receiver_id = $1 AND type = 'admin_notification'
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(payload.user_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND type = 'admin_notification'",
    )
    .bind(payload.user_id)
    .fetch_one(&pool)
    .await?;

    Ok(response::ok(
        "Admin notifications fetched",
        json!({
            "adminNotifications": list,
            "pagination": Pagination::new(total, &page),
        }),
    ))
}

/// Paginated interactive (like/comment/follow) notifications: anything
/// addressed to the user that is neither private nor an admin notice.
pub async fn get_user_interactive_notifications(
    State(pool): State<PgPool>,
    Json(payload): Json<UserNotificationsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let page = payload.page;

    let list: Vec<Message> = sqlx::query_as(
        r#"
        SELECT *
        FROM messages
        WHERE receiver_id = $1
          AND type NOT IN ('admin_notification', 'private_message')
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(payload.user_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM messages
        WHERE receiver_id = $1
          AND type NOT IN ('admin_notification', 'private_message')
        "#,
    )
    .bind(payload.user_id)
    .fetch_one(&pool)
    .await?;

    Ok(response::ok(
        "Interactive notifications fetched",
        json!({
            "interactiveNotifications": list,
            "pagination": Pagination::new(total, &page),
        }),
    ))
}
