use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A comment row. The owning-post column differs per kind
/// (`dynamic_post_id` vs `post_id`); queries alias it to `post_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub comment_id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A comment joined with its author's display columns, used in
/// composite post reads.
#[derive(Debug, FromRow)]
pub struct CommentWithAuthor {
    pub comment_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PublishCommentRequest {
    pub user_id: i64,
    pub post_id: i64,
    #[validate(length(min = 1, max = 1000, message = "Comment must not be empty"))]
    pub content: String,
}

/// Deleting requires the requester to be the comment's author.
#[derive(Debug, Deserialize)]
pub struct DeleteCommentRequest {
    pub comment_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserCommentsRequest {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PostCommentsRequest {
    pub post_id: i64,
}
