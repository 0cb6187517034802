use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A like row; the owning-post column is aliased to `post_id` in queries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LikeRow {
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleLikeRequest {
    pub user_id: i64,
    pub post_id: i64,
}
