use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::pagination::PageParams;

/// Discriminates the two post families. Each variant carries its own
/// table and column names as static metadata so callers never select
/// them by comparing strings at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Dynamic,
    Team,
}

impl PostKind {
    /// Main post table.
    pub fn table(self) -> &'static str {
        match self {
            PostKind::Dynamic => "dynamic_posts",
            PostKind::Team => "team_activity_posts",
        }
    }

    /// Primary-key column of the post table, also the foreign-key column
    /// used by the image/comment/like tables of this kind.
    pub fn id_column(self) -> &'static str {
        match self {
            PostKind::Dynamic => "dynamic_post_id",
            PostKind::Team => "post_id",
        }
    }

    pub fn image_table(self) -> &'static str {
        match self {
            PostKind::Dynamic => "dynamic_post_images",
            PostKind::Team => "team_activity_images",
        }
    }

    pub fn comment_table(self) -> &'static str {
        match self {
            PostKind::Dynamic => "dynamic_post_comments",
            PostKind::Team => "team_activity_post_comments",
        }
    }

    pub fn like_table(self) -> &'static str {
        match self {
            PostKind::Dynamic => "dynamic_post_likes",
            PostKind::Team => "team_activity_post_likes",
        }
    }
}

/// Represents the 'dynamic_posts' table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DynamicPost {
    pub dynamic_post_id: i64,
    pub user_id: i64,
    pub content: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Represents the 'team_activity_posts' table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamPost {
    pub post_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_location: String,
    pub end_location: String,
    pub duration_day: i32,
    pub team_size: i32,
    pub estimated_expense: Option<i32>,
    pub gender_requirement: Option<String>,
    pub payment_method: String,
    pub theme_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostImage {
    pub image_id: i64,
    pub image_url: String,
}

/// Author columns joined onto composite post reads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthorInfo {
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}

/// One row of the dynamic feed: post columns plus author profile and the
/// follow flag computed for the requesting user.
#[derive(Debug, FromRow, Serialize)]
pub struct DynamicFeedItem {
    pub dynamic_post_id: i64,
    pub user_id: i64,
    pub content: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(rename = "isFollowed")]
    pub is_followed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PublishDynamicPostRequest {
    pub user_id: i64,
    #[validate(length(min = 1, max = 2000, message = "Content must not be empty"))]
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDynamicPostRequest {
    pub user_id: i64,
    pub dynamic_post_id: i64,
    pub content: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PublishTeamPostRequest {
    pub user_id: i64,
    #[validate(length(min = 1, max = 100, message = "Title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Start location must not be empty"))]
    pub start_location: String,
    #[validate(length(min = 1, message = "End location must not be empty"))]
    pub end_location: String,
    #[validate(range(min = 1, message = "Duration must be at least one day"))]
    pub duration_day: i32,
    #[validate(range(min = 1, message = "Team size must be at least one"))]
    pub team_size: i32,
    pub estimated_expense: Option<i32>,
    pub gender_requirement: Option<String>,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
    pub theme_id: i64,
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub image_urls: Vec<String>,
    pub itinerary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTeamPostRequest {
    pub user_id: i64,
    pub post_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub duration_day: Option<i32>,
    pub team_size: Option<i32>,
    pub estimated_expense: Option<i32>,
    pub gender_requirement: Option<String>,
    pub payment_method: Option<String>,
    pub theme_id: Option<i64>,
    pub image_urls: Option<Vec<String>>,
    pub itinerary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DynamicFeedRequest {
    #[serde(flatten)]
    pub page: PageParams,
    /// Requesting user; when present each row carries an `isFollowed` flag.
    pub user_id: Option<i64>,
    /// Restricts the feed to posts authored by these users.
    #[serde(default)]
    pub follow_user_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TeamFeedRequest {
    #[serde(flatten)]
    pub page: PageParams,
    pub theme_id: Option<i64>,
}
