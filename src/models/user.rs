// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
    pub region_name: Option<String>,
    pub region_code: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
pub struct Address {
    pub name: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Profile shape returned to clients: flat user columns regrouped into
/// nested `address` / `contact` blocks plus resolved tag names.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub username: String,
    pub avatar_url: Option<String>,
    pub nickname: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
    pub tags: Vec<String>,
    pub address: Address,
    pub contact: Contact,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserInfo {
    pub fn from_user(user: User, tags: Vec<String>) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            avatar_url: user.avatar_url,
            nickname: user.nickname,
            gender: user.gender,
            bio: user.bio,
            birthday: user.birthday,
            tags,
            address: Address {
                name: user.region_name,
                code: user.region_code,
            },
            contact: Contact {
                phone: user.contact_phone,
                email: user.contact_email,
            },
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for the profile update. Unlike post updates this is a full
/// overwrite: every profile column is written from the payload.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub user_id: i64,
    pub avatar_url: Option<String>,
    #[validate(length(max = 50))]
    pub nickname: Option<String>,
    pub gender: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
    pub region_name: Option<String>,
    pub region_code: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    /// Tag ids replacing the user's whole tag set when present.
    pub tags: Option<Vec<i64>>,
}

/// Follow (action = 1) or unfollow (action = 0).
#[derive(Debug, Deserialize, Validate)]
pub struct FollowRequest {
    pub follower_id: i64,
    pub following_id: i64,
    #[validate(range(min = 0, max = 1, message = "action must be 0 or 1"))]
    pub action: i32,
}

#[derive(Debug, Deserialize)]
pub struct JoinTeamRequest {
    pub user_id: i64,
    pub post_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct MyPostsRequest {
    pub user_id: i64,
    #[serde(flatten)]
    pub page: crate::models::pagination::PageParams,
}
