use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::pagination::PageParams;

pub const PRIVATE_MESSAGE: &str = "private_message";
pub const ADMIN_NOTIFICATION: &str = "admin_notification";

/// Represents the 'messages' table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub sender_type: String,
    pub sender_id: i64,
    pub receiver_type: String,
    pub receiver_id: i64,
    pub content: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A message joined with the profile columns shown in the inbox. For
/// private messages the "sender" columns carry the other party's profile
/// (resolved by a CASE in the query); for everything else the receiver's.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationRow {
    pub message_id: i64,
    pub sender_type: String,
    pub sender_id: i64,
    pub receiver_type: String,
    pub receiver_id: i64,
    pub content: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub sender_avatar: Option<String>,
    pub sender_nickname: Option<String>,
    pub receiver_avatar: Option<String>,
    pub receiver_nickname: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct PrivateMessages {
    pub send: Vec<NotificationRow>,
    pub received: Vec<NotificationRow>,
}

/// The classified inbox. Every fetched message lands in exactly one of
/// `messages.send`, `messages.received`, `admin_notifications` or
/// `interactive[type]`.
#[derive(Debug, Default, Serialize)]
pub struct Notifications {
    pub messages: PrivateMessages,
    pub admin_notifications: Vec<NotificationRow>,
    pub interactive: BTreeMap<String, Vec<NotificationRow>>,
}

impl Notifications {
    pub fn classify(user_id: i64, rows: Vec<NotificationRow>) -> Self {
        let mut out = Notifications::default();
        for row in rows {
            if row.kind == PRIVATE_MESSAGE {
                if row.sender_id == user_id {
                    out.messages.send.push(row);
                } else {
                    out.messages.received.push(row);
                }
            } else if row.kind == ADMIN_NOTIFICATION {
                out.admin_notifications.push(row);
            } else {
                out.interactive.entry(row.kind.clone()).or_default().push(row);
            }
        }
        out
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub sender_type: String,
    pub sender_id: i64,
    pub receiver_type: String,
    pub receiver_id: i64,
    #[validate(length(min = 1, message = "Message content must not be empty"))]
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct MessagesBetweenUsersRequest {
    pub user1_id: i64,
    pub user2_id: i64,
    #[serde(flatten)]
    pub page: PageParams,
}

#[derive(Debug, Deserialize)]
pub struct UserNotificationsRequest {
    pub user_id: i64,
    #[serde(flatten)]
    pub page: PageParams,
}

/// Minimal row shape for the two-party conversation history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub content: String,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
