// ElasChat - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// Records reference each other by id; `core::catalog` resolves them.
// Field names serialise as camelCase so a stored user record has the same
// JSON shape the mobile client writes.

use serde::{Deserialize, Serialize};

// =============================================================================
// User
// =============================================================================

/// A member profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    /// Handle without the leading `@`, restricted to `[a-z0-9_]`.
    pub username: String,

    pub display_name: String,

    #[serde(default)]
    pub bio: String,

    /// Remote avatar image. `None` means the derived avatar identity is shown.
    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub followers_count: u64,

    #[serde(default)]
    pub following_count: u64,

    #[serde(default)]
    pub posts_count: u64,

    /// Whether the signed-in user follows this user (unknown when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

impl User {
    /// `@handle` form used in cards and headers.
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }
}

// =============================================================================
// Content
// =============================================================================

/// A short video post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub user_id: String,
    pub video_url: String,
    pub cover_url: String,
    pub caption: String,

    /// Tags without the leading `#`.
    pub hashtags: Vec<String>,

    pub sound_title: String,
    pub likes_count: u64,
    pub comments_count: u64,
    pub shares_count: u64,

    /// ISO-8601 creation time.
    pub created_at: String,

    #[serde(default)]
    pub is_liked: bool,

    #[serde(default)]
    pub is_saved: bool,
}

/// A comment under a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub video_id: String,
    pub user_id: String,
    pub text: String,
    pub likes_count: u64,
    pub created_at: String,

    #[serde(default)]
    pub is_liked: bool,
}

// =============================================================================
// Messaging
// =============================================================================

/// A single direct message inside a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub chat_id: String,

    /// Sender id; `CURRENT_USER_ID` for messages sent by the signed-in user.
    pub from_user_id: String,

    pub text: String,
    pub created_at: String,
    pub is_read: bool,
}

/// Sender id used for outgoing messages.
pub const CURRENT_USER_ID: &str = "current";

/// A direct-message conversation with one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub participant_id: String,
    pub last_message: String,
    pub last_message_time: String,
    pub unread_count: u32,
}

// =============================================================================
// Notifications
// =============================================================================

/// What kind of activity a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Mention,
}

impl NotificationKind {
    /// Returns all variants in display order.
    pub fn all() -> &'static [NotificationKind] {
        &[
            NotificationKind::Like,
            NotificationKind::Comment,
            NotificationKind::Follow,
            NotificationKind::Mention,
        ]
    }

    /// Short label for filter chips.
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Like => "Likes",
            NotificationKind::Comment => "Comments",
            NotificationKind::Follow => "Follows",
            NotificationKind::Mention => "Mentions",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An activity notification addressed to the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    /// The user who triggered the activity.
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    /// Verb phrase shown after the actor's name, e.g. "liked your video".
    pub message: String,

    pub created_at: String,
    pub is_read: bool,
}

/// A trending hashtag on the discover screen.
///
/// `count` is pre-formatted upstream, so it is carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingTag {
    pub tag: String,
    pub count: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_uses_camel_case_keys() {
        let user = User {
            id: "1".to_string(),
            username: "elastus".to_string(),
            display_name: "Elastus Creator".to_string(),
            bio: String::new(),
            avatar_url: None,
            followers_count: 10,
            following_count: 2,
            posts_count: 1,
            is_following: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"displayName\":\"Elastus Creator\""));
        assert!(json.contains("\"followersCount\":10"));
        assert!(!json.contains("isFollowing"));
    }

    #[test]
    fn test_user_json_tolerates_missing_optional_fields() {
        let json = r#"{"id":"7","username":"neo","displayName":"Neo"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.handle(), "@neo");
        assert_eq!(user.followers_count, 0);
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_notification_kind_serialises_as_type_field() {
        let n = Notification {
            id: "n1".to_string(),
            kind: NotificationKind::Follow,
            user_id: "3".to_string(),
            video_id: None,
            message: "started following you".to_string(),
            created_at: "2024-01-15T14:30:00Z".to_string(),
            is_read: false,
        };
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains("\"type\":\"follow\""));
        assert!(!json.contains("videoId"));
    }
}
