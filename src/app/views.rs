// ElasChat - app/views.rs
//
// Display rows for each screen: catalogue records combined with the
// derived display values (avatar identity, compact counts, relative ages).
// Rows are plain serialisable data; rendering is the caller's concern.

use crate::core::catalog::Catalog;
use crate::core::count::format_count;
use crate::core::identity::{color_for_id, identity, AvatarIdentity};
use crate::core::model::{Chat, Notification, NotificationKind, User, Video, CURRENT_USER_ID};
use crate::core::relative_time::{display_time_ago, TimeAgoOptions};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Clock and formatting options shared by every row builder.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub now: DateTime<Utc>,
    pub time_options: TimeAgoOptions,
}

impl ViewContext {
    /// Context at the current system time with default formatting.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Context at a fixed instant with default formatting.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            time_options: TimeAgoOptions::default(),
        }
    }

    fn age(&self, raw: &str) -> String {
        display_time_ago(raw, self.now, &self.time_options)
    }
}

// =============================================================================
// Row types
// =============================================================================

/// Who a row is about: name, handle, and placeholder avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBadge {
    pub user_id: String,
    pub display_name: String,
    pub handle: String,
    pub avatar: AvatarIdentity,

    /// Remote image that replaces the placeholder when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCard {
    pub id: String,
    pub author: AuthorBadge,
    pub caption: String,
    pub sound_title: String,
    pub likes: String,
    pub comments: String,
    pub shares: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRow {
    pub id: String,
    pub author: AuthorBadge,
    pub text: String,
    pub likes: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRow {
    pub id: String,
    pub participant: AuthorBadge,
    pub last_message: String,
    pub age: String,

    /// Badge text; `None` when everything is read.
    pub unread_badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRow {
    pub id: String,
    pub text: String,
    pub outgoing: bool,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRow {
    pub id: String,
    pub kind: NotificationKind,
    pub actor: AuthorBadge,

    /// "{actor display name} {verb phrase}".
    pub text: String,
    pub age: String,
    pub unread: bool,
}

/// A trending hashtag chip on the discover tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingChip {
    /// Bare tag; selecting the chip searches for this.
    pub tag: String,

    /// `#tag` as shown on the chip.
    pub label: String,

    /// Post count, already compact ("2.3M").
    pub posts: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileHeader {
    pub badge: AuthorBadge,
    pub bio: String,
    pub followers: String,
    pub following: String,
    pub posts: String,
    pub videos: Vec<VideoCard>,
}

// =============================================================================
// Builders
// =============================================================================

/// Badge for a known user.
pub fn badge(user: &User) -> AuthorBadge {
    AuthorBadge {
        user_id: user.id.clone(),
        display_name: user.display_name.clone(),
        handle: user.handle(),
        avatar: identity(&user.display_name),
        avatar_url: user.avatar_url.clone(),
    }
}

/// Badge for `user_id`, with a placeholder when the user is unknown.
///
/// The placeholder has no display name to hash, so its colour is keyed on
/// the id instead.
fn badge_for(catalog: &Catalog, user_id: &str) -> AuthorBadge {
    match catalog.user(user_id) {
        Some(user) => badge(user),
        None => {
            tracing::debug!(user_id, "Unknown user referenced; using placeholder badge");
            AuthorBadge {
                user_id: user_id.to_string(),
                display_name: user_id.to_string(),
                handle: format!("@{user_id}"),
                avatar: AvatarIdentity {
                    background_color: color_for_id(user_id),
                    initials: identity(user_id).initials,
                },
                avatar_url: None,
            }
        }
    }
}

/// Card for one video.
pub fn video_card(catalog: &Catalog, video: &Video, ctx: &ViewContext) -> VideoCard {
    VideoCard {
        id: video.id.clone(),
        author: badge_for(catalog, &video.user_id),
        caption: video.caption.clone(),
        sound_title: video.sound_title.clone(),
        likes: format_count(video.likes_count),
        comments: format_count(video.comments_count),
        shares: format_count(video.shares_count),
        age: ctx.age(&video.created_at),
    }
}

/// Cards for `videos`, in the given order.
pub fn video_cards(catalog: &Catalog, videos: &[&Video], ctx: &ViewContext) -> Vec<VideoCard> {
    videos.iter().map(|v| video_card(catalog, v, ctx)).collect()
}

/// The home feed: every video in catalogue order.
pub fn feed(catalog: &Catalog, ctx: &ViewContext) -> Vec<VideoCard> {
    catalog
        .videos
        .iter()
        .map(|v| video_card(catalog, v, ctx))
        .collect()
}

/// Comment rows under `video_id`.
pub fn comments(catalog: &Catalog, video_id: &str, ctx: &ViewContext) -> Vec<CommentRow> {
    catalog
        .comments_for_video(video_id)
        .into_iter()
        .map(|c| CommentRow {
            id: c.id.clone(),
            author: badge_for(catalog, &c.user_id),
            text: c.text.clone(),
            likes: format_count(c.likes_count),
            age: ctx.age(&c.created_at),
        })
        .collect()
}

/// Inbox rows for `chats`.
pub fn chat_rows(catalog: &Catalog, chats: &[&Chat], ctx: &ViewContext) -> Vec<ChatRow> {
    chats
        .iter()
        .map(|chat| ChatRow {
            id: chat.id.clone(),
            participant: badge_for(catalog, &chat.participant_id),
            last_message: chat.last_message.clone(),
            age: ctx.age(&chat.last_message_time),
            unread_badge: (chat.unread_count > 0).then(|| chat.unread_count.to_string()),
        })
        .collect()
}

/// Message rows in `chat_id`, oldest first.
pub fn messages(catalog: &Catalog, chat_id: &str, ctx: &ViewContext) -> Vec<MessageRow> {
    catalog
        .messages_for_chat(chat_id)
        .into_iter()
        .map(|m| MessageRow {
            id: m.id.clone(),
            text: m.text.clone(),
            outgoing: m.from_user_id == CURRENT_USER_ID,
            age: ctx.age(&m.created_at),
        })
        .collect()
}

/// Notification rows for `notifications`.
pub fn notification_rows(
    catalog: &Catalog,
    notifications: &[&Notification],
    ctx: &ViewContext,
) -> Vec<NotificationRow> {
    notifications
        .iter()
        .map(|n| {
            let actor = badge_for(catalog, &n.user_id);
            NotificationRow {
                id: n.id.clone(),
                kind: n.kind,
                text: format!("{} {}", actor.display_name, n.message),
                actor,
                age: ctx.age(&n.created_at),
                unread: !n.is_read,
            }
        })
        .collect()
}

/// Trending chips in catalogue order.
pub fn trending(catalog: &Catalog) -> Vec<TrendingChip> {
    catalog
        .trending
        .iter()
        .map(|t| TrendingChip {
            tag: t.tag.clone(),
            label: format!("#{}", t.tag),
            posts: t.count.clone(),
        })
        .collect()
}

/// Profile header plus the user's video grid.
pub fn profile(catalog: &Catalog, user: &User, ctx: &ViewContext) -> ProfileHeader {
    ProfileHeader {
        badge: badge(user),
        bio: user.bio.clone(),
        followers: format_count(user.followers_count),
        following: format_count(user.following_count),
        posts: format_count(user.posts_count),
        videos: video_cards(catalog, &catalog.videos_by_user(&user.id), ctx),
    }
}
