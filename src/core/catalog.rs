// ElasChat - core/catalog.rs
//
// In-memory content catalogue: the seed users, videos, comments, chats,
// messages, notifications, and trending tags the client ships with, plus
// id-based lookups between them.

use crate::core::model::{
    Chat, Comment, Message, Notification, NotificationKind, TrendingTag, User, Video,
    CURRENT_USER_ID,
};

/// All records the client renders, held in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub users: Vec<User>,
    pub videos: Vec<Video>,
    pub comments: Vec<Comment>,
    pub chats: Vec<Chat>,
    pub messages: Vec<Message>,
    pub notifications: Vec<Notification>,
    pub trending: Vec<TrendingTag>,
}

impl Catalog {
    /// Look up a user by id.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look up a video by id.
    pub fn video(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// Look up a chat by id.
    pub fn chat(&self, id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    /// Author of a video.
    pub fn author(&self, video: &Video) -> Option<&User> {
        self.user(&video.user_id)
    }

    /// Videos posted by `user_id`, in feed order.
    pub fn videos_by_user(&self, user_id: &str) -> Vec<&Video> {
        self.videos.iter().filter(|v| v.user_id == user_id).collect()
    }

    /// Comments under `video_id`, oldest first.
    pub fn comments_for_video(&self, video_id: &str) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|c| c.video_id == video_id)
            .collect()
    }

    /// Messages in `chat_id`, oldest first.
    pub fn messages_for_chat(&self, chat_id: &str) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .collect()
    }

    /// Notifications of one kind, in feed order.
    pub fn notifications_of_kind(&self, kind: NotificationKind) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.kind == kind)
            .collect()
    }

    /// Number of unread notifications (tab badge).
    pub fn unread_notification_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Total unread direct messages across all chats (tab badge).
    pub fn unread_message_count(&self) -> u32 {
        self.chats.iter().map(|c| c.unread_count).sum()
    }

    /// The seed data shipped with the client.
    pub fn mock() -> Self {
        let users = vec![
            user(
                "1",
                "elastus",
                "Elastus Creator",
                "Welcome to ElasChat! Creating amazing content daily.",
                [125_000, 342, 89],
            ),
            user(
                "2",
                "creativemind",
                "Creative Mind",
                "Artist and content creator. Follow for daily inspiration!",
                [45_200, 198, 156],
            ),
            user(
                "3",
                "funnyvibes",
                "Funny Vibes",
                "Making you laugh one video at a time!",
                [89_000, 567, 234],
            ),
            user(
                "4",
                "musiclover",
                "Music Lover",
                "Sharing the best beats and melodies.",
                [67_800, 890, 178],
            ),
            user(
                "5",
                "traveler_dan",
                "Dan the Traveler",
                "Exploring the world one video at a time.",
                [234_500, 1_200, 567],
            ),
        ];

        let videos = vec![
            video(
                "v1",
                "1",
                "Welcome to ElasChat! This is the future of short videos #elaschat #newapp #viral",
                &["elaschat", "newapp", "viral"],
                "Original sound - ElasChat",
                [45_200, 1_234, 567],
                "2024-01-15T10:30:00Z",
            ),
            video(
                "v2",
                "2",
                "Check out this amazing sunset! Nature at its finest #sunset #nature #beautiful",
                &["sunset", "nature", "beautiful"],
                "Chill Vibes - Sunset Mix",
                [23_400, 890, 234],
                "2024-01-14T18:45:00Z",
            ),
            video(
                "v3",
                "3",
                "When your friend says they will be ready in 5 minutes #funny #relatable #comedy",
                &["funny", "relatable", "comedy"],
                "Funny Sound Effect",
                [89_000, 3_456, 1_234],
                "2024-01-14T12:00:00Z",
            ),
            video(
                "v4",
                "4",
                "This beat is fire! What do you think? #music #beats #producer",
                &["music", "beats", "producer"],
                "Original beat - MusicLover",
                [34_500, 1_567, 890],
                "2024-01-13T20:15:00Z",
            ),
            video(
                "v5",
                "5",
                "The most beautiful place I have ever visited! #travel #adventure #explore",
                &["travel", "adventure", "explore"],
                "Adventure Awaits - Travel Mix",
                [156_000, 4_567, 2_345],
                "2024-01-12T09:30:00Z",
            ),
        ];

        let comments = vec![
            comment("c1", "v1", "2", "This app is amazing! Love it!", 234, "2024-01-15T11:00:00Z"),
            comment(
                "c2",
                "v1",
                "3",
                "Can't wait to see more content!",
                156,
                "2024-01-15T11:30:00Z",
            ),
            comment("c3", "v1", "4", "The UI is so clean!", 89, "2024-01-15T12:00:00Z"),
        ];

        let chats = vec![
            chat("chat1", "2", "Hey! Did you see my latest video?", "2024-01-15T14:30:00Z", 2),
            chat(
                "chat2",
                "3",
                "That was hilarious! I can't stop laughing",
                "2024-01-15T12:15:00Z",
                0,
            ),
            chat("chat3", "4", "Thanks for the follow!", "2024-01-14T20:45:00Z", 1),
        ];

        let messages = vec![
            message("m1", "chat1", "2", "Hey! How are you?", "2024-01-15T14:00:00Z", true),
            message(
                "m2",
                "chat1",
                CURRENT_USER_ID,
                "I am doing great! Just posted a new video.",
                "2024-01-15T14:15:00Z",
                true,
            ),
            message(
                "m3",
                "chat1",
                "2",
                "Hey! Did you see my latest video?",
                "2024-01-15T14:30:00Z",
                false,
            ),
        ];

        let notifications = vec![
            notification(
                "n1",
                NotificationKind::Like,
                "2",
                Some("v1"),
                "liked your video",
                "2024-01-15T15:00:00Z",
                false,
            ),
            notification(
                "n2",
                NotificationKind::Follow,
                "3",
                None,
                "started following you",
                "2024-01-15T14:30:00Z",
                false,
            ),
            notification(
                "n3",
                NotificationKind::Comment,
                "4",
                Some("v1"),
                "commented on your video",
                "2024-01-15T13:45:00Z",
                true,
            ),
            notification(
                "n4",
                NotificationKind::Mention,
                "5",
                Some("v2"),
                "mentioned you in a comment",
                "2024-01-15T12:00:00Z",
                true,
            ),
        ];

        let trending = [
            ("fyp", "2.3M"),
            ("viral", "1.8M"),
            ("elaschat", "890K"),
            ("funny", "567K"),
            ("music", "456K"),
            ("dance", "345K"),
            ("cooking", "234K"),
            ("travel", "189K"),
        ]
        .into_iter()
        .map(|(tag, count)| TrendingTag {
            tag: tag.to_string(),
            count: count.to_string(),
        })
        .collect();

        tracing::debug!(
            users = users.len(),
            videos = videos.len(),
            chats = chats.len(),
            "Mock catalogue built"
        );

        Self {
            users,
            videos,
            comments,
            chats,
            messages,
            notifications,
            trending,
        }
    }
}

// =============================================================================
// Seed builders
// =============================================================================

/// `counts` is `[followers, following, posts]`.
fn user(id: &str, username: &str, display_name: &str, bio: &str, counts: [u64; 3]) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        display_name: display_name.to_string(),
        bio: bio.to_string(),
        avatar_url: None,
        followers_count: counts[0],
        following_count: counts[1],
        posts_count: counts[2],
        is_following: None,
    }
}

/// `counts` is `[likes, comments, shares]`.
fn video(
    id: &str,
    user_id: &str,
    caption: &str,
    hashtags: &[&str],
    sound_title: &str,
    counts: [u64; 3],
    created_at: &str,
) -> Video {
    Video {
        id: id.to_string(),
        user_id: user_id.to_string(),
        video_url: String::new(),
        cover_url: String::new(),
        caption: caption.to_string(),
        hashtags: hashtags.iter().map(|t| t.to_string()).collect(),
        sound_title: sound_title.to_string(),
        likes_count: counts[0],
        comments_count: counts[1],
        shares_count: counts[2],
        created_at: created_at.to_string(),
        is_liked: false,
        is_saved: false,
    }
}

fn comment(
    id: &str,
    video_id: &str,
    user_id: &str,
    text: &str,
    likes_count: u64,
    created_at: &str,
) -> Comment {
    Comment {
        id: id.to_string(),
        video_id: video_id.to_string(),
        user_id: user_id.to_string(),
        text: text.to_string(),
        likes_count,
        created_at: created_at.to_string(),
        is_liked: false,
    }
}

fn chat(id: &str, participant_id: &str, last_message: &str, time: &str, unread: u32) -> Chat {
    Chat {
        id: id.to_string(),
        participant_id: participant_id.to_string(),
        last_message: last_message.to_string(),
        last_message_time: time.to_string(),
        unread_count: unread,
    }
}

fn message(id: &str, chat_id: &str, from: &str, text: &str, at: &str, is_read: bool) -> Message {
    Message {
        id: id.to_string(),
        chat_id: chat_id.to_string(),
        from_user_id: from.to_string(),
        text: text.to_string(),
        created_at: at.to_string(),
        is_read,
    }
}

fn notification(
    id: &str,
    kind: NotificationKind,
    user_id: &str,
    video_id: Option<&str>,
    message: &str,
    at: &str,
    is_read: bool,
) -> Notification {
    Notification {
        id: id.to_string(),
        kind,
        user_id: user_id.to_string(),
        video_id: video_id.map(str::to_string),
        message: message.to_string(),
        created_at: at.to_string(),
        is_read,
    }
}
