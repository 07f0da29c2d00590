// ElasChat - app/discover.rs
//
// Screen-level searches: the discover tab (videos and users) and the
// messages tab (chats). Each is a `core::filter` search with the fields
// that screen matches on.

use crate::core::catalog::Catalog;
use crate::core::filter::{filter_records, Field};
use crate::core::model::{Chat, User, Video};

fn caption(v: &Video) -> &str {
    &v.caption
}

fn hashtags(v: &Video) -> &[String] {
    &v.hashtags
}

fn username(u: &User) -> &str {
    &u.username
}

fn display_name(u: &User) -> &str {
    &u.display_name
}

/// Fields the discover tab matches videos on.
pub fn video_fields() -> [Field<'static, Video>; 2] {
    [Field::Text(caption), Field::List(hashtags)]
}

/// Fields the discover tab matches users on.
pub fn user_fields() -> [Field<'static, User>; 2] {
    [Field::Text(username), Field::Text(display_name)]
}

/// Videos whose caption or any hashtag contains `query`.
pub fn search_videos<'c>(catalog: &'c Catalog, query: &str) -> Vec<&'c Video> {
    let found = filter_records(&catalog.videos, query, &video_fields());
    tracing::debug!(query, matches = found.len(), "Video search");
    found
}

/// Users whose handle or display name contains `query`.
///
/// The people list only shows while searching, so an empty query finds
/// nobody.
pub fn search_users<'c>(catalog: &'c Catalog, query: &str) -> Vec<&'c User> {
    if query.is_empty() {
        return Vec::new();
    }

    let found = filter_records(&catalog.users, query, &user_fields());
    tracing::debug!(query, matches = found.len(), "User search");
    found
}

/// Chats whose participant's display name or handle contains `query`.
///
/// Chats whose participant is not in the catalogue never match a non-empty
/// query.
pub fn search_chats<'c>(catalog: &'c Catalog, query: &str) -> Vec<&'c Chat> {
    let participant = |chat: &Chat| catalog.user(&chat.participant_id);
    let display_name = |chat: &Chat| {
        participant(chat)
            .map(|u| u.display_name.clone())
            .unwrap_or_default()
    };
    let username = |chat: &Chat| {
        participant(chat)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    };

    let fields: [Field<Chat>; 2] = [Field::Derived(&display_name), Field::Derived(&username)];
    let found = filter_records(&catalog.chats, query, &fields);
    tracing::debug!(query, matches = found.len(), "Chat search");
    found
}
