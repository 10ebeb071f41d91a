//! Read-only views over a [`Document`] used to render the feed and profiles.

use std::cmp::Reverse;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::{Document, Notification, Post, User, UserId};

static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"));

/// Posts newest first; posts created in the same instant keep id order, highest first.
pub fn feed(doc: &Document) -> Vec<&Post> {
    let mut posts: Vec<&Post> = doc.posts.iter().collect();
    posts.sort_by_key(|p| Reverse((p.created_at, p.post_id)));
    posts
}

pub fn posts_by(doc: &Document, user_id: UserId) -> Vec<&Post> {
    feed(doc).into_iter().filter(|p| p.user_id == user_id).collect()
}

/// Hashtags in `content`, lowercased, in order of first appearance.
pub fn hashtags(content: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for capture in HASHTAG.captures_iter(content) {
        let tag = capture[1].to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Feed entries carrying `#tag`; the leading `#` is optional and case is ignored.
pub fn posts_tagged<'a>(doc: &'a Document, tag: &str) -> Vec<&'a Post> {
    let wanted = tag.trim_start_matches('#').to_lowercase();
    feed(doc)
        .into_iter()
        .filter(|p| hashtags(&p.content).contains(&wanted))
        .collect()
}

/// Aggregates shown on a profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub posts: usize,
    pub total_likes: u64,
    pub comments_received: usize,
    pub followers: usize,
    pub following: usize,
}

pub fn profile_stats(doc: &Document, user_id: UserId) -> ProfileStats {
    let own = doc.posts.iter().filter(|p| p.user_id == user_id);
    ProfileStats {
        posts: own.clone().count(),
        total_likes: own.clone().map(|p| p.likes).sum(),
        comments_received: own.map(|p| p.comments.len()).sum(),
        followers: doc.follows.iter().filter(|f| f.following_id == user_id).count(),
        following: doc.follows.iter().filter(|f| f.follower_id == user_id).count(),
    }
}

/// Other users whose username or email contains `query`, case-insensitively,
/// ordered by username. An empty query lists everyone else.
pub fn search_users<'a>(doc: &'a Document, query: &str) -> Vec<&'a User> {
    let needle = query.trim().to_lowercase();
    let mut users: Vec<&User> = doc
        .users
        .iter()
        .filter(|u| u.user_id != doc.current_user.user_id)
        .filter(|u| {
            needle.is_empty() || u.username.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
        })
        .collect();
    users.sort_by_key(|u| u.username.to_lowercase());
    users
}

/// Every known account ordered by id, the active user included.
pub fn all_users(doc: &Document) -> Vec<&User> {
    let mut users: Vec<&User> = doc.users.iter().collect();
    if !users.iter().any(|u| u.user_id == doc.current_user.user_id) {
        users.push(&doc.current_user);
    }
    users.sort_by_key(|u| u.user_id);
    users
}

/// Notifications addressed to `user_id`, newest first.
pub fn notifications_for(doc: &Document, user_id: UserId) -> Vec<&Notification> {
    let mut notifications: Vec<&Notification> = doc.notifications.iter().filter(|n| n.user_id == user_id).collect();
    notifications.sort_by_key(|n| Reverse((n.created_at, n.notification_id)));
    notifications
}

pub fn unread_count(doc: &Document, user_id: UserId) -> usize {
    doc.notifications
        .iter()
        .filter(|n| n.user_id == user_id && !n.is_read)
        .count()
}
