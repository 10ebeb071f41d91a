//! Typed records for the blog document.
//!
//! Field names match the persisted JSON layout, so files written by earlier
//! versions of the application load without conversion.

use std::collections::{BTreeSet, HashSet};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type PostId = u64;
pub type NotificationId = u64;

/// Local wall-clock time, the resolution the document stores.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub user_id: UserId,
    /// Author name at the time of posting; not rewritten on profile edits.
    pub username: String,
    pub content: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub liked_by: BTreeSet<UserId>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: NaiveDateTime,
}

impl Post {
    pub fn is_liked_by(&self, user_id: UserId) -> bool {
        self.liked_by.contains(&user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user_id: UserId,
    pub username: String,
    pub text: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub follower_id: UserId,
    pub following_id: UserId,
    pub followed_at: NaiveDateTime,
}

/// The whole persisted application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub current_user: User,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub follows: Vec<Follow>,
    /// Highest post id ever handed out. Deleted ids are never reissued.
    #[serde(default)]
    pub last_post_id: PostId,
}

impl Document {
    pub fn post(&self, post_id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.post_id == post_id)
    }

    pub fn post_mut(&mut self, post_id: PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.post_id == post_id)
    }

    /// Looks in the user list first, then falls back to `current_user`.
    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.user_id == user_id)
            .or_else(|| (self.current_user.user_id == user_id).then_some(&self.current_user))
    }

    /// Files written before `last_post_id` existed fall back to the highest
    /// stored id.
    pub fn next_post_id(&self) -> PostId {
        let highest = self.posts.iter().map(|p| p.post_id).max().unwrap_or(0);
        highest.max(self.last_post_id) + 1
    }

    pub fn next_user_id(&self) -> UserId {
        self.users
            .iter()
            .map(|u| u.user_id)
            .chain(std::iter::once(self.current_user.user_id))
            .max()
            .map_or(1, |max| max + 1)
    }

    pub fn next_notification_id(&self) -> NotificationId {
        self.notifications
            .iter()
            .map(|n| n.notification_id)
            .max()
            .map_or(1, |max| max + 1)
    }

    pub fn is_following(&self, follower_id: UserId, following_id: UserId) -> bool {
        self.follows
            .iter()
            .any(|f| f.follower_id == follower_id && f.following_id == following_id)
    }

    /// Structural checks serde cannot express. Returns a description of the
    /// first violation found.
    pub fn check_integrity(&self) -> Result<(), String> {
        first_duplicate(self.posts.iter().map(|p| p.post_id))
            .map_or(Ok(()), |id| Err(format!("duplicate post_id {id}")))?;
        first_duplicate(self.users.iter().map(|u| u.user_id))
            .map_or(Ok(()), |id| Err(format!("duplicate user_id {id}")))?;
        first_duplicate(self.notifications.iter().map(|n| n.notification_id))
            .map_or(Ok(()), |id| Err(format!("duplicate notification_id {id}")))?;
        Ok(())
    }
}

fn first_duplicate(ids: impl Iterator<Item = u64>) -> Option<u64> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
