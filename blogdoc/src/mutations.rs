//! In-memory mutations on a [`Document`].
//!
//! None of these touch the disk; the caller persists the result with
//! [`DocumentStore::save`](crate::store::DocumentStore::save). Each function
//! validates its inputs before changing anything, so an `Err` always leaves
//! the document as it was.

use log::debug;

use crate::errors::{StoreError, StoreResult, ValidationError, ValidationIssue};
use crate::model::{Comment, Document, Follow, Notification, NotificationId, Post, PostId, User, UserId, now};
use crate::validators::{is_valid_email, required_text, username_issue};

/// What a like toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    Unliked,
}

/// What a follow toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    Unfollowed,
}

/// What an account removal took with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedUser {
    pub user: User,
    pub posts: usize,
    pub comments: usize,
    pub likes: usize,
    pub follows: usize,
    pub notifications: usize,
}

/// Inserts a new post at the head of the feed and returns its id.
pub fn create_post(
    doc: &mut Document,
    user_id: UserId,
    username: &str,
    content: &str,
    image_path: Option<String>,
) -> StoreResult<PostId> {
    let content = required_text("content", content)?;
    let post_id = doc.next_post_id();
    doc.last_post_id = post_id;
    doc.posts.insert(
        0,
        Post {
            post_id,
            user_id,
            username: username.to_string(),
            content,
            image_path,
            likes: 0,
            liked_by: Default::default(),
            comments: Vec::new(),
            created_at: now(),
        },
    );
    debug!("created post {post_id} for user {user_id}");
    Ok(post_id)
}

/// Adds or removes `user_id` from the post's liker set, moving the like
/// count with it. The count never drops below zero.
pub fn toggle_like(doc: &mut Document, post_id: PostId, user_id: UserId) -> StoreResult<LikeOutcome> {
    let post = doc.post_mut(post_id).ok_or_else(|| StoreError::post_not_found(post_id))?;

    if post.liked_by.remove(&user_id) {
        post.likes = post.likes.saturating_sub(1);
        return Ok(LikeOutcome::Unliked);
    }

    post.liked_by.insert(user_id);
    post.likes += 1;
    let author = post.user_id;
    if author != user_id {
        let message = format!("{} liked your post", display_name(doc, user_id));
        push_notification(doc, author, message);
    }
    Ok(LikeOutcome::Liked)
}

/// Appends a comment to the post's thread.
pub fn add_comment(
    doc: &mut Document,
    post_id: PostId,
    user_id: UserId,
    username: &str,
    text: &str,
) -> StoreResult<()> {
    let text = required_text("text", text)?;
    let post = doc.post_mut(post_id).ok_or_else(|| StoreError::post_not_found(post_id))?;

    post.comments.push(Comment {
        user_id,
        username: username.to_string(),
        text,
        created_at: now(),
    });

    let author = post.user_id;
    if author != user_id {
        push_notification(doc, author, format!("{username} commented on your post"));
    }
    Ok(())
}

/// Replaces the content of a post owned by `user_id`.
///
/// A post owned by someone else is reported as not found.
pub fn edit_post(doc: &mut Document, post_id: PostId, user_id: UserId, content: &str) -> StoreResult<()> {
    let content = required_text("content", content)?;
    let post = doc
        .posts
        .iter_mut()
        .find(|p| p.post_id == post_id && p.user_id == user_id)
        .ok_or_else(|| StoreError::post_not_found(post_id))?;
    post.content = content;
    Ok(())
}

/// Removes a post owned by `user_id` together with its comments and likes.
pub fn delete_post(doc: &mut Document, post_id: PostId, user_id: UserId) -> StoreResult<Post> {
    let index = doc
        .posts
        .iter()
        .position(|p| p.post_id == post_id && p.user_id == user_id)
        .ok_or_else(|| StoreError::post_not_found(post_id))?;
    Ok(doc.posts.remove(index))
}

/// Removes any post regardless of author.
pub fn admin_delete_post(doc: &mut Document, post_id: PostId) -> StoreResult<Post> {
    let index = doc
        .posts
        .iter()
        .position(|p| p.post_id == post_id)
        .ok_or_else(|| StoreError::post_not_found(post_id))?;
    let post = doc.posts.remove(index);
    debug!("admin removed post {post_id} by user {}", post.user_id);
    Ok(post)
}

/// Removes a user and everything that points at them: their posts, the
/// comments and likes they left on other posts, follows in both directions,
/// and notifications addressed to them.
///
/// The active user cannot be removed.
pub fn admin_delete_user(doc: &mut Document, user_id: UserId) -> StoreResult<RemovedUser> {
    if doc.current_user.user_id == user_id {
        return Err(ValidationError::single("user_id", "active_user", "cannot remove the active user").into());
    }
    let index = doc
        .users
        .iter()
        .position(|u| u.user_id == user_id)
        .ok_or_else(|| StoreError::user_not_found(user_id))?;
    let user = doc.users.remove(index);

    let before = doc.posts.len();
    doc.posts.retain(|p| p.user_id != user_id);
    let posts = before - doc.posts.len();

    let (mut comments, mut likes) = (0, 0);
    for post in &mut doc.posts {
        let before = post.comments.len();
        post.comments.retain(|c| c.user_id != user_id);
        comments += before - post.comments.len();
        if post.liked_by.remove(&user_id) {
            post.likes = post.likes.saturating_sub(1);
            likes += 1;
        }
    }

    let before = doc.follows.len();
    doc.follows.retain(|f| f.follower_id != user_id && f.following_id != user_id);
    let follows = before - doc.follows.len();

    let before = doc.notifications.len();
    doc.notifications.retain(|n| n.user_id != user_id);
    let notifications = before - doc.notifications.len();

    debug!("admin removed user {user_id} with {posts} posts and {comments} comments");
    Ok(RemovedUser {
        user,
        posts,
        comments,
        likes,
        follows,
        notifications,
    })
}

/// Sets or clears (empty input) a user's bio.
///
/// Keeps `current_user` in step when it is the edited user.
pub fn update_bio(doc: &mut Document, user_id: UserId, bio: &str) -> StoreResult<()> {
    let bio = Some(bio.trim()).filter(|b| !b.is_empty()).map(str::to_string);

    let in_list = doc.users.iter_mut().find(|u| u.user_id == user_id);
    let is_current = doc.current_user.user_id == user_id;
    if in_list.is_none() && !is_current {
        return Err(StoreError::user_not_found(user_id));
    }

    if let Some(user) = in_list {
        user.bio = bio.clone();
    }
    if is_current {
        doc.current_user.bio = bio;
    }
    Ok(())
}

/// Adds a user with a unique username and email and returns the new id.
pub fn register_user(doc: &mut Document, username: &str, email: &str, bio: Option<&str>) -> StoreResult<UserId> {
    let username = username.trim();
    let email = email.trim();

    let mut issues = Vec::new();
    issues.extend(username_issue(username));
    if !is_valid_email(email) {
        issues.push(ValidationIssue::new("email", "email", "is not a valid address"));
    }

    let mut known = doc.users.iter().chain(std::iter::once(&doc.current_user));
    if known.clone().any(|u| u.username.eq_ignore_ascii_case(username)) {
        issues.push(ValidationIssue::new("username", "unique", "is already taken"));
    }
    if known.any(|u| u.email.eq_ignore_ascii_case(email)) {
        issues.push(ValidationIssue::new("email", "unique", "is already registered"));
    }

    if !issues.is_empty() {
        return Err(ValidationError::new(issues).into());
    }

    let user_id = doc.next_user_id();
    doc.users.push(User {
        user_id,
        username: username.to_string(),
        email: email.to_string(),
        bio: bio.map(str::trim).filter(|b| !b.is_empty()).map(str::to_string),
        created_at: now(),
    });
    debug!("registered user {user_id} ({username})");
    Ok(user_id)
}

/// Makes an existing user the one actions are performed as.
pub fn switch_user(doc: &mut Document, user_id: UserId) -> StoreResult<()> {
    let user = doc.user(user_id).cloned().ok_or_else(|| StoreError::user_not_found(user_id))?;
    doc.current_user = user;
    Ok(())
}

/// Follows `following_id`, or unfollows when already following.
pub fn toggle_follow(doc: &mut Document, follower_id: UserId, following_id: UserId) -> StoreResult<FollowOutcome> {
    if follower_id == following_id {
        return Err(ValidationError::single("following_id", "self_follow", "users cannot follow themselves").into());
    }
    if doc.user(following_id).is_none() {
        return Err(StoreError::user_not_found(following_id));
    }

    let before = doc.follows.len();
    doc.follows
        .retain(|f| !(f.follower_id == follower_id && f.following_id == following_id));
    if doc.follows.len() != before {
        return Ok(FollowOutcome::Unfollowed);
    }

    doc.follows.push(Follow {
        follower_id,
        following_id,
        followed_at: now(),
    });
    let message = format!("{} started following you", display_name(doc, follower_id));
    push_notification(doc, following_id, message);
    Ok(FollowOutcome::Followed)
}

/// Marks one of `user_id`'s notifications as read.
pub fn mark_notification_read(doc: &mut Document, user_id: UserId, notification_id: NotificationId) -> StoreResult<()> {
    let notification = doc
        .notifications
        .iter_mut()
        .find(|n| n.notification_id == notification_id && n.user_id == user_id)
        .ok_or(StoreError::NotFound {
            entity: "notification",
            id: notification_id,
        })?;
    notification.is_read = true;
    Ok(())
}

fn push_notification(doc: &mut Document, recipient: UserId, message: String) {
    let notification_id = doc.next_notification_id();
    doc.notifications.push(Notification {
        notification_id,
        user_id: recipient,
        message,
        is_read: false,
        created_at: now(),
    });
}

fn display_name(doc: &Document, user_id: UserId) -> String {
    doc.user(user_id)
        .map(|u| u.username.clone())
        .unwrap_or_else(|| format!("user #{user_id}"))
}
