//! Serializable views rendered by the output manager.

use blogdoc::queries::{hashtags, notifications_for, profile_stats, unread_count};
use blogdoc::{Comment, Document, Notification, Post, ProfileStats, User, UserId};
use chrono::NaiveDateTime;
use comfy_table::{Cell, Color as TableColor, Table};
use serde::Serialize;

use crate::output::{OutputManager, TableDisplay};
use crate::theme::ICONS;

/// Format a stored timestamp for display
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[derive(Serialize)]
pub struct PostRow {
    pub post_id: u64,
    pub username: String,
    pub content: String,
    pub image_path: Option<String>,
    pub likes: u64,
    pub liked: bool,
    pub comments: usize,
    pub tags: Vec<String>,
    pub created_at: NaiveDateTime,
}

impl PostRow {
    pub fn new(post: &Post, viewer: UserId) -> Self {
        Self {
            post_id: post.post_id,
            username: post.username.clone(),
            content: post.content.clone(),
            image_path: post.image_path.clone(),
            likes: post.likes,
            liked: post.is_liked_by(viewer),
            comments: post.comments.len(),
            tags: hashtags(&post.content),
            created_at: post.created_at,
        }
    }

    fn likes_label(&self) -> String {
        let marker = if self.liked { " (you)" } else { "" };
        format!("{} {}{marker}", ICONS.heart, self.likes)
    }
}

#[derive(Serialize)]
pub struct FeedView {
    pub posts: Vec<PostRow>,
}

impl FeedView {
    pub fn new<'a>(posts: impl IntoIterator<Item = &'a Post>, viewer: UserId) -> Self {
        Self {
            posts: posts.into_iter().map(|p| PostRow::new(p, viewer)).collect(),
        }
    }
}

impl TableDisplay for FeedView {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        if self.posts.is_empty() {
            table.add_row(vec![Cell::new("No posts yet. Create your first post!")]);
            return table;
        }

        output.add_table_header(&mut table, &["ID", "Author", "Post", "Likes", "Comments", "Posted"]);
        for row in &self.posts {
            let mut content = shorten(&row.content, 60);
            if row.image_path.is_some() {
                content = format!("{} {content}", ICONS.image);
            }
            table.add_row(vec![
                Cell::new(row.post_id),
                output.tinted(format!("@{}", row.username), TableColor::Magenta),
                Cell::new(content),
                output.tinted(row.likes_label(), TableColor::Red),
                output.tinted(format!("{} {}", ICONS.comment, row.comments), TableColor::Blue),
                Cell::new(format_datetime(row.created_at)),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.posts
            .iter()
            .map(|p| format!("#{} @{} likes={} comments={}", p.post_id, p.username, p.likes, p.comments))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostRow,
    pub comment_list: Vec<Comment>,
}

impl PostDetail {
    pub fn new(post: &Post, viewer: UserId) -> Self {
        Self {
            summary: PostRow::new(post, viewer),
            comment_list: post.comments.clone(),
        }
    }
}

impl TableDisplay for PostDetail {
    fn to_table(&self, output: &OutputManager) -> Table {
        let post = &self.summary;
        let mut table = output.create_table();
        table.add_row(vec![Cell::new("Post"), Cell::new(post.post_id)]);
        table.add_row(vec![
            Cell::new("Author"),
            output.tinted(format!("@{}", post.username), TableColor::Magenta),
        ]);
        table.add_row(vec![Cell::new("Content"), Cell::new(&post.content)]);
        if let Some(image) = &post.image_path {
            table.add_row(vec![Cell::new("Image"), Cell::new(image)]);
        }
        table.add_row(vec![Cell::new("Likes"), output.tinted(post.likes_label(), TableColor::Red)]);
        table.add_row(vec![Cell::new("Posted"), Cell::new(format_datetime(post.created_at))]);

        if self.comment_list.is_empty() {
            table.add_row(vec![Cell::new("Comments"), Cell::new("No comments yet.")]);
        }
        for comment in &self.comment_list {
            table.add_row(vec![
                output.tinted(format!("@{}", comment.username), TableColor::Blue),
                Cell::new(format!("{}  ({})", comment.text, format_datetime(comment.created_at))),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        format!(
            "#{} @{} likes={} comments={}: {}",
            self.summary.post_id,
            self.summary.username,
            self.summary.likes,
            self.comment_list.len(),
            self.summary.content
        )
    }
}

#[derive(Serialize)]
pub struct ProfileView {
    pub user: User,
    pub stats: ProfileStats,
    pub is_current_user: bool,
    pub followed_by_you: bool,
}

impl ProfileView {
    pub fn new(doc: &Document, user: &User) -> Self {
        let me = doc.current_user.user_id;
        Self {
            user: user.clone(),
            stats: profile_stats(doc, user.user_id),
            is_current_user: user.user_id == me,
            followed_by_you: doc.is_following(me, user.user_id),
        }
    }
}

impl TableDisplay for ProfileView {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        let mut name = format!("@{}", self.user.username);
        if self.is_current_user {
            name.push_str(" (you)");
        } else if self.followed_by_you {
            name.push_str(" (following)");
        }
        table.add_row(vec![Cell::new("User"), output.tinted(name, TableColor::Magenta)]);
        table.add_row(vec![Cell::new("ID"), Cell::new(self.user.user_id)]);
        table.add_row(vec![Cell::new("Email"), Cell::new(&self.user.email)]);
        table.add_row(vec![
            Cell::new("Bio"),
            Cell::new(self.user.bio.as_deref().unwrap_or("No bio set.")),
        ]);
        table.add_row(vec![Cell::new("Joined"), Cell::new(format_datetime(self.user.created_at))]);
        table.add_row(vec![Cell::new("Posts"), Cell::new(self.stats.posts)]);
        table.add_row(vec![
            Cell::new("Total Likes"),
            output.tinted(self.stats.total_likes, TableColor::Red),
        ]);
        table.add_row(vec![Cell::new("Comments"), Cell::new(self.stats.comments_received)]);
        table.add_row(vec![Cell::new("Followers"), Cell::new(self.stats.followers)]);
        table.add_row(vec![Cell::new("Following"), Cell::new(self.stats.following)]);
        table
    }

    fn to_compact(&self) -> String {
        format!(
            "@{} posts={} likes={} followers={} following={}",
            self.user.username, self.stats.posts, self.stats.total_likes, self.stats.followers, self.stats.following
        )
    }
}

#[derive(Serialize)]
pub struct UserRow {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub following: bool,
}

#[derive(Serialize)]
pub struct UserList {
    pub users: Vec<UserRow>,
}

impl UserList {
    pub fn new<'a>(doc: &Document, users: impl IntoIterator<Item = &'a User>) -> Self {
        let me = doc.current_user.user_id;
        Self {
            users: users
                .into_iter()
                .map(|u| UserRow {
                    user_id: u.user_id,
                    username: u.username.clone(),
                    email: u.email.clone(),
                    bio: u.bio.clone(),
                    following: doc.is_following(me, u.user_id),
                })
                .collect(),
        }
    }
}

impl TableDisplay for UserList {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        if self.users.is_empty() {
            table.add_row(vec![Cell::new("No users found")]);
            return table;
        }
        output.add_table_header(&mut table, &["ID", "Username", "Email", "Bio", "Following"]);
        for user in &self.users {
            table.add_row(vec![
                Cell::new(user.user_id),
                output.tinted(format!("@{}", user.username), TableColor::Magenta),
                Cell::new(&user.email),
                Cell::new(shorten(user.bio.as_deref().unwrap_or(""), 40)),
                Cell::new(if user.following { ICONS.success } else { "" }),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.users
            .iter()
            .map(|u| format!("{} @{}", u.user_id, u.username))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize)]
pub struct AccountRow {
    pub user: User,
    pub stats: ProfileStats,
}

/// Every account with its totals, for moderation.
#[derive(Serialize)]
pub struct AccountList {
    pub accounts: Vec<AccountRow>,
}

impl AccountList {
    pub fn new<'a>(doc: &Document, users: impl IntoIterator<Item = &'a User>) -> Self {
        Self {
            accounts: users
                .into_iter()
                .map(|u| AccountRow {
                    user: u.clone(),
                    stats: profile_stats(doc, u.user_id),
                })
                .collect(),
        }
    }
}

impl TableDisplay for AccountList {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(
            &mut table,
            &["ID", "Username", "Email", "Posts", "Likes", "Followers", "Following", "Joined"],
        );
        for AccountRow { user, stats } in &self.accounts {
            table.add_row(vec![
                Cell::new(user.user_id),
                output.tinted(format!("@{}", user.username), TableColor::Magenta),
                Cell::new(&user.email),
                Cell::new(stats.posts),
                output.tinted(stats.total_likes, TableColor::Red),
                Cell::new(stats.followers),
                Cell::new(stats.following),
                Cell::new(format_datetime(user.created_at)),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.accounts
            .iter()
            .map(|a| {
                let AccountRow { user, stats } = a;
                format!("{} @{} posts={} likes={}", user.user_id, user.username, stats.posts, stats.total_likes)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize)]
pub struct NotificationList {
    pub unread: usize,
    pub notifications: Vec<Notification>,
}

impl NotificationList {
    pub fn new(doc: &Document, user_id: UserId) -> Self {
        Self {
            unread: unread_count(doc, user_id),
            notifications: notifications_for(doc, user_id).into_iter().cloned().collect(),
        }
    }
}

impl TableDisplay for NotificationList {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        if self.notifications.is_empty() {
            table.add_row(vec![Cell::new("No notifications")]);
            return table;
        }
        output.add_table_header(&mut table, &["ID", "", "Message", "When"]);
        for notification in &self.notifications {
            let marker = if notification.is_read {
                Cell::new("")
            } else {
                output.tinted(ICONS.unread, TableColor::Cyan)
            };
            table.add_row(vec![
                Cell::new(notification.notification_id),
                marker,
                Cell::new(&notification.message),
                Cell::new(format_datetime(notification.created_at)),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        format!("unread={} total={}", self.unread, self.notifications.len())
    }
}
