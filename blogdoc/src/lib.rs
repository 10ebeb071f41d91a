//! blogdoc core library.
//!
//! A single-user blogging feed persisted as one JSON document: typed records,
//! a file-backed [`DocumentStore`], and the mutations and queries the
//! presentation layer runs against a loaded [`Document`].

pub mod config;
pub mod errors;
pub mod images;
pub mod model;
pub mod mutations;
pub mod queries;
pub mod seed;
pub mod store;
pub mod validators;

pub use config::StoreConfig;
pub use errors::*;
pub use model::{Comment, Document, Follow, Notification, NotificationId, Post, PostId, User, UserId};
pub use mutations::{
    FollowOutcome, LikeOutcome, RemovedUser, add_comment, admin_delete_post, admin_delete_user, create_post,
    delete_post, edit_post, mark_notification_read, register_user, switch_user, toggle_follow, toggle_like,
    update_bio,
};
pub use queries::ProfileStats;
pub use seed::default_document;
pub use store::DocumentStore;
