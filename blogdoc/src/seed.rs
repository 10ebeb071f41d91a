//! Sample content written on first run.

use crate::model::{Comment, Document, Post, User, now};

const SEED_USERNAME: &str = "harini";
const SEED_EMAIL: &str = "harini@example.com";
const SEED_BIO: &str = "Welcome to my blog! ✨ Sharing moments and thoughts.";

/// One user, three posts with pre-set like counts, no notifications.
pub fn default_document() -> Document {
    let created_at = now();
    let user = User {
        user_id: 1,
        username: SEED_USERNAME.to_string(),
        email: SEED_EMAIL.to_string(),
        bio: Some(SEED_BIO.to_string()),
        created_at,
    };

    let comment = |user_id, username: &str, text: &str| Comment {
        user_id,
        username: username.to_string(),
        text: text.to_string(),
        created_at,
    };
    let post = |post_id, content: &str, likes, comments| Post {
        post_id,
        user_id: user.user_id,
        username: user.username.clone(),
        content: content.to_string(),
        image_path: None,
        likes,
        liked_by: Default::default(),
        comments,
        created_at,
    };

    let posts = vec![
        post(
            1,
            "Beautiful sunset at the beach! 🌅 #sunset #beach #nature",
            42,
            vec![
                comment(2, "friend1", "Amazing shot!"),
                comment(3, "friend2", "Love this! ❤️"),
            ],
        ),
        post(
            2,
            "Coffee and coding ☕💻 Perfect morning vibes!",
            28,
            vec![comment(2, "friend1", "Same here!")],
        ),
        post(3, "New project coming soon! Stay tuned 🚀 #coding #project", 35, Vec::new()),
    ];

    Document {
        current_user: user.clone(),
        posts,
        users: vec![user],
        notifications: Vec::new(),
        follows: Vec::new(),
        last_post_id: 0,
    }
}
