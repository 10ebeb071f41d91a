use anyhow::Result;
use clap::Subcommand;

use blogdoc::queries::search_users;
use blogdoc::{FollowOutcome, StoreError, register_user, switch_user, toggle_follow, update_bio};

use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::{ProfileView, UserList};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Profile",
        commands: &[
            "blogdoc user profile                     # Your profile and stats",
            "blogdoc user profile 2                   # Someone else's profile",
            "blogdoc user bio \"Sharing moments\"       # Update your bio",
        ],
    },
    ExampleGroup {
        title: "Accounts",
        commands: &[
            "blogdoc user register friend1 friend1@example.com",
            "blogdoc user switch 2                    # Act as user 2",
        ],
    },
    ExampleGroup {
        title: "Social",
        commands: &[
            "blogdoc user search fri                  # Find users by name or email",
            "blogdoc user follow 2                    # Follow or unfollow user 2",
        ],
    },
];

#[derive(Subcommand)]
pub enum UserCommands {
    /// Show a profile with post and like totals
    #[command(name = "profile")]
    Profile {
        /// User id (defaults to the current user)
        user_id: Option<u64>,
    },

    /// Set your bio; pass an empty string to clear it
    #[command(name = "bio")]
    Bio { text: String },

    /// Add a new user account
    #[command(name = "register")]
    Register {
        username: String,
        email: String,

        /// Optional profile bio
        #[arg(long)]
        bio: Option<String>,
    },

    /// Act as a different existing user
    #[command(name = "switch")]
    Switch { user_id: u64 },

    /// Follow a user, or unfollow when already following
    #[command(name = "follow")]
    Follow { user_id: u64 },

    /// Search other users by username or email
    #[command(name = "search")]
    Search {
        /// Text to match; lists everyone when omitted
        query: Option<String>,
    },
}

pub fn handle_user_commands(command: UserCommands, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    match command {
        UserCommands::Profile { user_id } => {
            let doc = ctx.store.load()?;
            let user_id = user_id.unwrap_or(doc.current_user.user_id);
            let user = doc.user(user_id).ok_or(StoreError::NotFound { entity: "user", id: user_id })?;
            output.display(&ProfileView::new(&doc, user))
        }
        UserCommands::Bio { text } => {
            ctx.store.update(|doc| {
                let me = doc.current_user.user_id;
                update_bio(doc, me, &text)
            })?;
            output.success("Bio updated");
            Ok(())
        }
        UserCommands::Register { username, email, bio } => {
            let (_, user_id) = ctx
                .store
                .update(|doc| register_user(doc, &username, &email, bio.as_deref()))?;
            output.success(&format!("Registered @{} as user {user_id}", username.trim()));
            output.info(&format!("Run 'blogdoc user switch {user_id}' to act as this user."));
            Ok(())
        }
        UserCommands::Switch { user_id } => {
            let (doc, ()) = ctx.store.update(|doc| switch_user(doc, user_id))?;
            output.success(&format!("Now acting as @{}", doc.current_user.username));
            Ok(())
        }
        UserCommands::Follow { user_id } => {
            let (doc, outcome) = ctx.store.update(|doc| {
                let me = doc.current_user.user_id;
                toggle_follow(doc, me, user_id)
            })?;
            let name = doc.user(user_id).map_or_else(|| user_id.to_string(), |u| u.username.clone());
            match outcome {
                FollowOutcome::Followed => output.success(&format!("Following @{name}")),
                FollowOutcome::Unfollowed => output.info(&format!("Unfollowed @{name}")),
            }
            Ok(())
        }
        UserCommands::Search { query } => {
            let doc = ctx.store.load()?;
            let users = search_users(&doc, query.as_deref().unwrap_or(""));
            output.display(&UserList::new(&doc, users))
        }
    }
}
