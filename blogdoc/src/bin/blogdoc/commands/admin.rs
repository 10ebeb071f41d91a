use anyhow::Result;
use clap::Subcommand;

use blogdoc::queries::{all_users, feed};
use blogdoc::{admin_delete_post, admin_delete_user};

use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::{AccountList, FeedView};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Inspect",
        commands: &[
            "blogdoc admin users                      # Every account with its totals",
            "blogdoc admin posts                      # Every post, newest first",
        ],
    },
    ExampleGroup {
        title: "Moderate",
        commands: &[
            "blogdoc admin delete-post 7              # Remove any user's post",
            "blogdoc admin delete-user 3              # Remove a user and their activity",
        ],
    },
];

#[derive(Subcommand)]
pub enum AdminCommands {
    /// List every account with post, like, and follow totals
    #[command(name = "users")]
    Users,

    /// List every post regardless of author
    #[command(name = "posts")]
    Posts,

    /// Remove a user with their posts, comments, likes, follows, and notifications
    #[command(name = "delete-user")]
    DeleteUser { user_id: u64 },

    /// Remove a post regardless of author
    #[command(name = "delete-post")]
    DeletePost { post_id: u64 },
}

pub fn handle_admin_commands(command: AdminCommands, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    match command {
        AdminCommands::Users => {
            let doc = ctx.store.load()?;
            output.display(&AccountList::new(&doc, all_users(&doc)))
        }
        AdminCommands::Posts => {
            let doc = ctx.store.load()?;
            output.display(&FeedView::new(feed(&doc), doc.current_user.user_id))
        }
        AdminCommands::DeleteUser { user_id } => {
            let (_, removed) = ctx.store.update(|doc| admin_delete_user(doc, user_id))?;
            output.success(&format!("Removed @{} (user {user_id})", removed.user.username));
            output.bullet(&format!("{} post(s), {} comment(s), {} like(s)", removed.posts, removed.comments, removed.likes));
            output.bullet(&format!("{} follow(s), {} notification(s)", removed.follows, removed.notifications));
            Ok(())
        }
        AdminCommands::DeletePost { post_id } => {
            let (_, removed) = ctx.store.update(|doc| admin_delete_post(doc, post_id))?;
            output.success(&format!("Post {post_id} by @{} removed", removed.username));
            Ok(())
        }
    }
}
