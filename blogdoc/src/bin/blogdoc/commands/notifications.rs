use anyhow::Result;
use clap::Subcommand;

use blogdoc::mark_notification_read;

use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::NotificationList;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Notifications",
    commands: &[
        "blogdoc notifications list               # Newest first, unread marked",
        "blogdoc notifications read 3             # Mark notification 3 as read",
    ],
}];

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List your notifications
    #[command(name = "list")]
    List,

    /// Mark a notification as read
    #[command(name = "read")]
    Read { notification_id: u64 },
}

pub fn handle_notification_commands(
    command: NotificationCommands,
    ctx: &AppContext,
    output: &OutputManager,
) -> Result<()> {
    match command {
        NotificationCommands::List => {
            let doc = ctx.store.load()?;
            let view = NotificationList::new(&doc, doc.current_user.user_id);
            output.heading(&format!("Notifications ({} unread)", view.unread));
            output.display(&view)
        }
        NotificationCommands::Read { notification_id } => {
            ctx.store.update(|doc| {
                let me = doc.current_user.user_id;
                mark_notification_read(doc, me, notification_id)
            })?;
            output.success(&format!("Notification {notification_id} marked as read"));
            Ok(())
        }
    }
}
