use anyhow::Result;
use clap::Args;

use blogdoc::queries::{feed, posts_by, posts_tagged};

use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::FeedView;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Browse",
        commands: &[
            "blogdoc feed                      # All posts, newest first",
            "blogdoc feed --user 1             # Posts by user 1",
            "blogdoc feed --tag sunset         # Posts tagged #sunset",
        ],
    },
    ExampleGroup {
        title: "Scripting",
        commands: &["blogdoc --output json feed      # Feed as JSON"],
    },
];

#[derive(Args)]
pub struct FeedArgs {
    /// Only posts carrying this hashtag
    #[arg(long, conflicts_with = "user")]
    pub tag: Option<String>,

    /// Only posts by this user id
    #[arg(long)]
    pub user: Option<u64>,
}

pub fn handle_feed(args: FeedArgs, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let doc = ctx.store.load()?;
    let viewer = doc.current_user.user_id;

    let posts = match (&args.tag, args.user) {
        (Some(tag), _) => posts_tagged(&doc, tag),
        (None, Some(user_id)) => posts_by(&doc, user_id),
        (None, None) => feed(&doc),
    };
    output.verbose(&format!("{} post(s) loaded from {}", posts.len(), ctx.store.data_file().display()));

    output.heading(&format!("Feed for @{}", doc.current_user.username));
    output.display(&FeedView::new(posts, viewer))
}
