use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use blogdoc::images::with_stored_image;
use blogdoc::validators::required_text;
use blogdoc::{LikeOutcome, StoreError, add_comment, create_post, delete_post, edit_post, toggle_like};

use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::views::PostDetail;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Publish",
        commands: &[
            "blogdoc post create \"Coffee and coding\"                 # Text post",
            "blogdoc post create \"Sunset #beach\" --image ~/sun.jpg   # Post with an image",
        ],
    },
    ExampleGroup {
        title: "Engage",
        commands: &[
            "blogdoc post like 2                      # Like or unlike post 2",
            "blogdoc post comment 2 \"Same here!\"      # Comment on post 2",
            "blogdoc post show 2                      # Post with its comments",
        ],
    },
    ExampleGroup {
        title: "Manage",
        commands: &[
            "blogdoc post edit 4 \"Fixed typo\"         # Edit your own post",
            "blogdoc post delete 4                    # Delete your own post",
        ],
    },
];

#[derive(Subcommand)]
pub enum PostCommands {
    /// Publish a new post as the current user
    #[command(name = "create")]
    Create {
        /// Post caption
        content: String,

        /// Image to attach; copied into the images directory
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Show a post and its comments
    #[command(name = "show")]
    Show { post_id: u64 },

    /// Replace the caption of one of your posts
    #[command(name = "edit")]
    Edit { post_id: u64, content: String },

    /// Delete one of your posts with its comments and likes
    #[command(name = "delete")]
    Delete { post_id: u64 },

    /// Like a post, or remove your like
    #[command(name = "like")]
    Like { post_id: u64 },

    /// Comment on a post
    #[command(name = "comment")]
    Comment { post_id: u64, text: String },
}

pub fn handle_post_commands(command: PostCommands, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    match command {
        PostCommands::Create { content, image } => handle_create(ctx, &content, image, output),
        PostCommands::Show { post_id } => handle_show(ctx, post_id, output),
        PostCommands::Edit { post_id, content } => {
            ctx.store
                .update(|doc| {
                    let me = doc.current_user.user_id;
                    edit_post(doc, post_id, me, &content)
                })
                .map_err(|err| owned_post_error(err, post_id))?;
            output.success(&format!("Post {post_id} updated"));
            Ok(())
        }
        PostCommands::Delete { post_id } => {
            let (_, removed) = ctx
                .store
                .update(|doc| {
                    let me = doc.current_user.user_id;
                    delete_post(doc, post_id, me)
                })
                .map_err(|err| owned_post_error(err, post_id))?;
            output.success(&format!(
                "Post {post_id} deleted with {} comment(s)",
                removed.comments.len()
            ));
            Ok(())
        }
        PostCommands::Like { post_id } => {
            let (doc, outcome) = ctx.store.update(|doc| {
                let me = doc.current_user.user_id;
                toggle_like(doc, post_id, me)
            })?;
            let likes = doc.post(post_id).map_or(0, |p| p.likes);
            match outcome {
                LikeOutcome::Liked => output.success(&format!("Liked post {post_id} ({likes} likes)")),
                LikeOutcome::Unliked => output.info(&format!("Removed like from post {post_id} ({likes} likes)")),
            }
            Ok(())
        }
        PostCommands::Comment { post_id, text } => {
            ctx.store.update(|doc| {
                let me = doc.current_user.clone();
                add_comment(doc, post_id, me.user_id, &me.username, &text)
            })?;
            output.success("Comment added!");
            Ok(())
        }
    }
}

fn handle_create(ctx: &AppContext, content: &str, image: Option<PathBuf>, output: &OutputManager) -> Result<()> {
    // Reject an empty caption before copying anything into the images directory.
    required_text("content", content)?;

    let (_, post_id) = with_stored_image(ctx.store.images_dir(), image.as_deref(), |image_path| {
        if let Some(stored) = &image_path {
            output.verbose(&format!("Image stored at {stored}"));
        }
        ctx.store.update(|doc| {
            let me = doc.current_user.clone();
            create_post(doc, me.user_id, &me.username, content, image_path)
        })
    })?;

    output.success(&format!("Post {post_id} created successfully!"));
    Ok(())
}

fn handle_show(ctx: &AppContext, post_id: u64, output: &OutputManager) -> Result<()> {
    let doc = ctx.store.load()?;
    let post = doc.post(post_id).ok_or(StoreError::NotFound { entity: "post", id: post_id })?;
    output.display(&PostDetail::new(post, doc.current_user.user_id))
}

fn owned_post_error(err: StoreError, post_id: u64) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::anyhow!("Post {post_id} not found or not owned by you")
    } else {
        err.into()
    }
}
