use anyhow::Result;
use clap::Subcommand;

use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Data File",
    commands: &[
        "blogdoc store init                       # Seed sample data if no file exists",
        "blogdoc store init --force               # Overwrite with sample data",
        "blogdoc store path                       # Show resolved file locations",
    ],
}];

#[derive(Subcommand)]
pub enum StoreCommands {
    /// Create the data file with sample content
    #[command(name = "init")]
    Init {
        /// Replace an existing data file
        #[arg(long)]
        force: bool,
    },

    /// Show where data and images are stored
    #[command(name = "path")]
    Path,
}

pub fn handle_store_commands(command: StoreCommands, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let store = &ctx.store;
    match command {
        StoreCommands::Init { force } => {
            if store.exists() && !force {
                output.warning(&format!("{} already exists", store.data_file().display()));
                output.info("Use --force to replace it with sample data.");
                return Ok(());
            }
            let doc = store.reset()?;
            output.success(&format!(
                "Seeded {} with {} sample posts",
                store.data_file().display(),
                doc.posts.len()
            ));
        }
        StoreCommands::Path => {
            let config = ctx
                .config_path
                .as_ref()
                .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string());
            output.key_value("Config", &config);
            output.key_value("Data file", &store.data_file().display().to_string());
            output.key_value("Images", &store.images_dir().display().to_string());
            if !store.exists() {
                output.bullet("Data file does not exist yet; it is created on first use.");
            }
        }
    }
    Ok(())
}
