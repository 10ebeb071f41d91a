mod commands;
mod context;
mod examples;
mod help;
mod output;
mod theme;
mod views;

use std::io::{self, Write as IoWrite};
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand, error::ErrorKind};

use commands::{
    admin::{AdminCommands, handle_admin_commands},
    feed::{FeedArgs, handle_feed},
    notifications::{NotificationCommands, handle_notification_commands},
    post::{PostCommands, handle_post_commands},
    store::{StoreCommands, handle_store_commands},
    user::{UserCommands, handle_user_commands},
};
use context::AppContext;
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::ColorTheme;

#[derive(Parser)]
#[command(name = "blogdoc")]
#[command(version)]
#[command(
    about = "A single-user blogging feed stored in one JSON file",
    long_about = r#"Command-line front end for a blogging feed whose whole state
lives in a single JSON document:

• Posts with optional image attachments, likes, and comments
• Profiles with post and like totals, follows, and notifications
• Sample content seeded on first run; a corrupt file is regenerated

Commands:
  feed           Browse posts, newest first
  post           Create, edit, like, and comment on posts
  user           Profiles, accounts, and follows
  notifications  Likes, comments, and follows on your content
  store          Initialize the data file and show its location
  admin          List and remove any user or post
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Config file (defaults to ./blogdoc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data file to use instead of the configured one
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn parse_with_styles(theme: &ColorTheme) -> Self {
        let parsed = help::decorate(Cli::command(), theme)
            .try_get_matches()
            .and_then(|matches| Cli::from_arg_matches(&matches));

        match parsed {
            Ok(cli) => cli,
            Err(err) => {
                let to_stdout = matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
                let _ = blank_line(to_stdout);
                if let Err(print_err) = err.print()
                    && print_err.kind() != io::ErrorKind::BrokenPipe
                {
                    eprintln!("Failed to display message: {print_err}");
                }
                let _ = blank_line(to_stdout);
                std::process::exit(err.exit_code());
            }
        }
    }
}

fn blank_line(to_stdout: bool) -> io::Result<()> {
    if to_stdout {
        let mut stdout = io::stdout();
        stdout.write_all(b"\n")?;
        stdout.flush()
    } else {
        let mut stderr = io::stderr();
        stderr.write_all(b"\n")?;
        stderr.flush()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the post feed, newest first
    Feed(FeedArgs),

    /// Create, edit, delete, like, and comment on posts
    #[command(subcommand)]
    Post(PostCommands),

    /// Profiles, accounts, and follows
    #[command(subcommand)]
    User(UserCommands),

    /// Your notifications
    #[command(subcommand)]
    Notifications(NotificationCommands),

    /// Data file management
    #[command(subcommand)]
    Store(StoreCommands),

    /// Moderate users and posts
    #[command(subcommand)]
    Admin(AdminCommands),
}

fn main() {
    let theme = ColorTheme::default();
    let cli = Cli::parse_with_styles(&theme);

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let global_options = GlobalOptions {
        output_format: cli.output.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };
    let output = OutputManager::new(global_options, theme);

    let _ = blank_line(true);
    if let Err(err) = execute(cli, &output) {
        output.error(&format!("{err:#}"));
        let _ = blank_line(true);
        std::process::exit(1);
    }
    let _ = blank_line(true);
}

fn execute(cli: Cli, output: &OutputManager) -> Result<()> {
    let ctx = AppContext::resolve(cli.config.as_deref(), cli.data_file.as_deref())?;

    match cli.command {
        Commands::Feed(args) => handle_feed(args, &ctx, output),
        Commands::Post(cmd) => handle_post_commands(cmd, &ctx, output),
        Commands::User(cmd) => handle_user_commands(cmd, &ctx, output),
        Commands::Notifications(cmd) => handle_notification_commands(cmd, &ctx, output),
        Commands::Store(cmd) => handle_store_commands(cmd, &ctx, output),
        Commands::Admin(cmd) => handle_admin_commands(cmd, &ctx, output),
    }
}
