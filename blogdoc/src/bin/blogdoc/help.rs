//! Themed `--help` output: clap styles, per-command examples, and the
//! top-level appendix.

use std::fmt::Write;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style};
use clap::{ColorChoice, Command};
use colored::control::ShouldColorize;
use colored::{Color, Colorize};

use crate::examples::{ExampleGroup, command_examples};
use crate::theme::{ColorTheme, ICONS};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("BLOGDOC_DATA_FILE", "Path of the JSON data file (overrides blogdoc.toml)"),
    ("BLOGDOC_IMAGES_DIR", "Directory image attachments are copied into"),
    ("RUST_LOG", "Log filter, e.g. 'blogdoc=debug'"),
];

struct Painter<'a> {
    use_color: bool,
    theme: &'a ColorTheme,
}

impl Painter<'_> {
    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        match (self.use_color, bold) {
            (false, _) => text.to_string(),
            (true, false) => text.color(color).to_string(),
            (true, true) => text.color(color).bold().to_string(),
        }
    }

    fn examples(&self, groups: &[ExampleGroup]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.paint("Examples:", self.theme.highlight, true));
        for (index, group) in groups.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "  {}", self.paint(group.title, self.theme.primary, true));
            for line in group.commands {
                let _ = writeln!(
                    out,
                    "    {} {}",
                    self.paint(ICONS.arrow, self.theme.secondary, false),
                    self.paint(line, self.theme.secondary, false)
                );
            }
        }
        out
    }

    fn appendix(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.paint("Environment Variables:", self.theme.highlight, true));
        for (key, description) in ENVIRONMENT_VARIABLES {
            let _ = writeln!(
                out,
                "  {}  {}",
                self.paint(key, self.theme.key, true),
                self.paint(description, self.theme.value, false)
            );
        }
        let _ = writeln!(
            out,
            "\n{} {}",
            self.paint("Tip:", self.theme.highlight, true),
            self.paint(
                "Use 'blogdoc <command> --help' to view examples for each command.",
                self.theme.secondary,
                false
            )
        );
        out
    }
}

/// Decorates the derived command with theme styles, examples, and the appendix.
pub fn decorate(command: Command, theme: &ColorTheme) -> Command {
    let painter = Painter {
        use_color: ShouldColorize::from_env().should_colorize(),
        theme,
    };

    let mut command = command
        .after_long_help(painter.appendix())
        .color(if painter.use_color { ColorChoice::Auto } else { ColorChoice::Never })
        .styles(styles(theme));

    for example in command_examples() {
        let help = painter.examples(example.groups);
        command = command.mut_subcommand(example.name, |sub| sub.after_long_help(help));
    }
    command
}

fn styles(theme: &ColorTheme) -> Styles {
    let fg = |color: Color| Style::new().fg_color(Some(to_clap_color(color)));
    Styles::styled()
        .usage(fg(theme.primary).bold())
        .header(fg(theme.highlight).bold())
        .literal(fg(theme.secondary))
        .placeholder(fg(theme.muted))
        .valid(fg(theme.success))
        .invalid(fg(theme.warning))
        .error(fg(theme.error).bold())
}

fn to_clap_color(color: Color) -> ClapColor {
    let ansi = match color {
        Color::TrueColor { r, g, b } => return ClapColor::Rgb(RgbColor(r, g, b)),
        Color::Black => AnsiColor::Black,
        Color::Red => AnsiColor::Red,
        Color::Green => AnsiColor::Green,
        Color::Yellow => AnsiColor::Yellow,
        Color::Blue => AnsiColor::Blue,
        Color::Magenta => AnsiColor::Magenta,
        Color::Cyan => AnsiColor::Cyan,
        Color::White => AnsiColor::White,
        Color::BrightBlack => AnsiColor::BrightBlack,
        Color::BrightRed => AnsiColor::BrightRed,
        Color::BrightGreen => AnsiColor::BrightGreen,
        Color::BrightYellow => AnsiColor::BrightYellow,
        Color::BrightBlue => AnsiColor::BrightBlue,
        Color::BrightMagenta => AnsiColor::BrightMagenta,
        Color::BrightCyan => AnsiColor::BrightCyan,
        Color::BrightWhite => AnsiColor::BrightWhite,
    };
    ClapColor::Ansi(ansi)
}
