use anyhow::Result;
use clap::ValueEnum;
use colored::{Color, Colorize};
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use serde::Serialize;

use crate::theme::{ColorTheme, ICONS};

/// Output format options for CLI commands
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

/// Global CLI options that affect output and behavior
#[derive(Clone, Debug)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Table,
            quiet: false,
            verbose: false,
            no_color: false,
        }
    }
}

/// Trait for data that can be displayed as a table
pub trait TableDisplay {
    fn to_table(&self, output: &OutputManager) -> Table;
    fn to_compact(&self) -> String;
}

/// Output manager handles formatting and display
pub struct OutputManager {
    pub options: GlobalOptions,
    theme: ColorTheme,
}

impl OutputManager {
    pub fn new(options: GlobalOptions, theme: ColorTheme) -> Self {
        Self { options, theme }
    }

    /// Display data according to the configured output format
    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }

        match self.options.output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                println!("{json}");
            }
            OutputFormat::Table => {
                let table = data.to_table(self);
                println!("{table}");
            }
            OutputFormat::Compact => {
                println!("{}", data.to_compact());
            }
        }
        Ok(())
    }

    /// Status lines are suppressed in JSON mode so stdout stays parseable.
    fn chatty(&self) -> bool {
        !self.options.quiet && self.options.output_format != OutputFormat::Json
    }

    fn iconed(&self, icon: &str, message: &str, color: Color) -> String {
        if self.options.no_color {
            format!("{icon} {message}")
        } else {
            format!("{} {}", icon.color(color), message.color(color))
        }
    }

    /// Display a success message with color and icon
    pub fn success(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.iconed(ICONS.success, message, self.theme.success));
        }
    }

    /// Display an error message with color and icon
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.iconed(ICONS.error, message, self.theme.error));
    }

    /// Display a warning message
    pub fn warning(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.iconed(ICONS.warning, message, self.theme.warning));
        }
    }

    /// Display info message with color and icon
    pub fn info(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.iconed(ICONS.info, message, self.theme.info));
        }
    }

    /// Display verbose information (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            eprintln!("{}", self.iconed(ICONS.arrow, message, self.theme.muted));
        }
    }

    /// Display a heading
    pub fn heading(&self, text: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("\n{text}\n{}", "=".repeat(text.chars().count()))
            } else {
                format!("\n{}", text.color(self.theme.primary).bold())
            };
            println!("{output}");
        }
    }

    /// Display a key-value pair
    pub fn key_value(&self, key: &str, value: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("{key}: {value}")
            } else {
                format!("{}: {}", key.color(self.theme.key).bold(), value.color(self.theme.value))
            };
            println!("{output}");
        }
    }

    /// Display a bullet list item
    pub fn bullet(&self, text: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("  {} {text}", ICONS.bullet)
            } else {
                format!("  {} {text}", ICONS.bullet.color(self.theme.muted))
            };
            println!("{output}");
        }
    }

    /// Create a themed table
    pub fn create_table(&self) -> Table {
        let mut table = Table::new();

        if !self.options.no_color {
            table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
        } else {
            table.load_preset(comfy_table::presets::ASCII_FULL);
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);

        table
    }

    /// Add themed header to table
    pub fn add_table_header(&self, table: &mut Table, headers: &[&str]) {
        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h).add_attribute(Attribute::Bold);
                if self.options.no_color {
                    cell
                } else {
                    cell.fg(TableColor::Cyan)
                }
            })
            .collect();
        table.set_header(header_cells);
    }

    /// A cell tinted with `color` unless colors are disabled.
    pub fn tinted(&self, text: impl ToString, color: TableColor) -> Cell {
        let cell = Cell::new(text.to_string());
        if self.options.no_color { cell } else { cell.fg(color) }
    }
}
